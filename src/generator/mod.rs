//! # Generator Module
//!
//! The template assembly engine: turns a [`PageSpec`](crate::spec::PageSpec)
//! into the source text of a React + antd page or component.
//!
//! ## Overview
//!
//! Ten archetypes are supported, five layouts each with a plain and a modal
//! variant:
//!
//! | Layout | Fields render as | Plain shell | Modal shell |
//! |--------|------------------|-------------|-------------|
//! | `shortForm` | `Form.Item` | `Card` + submit button | `Modal` with `onOk` submit |
//! | `longForm` | `Form.Item` in a responsive `Col` | `Card` + `Row` grid | `Modal` + `Row` grid |
//! | `shortDetail` | `Descriptions.Item` | `Card` | `Modal` without footer |
//! | `longDetail` | `Descriptions.Item` | `Card`, three columns | `Modal`, three columns |
//! | `table` | column object | `Card` + `Table` | `Modal` + `Table` |
//!
//! ## Architecture
//!
//! ```text
//! PageSpec → validate → fields (per-kind lookup table) ─┐
//!                     → imports (sorted antd union)    ─┼→ askama shell → source text
//!                     → api calls (declaration order)  ─┘
//! ```
//!
//! 1. [`fields`] renders the field fragment, already indented for the shell.
//!    Plain and modal shells place the same fragment at the same depth, so the
//!    field block is byte-identical between the two variants.
//! 2. `templates` holds one askama template per archetype under
//!    `templates/*.tsx.txt` and the [`assemble`] entry point.
//! 3. `format` normalizes the assembled text (builtin whitespace normalizer
//!    or the `prettier` CLI).
//!
//! A table always ends with an `edit` and a `delete` column after the field
//! columns. A form spec with `generate_detail_page` also yields a companion
//! detail artifact of the same variant ([`assemble_artifacts`]).
//!
//! ## Errors
//!
//! Validation runs before any rendering and stops at the first problem:
//! `EmptySpec`, then `DuplicateFieldName`, `InvalidApiKey` and
//! `UnsupportedFieldKind`. Nothing is returned for a spec that fails.
//!
//! ## Usage
//!
//! ```rust
//! use page_creator::generator::{assemble, BuiltinFormatter, Formatter};
//! use page_creator::spec::{Archetype, FieldKind, FormItemSpec, Layout, PageSpec};
//!
//! let mut spec = PageSpec::new(Archetype::plain(Layout::ShortForm), "/orders/new");
//! spec.fields.push(FormItemSpec::new(FieldKind::Input, "Name", "name"));
//! let source = BuiltinFormatter.format(&assemble(spec.archetype, &spec).unwrap()).unwrap();
//! assert!(source.contains("<Form.Item label=\"Name\" name=\"name\">"));
//! ```

pub mod fields;
mod format;
mod templates;

pub use format::{BuiltinFormatter, FormatOptions, Formatter, PrettierFormatter, PRETTIER_BIN_ENV};
pub use templates::{
    assemble, assemble_artifacts, validate_spec, Artifact, ArtifactRole, ShellContext,
};

#[cfg(test)]
mod tests;
