//! # Routes Module
//!
//! Appends a route entry to a hand-written route configuration without
//! disturbing anything else in the file.
//!
//! ## Pipeline
//!
//! ```text
//! source text → tree-sitter (typescript / json grammar) → syntax (span-carrying
//!             module model) → dialect::locate → duplicate check
//!             → dialect::render_entry → splice → patched text
//! ```
//!
//! - [`syntax`] - folds the concrete tree into imports, top-level bindings,
//!   the default export and object / array / call expressions, keeping the
//!   byte range of every node; everything else stays opaque. Any error node
//!   in the tree is reported as a syntax error before anything is located
//! - [`RouteDialect`] - where the table lives and how a new entry is written.
//!   [`ScriptDialect`] handles umi `config.ts` style modules (a plain object,
//!   `defineConfig({...})`, or an identifier bound to either, with `routes`
//!   inline or through a binding); [`JsonDialect`] handles a JSON document
//!   with a top-level `routes` array
//! - [`insert_route`] / [`insert_route_with`] - the splice itself
//!
//! The output is the input with one insertion near the end of the route
//! array: indentation comes from the sibling entries, the quote style from
//! the existing `path` strings, and a trailing comma is written only when
//! the array already uses one, and a wrapped entry uses the file's line
//! endings. A comment after the last entry stays on its line.
//!
//! A path that is already registered (top level or one nested `routes`
//! level) is not an error: the result is [`RouteStatus::AlreadyPresent`] and
//! the text is returned byte-for-byte unchanged.
//!
//! ## Example
//!
//! ```rust
//! use page_creator::routes::{insert_route, RouteStatus};
//! use page_creator::spec::RouteEntry;
//!
//! let src = "export default {\n  routes: [\n    { path: '/', component: './index' },\n  ],\n};\n";
//! let patch = insert_route(src, &RouteEntry::for_page("/orders", None)).unwrap();
//! assert_eq!(patch.status, RouteStatus::Inserted);
//! assert!(patch.text.contains("    { path: '/orders', component: './orders', exact: true },\n  ],"));
//! ```

mod dialect;
mod patch;
pub mod syntax;

pub(crate) use dialect::quote_str;
pub use dialect::{dialect_for_path, EntryLayout, JsonDialect, RouteDialect, RouteTable, ScriptDialect};
pub use patch::{detect_indent_unit, insert_route, insert_route_with, RoutePatch, RouteStatus, DEFAULT_PRINT_WIDTH};

#[cfg(test)]
mod tests;
