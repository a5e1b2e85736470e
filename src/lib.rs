//! # page_creator
//!
//! **page_creator** scaffolds React + antd pages for a umi application from a
//! declarative page spec, and registers each new page in the application's
//! existing, hand-written route table.
//!
//! ## Overview
//!
//! A page spec names an archetype (short or long form, short or long detail
//! view, table; each plain or wrapped in a modal), an ordered list of fields,
//! the api endpoints called on load and on submit, and where the result goes.
//! From that the crate emits formatted `.tsx` source, writes it under the
//! pages root and appends one `{ path, component, exact }` entry to the route
//! configuration without disturbing anything else in that file.
//!
//! ## Architecture
//!
//! - **[`spec`]** - page spec model, inbound action/payload and the
//!   export/import document
//! - **[`generator`]** - template assembly engine (askama shells plus a
//!   per-field-kind snippet table) and the formatting service
//! - **[`routes`]** - route table patcher: tree-sitter parse, span-carrying syntax model,
//!   config dialects and the minimal-edit splice
//! - **[`materialize`]** - two-phase placement of rendered files
//! - **[`dispatcher`]** - maps actions to archetypes and runs the pipeline
//! - **[`config`]** - project layout and formatter settings (`page-creator.toml`,
//!   `PAGEGEN_*` environment variables)
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`error`]** - the [`GenerateError`] taxonomy
//! - **[`cli`]** - the `page-creator-gen` command line
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Dispatcher
//!     participant Engine as generator::assemble
//!     participant Formatter
//!     participant Materializer
//!     participant Patcher as routes::insert_route
//!     participant FS as File System
//!
//!     Caller->>Dispatcher: {type, payload}
//!     Dispatcher->>Dispatcher: resolve archetype, decode PageSpec
//!     Dispatcher->>Engine: assemble_artifacts(spec)
//!     Engine-->>Dispatcher: primary (+ detail) source
//!     Dispatcher->>Formatter: format(source)
//!     Dispatcher->>Materializer: plan(spec, artifacts)
//!     alt target directory exists
//!         Materializer-->>Caller: {ok: false, "Directory already exists"}
//!     end
//!     Dispatcher->>Patcher: patched route config (in memory)
//!     Dispatcher->>Materializer: write_all(plan)
//!     Materializer->>FS: index.tsx files
//!     Dispatcher->>FS: route config (only if changed)
//!     Dispatcher-->>Caller: {ok: true, "File created successfully"}
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use page_creator::generator::{assemble, BuiltinFormatter, Formatter};
//! use page_creator::routes::insert_route;
//! use page_creator::spec::{Archetype, FieldKind, FormItemSpec, Layout, PageSpec};
//!
//! let mut spec = PageSpec::new(Archetype::modal(Layout::Table), "/orders");
//! spec.fields.push(FormItemSpec::new(FieldKind::Input, "Customer", "customer"));
//! let source = BuiltinFormatter.format(&assemble(spec.archetype, &spec).unwrap()).unwrap();
//! assert!(source.contains("dataIndex: 'customer'"));
//!
//! let config = "export default {\n  routes: [],\n};\n";
//! let entry = spec.route_entry().unwrap();
//! let patched = insert_route(config, &entry).unwrap();
//! assert!(patched.text.contains("{ path: '/orders', component: './orders', exact: true },"));
//! ```
//!
//! ## Guarantees
//!
//! - Assembly is deterministic: equal specs give byte-identical output
//! - Field order is kept in every archetype, table columns included
//! - Plain and modal variants render the same field block
//! - Inserting a route that is already present changes nothing
//! - Existing route entries, comments and formatting are preserved
//! - Nothing is written unless assembly, formatting, placement and route
//!   lookup all succeed; an existing target directory is never overwritten

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod generator;
pub mod logging;
pub mod materialize;
pub mod routes;
pub mod spec;

pub use dispatcher::Dispatcher;
pub use error::GenerateError;
pub use spec::{Action, GenerationResult, PageSpec};
