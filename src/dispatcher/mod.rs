//! # Dispatcher Module
//!
//! Entry point for generation requests: maps an inbound `{type, payload}`
//! action to an archetype, runs the engine, places the files and registers
//! the route.
//!
//! ## Action Identifiers
//!
//! `org.umi-plugin-page-creator.<name>` or the bare `<name>`, where `<name>`
//! is one of `shortForm`, `shortFormModal`, `longForm`, `longFormModal`,
//! `shortDetail`, `shortDetailModal`, `longDetail`, `longDetailModal`,
//! `table` and `tableModal`. An unknown name inside the namespace renders a
//! `shortForm`; identifiers from other namespaces are rejected.
//!
//! ## Request Flow
//!
//! 1. Resolve the action to an archetype and decode the payload into a
//!    [`PageSpec`](crate::spec::PageSpec)
//! 2. Assemble every artifact (primary plus optional companion detail page)
//!    and format each
//! 3. Plan placement for all files; an existing target directory fails here
//! 4. For a routed page, read the route config and compute the patched text
//!    in memory
//! 5. Write all files
//! 6. Write the route config if the patch changed it
//!
//! Nothing is written unless steps 1 to 4 succeed. Nested components
//! (payload with `dirName`) skip steps 4 and 6 and never read the route
//! config.
//!
//! ## Replies
//!
//! [`Dispatcher::handle`] always returns a
//! [`GenerationResult`](crate::spec::GenerationResult): `{ok: true,
//! message: "File created successfully"}` or `{ok: false, message}` with the
//! error's display text, e.g. `Directory already exists: ...`.
//!
//! ```rust,no_run
//! use page_creator::config::Project;
//! use page_creator::dispatcher::Dispatcher;
//! use page_creator::spec::Action;
//! use serde_json::json;
//!
//! let dispatcher = Dispatcher::new(Project::open(".").unwrap());
//! let reply = dispatcher.handle(&Action {
//!     action_type: "org.umi-plugin-page-creator.table".into(),
//!     payload: json!({
//!         "path": "/orders",
//!         "formItems": [{"type": "input", "label": "Customer", "name": "customer"}]
//!     }),
//! });
//! println!("{}", reply.message);
//! ```

mod action;
mod core;

pub use action::{resolve_action, FALLBACK_ARCHETYPE};
pub use core::{Dispatcher, Outcome, SUCCESS_MESSAGE};

#[cfg(test)]
mod tests;
