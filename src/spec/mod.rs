//! # Page Spec Module
//!
//! Typed description of what to generate.
//!
//! - [`PageSpec`] - the unit of generation: archetype, title, ordered fields,
//!   api keys, detail-page flag and target (routed page or nested component)
//! - [`FormItemSpec`] - one field; its [`FieldKind`] selects the snippet the
//!   engine renders
//! - [`RouteEntry`] - the record appended to the application's route table
//! - [`GenerationResult`] - the `{ok, message}` reply
//!
//! The [`document`](ConfigDocument) types cover the wire formats: the inbound
//! [`Action`]/[`Payload`] sent by the configuration UI and the exported
//! `{formConfig, formItems, initialFetch, submitFetch}` document.
//!
//! Specs are plain values. Nothing in the engine or patcher reaches back into
//! caller state; build a spec, hand it over, and it is never mutated.

mod document;
mod types;
mod validate;

pub use document::*;
pub use types::*;
pub use validate::*;
