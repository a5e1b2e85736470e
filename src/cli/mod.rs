//! # CLI Module
//!
//! Command-line front end of the `page-creator-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate a page or component and register its route:
//!
//! ```bash
//! page-creator-gen generate --action table --payload orders.json --root ./my-app
//! ```
//!
//! Prints the `{ok, message}` reply. Exits non-zero when `ok` is false.
//!
//! ### `render`
//!
//! Print the formatted source without writing anything:
//!
//! ```bash
//! page-creator-gen render --action longFormModal --payload order.yaml
//! ```
//!
//! ### `add-route`
//!
//! Register a route for a page that already exists:
//!
//! ```bash
//! page-creator-gen add-route --path /reports --title Reports
//! ```
//!
//! ### `export`
//!
//! Print the `{formConfig, formItems, initialFetch, submitFetch}` document of a
//! payload, the format the configuration UI imports.
//!
//! ### `serve`
//!
//! Answer `{type, payload}` actions read from stdin, one JSON object per
//! line, with one `{ok, message}` line each on stdout. Requests are handled
//! strictly in order. Logs go to stderr.
//!
//! ```bash
//! echo '{"type":"org.umi-plugin-page-creator.table","payload":{"path":"/orders","formItems":[]}}' \
//!     | page-creator-gen serve --root ./my-app
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use page_creator::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;


pub use commands::{run_cli, serve, Cli, Commands};
