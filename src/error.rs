//! # Error Module
//!
//! Every stage of a generation request (assembly, formatting, placement and
//! route patching) reports failures through [`GenerateError`]. The dispatcher
//! turns any of them into a `{ok: false, message}` [`GenerationResult`] using
//! the `Display` text below, so messages are written for the person who
//! submitted the page spec.
//!
//! A route that already exists is deliberately *not* an error: see
//! [`crate::routes::RouteStatus::AlreadyPresent`].
//!
//! [`GenerationResult`]: crate::spec::GenerationResult

use std::fmt;
use std::path::PathBuf;

/// Failure taxonomy for page generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The requested archetype (or action identifier) is not one the engine renders
    UnsupportedArchetype {
        /// The identifier as received
        name: String,
    },
    /// A field uses a kind outside the fixed catalogue
    UnsupportedFieldKind {
        /// Field name
        field: String,
        /// Kind as received
        kind: String,
    },
    /// A form, table or detail archetype was requested with no fields
    EmptySpec {
        /// Action identifier of the archetype that was requested
        archetype: String,
    },
    /// Two fields share a name once sanitized into identifiers
    DuplicateFieldName {
        /// The colliding identifier
        name: String,
    },
    /// An api key is not a dotted identifier path
    InvalidApiKey {
        /// The key as received
        key: String,
    },
    /// The target path or component name is unusable
    InvalidTarget {
        /// Why the target was rejected
        reason: String,
    },
    /// The inbound payload could not be decoded
    InvalidPayload {
        /// Decoder message
        message: String,
    },
    /// The route configuration does not follow the expected structure
    RouteTableNotFound {
        /// What was missing or malformed
        reason: String,
    },
    /// Text handed to the formatter (or a route config) does not parse
    SyntaxError {
        /// Parser or formatter message
        message: String,
    },
    /// The directory a file would be written to already exists
    TargetExists {
        /// The existing directory
        path: PathBuf,
    },
    /// An askama template failed to render
    Render {
        /// Template error message
        message: String,
    },
    /// Filesystem failure while reading or writing
    Io {
        /// Path that was being accessed
        path: PathBuf,
        /// OS error message
        message: String,
    },
}

impl GenerateError {
    /// Wrap an `std::io::Error` together with the path it concerns
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Stable snake_case name of the variant, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            GenerateError::UnsupportedArchetype { .. } => "unsupported_archetype",
            GenerateError::UnsupportedFieldKind { .. } => "unsupported_field_kind",
            GenerateError::EmptySpec { .. } => "empty_spec",
            GenerateError::DuplicateFieldName { .. } => "duplicate_field_name",
            GenerateError::InvalidApiKey { .. } => "invalid_api_key",
            GenerateError::InvalidTarget { .. } => "invalid_target",
            GenerateError::InvalidPayload { .. } => "invalid_payload",
            GenerateError::RouteTableNotFound { .. } => "route_table_not_found",
            GenerateError::SyntaxError { .. } => "syntax_error",
            GenerateError::TargetExists { .. } => "target_exists",
            GenerateError::Render { .. } => "render",
            GenerateError::Io { .. } => "io",
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::UnsupportedArchetype { name } => {
                write!(f, "Unsupported archetype '{}'", name)
            }
            GenerateError::UnsupportedFieldKind { field, kind } => {
                write!(f, "Field '{}' uses unsupported kind '{}'", field, kind)
            }
            GenerateError::EmptySpec { archetype } => {
                write!(
                    f,
                    "No fields configured for '{}'. Add at least one field before generating.",
                    archetype
                )
            }
            GenerateError::DuplicateFieldName { name } => {
                write!(f, "Field name '{}' is used more than once", name)
            }
            GenerateError::InvalidApiKey { key } => {
                write!(
                    f,
                    "Api key '{}' is not a dotted identifier path (e.g. order.detail)",
                    key
                )
            }
            GenerateError::InvalidTarget { reason } => write!(f, "Invalid target: {}", reason),
            GenerateError::InvalidPayload { message } => {
                write!(f, "Invalid payload: {}", message)
            }
            GenerateError::RouteTableNotFound { reason } => {
                write!(f, "Route table not found: {}", reason)
            }
            GenerateError::SyntaxError { message } => {
                write!(f, "Generated source does not parse: {}", message)
            }
            GenerateError::TargetExists { path } => {
                write!(f, "Directory already exists: {}", path.display())
            }
            GenerateError::Render { message } => write!(f, "Template rendering failed: {}", message),
            GenerateError::Io { path, message } => {
                write!(f, "I/O error on {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for GenerateError {}

impl From<askama::Error> for GenerateError {
    fn from(err: askama::Error) -> Self {
        GenerateError::Render {
            message: err.to_string(),
        }
    }
}

/// Result alias used by the engine, patcher and materializer
pub type Result<T> = std::result::Result<T, GenerateError>;
