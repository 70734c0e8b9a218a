//! Result and error types for Pagina.

use thiserror::Error;

use crate::accessor::Operation;
use crate::element::ElementKind;

/// Result type for Pagina operations
pub type PaginaResult<T> = Result<T, PaginaError>;

/// Errors that can occur in Pagina
#[derive(Debug, Error)]
pub enum PaginaError {
    /// A field name was registered twice on the same registry
    #[error("Field '{name}' is already registered")]
    DuplicateField {
        /// The colliding field name
        name: String,
    },

    /// An accessor was requested for a name absent from the registry
    #[error("Unknown field '{name}'")]
    UnknownField {
        /// The unregistered field name
        name: String,
    },

    /// A required reference was missing at instance creation
    #[error("Construction failed: {message}")]
    Construction {
        /// What was missing
        message: String,
    },

    /// The driver could not locate the element
    #[error("Could not resolve element at [{locator}]: {message}")]
    Resolution {
        /// The locator that failed to match
        locator: String,
        /// Driver-reported detail
        message: String,
    },

    /// An operation was invoked that the field's kind does not generate
    #[error("Field '{field}' ({kind}) does not support the {operation} operation")]
    UnsupportedOperation {
        /// The field name
        field: String,
        /// The field's element kind
        kind: ElementKind,
        /// The rejected operation
        operation: Operation,
    },
}

impl PaginaError {
    /// Build a `Resolution` error with driver detail.
    #[must_use]
    pub fn resolution(locator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution {
            locator: locator.into(),
            message: message.into(),
        }
    }

    /// Build a `Construction` error.
    #[must_use]
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction {
            message: message.into(),
        }
    }
}
