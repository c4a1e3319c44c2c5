//! Shared error types used across submodules.

use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImpedanceError {
    /// Raised when a network, sweep or query is malformed.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Raised when an element has neither a stored value nor an override.
    #[error("value not found for element '{label}'")]
    MissingValue {
        /// Label of the unresolved element.
        label: String,
    },
    /// Raised when no node of a tree carries the requested label.
    #[error("could not locate impedance with the label '{label}' within '{within}'")]
    Lookup {
        /// The label that was searched for.
        label: String,
        /// Display form of the searched tree.
        within: String,
    },
    /// Raised when two nodes have no closed-form break frequency.
    #[error("unsupported break-frequency pair: {0}")]
    UnsupportedPair(String),
}

/// Result alias with [`ImpedanceError`] as the error type.
pub type Result<T> = std::result::Result<T, ImpedanceError>;
