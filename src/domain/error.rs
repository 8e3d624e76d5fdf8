//! Error types for the Stockroom plugin.
//!
//! This module defines the centralized error type [`InventoryError`] and a type
//! alias [`Result`] used throughout the plugin. Request failures of every kind
//! (local validation, HTTP status, undecodable bodies) funnel into this one enum
//! so the event handler can log and surface them uniformly.

use thiserror::Error;

/// The main error type for Stockroom operations.
///
/// # Examples
///
/// ```
/// use stockroom::InventoryError;
///
/// let err = InventoryError::Http { status: 404 };
/// assert_eq!(err.to_string(), "HTTP error! Status: 404");
/// ```
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A mutating request was rejected before being sent.
    ///
    /// Raised for empty required fields, a non-positive or non-numeric price,
    /// or a product id input that is not an integer.
    #[error("{0}")]
    Validation(String),

    /// The inventory service answered with a non-success status.
    ///
    /// Network-level failures are reported by the host as non-success results
    /// and end up here as well.
    #[error("HTTP error! Status: {status}")]
    Http {
        /// HTTP status code returned for the request.
        status: u16,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request body could not be serialized.
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// A response arrived whose request context is missing or malformed.
    #[error("Request context error: {0}")]
    Context(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

impl InventoryError {
    /// Builds the validation error shared by create and update.
    #[must_use]
    pub fn incomplete_draft() -> Self {
        Self::Validation("Please fill out all fields correctly.".to_string())
    }
}

/// A specialized `Result` type for Stockroom operations.
pub type Result<T> = std::result::Result<T, InventoryError>;
