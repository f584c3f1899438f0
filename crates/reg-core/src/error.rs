//! # Payment Error Types
//!
//! Typed error handling for the registration payment backend.
//! All payment operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Request validation failed (missing or malformed fields)
    #[error("{0}")]
    Validation(String),

    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The payment method itself was rejected by the processor
    #[error("Card error: {message}")]
    Card {
        message: String,
        code: Option<String>,
    },

    /// Any other processor-side failure
    #[error("Processor error: {message}")]
    Processor {
        message: String,
        error_type: Option<String>,
        code: Option<String>,
    },

    /// Network/HTTP error communicating with the processor
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Validation(_) => 400,
            PaymentError::Configuration(_) => 500,
            PaymentError::Card { .. } => 400,
            PaymentError::Processor { .. } => 500,
            PaymentError::Network(_) => 500,
            PaymentError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
