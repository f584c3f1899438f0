//! # reg-core
//!
//! Core types and traits for the registration payment backend.
//!
//! This crate provides:
//! - `PaymentProcessor` trait for implementing payment providers
//! - `IntentParams` and `PaymentIntent` for the payment-intent flow
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use reg_core::{IntentParams, PaymentProcessor};
//!
//! // Validate an inbound request
//! let params = IntentParams::from_request(
//!     body.amount.as_ref(),
//!     body.registration_id.as_ref(),
//!     body.registration_type.as_ref(),
//! )?;
//!
//! // Create the intent using a processor
//! let intent = processor.create_payment_intent(&params).await?;
//!
//! // Hand intent.client_secret to the client application
//! ```

pub mod error;
pub mod intent;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use intent::{
    BoxedPaymentProcessor, IntentParams, PaymentIntent, PaymentProcessor, CURRENCY,
    INVALID_AMOUNT_MESSAGE, METADATA_SOURCE, MISSING_PARAMS_MESSAGE,
};
