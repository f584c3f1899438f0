//! # reg-stripe
//!
//! Stripe payment-intent processor for the registration payment backend.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reg_stripe::StripeProcessor;
//! use reg_core::{IntentParams, PaymentProcessor};
//!
//! // Create processor from environment (reads STRIPE_SECRET_KEY)
//! let processor = StripeProcessor::from_env()?;
//!
//! // Create a payment intent
//! let intent = processor.create_payment_intent(&params).await?;
//!
//! // Hand intent.client_secret to the client application
//! ```

pub mod config;
pub mod intents;

// Re-exports
pub use config::StripeConfig;
pub use intents::StripeProcessor;
