//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the payment processor and server configuration.

use reg_core::BoxedPaymentProcessor;
use reg_stripe::StripeProcessor;
use std::sync::Arc;
use tracing::{info, warn};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
///
/// `processor` is `None` when Stripe could not be configured at startup;
/// the server keeps running and the payment endpoint answers every request
/// with a configuration error until the key is provided.
#[derive(Clone)]
pub struct AppState {
    /// Payment processor, absent when the secret key is not configured
    pub processor: Option<BoxedPaymentProcessor>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the Stripe processor from the environment.
    ///
    /// A missing or malformed `STRIPE_SECRET_KEY` is not fatal: the failure
    /// is logged and the processor is left unset.
    pub fn new() -> Self {
        let config = AppConfig::from_env();

        let processor = match StripeProcessor::from_env() {
            Ok(stripe) => Some(Arc::new(stripe) as BoxedPaymentProcessor),
            Err(e) => {
                warn!("Stripe processor not initialized: {}", e);
                None
            }
        };

        if processor.is_some() {
            info!("Payment processor: stripe");
        }

        Self { processor, config }
    }

    /// Create an AppState with an explicit processor (or none).
    ///
    /// This is the injection seam the handler tests use to substitute a
    /// stub for the real Stripe client.
    pub fn with_processor(processor: Option<BoxedPaymentProcessor>) -> Self {
        Self {
            processor,
            config: AppConfig::from_env(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
