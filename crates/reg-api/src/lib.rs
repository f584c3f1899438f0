//! # reg-api
//!
//! HTTP API layer for the registration payment backend.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The payment-intent endpoint and a health check
//! - Permissive CORS with preflight short-circuiting
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/createPaymentIntent` | Create a payment intent |
//! | OPTIONS | `/createPaymentIntent` | Preflight (204) |
//! | ANY | `/healthCheck` | Health check |

pub mod cors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
