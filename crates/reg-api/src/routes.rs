//! # Routes
//!
//! Axum router configuration for the payment-collection API.

use crate::cors;
use crate::handlers;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{any, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routes:
/// - POST /createPaymentIntent - Create a payment intent for a registration
/// - ANY  /healthCheck - Health check
///
/// The CORS layer answers `OPTIONS` on any path with 204 and stamps the
/// cross-origin headers on every response.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/createPaymentIntent", post(handlers::create_payment_intent))
        .route("/healthCheck", any(handlers::health_check))
        // Middleware
        .layer(middleware::from_fn(cors::apply_cors))
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
