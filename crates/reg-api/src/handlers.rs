//! # Request Handlers
//!
//! Axum request handlers for the payment-collection API.
//! Validation failures and processor errors all come back as JSON bodies
//! with the status code picked by the error taxonomy.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use reg_core::{IntentParams, PaymentError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument};

/// Generic body for a missing processor; never echoes configuration detail
pub const CONFIG_ERROR_MESSAGE: &str = "Payment processing is not configured";

/// Lead message for unexpected processor failures
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Failed to create payment intent";

/// Health-check body message
pub const HEALTH_MESSAGE: &str = "Registration payment service is running";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create payment intent request.
///
/// Fields stay raw JSON values here: clients send `registrationId` and
/// `registrationType` as either strings or numbers, and validation has to
/// distinguish absent/empty fields from a non-numeric amount to pick the
/// right error message. `IntentParams::from_request` does that work.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub registration_id: Option<Value>,
    #[serde(default)]
    pub registration_type: Option<Value>,
}

/// Create payment intent response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub success: bool,
    /// Token the client uses to confirm the payment
    pub client_secret: String,
    pub payment_intent_id: String,
    /// Amount in the smallest currency unit, as seen by the processor
    pub amount: i64,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            error_type: None,
            code: None,
        }
    }
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match err {
        PaymentError::Validation(message) => ErrorResponse::new(message),
        PaymentError::Configuration(_) => ErrorResponse::new(CONFIG_ERROR_MESSAGE),
        PaymentError::Card { message, code } => ErrorResponse {
            error: message,
            message: None,
            error_type: None,
            code,
        },
        PaymentError::Processor {
            message,
            error_type,
            code,
        } => ErrorResponse {
            error: UNEXPECTED_ERROR_MESSAGE.to_string(),
            message: Some(message),
            error_type,
            code,
        },
        PaymentError::Network(message) | PaymentError::Serialization(message) => ErrorResponse {
            error: UNEXPECTED_ERROR_MESSAGE.to_string(),
            message: Some(message),
            error_type: None,
            code: None,
        },
    };

    (status, Json(body))
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a payment intent for a registration
#[instrument(skip(state, request))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentIntentRequest>,
) -> Result<Json<CreatePaymentIntentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let params = IntentParams::from_request(
        request.amount.as_ref(),
        request.registration_id.as_ref(),
        request.registration_type.as_ref(),
    )
    .map_err(payment_error_to_response)?;

    let processor = state.processor.as_ref().ok_or_else(|| {
        error!("Payment request received but no processor is configured");
        payment_error_to_response(PaymentError::Configuration(
            "payment processor unset".to_string(),
        ))
    })?;

    info!(
        "Creating payment intent: amount={}, registration_id={}, registration_type={}",
        params.amount, params.registration_id, params.registration_type
    );

    let intent = processor
        .create_payment_intent(&params)
        .await
        .map_err(|e| {
            error!("Failed to create payment intent: {}", e);
            payment_error_to_response(e)
        })?;

    info!("Created payment intent: {}", intent.id);

    Ok(Json(CreatePaymentIntentResponse {
        success: true,
        client_secret: intent.client_secret,
        payment_intent_id: intent.id,
        amount: intent.amount,
    }))
}

/// Health check endpoint (any method)
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "message": HEALTH_MESSAGE,
    }))
}
