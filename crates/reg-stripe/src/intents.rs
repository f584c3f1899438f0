//! # Stripe Payment Intents
//!
//! Implementation of the Stripe PaymentIntents API.
//! An intent is created server-side and confirmed client-side with the
//! returned client secret.

use crate::config::StripeConfig;
use async_trait::async_trait;
use reg_core::{
    IntentParams, PaymentError, PaymentIntent, PaymentProcessor, PaymentResult, CURRENCY,
    METADATA_SOURCE,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Stripe payment-intent processor
///
/// Talks to `POST /v1/payment_intents` directly over HTTPS with
/// form-encoded bodies, the wire format Stripe's API expects.
pub struct StripeProcessor {
    config: StripeConfig,
    client: Client,
}

impl StripeProcessor {
    /// Create a new Stripe processor
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Build form data for the Stripe API
    fn build_form(params: &IntentParams) -> Vec<(String, String)> {
        vec![
            ("amount".to_string(), params.amount.to_string()),
            ("currency".to_string(), CURRENCY.to_string()),
            (
                "automatic_payment_methods[enabled]".to_string(),
                "true".to_string(),
            ),
            (
                "metadata[registrationId]".to_string(),
                params.registration_id.clone(),
            ),
            (
                "metadata[registrationType]".to_string(),
                params.registration_type.clone(),
            ),
            ("metadata[source]".to_string(), METADATA_SOURCE.to_string()),
        ]
    }
}

#[async_trait]
impl PaymentProcessor for StripeProcessor {
    #[instrument(skip(self, params), fields(amount = params.amount))]
    async fn create_payment_intent(&self, params: &IntentParams) -> PaymentResult<PaymentIntent> {
        let form_params = Self::build_form(params);
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        debug!(
            "Creating Stripe payment intent: amount={}, registration_id={}",
            params.amount, params.registration_id
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            // Parse Stripe error
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(classify_stripe_error(error_response.error));
            }

            return Err(PaymentError::Processor {
                message: format!("HTTP {}: {}", status, body),
                error_type: None,
                code: None,
            });
        }

        let intent: StripePaymentIntentResponse = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        info!(
            "Created Stripe payment intent: id={}, status={}",
            intent.id, intent.status
        );

        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
            amount: intent.amount,
            status: intent.status,
        })
    }

    fn processor_name(&self) -> &'static str {
        "stripe"
    }
}

/// Map a Stripe error body onto the domain taxonomy. Stripe marks rejected
/// payment methods with `type: "card_error"`; everything else is opaque.
fn classify_stripe_error(error: StripeError) -> PaymentError {
    if error.error_type.as_deref() == Some("card_error") {
        PaymentError::Card {
            message: error.message,
            code: error.code,
        }
    } else {
        PaymentError::Processor {
            message: error.message,
            error_type: error.error_type,
            code: error.code,
        }
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripePaymentIntentResponse {
    id: String,
    client_secret: String,
    amount: i64,
    status: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_params() -> IntentParams {
        IntentParams {
            amount: 500,
            registration_id: "reg_42".to_string(),
            registration_type: "individual".to_string(),
        }
    }

    fn processor_for(server: &MockServer) -> StripeProcessor {
        let config = StripeConfig::new("sk_test_abc123").with_api_base_url(server.uri());
        StripeProcessor::new(config)
    }

    #[test]
    fn test_classify_card_error() {
        let err = classify_stripe_error(StripeError {
            message: "Your card was declined.".to_string(),
            error_type: Some("card_error".to_string()),
            code: Some("card_declined".to_string()),
        });

        match err {
            PaymentError::Card { message, code } => {
                assert_eq!(message, "Your card was declined.");
                assert_eq!(code.as_deref(), Some("card_declined"));
            }
            other => panic!("expected card error, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_other_error() {
        let err = classify_stripe_error(StripeError {
            message: "An unknown error occurred".to_string(),
            error_type: Some("api_error".to_string()),
            code: None,
        });

        match err {
            PaymentError::Processor {
                message,
                error_type,
                ..
            } => {
                assert_eq!(message, "An unknown error occurred");
                assert_eq!(error_type.as_deref(), Some("api_error"));
            }
            other => panic!("expected processor error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_payment_intent_success() {
        let server = MockServer::start().await;

        // Brackets arrive percent-encoded in the form body.
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .and(header("Authorization", "Bearer sk_test_abc123"))
            .and(body_string_contains("amount=500"))
            .and(body_string_contains("currency=usd"))
            .and(body_string_contains(
                "automatic_payment_methods%5Benabled%5D=true",
            ))
            .and(body_string_contains("metadata%5BregistrationId%5D=reg_42"))
            .and(body_string_contains(
                "metadata%5BregistrationType%5D=individual",
            ))
            .and(body_string_contains(
                "metadata%5Bsource%5D=registration-backend",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "pi_1",
                "client_secret": "secret_1",
                "amount": 500,
                "status": "requires_payment_method"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let intent = processor_for(&server)
            .create_payment_intent(&test_params())
            .await
            .unwrap();

        assert_eq!(intent.id, "pi_1");
        assert_eq!(intent.client_secret, "secret_1");
        assert_eq!(intent.amount, 500);
        assert_eq!(intent.status, "requires_payment_method");
    }

    #[tokio::test]
    async fn test_card_error_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({
                "error": {
                    "type": "card_error",
                    "code": "card_declined",
                    "message": "Your card was declined."
                }
            })))
            .mount(&server)
            .await;

        let err = processor_for(&server)
            .create_payment_intent(&test_params())
            .await
            .unwrap_err();

        match err {
            PaymentError::Card { message, code } => {
                assert_eq!(message, "Your card was declined.");
                assert_eq!(code.as_deref(), Some("card_declined"));
            }
            other => panic!("expected card error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": {
                    "type": "api_error",
                    "message": "Something went wrong on Stripe's end"
                }
            })))
            .mount(&server)
            .await;

        let err = processor_for(&server)
            .create_payment_intent(&test_params())
            .await
            .unwrap_err();

        match err {
            PaymentError::Processor {
                message,
                error_type,
                code,
            } => {
                assert_eq!(message, "Something went wrong on Stripe's end");
                assert_eq!(error_type.as_deref(), Some("api_error"));
                assert_eq!(code, None);
            }
            other => panic!("expected processor error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparseable_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let err = processor_for(&server)
            .create_payment_intent(&test_params())
            .await
            .unwrap_err();

        match err {
            PaymentError::Processor { message, .. } => {
                assert!(message.contains("503"));
            }
            other => panic!("expected processor error, got {:?}", other),
        }
    }
}
