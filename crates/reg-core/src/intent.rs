//! # Payment Intent Types
//!
//! Request validation and the processor contract for payment-intent
//! creation. `IntentParams` is the validated form of an inbound request;
//! `PaymentProcessor` is the trait a payment provider implements.

use crate::error::{PaymentError, PaymentResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Currency for every created intent. Multi-currency is out of scope.
pub const CURRENCY: &str = "usd";

/// Source tag attached to intent metadata so processor-side records can be
/// traced back to this backend.
pub const METADATA_SOURCE: &str = "registration-backend";

/// Validation message when a required field is absent or empty
pub const MISSING_PARAMS_MESSAGE: &str =
    "Missing required parameters: amount, registrationId, and registrationType are required";

/// Validation message when the amount is not a number greater than zero
pub const INVALID_AMOUNT_MESSAGE: &str = "Amount must be a positive number";

/// Validated parameters for creating a payment intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentParams {
    /// Amount in the smallest currency unit, rounded to an integer
    pub amount: i64,

    /// Registration the payment is collected for
    pub registration_id: String,

    /// Kind of registration (clients send strings or numbers; stored as text)
    pub registration_type: String,
}

impl IntentParams {
    /// Validate raw request fields into processor-ready parameters.
    ///
    /// All three fields must be present and non-empty (`null`, `false`, `0`
    /// and `""` count as absent). `amount` must be a JSON number strictly
    /// greater than zero; it is rounded to the nearest integer because the
    /// processor only accepts integral minor-unit amounts.
    pub fn from_request(
        amount: Option<&Value>,
        registration_id: Option<&Value>,
        registration_type: Option<&Value>,
    ) -> PaymentResult<Self> {
        let (Some(amount), Some(registration_id), Some(registration_type)) =
            (amount, registration_id, registration_type)
        else {
            return Err(PaymentError::Validation(MISSING_PARAMS_MESSAGE.to_string()));
        };

        if is_empty(amount) || is_empty(registration_id) || is_empty(registration_type) {
            return Err(PaymentError::Validation(MISSING_PARAMS_MESSAGE.to_string()));
        }

        let amount = match amount.as_f64() {
            Some(a) if a > 0.0 => a,
            _ => return Err(PaymentError::Validation(INVALID_AMOUNT_MESSAGE.to_string())),
        };

        Ok(Self {
            amount: amount.round() as i64,
            registration_id: stringify(registration_id),
            registration_type: stringify(registration_type),
        })
    }
}

/// A payment intent created by the processor.
///
/// Relayed to the client as-is; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Processor-side intent ID
    pub id: String,

    /// Opaque token the client uses to confirm the payment
    pub client_secret: String,

    /// Amount in the smallest currency unit
    pub amount: i64,

    /// Processor-side intent status (e.g. "requires_payment_method")
    pub status: String,
}

/// Core trait for payment processor implementations.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create a payment intent and return its details.
    async fn create_payment_intent(&self, params: &IntentParams) -> PaymentResult<PaymentIntent>;

    /// Get the processor name (for logging).
    fn processor_name(&self) -> &'static str;
}

/// Type alias for a shared payment processor (dynamic dispatch)
pub type BoxedPaymentProcessor = Arc<dyn PaymentProcessor>;

/// True when a field value should be treated as absent: `null`, `false`,
/// numeric zero, or the empty string.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Render a field value as metadata text. Strings pass through unquoted;
/// anything else uses its JSON rendering.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(
        amount: Option<Value>,
        id: Option<Value>,
        kind: Option<Value>,
    ) -> PaymentResult<IntentParams> {
        IntentParams::from_request(amount.as_ref(), id.as_ref(), kind.as_ref())
    }

    #[test]
    fn test_valid_request() {
        let params = validate(
            Some(json!(500)),
            Some(json!("reg_42")),
            Some(json!("individual")),
        )
        .unwrap();

        assert_eq!(params.amount, 500);
        assert_eq!(params.registration_id, "reg_42");
        assert_eq!(params.registration_type, "individual");
    }

    #[test]
    fn test_numeric_ids_are_stringified() {
        let params = validate(Some(json!(500)), Some(json!(42)), Some(json!(7))).unwrap();

        assert_eq!(params.registration_id, "42");
        assert_eq!(params.registration_type, "7");
    }

    #[test]
    fn test_fractional_amount_is_rounded() {
        let params = validate(Some(json!(499.7)), Some(json!("r1")), Some(json!("team"))).unwrap();
        assert_eq!(params.amount, 500);

        let params = validate(Some(json!(499.2)), Some(json!("r1")), Some(json!("team"))).unwrap();
        assert_eq!(params.amount, 499);
    }

    #[test]
    fn test_missing_fields() {
        for result in [
            validate(None, Some(json!("r1")), Some(json!("team"))),
            validate(Some(json!(500)), None, Some(json!("team"))),
            validate(Some(json!(500)), Some(json!("r1")), None),
            validate(Some(json!(500)), Some(json!(null)), Some(json!("team"))),
            validate(Some(json!(500)), Some(json!("")), Some(json!("team"))),
        ] {
            match result {
                Err(PaymentError::Validation(msg)) => assert_eq!(msg, MISSING_PARAMS_MESSAGE),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_zero_amount_counts_as_missing() {
        // Zero is treated as absent, so the missing-parameters message wins
        // over the invalid-amount one.
        let err = validate(Some(json!(0)), Some(json!("r1")), Some(json!("team"))).unwrap_err();
        match err {
            PaymentError::Validation(msg) => assert_eq!(msg, MISSING_PARAMS_MESSAGE),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_amounts() {
        for amount in [json!(-500), json!("500"), json!(-0.4)] {
            let err = validate(Some(amount), Some(json!("r1")), Some(json!("team"))).unwrap_err();
            match err {
                PaymentError::Validation(msg) => assert_eq!(msg, INVALID_AMOUNT_MESSAGE),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }
}
