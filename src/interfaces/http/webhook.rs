use super::AppState;
use crate::error::ServiceError;
use crate::infrastructure::signature::verify_webhook_signature;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::Deserialize;
use serde_json::{Value, json};

pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

#[derive(Deserialize)]
struct WebhookEvent {
    event: String,
    #[serde(default)]
    data: Option<WebhookCharge>,
}

#[derive(Deserialize)]
struct WebhookCharge {
    reference: Option<String>,
    #[serde(default)]
    amount: i64,
    #[serde(default)]
    currency: String,
}

/// Gateway webhook entry point. The signature is checked over the exact raw
/// bytes before the body is parsed or any state is read. From the gateway's
/// side this is fire-and-forget: once the signature holds, reconciliation
/// outcomes are recorded and the handler acknowledges.
pub async fn paystack_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ServiceError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ServiceError::validation("Missing signature header"))?;

    if !verify_webhook_signature(&state.webhook_secret, &body, signature) {
        return Err(ServiceError::InvalidSignature);
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| ServiceError::validation(format!("Malformed webhook payload: {e}")))?;

    if event.event == "charge.success"
        && let Some(charge) = event.data
        && let Some(reference) = charge.reference
    {
        state
            .payments
            .confirm_charge(&reference, charge.amount, &charge.currency)
            .await?;
    }

    Ok(Json(json!({ "success": true })))
}
