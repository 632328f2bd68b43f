use super::AppState;
use crate::error::ServiceError;
use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize)]
pub struct VerifyPaymentRequest {
    pub reference: Option<String>,
}

/// Client-triggered verification after the payment widget closes. Redundant
/// with the webhook on purpose: it covers webhook delivery failure and is
/// commutative with it.
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<Json<Value>, ServiceError> {
    let reference = request
        .reference
        .as_deref()
        .filter(|r| !r.is_empty())
        .ok_or_else(|| ServiceError::validation("Reference is required"))?;

    let data = state.payments.verify_payment(reference).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}
