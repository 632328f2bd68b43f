use super::AppState;
use crate::domain::enrollment::{Currency, EnrollmentKind};
use crate::error::ServiceError;
use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnrollmentRequest {
    /// The authenticated user. Session handling lives in front of this
    /// service; an absent identity is rejected as unauthenticated.
    pub user_id: Option<Uuid>,
    pub course_id: Option<String>,
    pub tour_id: Option<String>,
    pub reference: Option<String>,
    pub currency: Option<String>,
    /// Client-declared amount. Required for shape, ignored for trust: the
    /// charged price is resolved server-side.
    pub amount: Option<f64>,
    pub enrollment_type: Option<EnrollmentKind>,
}

pub async fn create_enrollment(
    State(state): State<AppState>,
    Json(request): Json<CreateEnrollmentRequest>,
) -> Result<Json<Value>, ServiceError> {
    let user_id = request.user_id.ok_or(ServiceError::Unauthenticated)?;

    let (Some(reference), Some(currency), Some(_amount)) = (
        request.reference.as_deref().filter(|r| !r.is_empty()),
        request.currency.as_deref(),
        request.amount,
    ) else {
        return Err(ServiceError::validation("Missing enrollment details"));
    };

    if request.course_id.is_none() && request.tour_id.is_none() {
        return Err(ServiceError::validation("Course or tour is required"));
    }

    let id = state
        .payments
        .initiate(
            user_id,
            request.course_id.as_deref(),
            request.tour_id.as_deref(),
            reference,
            Currency::from_request(currency),
            request.enrollment_type,
        )
        .await?;

    Ok(Json(json!({ "success": true, "data": { "id": id } })))
}
