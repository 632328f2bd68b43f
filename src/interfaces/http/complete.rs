use super::AppState;
use crate::error::ServiceError;
use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteCourseRequest {
    pub enrollment_id: Option<Uuid>,
}

pub async fn complete_course(
    State(state): State<AppState>,
    Json(request): Json<CompleteCourseRequest>,
) -> Result<Json<Value>, ServiceError> {
    let enrollment_id = request
        .enrollment_id
        .ok_or_else(|| ServiceError::validation("Enrollment ID is required"))?;

    let outcome = state.completion.complete(enrollment_id).await?;
    Ok(Json(json!({ "success": true, "data": outcome })))
}
