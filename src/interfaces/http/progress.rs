use super::AppState;
use crate::application::ProgressOutcome;
use crate::error::ServiceError;
use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequest {
    pub enrollment_id: Option<Uuid>,
    pub progress: Option<i64>,
}

pub async fn update_progress(
    State(state): State<AppState>,
    Json(request): Json<UpdateProgressRequest>,
) -> Result<Json<Value>, ServiceError> {
    let (Some(enrollment_id), Some(progress)) = (request.enrollment_id, request.progress) else {
        return Err(ServiceError::validation(
            "Enrollment ID and progress are required",
        ));
    };

    match state.completion.update_progress(enrollment_id, progress).await? {
        ProgressOutcome::Acknowledged => Ok(Json(json!({ "success": true }))),
        ProgressOutcome::Completed(certificate) => Ok(Json(json!({
            "success": true,
            "completed": true,
            "certificate": certificate,
        }))),
    }
}
