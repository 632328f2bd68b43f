pub mod complete;
pub mod enrollments;
pub mod progress;
pub mod verify;
pub mod webhook;

use crate::application::{CompletionService, PaymentService};
use crate::error::ServiceError;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub payments: Arc<PaymentService>,
    pub completion: Arc<CompletionService>,
    /// Shared secret for webhook signature verification. Checked against
    /// the raw request bytes before anything else happens.
    pub webhook_secret: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/enrollments", post(enrollments::create_enrollment))
        .route("/api/paystack/webhook", post(webhook::paystack_webhook))
        .route("/api/verify-payment", post(verify::verify_payment))
        .route("/api/complete-course", post(complete::complete_course))
        .route("/api/update-progress", post(progress::update_progress))
        .with_state(state)
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServiceError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServiceError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
            }
            ServiceError::InvalidSignature => {
                (StatusCode::UNAUTHORIZED, "Invalid signature".to_string())
            }
            ServiceError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("{what} not found"))
            }
            ServiceError::VerificationFailed(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServiceError::PaymentMismatch => (
                StatusCode::BAD_REQUEST,
                "Payment mismatch detected".to_string(),
            ),
            ServiceError::AlreadyCompleted => {
                (StatusCode::BAD_REQUEST, "Already completed".to_string())
            }
            ServiceError::Config(_) | ServiceError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServiceError::Gateway(_) => {
                tracing::error!(error = %self, "gateway unreachable");
                (
                    StatusCode::BAD_GATEWAY,
                    "Payment gateway unavailable".to_string(),
                )
            }
        };

        let body = axum::Json(json!({ "success": false, "error": message }));
        (status, body).into_response()
    }
}
