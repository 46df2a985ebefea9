//! Enrollment listing and creation.

use crate::error::AppError;
use crate::model::EnrollmentRecord;
use crate::response::{success_many, SuccessMany};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

const REQUIRED_FIELDS: &[&str] = &["name", "emailId", "courseName"];

/// POST body for a new enrollment. Values are stored as sent.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub name: String,
    pub email_id: String,
    pub course_name: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/enrollments",
    tags = ["enrollments"],
    responses(
        (
            status = 200,
            description = "Every enrollment, oldest first",
            body = SuccessMany<EnrollmentRecord>
        ),
        (status = 500, description = "Enrollment store failure")
    )
)]
pub async fn list_enrollments(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let enrollments = state.service.list_enrollments().await?;
    Ok(success_many(enrollments))
}

#[utoipa::path(
    post,
    path = "/api/v1/enrollments",
    tags = ["enrollments"],
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrollment recorded"),
        (status = 400, description = "Body is not a JSON object or a field is not a string"),
        (status = 422, description = "A required field is missing or null"),
        (status = 500, description = "Enrollment store failure")
    )
)]
pub async fn enroll(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let body: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("body is not valid JSON: {}", e)))?;
    let Value::Object(body) = body else {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    };
    RequestValidator::require(&body, REQUIRED_FIELDS)?;
    let req: EnrollRequest = serde_json::from_value(Value::Object(body))
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    state
        .service
        .enroll(&req.name, &req.email_id, &req.course_name)
        .await?;
    Ok(StatusCode::CREATED)
}
