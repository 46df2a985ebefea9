//! Catalog listing.

use crate::error::AppError;
use crate::model::Course;
use crate::response::{success_many, SuccessMany};
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/v1/courses",
    tags = ["courses"],
    responses(
        (status = 200, description = "Every course in the catalog", body = SuccessMany<Course>),
        (status = 500, description = "Catalog store failure")
    )
)]
pub async fn list_courses(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let courses = state.service.list_available_courses().await?;
    Ok(success_many(courses))
}
