//! Course catalog and enrollment routes.

use crate::handlers::{enroll, list_courses, list_enrollments};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn registration_routes(state: AppState) -> Router {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/enrollments", get(list_enrollments).post(enroll))
        .with_state(state)
}
