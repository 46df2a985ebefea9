//! Shared application state for all routes.

use crate::service::EnrollmentService;

#[derive(Clone)]
pub struct AppState {
    pub service: EnrollmentService,
}

impl AppState {
    pub fn new(service: EnrollmentService) -> Self {
        AppState { service }
    }
}
