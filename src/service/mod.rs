//! EnrollmentService: course listing, enrollment listing, and enrollment creation.

mod enrollment;
mod validation;
pub use enrollment::EnrollmentService;
pub use validation::RequestValidator;
