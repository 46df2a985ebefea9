//! HTTP handlers for the catalog and enrollments.

pub mod courses;
pub mod enrollments;
pub use courses::*;
pub use enrollments::*;
