//! Course registry: list the course catalog, list enrollments, and enroll students over PostgreSQL.

pub mod config;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{load_courses, Settings};
pub use error::{AppError, ConfigError, StorageError};
pub use model::{Course, EnrollmentRecord, NewCourse, NewEnrollment};
pub use routes::{app, common_routes, common_routes_with_ready, registration_routes};
pub use service::EnrollmentService;
pub use state::AppState;
pub use store::{
    ensure_database_exists, ensure_tables, seed_courses, CourseStore, EnrollmentStore,
    InMemoryCourseStore, InMemoryEnrollmentStore, PgCourseStore, PgEnrollmentStore,
};
