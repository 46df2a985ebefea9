//! Storage interfaces consumed by the enrollment service, with PostgreSQL and in-memory
//! implementations.

mod memory;
mod postgres;

pub use memory::{InMemoryCourseStore, InMemoryEnrollmentStore};
pub use postgres::{
    ensure_database_exists, ensure_tables, seed_courses, PgCourseStore, PgEnrollmentStore,
};

use crate::error::StorageError;
use crate::model::{Course, EnrollmentRecord, NewEnrollment};
use async_trait::async_trait;

/// Read-only view of the course catalog.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Every course, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<Course>, StorageError>;

    /// Readiness probe. Stores without a remote backend are always ready.
    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Append-only enrollment log.
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Every enrollment ever saved, in storage order.
    async fn find_all(&self) -> Result<Vec<EnrollmentRecord>, StorageError>;

    /// Persist one enrollment. The returned record carries a freshly assigned, unique id.
    async fn save(&self, enrollment: NewEnrollment) -> Result<EnrollmentRecord, StorageError>;

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
