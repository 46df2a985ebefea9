//! In-process stores. Used by tests and for running without PostgreSQL.

use super::{CourseStore, EnrollmentStore};
use crate::error::StorageError;
use crate::model::{Course, EnrollmentRecord, NewCourse, NewEnrollment};
use async_trait::async_trait;
use std::sync::RwLock;

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Unavailable("in-memory store lock poisoned".into())
}

/// Fixed catalog held in memory. Ids are assigned 1.. in insertion order.
#[derive(Default)]
pub struct InMemoryCourseStore {
    courses: Vec<Course>,
}

impl InMemoryCourseStore {
    pub fn new(courses: Vec<NewCourse>) -> Self {
        let courses = courses
            .into_iter()
            .zip(1..)
            .map(|(c, id)| Course {
                id,
                name: c.name,
                description: c.description,
            })
            .collect();
        InMemoryCourseStore { courses }
    }

    /// Catalog from bare course names.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            names
                .into_iter()
                .map(|n| NewCourse {
                    name: n.into(),
                    description: None,
                })
                .collect(),
        )
    }
}

#[async_trait]
impl CourseStore for InMemoryCourseStore {
    async fn find_all(&self) -> Result<Vec<Course>, StorageError> {
        Ok(self.courses.clone())
    }
}

#[derive(Default)]
struct EnrollmentLog {
    next_id: i64,
    records: Vec<EnrollmentRecord>,
}

/// Append-only enrollment log. Ids are generated under the write lock, so concurrent saves
/// never collide.
#[derive(Default)]
pub struct InMemoryEnrollmentStore {
    log: RwLock<EnrollmentLog>,
}

impl InMemoryEnrollmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnrollmentStore for InMemoryEnrollmentStore {
    async fn find_all(&self) -> Result<Vec<EnrollmentRecord>, StorageError> {
        let log = self.log.read().map_err(poisoned)?;
        Ok(log.records.clone())
    }

    async fn save(&self, enrollment: NewEnrollment) -> Result<EnrollmentRecord, StorageError> {
        let mut log = self.log.write().map_err(poisoned)?;
        log.next_id += 1;
        let record = EnrollmentRecord::from_new(log.next_id, chrono::Utc::now(), enrollment);
        log.records.push(record.clone());
        Ok(record)
    }
}
