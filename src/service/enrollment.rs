//! Enrollment orchestration. Holds no state between calls; the stores own concurrency.

use crate::error::StorageError;
use crate::model::{Course, EnrollmentRecord, NewEnrollment};
use crate::store::{CourseStore, EnrollmentStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct EnrollmentService {
    courses: Arc<dyn CourseStore>,
    enrollments: Arc<dyn EnrollmentStore>,
}

impl EnrollmentService {
    pub fn new(courses: Arc<dyn CourseStore>, enrollments: Arc<dyn EnrollmentStore>) -> Self {
        EnrollmentService {
            courses,
            enrollments,
        }
    }

    /// Every course in the catalog, in store order.
    pub async fn list_available_courses(&self) -> Result<Vec<Course>, StorageError> {
        self.courses.find_all().await
    }

    /// Every enrollment ever created, in store order.
    pub async fn list_enrollments(&self) -> Result<Vec<EnrollmentRecord>, StorageError> {
        self.enrollments.find_all().await
    }

    /// Record one enrollment. The course name is not checked against the catalog, repeats are
    /// not rejected, and inputs are stored exactly as given.
    pub async fn enroll(
        &self,
        student_name: &str,
        student_email: &str,
        course_name: &str,
    ) -> Result<(), StorageError> {
        let saved = self
            .enrollments
            .save(NewEnrollment::new(student_name, student_email, course_name))
            .await?;
        tracing::info!(id = saved.id, course = %saved.course_name, "enrollment recorded");
        Ok(())
    }

    /// Fails if either store is unreachable.
    pub async fn ping(&self) -> Result<(), StorageError> {
        self.courses.ping().await?;
        self.enrollments.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryCourseStore, InMemoryEnrollmentStore};
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl CourseStore for FailingStore {
        async fn find_all(&self) -> Result<Vec<Course>, StorageError> {
            Err(StorageError::Unavailable("catalog offline".into()))
        }
    }

    #[async_trait]
    impl EnrollmentStore for FailingStore {
        async fn find_all(&self) -> Result<Vec<EnrollmentRecord>, StorageError> {
            Err(StorageError::Unavailable("enrollments offline".into()))
        }

        async fn save(&self, _: NewEnrollment) -> Result<EnrollmentRecord, StorageError> {
            Err(StorageError::Unavailable("enrollments offline".into()))
        }

        async fn ping(&self) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("enrollments offline".into()))
        }
    }

    fn service() -> EnrollmentService {
        EnrollmentService::new(
            Arc::new(InMemoryCourseStore::with_names(["Math101", "CS201"])),
            Arc::new(InMemoryEnrollmentStore::new()),
        )
    }

    #[tokio::test]
    async fn enroll_appends_one_record_with_given_fields() {
        let svc = service();
        svc.enroll("Alice", "alice@example.com", "CS201").await.unwrap();

        let all = svc.list_enrollments().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Alice");
        assert_eq!(all[0].email_id, "alice@example.com");
        assert_eq!(all[0].course_name, "CS201");
        assert!(all[0].id > 0);
    }

    #[tokio::test]
    async fn empty_store_lists_no_enrollments() {
        assert!(service().list_enrollments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn course_listing_is_idempotent() {
        let svc = service();
        let first = svc.list_available_courses().await.unwrap();
        let second = svc.list_available_courses().await.unwrap();
        assert_eq!(first, second);
        let names: Vec<_> = first.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Math101", "CS201"]);
    }

    #[tokio::test]
    async fn duplicate_enrollments_are_kept() {
        let svc = service();
        svc.enroll("Bob", "bob@example.com", "Math101").await.unwrap();
        svc.enroll("Bob", "bob@example.com", "Math101").await.unwrap();
        let all = svc.list_enrollments().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_ne!(all[0].id, all[1].id);
    }

    #[tokio::test]
    async fn empty_fields_and_unknown_courses_are_accepted() {
        let svc = service();
        svc.enroll("", "", "").await.unwrap();
        svc.enroll(" Carol ", "not-an-email", "Underwater Basketry").await.unwrap();
        let all = svc.list_enrollments().await.unwrap();
        assert_eq!(
            (all[0].name.as_str(), all[0].email_id.as_str(), all[0].course_name.as_str()),
            ("", "", "")
        );
        assert_eq!(all[1].name, " Carol ");
        assert_eq!(all[1].course_name, "Underwater Basketry");
    }

    #[tokio::test]
    async fn storage_failures_propagate() {
        let store = Arc::new(FailingStore);
        let svc = EnrollmentService::new(store.clone(), store);
        assert!(matches!(svc.list_available_courses().await, Err(StorageError::Unavailable(_))));
        assert!(matches!(svc.list_enrollments().await, Err(StorageError::Unavailable(_))));
        assert!(matches!(svc.enroll("a", "b", "c").await, Err(StorageError::Unavailable(_))));
        assert!(svc.ping().await.is_err());
    }
}
