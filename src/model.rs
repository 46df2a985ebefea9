//! Catalog and enrollment records as exchanged with stores and HTTP clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An offerable course. Owned by the catalog; never written by the enrollment service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Catalog entry as read from a seed file, before the store assigns an id.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Enrollment about to be persisted. The store assigns `id` and `enrolled_at` on save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEnrollment {
    pub name: String,
    pub email_id: String,
    pub course_name: String,
}

impl NewEnrollment {
    pub fn new(
        name: impl Into<String>,
        email_id: impl Into<String>,
        course_name: impl Into<String>,
    ) -> Self {
        NewEnrollment {
            name: name.into(),
            email_id: email_id.into(),
            course_name: course_name.into(),
        }
    }
}

/// A persisted enrollment. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRecord {
    pub id: i64,
    pub name: String,
    pub email_id: String,
    pub course_name: String,
    pub enrolled_at: DateTime<Utc>,
}

impl EnrollmentRecord {
    /// Attach store-assigned identity to a pending enrollment.
    pub fn from_new(id: i64, enrolled_at: DateTime<Utc>, new: NewEnrollment) -> Self {
        EnrollmentRecord {
            id,
            name: new.name,
            email_id: new.email_id,
            course_name: new.course_name,
            enrolled_at,
        }
    }
}
