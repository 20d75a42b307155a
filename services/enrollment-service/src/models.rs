use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use entity_store::StoredEntity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub student: Uuid,
    pub course: Uuid,
    pub enrollment_date: DateTime<Utc>,
}

impl StoredEntity for Enrollment {
    fn id(&self) -> Uuid {
        self.id
    }

    // A student can be enrolled in a course at most once.
    fn unique_key(&self) -> Option<String> {
        Some(format!("{}:{}", self.student, self.course))
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateEnrollmentRequest {
    #[serde(default)]
    pub student: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
}

/// Enrollment with the referenced records spliced in. The peer payloads
/// are passed through as-is; when a reference cannot be resolved the raw
/// id is kept in place of the record.
#[derive(Debug, Serialize)]
pub struct EnrollmentView {
    pub id: Uuid,
    pub student: Value,
    pub course: Value,
    pub enrollment_date: DateTime<Utc>,
}
