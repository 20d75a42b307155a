use serde::{Deserialize, Serialize};
use uuid::Uuid;

use entity_store::StoredEntity;

/// Weekly meeting slots for a course.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Days of the week the class meets, e.g. ["Monday", "Wednesday"].
    #[serde(default)]
    pub days: Vec<String>,
    /// Class time, e.g. "10:00 AM - 12:00 PM".
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    /// Unique course code, e.g. "CS-101".
    pub code: String,
    pub description: String,
    #[serde(default)]
    pub schedule: Schedule,
    /// Principal id of the professor or admin who created the course.
    /// Set from the authenticated principal, never from the request body.
    pub created_by: String,
}

impl StoredEntity for Course {
    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.code.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct CourseRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub schedule: Schedule,
}
