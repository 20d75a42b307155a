use serde::{Deserialize, Serialize};
use uuid::Uuid;

use entity_store::StoredEntity;

/// Stored student record. `password` holds the bcrypt hash, never the
/// plaintext; the full record (hash included) is what peer services fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl StoredEntity for Student {
    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// When present, re-hashed and stored; otherwise the hash is kept.
    #[serde(default)]
    pub password: Option<String>,
}

/// Client-facing view of a student, credential hash omitted.
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            email: student.email,
        }
    }
}
