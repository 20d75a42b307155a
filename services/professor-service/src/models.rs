use serde::{Deserialize, Serialize};
use uuid::Uuid;

use entity_store::StoredEntity;

/// Stored professor record; `password` is a bcrypt hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl StoredEntity for Professor {
    fn id(&self) -> Uuid {
        self.id
    }

    // Phone uniqueness is checked by the create handler; the store only
    // backstops the email.
    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProfessorRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfessorRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Client-facing view, credential hash omitted.
#[derive(Debug, Serialize)]
pub struct ProfessorResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<Professor> for ProfessorResponse {
    fn from(professor: Professor) -> Self {
        Self {
            id: professor.id,
            name: professor.name,
            email: professor.email,
            phone: professor.phone,
        }
    }
}
