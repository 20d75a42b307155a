//! Roles and authenticated principals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse-grained capability label carried in token claims.
///
/// The two `*_service` roles are asserted by services themselves when calling
/// peers; see [`crate::token::mint_service_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Professor,
    Admin,
    AuthService,
    EnrollmentService,
}

impl Role {
    /// Wire representation, identical to the serde encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Professor => "professor",
            Role::Admin => "admin",
            Role::AuthService => "auth_service",
            Role::EnrollmentService => "enrollment_service",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated identity, produced by successful token verification.
///
/// Roles are fixed at issuance time and never re-checked against a live
/// principal store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub roles: Vec<Role>,
}

impl Principal {
    /// True when the principal holds at least one of the required roles.
    pub fn has_any(&self, required: &[Role]) -> bool {
        self.roles.iter().any(|role| required.contains(role))
    }

    /// True when the principal holds only the self-scoped `student` role and
    /// may therefore only touch its own records.
    pub fn is_self_scoped(&self) -> bool {
        !self.roles.is_empty() && self.roles.iter().all(|role| *role == Role::Student)
    }
}
