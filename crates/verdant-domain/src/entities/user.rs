//! User directory entries
//!
//! The directory is seeded externally and never mutated by the engine; role
//! is an opaque classification used only for permission and ownership
//! checks.

use serde::{Deserialize, Serialize};

/// Coarse role classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Global administrator
    Admin,
    /// Owns reports, periods, or sections
    ReportOwner,
    /// Contributes data point content
    Contributor,
    /// Read-only reviewer
    Auditor,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::ReportOwner => write!(f, "report-owner"),
            Role::Contributor => write!(f, "contributor"),
            Role::Auditor => write!(f, "auditor"),
        }
    }
}

/// Directory entry for a known user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Role classification
    pub role: Role,
}

impl User {
    /// Create a directory entry
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }

    /// Whether this user holds the global admin role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
