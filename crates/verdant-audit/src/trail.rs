//! Append-only audit trail container
//!
//! The trail only grows: there is no update or removal API, and entries
//! survive the deletion of the entity they describe.

use crate::models::AuditLogEntry;
use serde::{Deserialize, Serialize};

/// Append-only log of audit entries in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditTrail {
    entries: Vec<AuditLogEntry>,
}

impl AuditTrail {
    /// Create an empty trail
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry; entries are never edited or removed afterwards
    pub fn append(&mut self, entry: AuditLogEntry) {
        self.entries.push(entry);
    }

    /// Number of entries recorded so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the trail is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[AuditLogEntry] {
        &self.entries
    }
}
