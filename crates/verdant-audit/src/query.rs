//! Audit log querying and filtering

use crate::models::{AuditAction, AuditLogEntry, EntityType};
use chrono::{DateTime, Utc};

/// Filter criteria for audit log queries
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Filter by entity type (optional)
    pub entity_type: Option<EntityType>,
    /// Filter by entity id (optional)
    pub entity_id: Option<String>,
    /// Filter by acting user id (optional)
    pub actor_id: Option<String>,
    /// Filter by action (optional)
    pub action: Option<AuditAction>,
    /// Entries at or after this time (optional)
    pub from: Option<DateTime<Utc>>,
    /// Entries at or before this time (optional)
    pub to: Option<DateTime<Utc>>,
}

impl AuditFilter {
    /// Create an empty filter matching everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by entity type
    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    /// Filter by entity id
    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Filter by acting user id
    pub fn with_actor(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }

    /// Filter by action
    pub fn with_action(mut self, action: AuditAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Keep entries at or after the given time
    pub fn with_from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    /// Keep entries at or before the given time
    pub fn with_to(mut self, to: DateTime<Utc>) -> Self {
        self.to = Some(to);
        self
    }

    /// Whether an entry matches this filter
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        if let Some(entity_type) = self.entity_type {
            if entry.entity_type != entity_type {
                return false;
            }
        }

        if let Some(ref entity_id) = self.entity_id {
            if entry.entity_id != *entity_id {
                return false;
            }
        }

        if let Some(ref actor_id) = self.actor_id {
            if entry.actor_id != *actor_id {
                return false;
            }
        }

        if let Some(action) = self.action {
            if entry.action != action {
                return false;
            }
        }

        if let Some(from) = self.from {
            if entry.timestamp < from {
                return false;
            }
        }

        if let Some(to) = self.to {
            if entry.timestamp > to {
                return false;
            }
        }

        true
    }

    /// Apply this filter to a slice of entries, preserving order
    pub fn apply(&self, entries: &[AuditLogEntry]) -> Vec<AuditLogEntry> {
        entries
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect()
    }
}
