//! Audit log data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Action recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditAction {
    /// Entity was created
    Created,
    /// Entity fields were updated
    Updated,
    /// Entity was deleted
    Deleted,
    /// Evidence was attached to a data point
    EvidenceAttached,
    /// Review status changed
    ReviewStatusChanged,
    /// Gap status advanced
    GapStatusChanged,
    /// Gap status change was denied by the permission gate
    GapStatusDenied,
    /// A validation rule was created
    RuleCreated,
    /// A completion exception was requested
    ExceptionRequested,
    /// A completion exception was accepted or rejected
    ExceptionResolved,
    /// A completion exception resolution was denied
    ExceptionDenied,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditAction::Created => write!(f, "created"),
            AuditAction::Updated => write!(f, "updated"),
            AuditAction::Deleted => write!(f, "deleted"),
            AuditAction::EvidenceAttached => write!(f, "evidence-attached"),
            AuditAction::ReviewStatusChanged => write!(f, "review-status-changed"),
            AuditAction::GapStatusChanged => write!(f, "gap-status-changed"),
            AuditAction::GapStatusDenied => write!(f, "gap-status-denied"),
            AuditAction::RuleCreated => write!(f, "rule-created"),
            AuditAction::ExceptionRequested => write!(f, "exception-requested"),
            AuditAction::ExceptionResolved => write!(f, "exception-resolved"),
            AuditAction::ExceptionDenied => write!(f, "exception-denied"),
        }
    }
}

impl AuditAction {
    /// Whether this action records a denied attempt rather than a mutation
    pub fn is_denial(self) -> bool {
        matches!(
            self,
            AuditAction::GapStatusDenied | AuditAction::ExceptionDenied
        )
    }
}

/// Kind of entity an audit entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    /// Data point
    DataPoint,
    /// Report section
    Section,
    /// Reporting period
    Period,
    /// Evidence record
    Evidence,
    /// Validation rule
    Rule,
    /// Completion exception
    Exception,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::DataPoint => write!(f, "data-point"),
            EntityType::Section => write!(f, "section"),
            EntityType::Period => write!(f, "period"),
            EntityType::Evidence => write!(f, "evidence"),
            EntityType::Rule => write!(f, "rule"),
            EntityType::Exception => write!(f, "exception"),
        }
    }
}

/// One tracked field that changed in an audited operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Field name
    pub field: String,
    /// Displayed value before the mutation
    pub old_value: String,
    /// Displayed value after the mutation
    pub new_value: String,
}

impl FieldChange {
    /// Create a field change record
    pub fn new(
        field: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            old_value: old_value.into(),
            new_value: new_value.into(),
        }
    }
}

/// Immutable entry in the audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique identifier
    pub id: String,
    /// When the operation happened
    pub timestamp: DateTime<Utc>,
    /// Acting user id
    pub actor_id: String,
    /// Acting user display name at the time of the operation
    pub actor_name: String,
    /// What happened
    pub action: AuditAction,
    /// Kind of entity affected
    pub entity_type: EntityType,
    /// Id of the affected entity
    pub entity_id: String,
    /// Optional free-text note
    pub note: Option<String>,
    /// Ordered field-level diffs, empty for denials and deletions
    pub changes: Vec<FieldChange>,
}

impl AuditLogEntry {
    /// Create an entry with no field changes
    pub fn new(
        actor_id: impl Into<String>,
        actor_name: impl Into<String>,
        action: AuditAction,
        entity_type: EntityType,
        entity_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            actor_id: actor_id.into(),
            actor_name: actor_name.into(),
            action,
            entity_type,
            entity_id: entity_id.into(),
            note: None,
            changes: Vec::new(),
        }
    }

    /// Attach field changes
    pub fn with_changes(mut self, changes: Vec<FieldChange>) -> Self {
        self.changes = changes;
        self
    }

    /// Attach a free-text note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_action_display() {
        assert_eq!(AuditAction::GapStatusChanged.to_string(), "gap-status-changed");
        assert_eq!(AuditAction::GapStatusDenied.to_string(), "gap-status-denied");
        assert_eq!(AuditAction::EvidenceAttached.to_string(), "evidence-attached");
    }

    #[test]
    fn test_denial_actions() {
        assert!(AuditAction::GapStatusDenied.is_denial());
        assert!(AuditAction::ExceptionDenied.is_denial());
        assert!(!AuditAction::Updated.is_denial());
    }

    #[test]
    fn test_entry_builder() {
        let entry = AuditLogEntry::new(
            "u-1",
            "Priya Nair",
            AuditAction::Updated,
            EntityType::DataPoint,
            "dp-1",
        )
        .with_changes(vec![FieldChange::new("title", "old", "new")])
        .with_note("routine edit");

        assert_eq!(entry.actor_name, "Priya Nair");
        assert_eq!(entry.changes.len(), 1);
        assert_eq!(entry.note.as_deref(), Some("routine edit"));
        assert!(!entry.id.is_empty());
    }

    #[test]
    fn test_entry_serialization_round_trip() {
        let entry = AuditLogEntry::new(
            "u-1",
            "Priya Nair",
            AuditAction::Created,
            EntityType::Rule,
            "rule-1",
        );
        let json = serde_json::to_string(&entry).unwrap();
        let back: AuditLogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
