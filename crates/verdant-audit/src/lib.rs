//! Verdant Audit Trail
//!
//! Append-only audit log for every state-changing operation of the
//! disclosure engine. Entries carry ordered field-level diffs computed
//! before the mutation committed, and are never edited or removed, even
//! after the referenced entity is deleted. Denied sensitive attempts are
//! recorded with distinct actions.

pub mod diff;
pub mod models;
pub mod query;
pub mod trail;

pub use diff::{creation_changes, diff_data_points, tracked_fields};
pub use models::{AuditAction, AuditLogEntry, EntityType, FieldChange};
pub use query::AuditFilter;
pub use trail::AuditTrail;
