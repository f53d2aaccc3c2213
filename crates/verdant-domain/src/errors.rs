//! Error taxonomy for the Verdant engine
//!
//! Expected business-rule failures are values so callers can render them
//! without exception handling. Structural invariant violations (circular
//! references, deleting an entity with dependents) panic instead and
//! propagate to a boundary handler.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Descriptor for a single missing or invalid field, returned alongside
/// validation failures to support field-level UI feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingField {
    /// Field name in the entity's vocabulary
    pub field: String,
    /// Human-readable message for this field
    pub message: String,
}

impl MissingField {
    /// Create a new missing-field descriptor
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Expected failures of engine operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A business rule or configured validation rule rejected the operation
    #[error("{message}")]
    Validation {
        /// Primary failure message, returned verbatim to callers
        message: String,
        /// Per-field descriptors, empty when the failure is not field-scoped
        missing_fields: Vec<MissingField>,
    },

    /// The caller is not allowed to perform the operation
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Reason the caller was rejected
        message: String,
    },

    /// A referenced entity id has no matching record
    #[error("{entity_type} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "Data point"
        entity_type: String,
        /// The id that failed to resolve
        id: String,
    },
}

impl DomainError {
    /// Validation failure with no field descriptors
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
            missing_fields: Vec::new(),
        }
    }

    /// Validation failure carrying field descriptors; the first descriptor's
    /// message becomes the primary message
    pub fn missing_fields(fields: Vec<MissingField>) -> Self {
        let message = fields
            .first()
            .map(|f| f.message.clone())
            .unwrap_or_else(|| "Validation failed".to_string());
        DomainError::Validation {
            message,
            missing_fields: fields,
        }
    }

    /// Not-found failure for the given entity kind and id
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Permission-denied failure
    pub fn denied(message: impl Into<String>) -> Self {
        DomainError::PermissionDenied {
            message: message.into(),
        }
    }
}

/// Result type alias for engine operations
pub type DomainResult<T> = Result<T, DomainError>;
