//! Completion exception workflow records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Resolution state of a completion exception
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionStatus {
    /// Awaiting a decision
    Pending,
    /// Granted; the target leaves the completeness denominator
    Accepted,
    /// Declined
    Rejected,
}

impl std::fmt::Display for ExceptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExceptionStatus::Pending => write!(f, "pending"),
            ExceptionStatus::Accepted => write!(f, "accepted"),
            ExceptionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Request to exempt a section or data point from the completeness
/// denominator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionException {
    /// Unique identifier
    pub id: String,
    /// Reporting period the exemption applies to
    pub period_id: String,
    /// Exempted section, when section-scoped
    pub section_id: Option<String>,
    /// Exempted data point, when data-point-scoped
    pub data_point_id: Option<String>,
    /// Why the exemption is requested
    pub reason: String,
    /// Workflow state
    pub status: ExceptionStatus,
    /// Who requested the exemption
    pub requested_by: String,
    /// When it was requested
    pub requested_at: DateTime<Utc>,
    /// Who resolved it, blank while pending
    pub resolved_by: String,
    /// When it was resolved
    pub resolved_at: Option<DateTime<Utc>>,
}

impl CompletionException {
    /// Create a pending exception request
    pub fn new(
        period_id: impl Into<String>,
        reason: impl Into<String>,
        requested_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            period_id: period_id.into(),
            section_id: None,
            data_point_id: None,
            reason: reason.into(),
            status: ExceptionStatus::Pending,
            requested_by: requested_by.into(),
            requested_at: Utc::now(),
            resolved_by: String::new(),
            resolved_at: None,
        }
    }
}
