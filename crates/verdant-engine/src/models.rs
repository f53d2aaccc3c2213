//! Input models for store operations

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use verdant_domain::{CompletenessStatus, InformationType};

/// Input for creating a data point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDataPoint {
    /// Owning section id
    pub section_id: String,
    /// Short title
    pub title: String,
    /// Narrative content
    pub content: String,
    /// Reported value
    pub value: String,
    /// Unit of the value
    pub unit: String,
    /// Grouping key for unit checks
    pub classification: String,
    /// Data point type, e.g. "metric"
    pub data_type: String,
    /// Where the value came from
    pub source: String,
    /// Kind of information carried
    pub information_type: InformationType,
    /// Responsible user id, blank for unowned
    pub owner_id: String,
    /// Contributing user ids
    pub contributor_ids: Vec<String>,
    /// Explicit completeness request; derived automatically when `None`
    pub completeness_status: Option<CompletenessStatus>,
}

impl NewDataPoint {
    /// Minimal input for a section
    pub fn in_section(section_id: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            title: String::new(),
            content: String::new(),
            value: String::new(),
            unit: String::new(),
            classification: String::new(),
            data_type: String::new(),
            source: String::new(),
            information_type: InformationType::Fact,
            owner_id: String::new(),
            contributor_ids: Vec::new(),
            completeness_status: None,
        }
    }
}

/// Field-wise update for a data point; `None` leaves a field unchanged.
/// Review status has its own operation so the approved-read-only gate stays
/// in one place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataPointUpdate {
    /// New title
    pub title: Option<String>,
    /// New content
    pub content: Option<String>,
    /// New value
    pub value: Option<String>,
    /// New unit
    pub unit: Option<String>,
    /// New classification
    pub classification: Option<String>,
    /// New data type
    pub data_type: Option<String>,
    /// New source
    pub source: Option<String>,
    /// New information type
    pub information_type: Option<InformationType>,
    /// New owner id
    pub owner_id: Option<String>,
    /// New contributor set
    pub contributor_ids: Option<Vec<String>>,
    /// Explicit completeness request; derived automatically when `None`
    pub completeness_status: Option<CompletenessStatus>,
    /// New blocked flag
    pub is_blocked: Option<bool>,
    /// New blocker reason
    pub blocker_reason: Option<String>,
    /// New blocker due date
    pub blocker_due_date: Option<NaiveDate>,
    /// New provenance-review flag
    pub provenance_needs_review: Option<bool>,
    /// New provenance-review reason
    pub provenance_review_reason: Option<String>,
    /// New source references
    pub source_references: Option<Vec<String>>,
}

/// Input for attaching evidence to a data point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvidence {
    /// Short title
    pub title: String,
    /// Pointer to the underlying document or record
    pub reference: String,
}

/// Input for creating a validation rule; the kind arrives as configuration
/// text and unknown kinds are rejected at creation time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRule {
    /// Section the rule is scoped to
    pub section_id: String,
    /// Rule kind spelling, e.g. "non-negative"
    pub kind: String,
    /// Targeted field, blank for the default
    pub target_field: String,
    /// Opaque serialized parameters
    pub parameters: String,
    /// Message returned verbatim on violation
    pub error_message: String,
    /// Whether the rule is evaluated
    pub active: bool,
}

/// Input for requesting a completion exception
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompletionException {
    /// Reporting period the exemption applies to
    pub period_id: String,
    /// Exempted section, when section-scoped
    pub section_id: Option<String>,
    /// Exempted data point, when data-point-scoped
    pub data_point_id: Option<String>,
    /// Why the exemption is requested
    pub reason: String,
}
