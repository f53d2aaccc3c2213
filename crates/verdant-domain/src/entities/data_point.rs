//! Data point entity and its status vocabulary
//!
//! A data point is the smallest disclosable unit of report content: a fact,
//! estimate, declaration, or plan belonging to one section. Completeness,
//! review, and gap state each move through their own workflow.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of information a data point carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InformationType {
    /// Measured or directly sourced fact
    Fact,
    /// Approximated value with a documented method
    Estimate,
    /// Qualitative declaration
    Declaration,
    /// Forward-looking plan
    Plan,
}

impl std::fmt::Display for InformationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InformationType::Fact => write!(f, "fact"),
            InformationType::Estimate => write!(f, "estimate"),
            InformationType::Declaration => write!(f, "declaration"),
            InformationType::Plan => write!(f, "plan"),
        }
    }
}

/// Coarse completeness classification of a data point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletenessStatus {
    /// No usable content yet
    Missing,
    /// Some content present but requirements unmet
    Incomplete,
    /// All content requirements met and an owner assigned
    Complete,
    /// Explicitly out of the completeness denominator
    NotApplicable,
}

impl std::fmt::Display for CompletenessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletenessStatus::Missing => write!(f, "missing"),
            CompletenessStatus::Incomplete => write!(f, "incomplete"),
            CompletenessStatus::Complete => write!(f, "complete"),
            CompletenessStatus::NotApplicable => write!(f, "not-applicable"),
        }
    }
}

/// Editorial review state of a data point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewStatus {
    /// Being drafted, not yet submitted
    Draft,
    /// Submitted for review
    ReadyForReview,
    /// Approved; the data point becomes read-only apart from review-status
    /// transitions
    Approved,
    /// Reviewer requested changes
    ChangesRequested,
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewStatus::Draft => write!(f, "draft"),
            ReviewStatus::ReadyForReview => write!(f, "ready-for-review"),
            ReviewStatus::Approved => write!(f, "approved"),
            ReviewStatus::ChangesRequested => write!(f, "changes-requested"),
        }
    }
}

/// Gap-resolution workflow stage, strictly ordered and forward-only:
/// unset < missing < estimated < provided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapStatus {
    /// Gap workflow not started; serializes as the empty string
    #[serde(rename = "")]
    Unset,
    /// Data is known to be absent
    Missing,
    /// Data is approximated with a documented estimate
    Estimated,
    /// Data is fully sourced
    Provided,
}

impl GapStatus {
    /// Position in the forward-only ordering
    pub fn rank(self) -> u8 {
        match self {
            GapStatus::Unset => 0,
            GapStatus::Missing => 1,
            GapStatus::Estimated => 2,
            GapStatus::Provided => 3,
        }
    }
}

impl std::fmt::Display for GapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GapStatus::Unset => write!(f, ""),
            GapStatus::Missing => write!(f, "missing"),
            GapStatus::Estimated => write!(f, "estimated"),
            GapStatus::Provided => write!(f, "provided"),
        }
    }
}

/// Why data is missing, from the fixed reporting vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingReasonCategory {
    /// The data simply does not exist yet
    DataUnavailable,
    /// Waiting on an upstream supplier
    SupplierDependency,
    /// Measurement methodology not settled
    MethodologyPending,
    /// Judged immaterial for this report
    NotMaterial,
    /// Anything else, explained in the free-text reason
    Other,
}

impl std::fmt::Display for MissingReasonCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingReasonCategory::DataUnavailable => write!(f, "data-unavailable"),
            MissingReasonCategory::SupplierDependency => write!(f, "supplier-dependency"),
            MissingReasonCategory::MethodologyPending => write!(f, "methodology-pending"),
            MissingReasonCategory::NotMaterial => write!(f, "not-material"),
            MissingReasonCategory::Other => write!(f, "other"),
        }
    }
}

/// How an estimate was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstimateType {
    /// Single point estimate
    Point,
    /// Bounded range
    Range,
    /// Derived from a proxy measure
    ProxyBased,
    /// Extrapolated from partial data
    Extrapolated,
}

impl std::fmt::Display for EstimateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimateType::Point => write!(f, "point"),
            EstimateType::Range => write!(f, "range"),
            EstimateType::ProxyBased => write!(f, "proxy-based"),
            EstimateType::Extrapolated => write!(f, "extrapolated"),
        }
    }
}

/// Confidence attached to an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// Low confidence
    Low,
    /// Medium confidence
    Medium,
    /// High confidence
    High,
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::Low => write!(f, "low"),
            ConfidenceLevel::Medium => write!(f, "medium"),
            ConfidenceLevel::High => write!(f, "high"),
        }
    }
}

/// Immutable record of the estimate a data point held before its
/// estimated → provided transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSnapshot {
    /// Estimate type at snapshot time
    pub estimate_type: Option<EstimateType>,
    /// Estimate method at snapshot time
    pub estimate_method: String,
    /// Confidence level at snapshot time
    pub confidence_level: Option<ConfidenceLevel>,
    /// Input sources and assumptions behind the estimate
    pub input_sources: String,
    /// Value the data point carried while estimated
    pub value: String,
    /// Unit the data point carried while estimated
    pub unit: String,
}

/// Smallest disclosable unit of report content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Unique identifier
    pub id: String,
    /// Owning section
    pub section_id: String,
    /// Short title
    pub title: String,
    /// Narrative content
    pub content: String,
    /// Reported value, free-form text ("120", "2025-03-01", ...)
    pub value: String,
    /// Unit of the value, blank when unitless
    pub unit: String,
    /// Grouping key for unit-normalization checks
    pub classification: String,
    /// Data point type, e.g. "metric" or "narrative"
    pub data_type: String,
    /// Where the value came from
    pub source: String,
    /// Kind of information carried
    pub information_type: InformationType,
    /// Responsible user id, blank when unowned
    pub owner_id: String,
    /// Contributing user ids, always disjoint from the owner
    pub contributor_ids: Vec<String>,
    /// Completeness classification, derived unless explicitly requested
    pub completeness_status: CompletenessStatus,
    /// Editorial review state
    pub review_status: ReviewStatus,
    /// Gap-resolution workflow stage
    pub gap_status: GapStatus,
    /// Whether work on this data point is blocked
    pub is_blocked: bool,
    /// Why it is blocked
    pub blocker_reason: String,
    /// When the blocker must be resolved
    pub blocker_due_date: Option<NaiveDate>,
    /// Whether the underlying data is flagged missing
    pub is_missing: bool,
    /// Free-text reason the data is missing
    pub missing_reason: String,
    /// Categorized reason the data is missing
    pub missing_reason_category: Option<MissingReasonCategory>,
    /// Who flagged the data missing
    pub flagged_by: String,
    /// When the data was flagged missing
    pub flagged_at: Option<DateTime<Utc>>,
    /// How the current estimate was produced
    pub estimate_type: Option<EstimateType>,
    /// Method description of the current estimate
    pub estimate_method: String,
    /// Confidence of the current estimate
    pub confidence_level: Option<ConfidenceLevel>,
    /// Inputs and assumptions behind the current estimate
    pub estimate_input_sources: String,
    /// Who authored the current estimate
    pub estimate_author: String,
    /// When the current estimate was recorded
    pub estimate_created_at: Option<DateTime<Utc>>,
    /// Serialized estimate preserved at the estimated → provided transition
    pub previous_estimate_snapshot: Option<String>,
    /// References to originating source records
    pub source_references: Vec<String>,
    /// Whether provenance needs reviewer attention
    pub provenance_needs_review: bool,
    /// Why provenance was flagged
    pub provenance_review_reason: String,
    /// Hash of the source material at publication time
    pub publication_source_hash: String,
    /// Linked evidence ids
    pub evidence_ids: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl DataPoint {
    /// Create an empty data point in the given section
    pub fn new(section_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
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
            completeness_status: CompletenessStatus::Incomplete,
            review_status: ReviewStatus::Draft,
            gap_status: GapStatus::Unset,
            is_blocked: false,
            blocker_reason: String::new(),
            blocker_due_date: None,
            is_missing: false,
            missing_reason: String::new(),
            missing_reason_category: None,
            flagged_by: String::new(),
            flagged_at: None,
            estimate_type: None,
            estimate_method: String::new(),
            confidence_level: None,
            estimate_input_sources: String::new(),
            estimate_author: String::new(),
            estimate_created_at: None,
            previous_estimate_snapshot: None,
            source_references: Vec::new(),
            provenance_needs_review: false,
            provenance_review_reason: String::new(),
            publication_source_hash: String::new(),
            evidence_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the data point has an owner assigned
    pub fn has_owner(&self) -> bool {
        !self.owner_id.trim().is_empty()
    }

    /// Snapshot of the current estimate fields
    pub fn estimate_snapshot(&self) -> EstimateSnapshot {
        EstimateSnapshot {
            estimate_type: self.estimate_type,
            estimate_method: self.estimate_method.clone(),
            confidence_level: self.confidence_level,
            input_sources: self.estimate_input_sources.clone(),
            value: self.value.clone(),
            unit: self.unit.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_status_ordering() {
        assert!(GapStatus::Unset.rank() < GapStatus::Missing.rank());
        assert!(GapStatus::Missing.rank() < GapStatus::Estimated.rank());
        assert!(GapStatus::Estimated.rank() < GapStatus::Provided.rank());
    }

    #[test]
    fn test_gap_status_unset_serializes_empty() {
        let json = serde_json::to_string(&GapStatus::Unset).unwrap();
        assert_eq!(json, "\"\"");
        let back: GapStatus = serde_json::from_str("\"\"").unwrap();
        assert_eq!(back, GapStatus::Unset);
    }

    #[test]
    fn test_status_display_spellings() {
        assert_eq!(CompletenessStatus::NotApplicable.to_string(), "not-applicable");
        assert_eq!(ReviewStatus::ChangesRequested.to_string(), "changes-requested");
        assert_eq!(EstimateType::ProxyBased.to_string(), "proxy-based");
        assert_eq!(GapStatus::Unset.to_string(), "");
    }

    #[test]
    fn test_new_data_point_defaults() {
        let dp = DataPoint::new("sec-1");
        assert_eq!(dp.section_id, "sec-1");
        assert_eq!(dp.gap_status, GapStatus::Unset);
        assert_eq!(dp.review_status, ReviewStatus::Draft);
        assert!(!dp.has_owner());
        assert!(dp.evidence_ids.is_empty());
        assert!(!dp.id.is_empty());
    }

    #[test]
    fn test_estimate_snapshot_captures_value_and_unit() {
        let mut dp = DataPoint::new("sec-1");
        dp.value = "410".to_string();
        dp.unit = "tCO2e".to_string();
        dp.estimate_type = Some(EstimateType::Point);
        dp.estimate_method = "interpolated from Q1".to_string();
        dp.confidence_level = Some(ConfidenceLevel::Medium);

        let snap = dp.estimate_snapshot();
        assert_eq!(snap.value, "410");
        assert_eq!(snap.unit, "tCO2e");
        assert_eq!(snap.estimate_type, Some(EstimateType::Point));
        assert_eq!(snap.confidence_level, Some(ConfidenceLevel::Medium));
    }
}
