//! Period-wide consistency validation
//!
//! A read-only batch pass over one reporting period producing
//! severity-classified issues and the publish gate. The pass is pure
//! relative to store state: issue ids and timestamps are regenerated per
//! run, but the kind/severity/message multiset is deterministic for a
//! fixed state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;
use verdant_domain::{
    CompletenessStatus, DataPoint, InformationType, ReportSection, ReportingPeriod, ReviewStatus,
};

/// Severity of a consistency issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks publication
    Error,
    /// Should be fixed before publication
    Warning,
    /// Informational only
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Kind of consistency issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// Required disclosure content is absent or incomplete
    MissingRequiredField,
    /// A data point is stuck in review or flagged for provenance review
    ReviewRequired,
    /// Units disagree within a classification, or a metric lacks a unit
    UnitNormalization,
    /// A dated value falls outside the reporting period
    PeriodCoverage,
    /// A data point has no owner
    MissingOwner,
    /// An approved data point has no supporting evidence
    MissingEvidence,
    /// An estimate-typed data point is missing estimate metadata
    IncompleteEstimate,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::MissingRequiredField => write!(f, "missing-required-field"),
            IssueKind::ReviewRequired => write!(f, "review-required"),
            IssueKind::UnitNormalization => write!(f, "unit-normalization"),
            IssueKind::PeriodCoverage => write!(f, "period-coverage"),
            IssueKind::MissingOwner => write!(f, "missing-owner"),
            IssueKind::MissingEvidence => write!(f, "missing-evidence"),
            IssueKind::IncompleteEstimate => write!(f, "incomplete-estimate"),
        }
    }
}

/// Independently selectable validation passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsistencyCheck {
    /// Sections and data points carry the required disclosure content
    RequiredData,
    /// Units agree within a classification group
    UnitNormalization,
    /// Dated values fall inside the period
    PeriodCoverage,
    /// Owners, evidence, and estimate metadata are present
    MissingFields,
}

impl ConsistencyCheck {
    /// Every pass, in canonical order
    pub fn all() -> Vec<ConsistencyCheck> {
        vec![
            ConsistencyCheck::RequiredData,
            ConsistencyCheck::UnitNormalization,
            ConsistencyCheck::PeriodCoverage,
            ConsistencyCheck::MissingFields,
        ]
    }
}

/// One issue found by a validation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Unique id, regenerated each run
    pub id: String,
    /// Issue kind
    pub kind: IssueKind,
    /// Severity classification
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
    /// Section the issue belongs to
    pub section_id: String,
    /// Affected data point ids
    pub data_point_ids: Vec<String>,
    /// When the issue was detected, regenerated each run
    pub detected_at: DateTime<Utc>,
}

impl ValidationIssue {
    fn new(
        kind: IssueKind,
        severity: Severity,
        message: String,
        section_id: &str,
        data_point_ids: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            severity,
            message,
            section_id: section_id.to_string(),
            data_point_ids,
            detected_at: Utc::now(),
        }
    }
}

/// Overall result classification of a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyStatus {
    /// No issues at all, or informational only
    Passed,
    /// Warnings but no errors
    Warning,
    /// At least one error
    Failed,
}

/// Result of a consistency validation run over one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// Overall classification
    pub status: ConsistencyStatus,
    /// Whether the period may be published (no errors)
    pub can_publish: bool,
    /// Number of error-severity issues
    pub error_count: usize,
    /// Number of warning-severity issues
    pub warning_count: usize,
    /// Number of info-severity issues
    pub info_count: usize,
    /// All issues found, in pass order
    pub issues: Vec<ValidationIssue>,
    /// When the run happened
    pub checked_at: DateTime<Utc>,
}

/// Run the selected passes over a period. An empty check list selects every
/// pass. Disabled sections are skipped entirely; `exempted_ids` removes
/// accepted completion exceptions from the completeness denominator.
pub fn run(
    period: &ReportingPeriod,
    sections: &[&ReportSection],
    data_points: &[&DataPoint],
    exempted_ids: &[String],
    checks: &[ConsistencyCheck],
) -> ConsistencyReport {
    let selected = if checks.is_empty() {
        ConsistencyCheck::all()
    } else {
        checks.to_vec()
    };

    let enabled: Vec<&ReportSection> = sections.iter().copied().filter(|s| !s.disabled).collect();

    let mut issues = Vec::new();
    for check in selected {
        match check {
            ConsistencyCheck::RequiredData => {
                required_data(&enabled, data_points, exempted_ids, &mut issues)
            }
            ConsistencyCheck::UnitNormalization => {
                unit_normalization(&enabled, data_points, &mut issues)
            }
            ConsistencyCheck::PeriodCoverage => {
                period_coverage(period, &enabled, data_points, &mut issues)
            }
            ConsistencyCheck::MissingFields => missing_fields(&enabled, data_points, &mut issues),
        }
    }

    let error_count = issues.iter().filter(|i| i.severity == Severity::Error).count();
    let warning_count = issues
        .iter()
        .filter(|i| i.severity == Severity::Warning)
        .count();
    let info_count = issues.iter().filter(|i| i.severity == Severity::Info).count();

    let status = if error_count > 0 {
        ConsistencyStatus::Failed
    } else if warning_count > 0 {
        ConsistencyStatus::Warning
    } else {
        ConsistencyStatus::Passed
    };

    ConsistencyReport {
        status,
        can_publish: error_count == 0,
        error_count,
        warning_count,
        info_count,
        issues,
        checked_at: Utc::now(),
    }
}

fn section_points<'a>(section_id: &str, data_points: &[&'a DataPoint]) -> Vec<&'a DataPoint> {
    data_points
        .iter()
        .copied()
        .filter(|dp| dp.section_id == section_id)
        .collect()
}

fn required_data(
    sections: &[&ReportSection],
    data_points: &[&DataPoint],
    exempted_ids: &[String],
    issues: &mut Vec<ValidationIssue>,
) {
    for section in sections {
        let points = section_points(&section.id, data_points);

        if points.is_empty() {
            issues.push(ValidationIssue::new(
                IssueKind::MissingRequiredField,
                Severity::Error,
                format!("Section '{}' has no data points.", section.title),
                &section.id,
                Vec::new(),
            ));
            continue;
        }

        let considered: Vec<&DataPoint> = points
            .iter()
            .copied()
            .filter(|dp| !exempted_ids.contains(&dp.id))
            .collect();
        let incomplete: Vec<&DataPoint> = considered
            .iter()
            .copied()
            .filter(|dp| {
                matches!(
                    dp.completeness_status,
                    CompletenessStatus::Missing | CompletenessStatus::Incomplete
                )
            })
            .collect();
        if !incomplete.is_empty() {
            issues.push(ValidationIssue::new(
                IssueKind::MissingRequiredField,
                Severity::Warning,
                format!(
                    "Section '{}' has {} of {} data points missing or incomplete.",
                    section.title,
                    incomplete.len(),
                    considered.len()
                ),
                &section.id,
                incomplete.iter().map(|dp| dp.id.clone()).collect(),
            ));
        }

        let in_review: Vec<&DataPoint> = points
            .iter()
            .copied()
            .filter(|dp| dp.review_status == ReviewStatus::ChangesRequested)
            .collect();
        if !in_review.is_empty() {
            issues.push(ValidationIssue::new(
                IssueKind::ReviewRequired,
                Severity::Error,
                format!(
                    "{} data point(s) in section '{}' have changes requested.",
                    in_review.len(),
                    section.title
                ),
                &section.id,
                in_review.iter().map(|dp| dp.id.clone()).collect(),
            ));
        }

        let provenance: Vec<&DataPoint> = points
            .iter()
            .copied()
            .filter(|dp| dp.provenance_needs_review)
            .collect();
        if !provenance.is_empty() {
            issues.push(ValidationIssue::new(
                IssueKind::ReviewRequired,
                Severity::Error,
                format!(
                    "{} data point(s) in section '{}' are flagged for provenance review.",
                    provenance.len(),
                    section.title
                ),
                &section.id,
                provenance.iter().map(|dp| dp.id.clone()).collect(),
            ));
        }
    }
}

fn unit_normalization(
    sections: &[&ReportSection],
    data_points: &[&DataPoint],
    issues: &mut Vec<ValidationIssue>,
) {
    for section in sections {
        let points = section_points(&section.id, data_points);

        let mut groups: BTreeMap<String, Vec<&DataPoint>> = BTreeMap::new();
        for dp in &points {
            let classification = dp.classification.trim();
            if !classification.is_empty() {
                groups.entry(classification.to_string()).or_default().push(dp);
            }
        }

        for (classification, members) in groups {
            let units: BTreeSet<String> = members
                .iter()
                .map(|dp| dp.unit.trim().to_string())
                .collect();
            if units.len() > 1 {
                let listed: Vec<String> = units.into_iter().collect();
                issues.push(ValidationIssue::new(
                    IssueKind::UnitNormalization,
                    Severity::Warning,
                    format!(
                        "Classification '{}' in section '{}' uses {} different units: {}.",
                        classification,
                        section.title,
                        listed.len(),
                        listed.join(", ")
                    ),
                    &section.id,
                    members.iter().map(|dp| dp.id.clone()).collect(),
                ));
            }
        }

        for dp in points {
            if dp.data_type == "metric" && !dp.value.trim().is_empty() && dp.unit.trim().is_empty()
            {
                issues.push(ValidationIssue::new(
                    IssueKind::UnitNormalization,
                    Severity::Error,
                    format!("Metric data point '{}' has a value but no unit.", dp.title),
                    &section.id,
                    vec![dp.id.clone()],
                ));
            }
        }
    }
}

fn period_coverage(
    period: &ReportingPeriod,
    sections: &[&ReportSection],
    data_points: &[&DataPoint],
    issues: &mut Vec<ValidationIssue>,
) {
    for section in sections {
        for dp in section_points(&section.id, data_points) {
            let date = match NaiveDate::parse_from_str(dp.value.trim(), "%Y-%m-%d") {
                Ok(d) => d,
                Err(_) => continue,
            };
            if !period.covers(date) {
                issues.push(ValidationIssue::new(
                    IssueKind::PeriodCoverage,
                    Severity::Warning,
                    format!(
                        "Data point '{}' is dated {} which falls outside the reporting period.",
                        dp.title, date
                    ),
                    &section.id,
                    vec![dp.id.clone()],
                ));
            }
        }
    }
}

fn missing_fields(
    sections: &[&ReportSection],
    data_points: &[&DataPoint],
    issues: &mut Vec<ValidationIssue>,
) {
    for section in sections {
        for dp in section_points(&section.id, data_points) {
            if !dp.has_owner() {
                issues.push(ValidationIssue::new(
                    IssueKind::MissingOwner,
                    Severity::Warning,
                    format!("Data point '{}' has no owner.", dp.title),
                    &section.id,
                    vec![dp.id.clone()],
                ));
            }

            if dp.review_status == ReviewStatus::Approved
                && dp.information_type != InformationType::Estimate
                && dp.evidence_ids.is_empty()
            {
                issues.push(ValidationIssue::new(
                    IssueKind::MissingEvidence,
                    Severity::Warning,
                    format!(
                        "Approved data point '{}' has no supporting evidence.",
                        dp.title
                    ),
                    &section.id,
                    vec![dp.id.clone()],
                ));
            }

            if dp.information_type == InformationType::Estimate {
                if dp.estimate_type.is_none() {
                    issues.push(ValidationIssue::new(
                        IssueKind::IncompleteEstimate,
                        Severity::Error,
                        format!("Estimate data point '{}' is missing estimate type.", dp.title),
                        &section.id,
                        vec![dp.id.clone()],
                    ));
                }
                if dp.estimate_method.trim().is_empty() {
                    issues.push(ValidationIssue::new(
                        IssueKind::IncompleteEstimate,
                        Severity::Error,
                        format!(
                            "Estimate data point '{}' is missing estimate method.",
                            dp.title
                        ),
                        &section.id,
                        vec![dp.id.clone()],
                    ));
                }
                if dp.confidence_level.is_none() {
                    issues.push(ValidationIssue::new(
                        IssueKind::IncompleteEstimate,
                        Severity::Error,
                        format!(
                            "Estimate data point '{}' is missing confidence level.",
                            dp.title
                        ),
                        &section.id,
                        vec![dp.id.clone()],
                    ));
                }
            }
        }
    }
}
