//! Field-level diffing of data points
//!
//! Diffs are computed against the prospective entity before the mutation
//! commits, so the audit entry reflects exactly what the operation changed.
//! Values are rendered as the displayed text a reader of the log would
//! expect: blank for absent options, enum wire spellings, comma-joined
//! lists.

use crate::models::FieldChange;
use verdant_domain::DataPoint;

fn display_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

fn display_list(values: &[String]) -> String {
    values.join(",")
}

/// The tracked fields of a data point, in audit order, rendered as
/// displayed values
pub fn tracked_fields(dp: &DataPoint) -> Vec<(&'static str, String)> {
    vec![
        ("title", dp.title.clone()),
        ("content", dp.content.clone()),
        ("value", dp.value.clone()),
        ("unit", dp.unit.clone()),
        ("classification", dp.classification.clone()),
        ("data_type", dp.data_type.clone()),
        ("source", dp.source.clone()),
        ("information_type", dp.information_type.to_string()),
        ("owner_id", dp.owner_id.clone()),
        ("contributor_ids", display_list(&dp.contributor_ids)),
        ("completeness_status", dp.completeness_status.to_string()),
        ("review_status", dp.review_status.to_string()),
        ("gap_status", dp.gap_status.to_string()),
        ("is_blocked", dp.is_blocked.to_string()),
        ("blocker_reason", dp.blocker_reason.clone()),
        ("blocker_due_date", display_opt(&dp.blocker_due_date)),
        ("is_missing", dp.is_missing.to_string()),
        ("missing_reason", dp.missing_reason.clone()),
        (
            "missing_reason_category",
            display_opt(&dp.missing_reason_category),
        ),
        ("estimate_type", display_opt(&dp.estimate_type)),
        ("estimate_method", dp.estimate_method.clone()),
        ("confidence_level", display_opt(&dp.confidence_level)),
        ("estimate_input_sources", dp.estimate_input_sources.clone()),
        (
            "previous_estimate_snapshot",
            dp.previous_estimate_snapshot.clone().unwrap_or_default(),
        ),
        ("source_references", display_list(&dp.source_references)),
        (
            "provenance_needs_review",
            dp.provenance_needs_review.to_string(),
        ),
        (
            "provenance_review_reason",
            dp.provenance_review_reason.clone(),
        ),
        ("evidence_ids", display_list(&dp.evidence_ids)),
    ]
}

/// Compute the ordered field changes between two data point states.
/// Returns an empty vec when no tracked field differs.
pub fn diff_data_points(old: &DataPoint, new: &DataPoint) -> Vec<FieldChange> {
    tracked_fields(old)
        .into_iter()
        .zip(tracked_fields(new))
        .filter(|((_, old_value), (_, new_value))| old_value != new_value)
        .map(|((field, old_value), (_, new_value))| FieldChange::new(field, old_value, new_value))
        .collect()
}

/// Field changes for a freshly created data point: every tracked field that
/// carries a non-default value, diffed against blank
pub fn creation_changes(dp: &DataPoint) -> Vec<FieldChange> {
    tracked_fields(dp)
        .into_iter()
        .filter(|(_, value)| !value.is_empty() && value != "false")
        .map(|(field, value)| FieldChange::new(field, "", value))
        .collect()
}
