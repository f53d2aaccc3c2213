//! Derived completeness and progress calculators
//!
//! Pure functions over domain collections; the store calls them after every
//! commit that can change the inputs.

use verdant_domain::{CompletenessStatus, DataPoint, ReviewStatus, SectionProgress};

/// Derive a data point's completeness status from its content.
///
/// Complete requires title, content, and source non-blank, at least one
/// evidence link, and a non-blank owner; anything less is incomplete. Runs
/// whenever a caller omits an explicit completeness status on create or
/// update.
pub fn derive_completeness_status(dp: &DataPoint) -> CompletenessStatus {
    let content_present = !dp.title.trim().is_empty()
        && !dp.content.trim().is_empty()
        && !dp.source.trim().is_empty();
    if content_present && !dp.evidence_ids.is_empty() && dp.has_owner() {
        CompletenessStatus::Complete
    } else {
        CompletenessStatus::Incomplete
    }
}

/// Derive a section's aggregate progress from its data points.
///
/// Priority order: any changes-requested review blocks the section, even
/// when every other data point is complete; an empty section or an
/// all-missing section is not started; all complete or not-applicable is
/// completed; anything else is in progress.
pub fn derive_section_progress(data_points: &[&DataPoint]) -> SectionProgress {
    if data_points
        .iter()
        .any(|dp| dp.review_status == ReviewStatus::ChangesRequested)
    {
        return SectionProgress::Blocked;
    }

    if data_points.is_empty() {
        return SectionProgress::NotStarted;
    }

    if data_points
        .iter()
        .all(|dp| dp.completeness_status == CompletenessStatus::Missing)
    {
        return SectionProgress::NotStarted;
    }

    if data_points.iter().all(|dp| {
        matches!(
            dp.completeness_status,
            CompletenessStatus::Complete | CompletenessStatus::NotApplicable
        )
    }) {
        return SectionProgress::Completed;
    }

    SectionProgress::InProgress
}

/// Completion percentage of a section with accepted exceptions removed from
/// the denominator. An empty denominator counts as fully complete.
pub fn section_completion_percentage(data_points: &[&DataPoint], exempted_ids: &[String]) -> u8 {
    let considered: Vec<&&DataPoint> = data_points
        .iter()
        .filter(|dp| !exempted_ids.contains(&dp.id))
        .collect();

    if considered.is_empty() {
        return 100;
    }

    let complete = considered
        .iter()
        .filter(|dp| {
            matches!(
                dp.completeness_status,
                CompletenessStatus::Complete | CompletenessStatus::NotApplicable
            )
        })
        .count();

    ((complete as f64 / considered.len() as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_domain::DataPoint;

    fn filled(section: &str, status: CompletenessStatus) -> DataPoint {
        let mut dp = DataPoint::new(section);
        dp.completeness_status = status;
        dp
    }

    #[test]
    fn test_derive_incomplete_without_evidence() {
        let mut dp = DataPoint::new("sec-1");
        dp.title = "Energy use".to_string();
        dp.content = "120 MWh".to_string();
        dp.source = "Meter".to_string();
        dp.owner_id = "u-owner".to_string();

        assert_eq!(derive_completeness_status(&dp), CompletenessStatus::Incomplete);
    }

    #[test]
    fn test_derive_incomplete_without_owner() {
        let mut dp = DataPoint::new("sec-1");
        dp.title = "Energy use".to_string();
        dp.content = "120 MWh".to_string();
        dp.source = "Meter".to_string();
        dp.evidence_ids.push("ev-1".to_string());

        assert_eq!(derive_completeness_status(&dp), CompletenessStatus::Incomplete);
    }

    #[test]
    fn test_derive_complete_with_everything() {
        let mut dp = DataPoint::new("sec-1");
        dp.title = "Energy use".to_string();
        dp.content = "120 MWh".to_string();
        dp.source = "Meter".to_string();
        dp.owner_id = "u-owner".to_string();
        dp.evidence_ids.push("ev-1".to_string());

        assert_eq!(derive_completeness_status(&dp), CompletenessStatus::Complete);
    }

    #[test]
    fn test_empty_section_not_started() {
        assert_eq!(derive_section_progress(&[]), SectionProgress::NotStarted);
    }

    #[test]
    fn test_all_missing_not_started() {
        let a = filled("sec-1", CompletenessStatus::Missing);
        let b = filled("sec-1", CompletenessStatus::Missing);
        assert_eq!(
            derive_section_progress(&[&a, &b]),
            SectionProgress::NotStarted
        );
    }

    #[test]
    fn test_changes_requested_blocks_even_when_complete() {
        let mut a = filled("sec-1", CompletenessStatus::Complete);
        a.review_status = ReviewStatus::ChangesRequested;
        let b = filled("sec-1", CompletenessStatus::Complete);
        assert_eq!(derive_section_progress(&[&a, &b]), SectionProgress::Blocked);
    }

    #[test]
    fn test_complete_and_not_applicable_completed() {
        let a = filled("sec-1", CompletenessStatus::Complete);
        let b = filled("sec-1", CompletenessStatus::NotApplicable);
        assert_eq!(
            derive_section_progress(&[&a, &b]),
            SectionProgress::Completed
        );
    }

    #[test]
    fn test_mixed_in_progress() {
        let a = filled("sec-1", CompletenessStatus::Complete);
        let b = filled("sec-1", CompletenessStatus::Incomplete);
        assert_eq!(
            derive_section_progress(&[&a, &b]),
            SectionProgress::InProgress
        );
    }

    #[test]
    fn test_completion_percentage_with_exemption() {
        let a = filled("sec-1", CompletenessStatus::Complete);
        let b = filled("sec-1", CompletenessStatus::Incomplete);
        let c = filled("sec-1", CompletenessStatus::Incomplete);

        assert_eq!(section_completion_percentage(&[&a, &b, &c], &[]), 33);
        // exempting one incomplete data point shrinks the denominator
        assert_eq!(
            section_completion_percentage(&[&a, &b, &c], &[b.id.clone()]),
            50
        );
    }

    #[test]
    fn test_completion_percentage_empty_denominator() {
        let a = filled("sec-1", CompletenessStatus::Incomplete);
        assert_eq!(section_completion_percentage(&[], &[]), 100);
        assert_eq!(section_completion_percentage(&[&a], &[a.id.clone()]), 100);
    }
}
