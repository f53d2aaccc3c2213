//! Property tests for the gap-resolution state machine: forward-only
//! movement, no stage skipping, and a complete estimate triple at the
//! estimated step.

use chrono::NaiveDate;
use proptest::prelude::*;
use verdant_domain::{
    ConfidenceLevel, EstimateType, GapStatus, ReportSection, ReportingPeriod, Role,
    SectionCategory, User,
};
use verdant_engine::{DisclosureStore, GapTransitionRequest, NewDataPoint};

fn fresh_store() -> DisclosureStore {
    let store = DisclosureStore::new(vec![
        User::new("u-admin", "Avery Chen", Role::Admin),
        User::new("u-owner", "Priya Nair", Role::ReportOwner),
    ]);
    let mut period = ReportingPeriod::new("fy2025", "FY 2025");
    period.start_date = NaiveDate::from_ymd_opt(2025, 1, 1);
    period.end_date = NaiveDate::from_ymd_opt(2025, 12, 31);
    period.owner_id = "u-owner".to_string();
    store.insert_period(period);
    store.insert_section(ReportSection::new(
        "sec-env",
        "fy2025",
        SectionCategory::Environmental,
        "Environment",
    ));
    store
}

fn provided_data_point(store: &DisclosureStore) -> String {
    let mut input = NewDataPoint::in_section("sec-env");
    input.title = "Water withdrawal".to_string();
    input.content = "Site-level meter totals".to_string();
    input.source = "Facilities".to_string();
    input.owner_id = "u-owner".to_string();
    let dp = store.create_data_point("u-owner", input).unwrap();

    store
        .transition_gap_status("u-owner", &dp.id, GapTransitionRequest::to(GapStatus::Missing))
        .unwrap();
    store
        .transition_gap_status(
            "u-owner",
            &dp.id,
            GapTransitionRequest::estimated(
                EstimateType::Point,
                "scaled from prior year",
                ConfidenceLevel::High,
            ),
        )
        .unwrap();
    store
        .transition_gap_status(
            "u-owner",
            &dp.id,
            GapTransitionRequest::to(GapStatus::Provided),
        )
        .unwrap();
    dp.id
}

fn target_strategy() -> impl Strategy<Value = GapStatus> {
    prop_oneof![
        Just(GapStatus::Missing),
        Just(GapStatus::Estimated),
        Just(GapStatus::Provided),
    ]
}

fn request_for(target: GapStatus) -> GapTransitionRequest {
    match target {
        GapStatus::Estimated => GapTransitionRequest::estimated(
            EstimateType::Range,
            "re-estimated",
            ConfidenceLevel::Low,
        ),
        other => GapTransitionRequest::to(other),
    }
}

proptest! {
    #[test]
    fn provided_never_regresses(targets in proptest::collection::vec(target_strategy(), 1..8)) {
        let store = fresh_store();
        let dp_id = provided_data_point(&store);

        for target in targets {
            let result = store.transition_gap_status("u-owner", &dp_id, request_for(target));
            prop_assert!(result.is_err());
        }
        prop_assert_eq!(
            store.get_data_point(&dp_id).unwrap().gap_status,
            GapStatus::Provided
        );
    }

    #[test]
    fn provided_is_never_reached_from_missing_directly(title in "[A-Za-z ]{1,24}") {
        let store = fresh_store();
        let mut input = NewDataPoint::in_section("sec-env");
        input.title = title;
        let dp = store.create_data_point("u-owner", input).unwrap();

        store
            .transition_gap_status("u-owner", &dp.id, GapTransitionRequest::to(GapStatus::Missing))
            .unwrap();
        let err = store
            .transition_gap_status("u-owner", &dp.id, GapTransitionRequest::to(GapStatus::Provided))
            .unwrap_err();

        prop_assert!(err.to_string().contains("Cannot skip the 'estimated' status"));
        prop_assert_eq!(
            store.get_data_point(&dp.id).unwrap().gap_status,
            GapStatus::Missing
        );
    }

    #[test]
    fn estimated_requires_the_full_triple(
        has_type in any::<bool>(),
        has_method in any::<bool>(),
        has_confidence in any::<bool>(),
    ) {
        let store = fresh_store();
        let mut input = NewDataPoint::in_section("sec-env");
        input.title = "Fleet fuel".to_string();
        let dp = store.create_data_point("u-owner", input).unwrap();
        store
            .transition_gap_status("u-owner", &dp.id, GapTransitionRequest::to(GapStatus::Missing))
            .unwrap();

        let request = GapTransitionRequest {
            estimate_type: has_type.then_some(EstimateType::Point),
            estimate_method: has_method.then(|| "fleet average".to_string()),
            confidence_level: has_confidence.then_some(ConfidenceLevel::Medium),
            ..GapTransitionRequest::to(GapStatus::Estimated)
        };
        let result = store.transition_gap_status("u-owner", &dp.id, request);

        if has_type && has_method && has_confidence {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(
                store.get_data_point(&dp.id).unwrap().gap_status,
                GapStatus::Missing
            );
        }
    }
}
