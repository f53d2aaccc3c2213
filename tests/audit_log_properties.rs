//! Property tests for the audit trail: the entry count never decreases
//! across any operation sequence, including denied attempts, and no-op
//! updates never produce entries.

use chrono::NaiveDate;
use proptest::prelude::*;
use verdant_domain::{
    GapStatus, ReportSection, ReportingPeriod, Role, SectionCategory, User,
};
use verdant_engine::{
    DataPointUpdate, DisclosureStore, GapTransitionRequest, NewDataPoint, NewRule,
};

fn fresh_store() -> DisclosureStore {
    let store = DisclosureStore::new(vec![
        User::new("u-admin", "Avery Chen", Role::Admin),
        User::new("u-owner", "Priya Nair", Role::ReportOwner),
        User::new("u-contrib", "Marco Silva", Role::Contributor),
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
        .create_rule(
            "u-admin",
            NewRule {
                section_id: "sec-env".to_string(),
                kind: "non-negative".to_string(),
                target_field: String::new(),
                parameters: String::new(),
                error_message: "Value cannot be negative".to_string(),
                active: true,
            },
        )
        .unwrap();
    store
}

#[derive(Debug, Clone)]
enum Op {
    CreateOk(String),
    CreateRejected,
    RenameFirst(String),
    NoopUpdate,
    DeniedGapTransition,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[A-Za-z ]{1,20}".prop_map(Op::CreateOk),
        Just(Op::CreateRejected),
        "[A-Za-z ]{1,20}".prop_map(Op::RenameFirst),
        Just(Op::NoopUpdate),
        Just(Op::DeniedGapTransition),
    ]
}

fn first_data_point(store: &DisclosureStore) -> Option<String> {
    store
        .list_data_points("sec-env")
        .into_iter()
        .next()
        .map(|dp| dp.id)
}

fn apply(store: &DisclosureStore, op: &Op) {
    match op {
        Op::CreateOk(title) => {
            let mut input = NewDataPoint::in_section("sec-env");
            input.title = title.clone();
            let _ = store.create_data_point("u-owner", input);
        }
        Op::CreateRejected => {
            let mut input = NewDataPoint::in_section("sec-env");
            input.title = "negative".to_string();
            input.value = "-1".to_string();
            let _ = store.create_data_point("u-owner", input);
        }
        Op::RenameFirst(title) => {
            if let Some(id) = first_data_point(store) {
                let update = DataPointUpdate {
                    title: Some(title.clone()),
                    ..DataPointUpdate::default()
                };
                let _ = store.update_data_point("u-owner", &id, update);
            }
        }
        Op::NoopUpdate => {
            if let Some(id) = first_data_point(store) {
                let _ = store.update_data_point("u-owner", &id, DataPointUpdate::default());
            }
        }
        Op::DeniedGapTransition => {
            if let Some(id) = first_data_point(store) {
                let _ = store.transition_gap_status(
                    "u-contrib",
                    &id,
                    GapTransitionRequest::to(GapStatus::Missing),
                );
            }
        }
    }
}

proptest! {
    #[test]
    fn audit_length_is_monotonic(ops in proptest::collection::vec(op_strategy(), 1..20)) {
        let store = fresh_store();
        let mut previous = store.audit_len();

        for op in &ops {
            apply(&store, op);
            let current = store.audit_len();
            prop_assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn denied_transitions_always_leave_a_trace(title in "[A-Za-z ]{1,20}") {
        let store = fresh_store();
        let mut input = NewDataPoint::in_section("sec-env");
        input.title = title;
        let dp = store.create_data_point("u-owner", input).unwrap();

        let before = store.audit_len();
        prop_assert!(store
            .transition_gap_status("u-contrib", &dp.id, GapTransitionRequest::to(GapStatus::Missing))
            .is_err());
        prop_assert_eq!(store.audit_len(), before + 1);
    }

    #[test]
    fn unchanged_updates_write_nothing(title in "[A-Za-z ]{1,20}") {
        let store = fresh_store();
        let mut input = NewDataPoint::in_section("sec-env");
        input.title = title.clone();
        let dp = store.create_data_point("u-owner", input).unwrap();
        let before = store.audit_len();

        let update = DataPointUpdate {
            title: Some(title),
            ..DataPointUpdate::default()
        };
        store.update_data_point("u-owner", &dp.id, update).unwrap();
        store
            .update_data_point("u-owner", &dp.id, DataPointUpdate::default())
            .unwrap();

        prop_assert_eq!(store.audit_len(), before);
    }
}
