//! Seed catalog
//!
//! Builds a store pre-populated with a small, fixed disclosure landscape:
//! a user directory, one reporting period with three sections, starter
//! data points, and two validation rules. Everything except the directory
//! and the period/section scaffolding goes through the public operations,
//! so the seeded store already carries a coherent audit trail.

use chrono::NaiveDate;
use verdant_domain::{
    DomainResult, ReportSection, ReportingPeriod, Role, SectionCategory, User,
};

use crate::models::{NewDataPoint, NewEvidence, NewRule};
use crate::store::DisclosureStore;

/// The fixed reporting period id used by the seed catalog
pub const SEED_PERIOD: &str = "fy2025";

/// Build a seeded store
pub fn seed_store() -> DomainResult<DisclosureStore> {
    let store = DisclosureStore::new(vec![
        User::new("u-admin", "Avery Chen", Role::Admin),
        User::new("u-owner", "Priya Nair", Role::ReportOwner),
        User::new("u-contrib", "Marco Silva", Role::Contributor),
        User::new("u-audit", "Jonas Weber", Role::Auditor),
    ]);

    let mut period = ReportingPeriod::new(SEED_PERIOD, "FY 2025");
    period.start_date = NaiveDate::from_ymd_opt(2025, 1, 1);
    period.end_date = NaiveDate::from_ymd_opt(2025, 12, 31);
    period.owner_id = "u-owner".to_string();
    store.insert_period(period);

    let mut environment = ReportSection::new(
        "sec-env",
        SEED_PERIOD,
        SectionCategory::Environmental,
        "Environment",
    );
    environment.owner_id = "u-owner".to_string();
    store.insert_section(environment);
    store.insert_section(ReportSection::new(
        "sec-soc",
        SEED_PERIOD,
        SectionCategory::Social,
        "Social",
    ));
    store.insert_section(ReportSection::new(
        "sec-gov",
        SEED_PERIOD,
        SectionCategory::Governance,
        "Governance",
    ));

    store.create_rule(
        "u-admin",
        NewRule {
            section_id: "sec-env".to_string(),
            kind: "non-negative".to_string(),
            target_field: String::new(),
            parameters: String::new(),
            error_message: "Value cannot be negative".to_string(),
            active: true,
        },
    )?;
    store.create_rule(
        "u-admin",
        NewRule {
            section_id: "sec-env".to_string(),
            kind: "allowed-units".to_string(),
            target_field: String::new(),
            parameters: r#"["MWh","tCO2e","m3"]"#.to_string(),
            error_message: "Unit is not in the allowed set for this section".to_string(),
            active: true,
        },
    )?;

    let mut energy = NewDataPoint::in_section("sec-env");
    energy.title = "Total energy consumption".to_string();
    energy.content = "Grid electricity across all sites".to_string();
    energy.value = "1240".to_string();
    energy.unit = "MWh".to_string();
    energy.classification = "energy".to_string();
    energy.data_type = "metric".to_string();
    energy.source = "Utility invoices".to_string();
    energy.owner_id = "u-owner".to_string();
    energy.contributor_ids = vec!["u-contrib".to_string()];
    let energy = store.create_data_point("u-owner", energy)?;
    store.attach_evidence(
        "u-owner",
        &energy.id,
        NewEvidence {
            title: "Invoice bundle 2025".to_string(),
            reference: "docs/invoices-2025.pdf".to_string(),
        },
    )?;

    let mut emissions = NewDataPoint::in_section("sec-env");
    emissions.title = "Scope 1 emissions".to_string();
    emissions.content = String::new();
    emissions.classification = "emissions".to_string();
    emissions.data_type = "metric".to_string();
    emissions.owner_id = "u-owner".to_string();
    store.create_data_point("u-owner", emissions)?;

    let mut headcount = NewDataPoint::in_section("sec-soc");
    headcount.title = "Workforce headcount".to_string();
    headcount.content = "Full-time equivalents at year end".to_string();
    headcount.value = "312".to_string();
    headcount.unit = "FTE".to_string();
    headcount.data_type = "metric".to_string();
    headcount.source = "HR system".to_string();
    store.create_data_point("u-contrib", headcount)?;

    Ok(store)
}
