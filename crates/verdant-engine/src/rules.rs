//! Section-scoped validation rule engine
//!
//! Rules are evaluated against the prospective data point, in insertion
//! order, short-circuiting on the first failure. The failing rule's
//! configured message is returned verbatim and the caller must leave no
//! partial effect. Evaluation order is load-bearing: it decides which
//! message callers see when several rules would fail.

use chrono::NaiveDate;
use verdant_domain::{DataPoint, DomainError, DomainResult, ReportingPeriod, RuleKind, ValidationRule};

/// Evaluate the given rules (already scoped to the data point's section and
/// ordered by insertion) against a prospective data point state.
pub fn evaluate_rules(
    rules: &[&ValidationRule],
    dp: &DataPoint,
    period: Option<&ReportingPeriod>,
) -> DomainResult<()> {
    for rule in rules.iter().filter(|r| r.active) {
        if !passes(rule, dp, period) {
            return Err(DomainError::validation(rule.error_message.clone()));
        }
    }
    Ok(())
}

/// Whether a single rule passes for the prospective data point
fn passes(rule: &ValidationRule, dp: &DataPoint, period: Option<&ReportingPeriod>) -> bool {
    match rule.kind {
        RuleKind::NonNegative => non_negative(dp),
        RuleKind::RequiredUnit => required_unit(dp),
        RuleKind::AllowedUnits => allowed_units(rule, dp),
        RuleKind::ValueWithinPeriod => value_within_period(dp, period),
    }
}

/// Fails only when the value parses as a number and is negative;
/// non-numeric or absent values pass
fn non_negative(dp: &DataPoint) -> bool {
    match dp.value.trim().parse::<f64>() {
        Ok(n) => n >= 0.0,
        Err(_) => true,
    }
}

/// Fails when a value is present but the unit is blank
fn required_unit(dp: &DataPoint) -> bool {
    dp.value.trim().is_empty() || !dp.unit.trim().is_empty()
}

/// Fails when the unit is present and not a case-insensitive match to any
/// configured entry. Malformed or absent parameters and absent units pass.
fn allowed_units(rule: &ValidationRule, dp: &DataPoint) -> bool {
    let unit = dp.unit.trim();
    if unit.is_empty() {
        return true;
    }

    let allowed: Vec<String> = match serde_json::from_str(&rule.parameters) {
        Ok(list) => list,
        Err(_) => return true,
    };
    if allowed.is_empty() {
        return true;
    }

    allowed.iter().any(|a| a.eq_ignore_ascii_case(unit))
}

/// Fails when the value parses as a date outside the owning period's range;
/// non-date values and missing period dates pass
fn value_within_period(dp: &DataPoint, period: Option<&ReportingPeriod>) -> bool {
    let date = match NaiveDate::parse_from_str(dp.value.trim(), "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => return true,
    };
    match period {
        Some(p) => p.covers(date),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_domain::ValidationRule;

    fn dp_with_value(value: &str, unit: &str) -> DataPoint {
        let mut dp = DataPoint::new("sec-1");
        dp.value = value.to_string();
        dp.unit = unit.to_string();
        dp
    }

    fn period() -> ReportingPeriod {
        let mut p = ReportingPeriod::new("fy2025", "FY 2025");
        p.start_date = NaiveDate::from_ymd_opt(2025, 1, 1);
        p.end_date = NaiveDate::from_ymd_opt(2025, 12, 31);
        p
    }

    #[test]
    fn test_non_negative_rejects_negative_number() {
        let rule = ValidationRule::new("sec-1", RuleKind::NonNegative, "Value cannot be negative");
        let dp = dp_with_value("-5", "");

        let err = evaluate_rules(&[&rule], &dp, None).unwrap_err();
        assert_eq!(err.to_string(), "Value cannot be negative");
    }

    #[test]
    fn test_non_negative_skips_non_numeric() {
        let rule = ValidationRule::new("sec-1", RuleKind::NonNegative, "Value cannot be negative");
        assert!(evaluate_rules(&[&rule], &dp_with_value("n/a", ""), None).is_ok());
        assert!(evaluate_rules(&[&rule], &dp_with_value("", ""), None).is_ok());
        assert!(evaluate_rules(&[&rule], &dp_with_value("3.5", ""), None).is_ok());
    }

    #[test]
    fn test_required_unit() {
        let rule = ValidationRule::new("sec-1", RuleKind::RequiredUnit, "Unit is required");
        assert!(evaluate_rules(&[&rule], &dp_with_value("120", ""), None).is_err());
        assert!(evaluate_rules(&[&rule], &dp_with_value("120", "MWh"), None).is_ok());
        assert!(evaluate_rules(&[&rule], &dp_with_value("", ""), None).is_ok());
    }

    #[test]
    fn test_allowed_units_case_insensitive() {
        let rule = ValidationRule::new("sec-1", RuleKind::AllowedUnits, "Unit not allowed")
            .with_parameters(r#"["MWh","tCO2e"]"#);
        assert!(evaluate_rules(&[&rule], &dp_with_value("120", "mwh"), None).is_ok());
        assert!(evaluate_rules(&[&rule], &dp_with_value("120", "kWh"), None).is_err());
    }

    #[test]
    fn test_allowed_units_fails_open_on_malformed_parameters() {
        let rule = ValidationRule::new("sec-1", RuleKind::AllowedUnits, "Unit not allowed")
            .with_parameters("not json at all");
        assert!(evaluate_rules(&[&rule], &dp_with_value("120", "furlongs"), None).is_ok());

        let empty = ValidationRule::new("sec-1", RuleKind::AllowedUnits, "Unit not allowed")
            .with_parameters("[]");
        assert!(evaluate_rules(&[&empty], &dp_with_value("120", "furlongs"), None).is_ok());
    }

    #[test]
    fn test_allowed_units_skips_blank_unit() {
        let rule = ValidationRule::new("sec-1", RuleKind::AllowedUnits, "Unit not allowed")
            .with_parameters(r#"["MWh"]"#);
        assert!(evaluate_rules(&[&rule], &dp_with_value("120", ""), None).is_ok());
    }

    #[test]
    fn test_value_within_period() {
        let rule = ValidationRule::new("sec-1", RuleKind::ValueWithinPeriod, "Date out of period");
        let p = period();

        assert!(evaluate_rules(&[&rule], &dp_with_value("2025-06-15", ""), Some(&p)).is_ok());
        assert!(evaluate_rules(&[&rule], &dp_with_value("2024-06-15", ""), Some(&p)).is_err());
        // non-date values skip
        assert!(evaluate_rules(&[&rule], &dp_with_value("120", ""), Some(&p)).is_ok());
        // missing period dates skip
        let undated = ReportingPeriod::new("fy2026", "FY 2026");
        assert!(evaluate_rules(&[&rule], &dp_with_value("1999-01-01", ""), Some(&undated)).is_ok());
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let first = ValidationRule::new("sec-1", RuleKind::RequiredUnit, "first message");
        let second = ValidationRule::new("sec-1", RuleKind::NonNegative, "second message");
        let dp = dp_with_value("-5", "");

        // both would fail; insertion order decides the surfaced message
        let err = evaluate_rules(&[&first, &second], &dp, None).unwrap_err();
        assert_eq!(err.to_string(), "first message");

        let err = evaluate_rules(&[&second, &first], &dp, None).unwrap_err();
        assert_eq!(err.to_string(), "second message");
    }

    #[test]
    fn test_inactive_rules_are_skipped() {
        let mut rule =
            ValidationRule::new("sec-1", RuleKind::NonNegative, "Value cannot be negative");
        rule.active = false;
        assert!(evaluate_rules(&[&rule], &dp_with_value("-5", ""), None).is_ok());
    }
}
