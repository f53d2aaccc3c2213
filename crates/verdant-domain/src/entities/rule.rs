//! Section-scoped validation rules
//!
//! Rule kinds are a closed set: configuration naming an unknown kind is
//! rejected at creation time instead of silently disabling the rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Closed set of supported rule kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// Numeric values must not be negative
    NonNegative,
    /// A present value requires a unit
    RequiredUnit,
    /// Units must match a configured allow-list
    AllowedUnits,
    /// Date-typed values must fall inside the reporting period
    ValueWithinPeriod,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleKind::NonNegative => write!(f, "non-negative"),
            RuleKind::RequiredUnit => write!(f, "required-unit"),
            RuleKind::AllowedUnits => write!(f, "allowed-units"),
            RuleKind::ValueWithinPeriod => write!(f, "value-within-period"),
        }
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "non-negative" => Ok(RuleKind::NonNegative),
            "required-unit" => Ok(RuleKind::RequiredUnit),
            "allowed-units" => Ok(RuleKind::AllowedUnits),
            "value-within-period" => Ok(RuleKind::ValueWithinPeriod),
            other => Err(format!("Unknown rule kind: '{}'", other)),
        }
    }
}

/// A user-authored constraint evaluated against data point writes in its
/// section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Unique identifier
    pub id: String,
    /// Section this rule is scoped to
    pub section_id: String,
    /// What the rule checks
    pub kind: RuleKind,
    /// Field the rule targets, blank for the default (value)
    pub target_field: String,
    /// Opaque serialized parameters, e.g. a JSON array of allowed units
    pub parameters: String,
    /// Inactive rules are never evaluated
    pub active: bool,
    /// Message returned verbatim when the rule fails
    pub error_message: String,
    /// When the rule was created
    pub created_at: DateTime<Utc>,
}

impl ValidationRule {
    /// Create an active rule
    pub fn new(
        section_id: impl Into<String>,
        kind: RuleKind,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            section_id: section_id.into(),
            kind,
            target_field: String::new(),
            parameters: String::new(),
            active: true,
            error_message: error_message.into(),
            created_at: Utc::now(),
        }
    }

    /// Set the serialized parameters
    pub fn with_parameters(mut self, parameters: impl Into<String>) -> Self {
        self.parameters = parameters.into();
        self
    }
}
