//! Reporting period entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A reporting period sections and data points belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    /// Unique identifier
    pub id: String,
    /// Display name, e.g. "FY 2025"
    pub name: String,
    /// Responsible user id
    pub owner_id: String,
    /// First covered day; validations skip when absent
    pub start_date: Option<NaiveDate>,
    /// Last covered day; validations skip when absent
    pub end_date: Option<NaiveDate>,
}

impl ReportingPeriod {
    /// Create a period without dates
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner_id: String::new(),
            start_date: None,
            end_date: None,
        }
    }

    /// Whether a date falls inside the period range; always true when either
    /// boundary is missing
    pub fn covers(&self, date: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => date >= start && date <= end,
            _ => true,
        }
    }
}
