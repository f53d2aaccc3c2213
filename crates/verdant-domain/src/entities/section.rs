//! Report section entity

use serde::{Deserialize, Serialize};

/// ESG category a section reports under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionCategory {
    /// Environmental disclosures
    Environmental,
    /// Social disclosures
    Social,
    /// Governance disclosures
    Governance,
}

impl std::fmt::Display for SectionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionCategory::Environmental => write!(f, "environmental"),
            SectionCategory::Social => write!(f, "social"),
            SectionCategory::Governance => write!(f, "governance"),
        }
    }
}

/// Aggregate progress of a section, derived from its data points and never
/// independently settable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionProgress {
    /// No data points, or every data point still missing
    NotStarted,
    /// Work underway
    InProgress,
    /// At least one data point has changes requested
    Blocked,
    /// Every data point complete or not applicable
    Completed,
}

impl std::fmt::Display for SectionProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionProgress::NotStarted => write!(f, "not-started"),
            SectionProgress::InProgress => write!(f, "in-progress"),
            SectionProgress::Blocked => write!(f, "blocked"),
            SectionProgress::Completed => write!(f, "completed"),
        }
    }
}

/// Category-scoped grouping of data points within one reporting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Unique identifier
    pub id: String,
    /// Owning reporting period
    pub period_id: String,
    /// ESG category
    pub category: SectionCategory,
    /// Responsible user id, blank when unowned
    pub owner_id: String,
    /// Section title
    pub title: String,
    /// Disabled sections are skipped by consistency validation
    pub disabled: bool,
    /// Derived progress, recomputed from child data points
    pub progress: SectionProgress,
}

impl ReportSection {
    /// Create a new enabled section
    pub fn new(
        id: impl Into<String>,
        period_id: impl Into<String>,
        category: SectionCategory,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            period_id: period_id.into(),
            category,
            owner_id: String::new(),
            title: title.into(),
            disabled: false,
            progress: SectionProgress::NotStarted,
        }
    }
}
