//! Domain entities for disclosure tracking

mod data_point;
mod evidence;
mod exception;
mod period;
mod rule;
mod section;
mod user;

pub use data_point::{
    CompletenessStatus, ConfidenceLevel, DataPoint, EstimateSnapshot, EstimateType, GapStatus,
    InformationType, MissingReasonCategory, ReviewStatus,
};
pub use evidence::Evidence;
pub use exception::{CompletionException, ExceptionStatus};
pub use period::ReportingPeriod;
pub use rule::{RuleKind, ValidationRule};
pub use section::{ReportSection, SectionCategory, SectionProgress};
pub use user::{Role, User};
