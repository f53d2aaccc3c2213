//! Verdant Disclosure Engine
//!
//! In-memory domain engine for sustainability report disclosure content.
//! One `DisclosureStore` owns every entity collection behind a single
//! coarse lock; each public operation validates against a prospective copy,
//! commits, recomputes derived state, and appends one audit entry inside
//! the same critical section. All state is transient: it is seeded at
//! startup and discarded at process exit.

pub mod completeness;
pub mod consistency;
pub mod gap;
pub mod models;
pub mod rules;
pub mod seed;
pub mod store;

pub use completeness::{
    derive_completeness_status, derive_section_progress, section_completion_percentage,
};
pub use consistency::{ConsistencyCheck, ConsistencyReport, ConsistencyStatus, IssueKind, Severity, ValidationIssue};
pub use gap::GapTransitionRequest;
pub use models::{
    DataPointUpdate, NewCompletionException, NewDataPoint, NewEvidence, NewRule,
};
pub use seed::{seed_store, SEED_PERIOD};
pub use store::DisclosureStore;
