//! The entity store
//!
//! `DisclosureStore` owns every mutable collection behind one coarse
//! mutex. Each public operation acquires the lock for its entire duration
//! and runs validate → mutate → recompute → audit inside that single
//! critical section; the store never performs I/O or suspends while
//! holding it. Each public method is the unit of atomicity; there are no
//! cross-operation transactions.
//!
//! Expected failures are returned as values. Panics are reserved for
//! structural invariant violations: a poisoned lock, a data point whose
//! section vanished, deleting a section that still has children.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::{info, warn};

use verdant_audit::{
    creation_changes, diff_data_points, AuditAction, AuditFilter, AuditLogEntry, AuditTrail,
    EntityType, FieldChange,
};
use verdant_domain::{
    CompletenessStatus, CompletionException, DataPoint, DomainError, DomainResult, Evidence,
    ExceptionStatus, MissingField, ReportSection, ReportingPeriod, ReviewStatus, RuleKind,
    SectionProgress, User, ValidationRule,
};

use crate::completeness::{
    derive_completeness_status, derive_section_progress, section_completion_percentage,
};
use crate::consistency::{self, ConsistencyCheck, ConsistencyReport};
use crate::gap::{self, GapTransitionRequest};
use crate::models::{
    DataPointUpdate, NewCompletionException, NewDataPoint, NewEvidence, NewRule,
};
use crate::rules::evaluate_rules;

/// All mutable collections, guarded as one unit
#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<String, User>,
    periods: HashMap<String, ReportingPeriod>,
    sections: HashMap<String, ReportSection>,
    data_points: HashMap<String, DataPoint>,
    evidence: HashMap<String, Evidence>,
    /// Rules in insertion order; evaluation order is observable
    rules: Vec<ValidationRule>,
    exceptions: HashMap<String, CompletionException>,
    audit: AuditTrail,
}

/// In-memory disclosure store behind a single coarse lock
#[derive(Debug, Default)]
pub struct DisclosureStore {
    inner: Mutex<StoreState>,
}

impl DisclosureStore {
    /// Create an empty store with the given user directory. The directory
    /// is fixed for the store's lifetime; the engine never mutates it.
    pub fn new(users: Vec<User>) -> Self {
        let state = StoreState {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
            ..StoreState::default()
        };
        Self {
            inner: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.inner.lock().expect("disclosure store lock poisoned")
    }

    // ---- seeding surface -------------------------------------------------

    /// Insert a reporting period. Seed-time wiring; not audited.
    pub fn insert_period(&self, period: ReportingPeriod) {
        let mut state = self.lock();
        state.periods.insert(period.id.clone(), period);
    }

    /// Insert a section. Seed-time wiring; not audited.
    pub fn insert_section(&self, section: ReportSection) {
        let mut state = self.lock();
        state.sections.insert(section.id.clone(), section);
    }

    // ---- data points -----------------------------------------------------

    /// Create a data point after rule validation. Rejection leaves no
    /// partial effect and writes no audit entry.
    pub fn create_data_point(&self, actor_id: &str, input: NewDataPoint) -> DomainResult<DataPoint> {
        let mut state = self.lock();

        if !state.sections.contains_key(&input.section_id) {
            return Err(DomainError::not_found("Section", &input.section_id));
        }

        let mut dp = DataPoint::new(&input.section_id);
        dp.title = input.title;
        dp.content = input.content;
        dp.value = input.value;
        dp.unit = input.unit;
        dp.classification = input.classification;
        dp.data_type = input.data_type;
        dp.source = input.source;
        dp.information_type = input.information_type;
        dp.owner_id = input.owner_id;
        dp.contributor_ids = input.contributor_ids;
        dp.contributor_ids.retain(|c| *c != dp.owner_id);

        check_explicit_complete(input.completeness_status, &dp)?;
        run_section_rules(&state, &dp)?;

        dp.completeness_status = input
            .completeness_status
            .unwrap_or_else(|| derive_completeness_status(&dp));

        let changes = creation_changes(&dp);
        let section_id = dp.section_id.clone();
        state.data_points.insert(dp.id.clone(), dp.clone());
        record(
            &mut state,
            actor_id,
            AuditAction::Created,
            EntityType::DataPoint,
            &dp.id,
            None,
            changes,
        );
        recompute_section_progress(&mut state, &section_id);

        info!(data_point_id = %dp.id, section_id = %section_id, "created data point");
        Ok(dp)
    }

    /// Update a data point's fields. Omitted completeness is re-derived;
    /// a no-op update (no tracked field differs) writes no audit entry.
    pub fn update_data_point(
        &self,
        actor_id: &str,
        data_point_id: &str,
        update: DataPointUpdate,
    ) -> DomainResult<DataPoint> {
        let mut state = self.lock();

        let old = state
            .data_points
            .get(data_point_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Data point", data_point_id))?;

        if old.review_status == ReviewStatus::Approved {
            return Err(DomainError::validation(
                "Approved data points are read-only; only the review status may change.",
            ));
        }

        let mut new = old.clone();
        apply_update(&mut new, &update);
        new.contributor_ids.retain(|c| *c != new.owner_id);

        check_explicit_complete(update.completeness_status, &new)?;
        run_section_rules(&state, &new)?;

        new.completeness_status = update
            .completeness_status
            .unwrap_or_else(|| derive_completeness_status(&new));

        let changes = diff_data_points(&old, &new);
        if changes.is_empty() {
            return Ok(old);
        }

        new.updated_at = Utc::now();
        let section_id = new.section_id.clone();
        state.data_points.insert(new.id.clone(), new.clone());
        record(
            &mut state,
            actor_id,
            AuditAction::Updated,
            EntityType::DataPoint,
            &new.id,
            None,
            changes,
        );
        recompute_section_progress(&mut state, &section_id);

        info!(data_point_id = %new.id, "updated data point");
        Ok(new)
    }

    /// Delete a data point and its evidence. The audit entries referring
    /// to it are kept forever.
    pub fn delete_data_point(&self, actor_id: &str, data_point_id: &str) -> DomainResult<()> {
        let mut state = self.lock();

        let dp = state
            .data_points
            .get(data_point_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Data point", data_point_id))?;

        if dp.review_status == ReviewStatus::Approved {
            return Err(DomainError::validation(
                "Approved data points cannot be deleted.",
            ));
        }

        state.data_points.remove(data_point_id);
        state.evidence.retain(|_, ev| ev.data_point_id != *data_point_id);
        record(
            &mut state,
            actor_id,
            AuditAction::Deleted,
            EntityType::DataPoint,
            data_point_id,
            Some(dp.title.clone()),
            Vec::new(),
        );
        recompute_section_progress(&mut state, &dp.section_id);

        info!(data_point_id = %data_point_id, "deleted data point");
        Ok(())
    }

    /// Fetch a data point by id
    pub fn get_data_point(&self, data_point_id: &str) -> DomainResult<DataPoint> {
        let state = self.lock();
        state
            .data_points
            .get(data_point_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Data point", data_point_id))
    }

    /// All data points of a section
    pub fn list_data_points(&self, section_id: &str) -> Vec<DataPoint> {
        let state = self.lock();
        let mut points: Vec<DataPoint> = state
            .data_points
            .values()
            .filter(|dp| dp.section_id == section_id)
            .cloned()
            .collect();
        points.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        points
    }

    // ---- evidence --------------------------------------------------------

    /// Attach evidence to a data point
    pub fn attach_evidence(
        &self,
        actor_id: &str,
        data_point_id: &str,
        input: NewEvidence,
    ) -> DomainResult<Evidence> {
        let mut state = self.lock();

        let old = state
            .data_points
            .get(data_point_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Data point", data_point_id))?;

        if old.review_status == ReviewStatus::Approved {
            return Err(DomainError::validation(
                "Approved data points are read-only; only the review status may change.",
            ));
        }

        let evidence = Evidence::new(data_point_id, input.title, input.reference);
        let mut new = old.clone();
        new.evidence_ids.push(evidence.id.clone());
        new.updated_at = Utc::now();

        let changes = diff_data_points(&old, &new);
        state.evidence.insert(evidence.id.clone(), evidence.clone());
        state.data_points.insert(new.id.clone(), new);
        record(
            &mut state,
            actor_id,
            AuditAction::EvidenceAttached,
            EntityType::DataPoint,
            data_point_id,
            Some(evidence.title.clone()),
            changes,
        );

        info!(data_point_id = %data_point_id, evidence_id = %evidence.id, "attached evidence");
        Ok(evidence)
    }

    // ---- review ----------------------------------------------------------

    /// Change a data point's review status. This is the one mutation
    /// allowed on an approved data point; setting the current status again
    /// is a no-op and writes no audit entry.
    pub fn set_review_status(
        &self,
        actor_id: &str,
        data_point_id: &str,
        status: ReviewStatus,
    ) -> DomainResult<DataPoint> {
        let mut state = self.lock();

        let old = state
            .data_points
            .get(data_point_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Data point", data_point_id))?;

        if old.review_status == status {
            return Ok(old);
        }

        let mut new = old.clone();
        new.review_status = status;
        new.updated_at = Utc::now();

        let changes = diff_data_points(&old, &new);
        let section_id = new.section_id.clone();
        state.data_points.insert(new.id.clone(), new.clone());
        record(
            &mut state,
            actor_id,
            AuditAction::ReviewStatusChanged,
            EntityType::DataPoint,
            data_point_id,
            None,
            changes,
        );
        recompute_section_progress(&mut state, &section_id);

        info!(data_point_id = %data_point_id, status = %status, "changed review status");
        Ok(new)
    }

    // ---- gap workflow ----------------------------------------------------

    /// Advance a data point's gap status. The permission gate runs before
    /// any legality check; a denied attempt is recorded to the audit trail
    /// as a distinct denial action and then rejected.
    pub fn transition_gap_status(
        &self,
        actor_id: &str,
        data_point_id: &str,
        request: GapTransitionRequest,
    ) -> DomainResult<DataPoint> {
        let mut state = self.lock();

        let old = state
            .data_points
            .get(data_point_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Data point", data_point_id))?;

        let section = state
            .sections
            .get(&old.section_id)
            .cloned()
            .unwrap_or_else(|| {
                panic!(
                    "invariant violation: data point '{}' references missing section '{}'",
                    old.id, old.section_id
                )
            });
        let period = state
            .periods
            .get(&section.period_id)
            .cloned()
            .unwrap_or_else(|| {
                panic!(
                    "invariant violation: section '{}' references missing period '{}'",
                    section.id, section.period_id
                )
            });

        let allowed = state
            .users
            .get(actor_id)
            .map(|actor| gap::can_transition(actor, &old, &section, &period))
            .unwrap_or(false);
        if !allowed {
            warn!(data_point_id = %data_point_id, actor_id = %actor_id, "denied gap transition");
            record(
                &mut state,
                actor_id,
                AuditAction::GapStatusDenied,
                EntityType::DataPoint,
                data_point_id,
                Some(format!("denied transition to '{}'", request.target)),
                Vec::new(),
            );
            return Err(DomainError::denied(format!(
                "User '{}' may not change the gap status of data point '{}'.",
                actor_id, data_point_id
            )));
        }

        if old.review_status == ReviewStatus::Approved {
            return Err(DomainError::validation(
                "Approved data points are read-only; only the review status may change.",
            ));
        }

        let mut new = old.clone();
        gap::apply_transition(&mut new, &request, actor_id, Utc::now())?;

        let changes = diff_data_points(&old, &new);
        let section_id = new.section_id.clone();
        state.data_points.insert(new.id.clone(), new.clone());
        record(
            &mut state,
            actor_id,
            AuditAction::GapStatusChanged,
            EntityType::DataPoint,
            data_point_id,
            Some(format!(
                "gap status '{}' -> '{}'",
                old.gap_status, new.gap_status
            )),
            changes,
        );
        recompute_section_progress(&mut state, &section_id);

        info!(
            data_point_id = %data_point_id,
            from = %old.gap_status,
            to = %new.gap_status,
            "gap status changed"
        );
        Ok(new)
    }

    // ---- validation rules ------------------------------------------------

    /// Create a validation rule. Unknown rule kinds are rejected here
    /// instead of silently disabling the rule.
    pub fn create_rule(&self, actor_id: &str, input: NewRule) -> DomainResult<ValidationRule> {
        let mut state = self.lock();

        if !state.sections.contains_key(&input.section_id) {
            return Err(DomainError::not_found("Section", &input.section_id));
        }
        let kind: RuleKind = input
            .kind
            .parse()
            .map_err(DomainError::validation)?;

        let mut rule = ValidationRule::new(&input.section_id, kind, input.error_message);
        rule.target_field = input.target_field;
        rule.parameters = input.parameters;
        rule.active = input.active;

        state.rules.push(rule.clone());
        record(
            &mut state,
            actor_id,
            AuditAction::RuleCreated,
            EntityType::Rule,
            &rule.id,
            Some(kind.to_string()),
            Vec::new(),
        );

        info!(rule_id = %rule.id, kind = %kind, "created validation rule");
        Ok(rule)
    }

    /// Rules scoped to a section, in insertion order
    pub fn list_rules(&self, section_id: &str) -> Vec<ValidationRule> {
        let state = self.lock();
        state
            .rules
            .iter()
            .filter(|r| r.section_id == section_id)
            .cloned()
            .collect()
    }

    // ---- completion exceptions --------------------------------------------

    /// Request a completion exception for a section or data point
    pub fn request_completion_exception(
        &self,
        actor_id: &str,
        input: NewCompletionException,
    ) -> DomainResult<CompletionException> {
        let mut state = self.lock();

        if !state.periods.contains_key(&input.period_id) {
            return Err(DomainError::not_found("Period", &input.period_id));
        }
        if input.section_id.is_none() && input.data_point_id.is_none() {
            return Err(DomainError::validation(
                "A completion exception must reference a section or a data point.",
            ));
        }
        if let Some(ref section_id) = input.section_id {
            if !state.sections.contains_key(section_id) {
                return Err(DomainError::not_found("Section", section_id));
            }
        }
        if let Some(ref data_point_id) = input.data_point_id {
            if !state.data_points.contains_key(data_point_id) {
                return Err(DomainError::not_found("Data point", data_point_id));
            }
        }
        if input.reason.trim().is_empty() {
            return Err(DomainError::missing_fields(vec![MissingField::new(
                "reason",
                "Reason is required for a completion exception.",
            )]));
        }

        let mut exception = CompletionException::new(&input.period_id, input.reason, actor_id);
        exception.section_id = input.section_id;
        exception.data_point_id = input.data_point_id;

        state
            .exceptions
            .insert(exception.id.clone(), exception.clone());
        record(
            &mut state,
            actor_id,
            AuditAction::ExceptionRequested,
            EntityType::Exception,
            &exception.id,
            Some(exception.reason.clone()),
            Vec::new(),
        );

        info!(exception_id = %exception.id, "requested completion exception");
        Ok(exception)
    }

    /// Accept or reject a pending completion exception. Only the global
    /// admin or the period owner may resolve; denials are audited.
    pub fn resolve_completion_exception(
        &self,
        actor_id: &str,
        exception_id: &str,
        accept: bool,
    ) -> DomainResult<CompletionException> {
        let mut state = self.lock();

        let old = state
            .exceptions
            .get(exception_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Completion exception", exception_id))?;

        if old.status != ExceptionStatus::Pending {
            return Err(DomainError::validation(
                "Completion exception has already been resolved.",
            ));
        }

        let period = state
            .periods
            .get(&old.period_id)
            .cloned()
            .unwrap_or_else(|| {
                panic!(
                    "invariant violation: exception '{}' references missing period '{}'",
                    old.id, old.period_id
                )
            });

        let allowed = state
            .users
            .get(actor_id)
            .map(|u| u.is_admin() || u.id == period.owner_id)
            .unwrap_or(false);
        if !allowed {
            warn!(exception_id = %exception_id, actor_id = %actor_id, "denied exception resolution");
            record(
                &mut state,
                actor_id,
                AuditAction::ExceptionDenied,
                EntityType::Exception,
                exception_id,
                None,
                Vec::new(),
            );
            return Err(DomainError::denied(format!(
                "User '{}' may not resolve completion exception '{}'.",
                actor_id, exception_id
            )));
        }

        let mut new = old.clone();
        new.status = if accept {
            ExceptionStatus::Accepted
        } else {
            ExceptionStatus::Rejected
        };
        new.resolved_by = actor_id.to_string();
        new.resolved_at = Some(Utc::now());

        state.exceptions.insert(new.id.clone(), new.clone());
        record(
            &mut state,
            actor_id,
            AuditAction::ExceptionResolved,
            EntityType::Exception,
            exception_id,
            None,
            vec![FieldChange::new(
                "status",
                old.status.to_string(),
                new.status.to_string(),
            )],
        );

        info!(exception_id = %exception_id, status = %new.status, "resolved completion exception");
        Ok(new)
    }

    // ---- consistency validation -------------------------------------------

    /// Run the consistency validator over a period, read-only. An empty
    /// check list selects every pass.
    pub fn validate_period(
        &self,
        period_id: &str,
        checks: &[ConsistencyCheck],
    ) -> DomainResult<ConsistencyReport> {
        let state = self.lock();

        let period = state
            .periods
            .get(period_id)
            .ok_or_else(|| DomainError::not_found("Period", period_id))?;

        let sections: Vec<&ReportSection> = state
            .sections
            .values()
            .filter(|s| s.period_id == *period_id)
            .collect();
        let section_ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        let data_points: Vec<&DataPoint> = state
            .data_points
            .values()
            .filter(|dp| section_ids.contains(&dp.section_id.as_str()))
            .collect();
        let exempted = exempted_ids(&state, period_id);

        Ok(consistency::run(
            period,
            &sections,
            &data_points,
            &exempted,
            checks,
        ))
    }

    // ---- sections & periods ----------------------------------------------

    /// Fetch a section by id
    pub fn get_section(&self, section_id: &str) -> DomainResult<ReportSection> {
        let state = self.lock();
        state
            .sections
            .get(section_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Section", section_id))
    }

    /// All sections of a period
    pub fn list_sections(&self, period_id: &str) -> Vec<ReportSection> {
        let state = self.lock();
        let mut sections: Vec<ReportSection> = state
            .sections
            .values()
            .filter(|s| s.period_id == period_id)
            .cloned()
            .collect();
        sections.sort_by(|a, b| a.id.cmp(&b.id));
        sections
    }

    /// Fetch a period by id
    pub fn get_period(&self, period_id: &str) -> DomainResult<ReportingPeriod> {
        let state = self.lock();
        state
            .periods
            .get(period_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Period", period_id))
    }

    /// All reporting periods
    pub fn list_periods(&self) -> Vec<ReportingPeriod> {
        let state = self.lock();
        let mut periods: Vec<ReportingPeriod> = state.periods.values().cloned().collect();
        periods.sort_by(|a, b| a.id.cmp(&b.id));
        periods
    }

    /// Derived progress of a section
    pub fn section_progress(&self, section_id: &str) -> DomainResult<SectionProgress> {
        Ok(self.get_section(section_id)?.progress)
    }

    /// Completion percentage of a section with accepted exceptions removed
    /// from the denominator
    pub fn section_completion(&self, section_id: &str) -> DomainResult<u8> {
        let state = self.lock();
        let section = state
            .sections
            .get(section_id)
            .ok_or_else(|| DomainError::not_found("Section", section_id))?;

        let exempted = exempted_ids(&state, &section.period_id);
        let points: Vec<&DataPoint> = state
            .data_points
            .values()
            .filter(|dp| dp.section_id == *section_id)
            .collect();
        Ok(section_completion_percentage(&points, &exempted))
    }

    /// Delete a section.
    ///
    /// # Panics
    /// Panics when the section still has data points: that is a structural
    /// logic error in the caller, not an expected failure.
    pub fn delete_section(&self, actor_id: &str, section_id: &str) -> DomainResult<()> {
        let mut state = self.lock();

        if !state.sections.contains_key(section_id) {
            return Err(DomainError::not_found("Section", section_id));
        }
        if state
            .data_points
            .values()
            .any(|dp| dp.section_id == *section_id)
        {
            panic!(
                "invariant violation: section '{}' still has data points",
                section_id
            );
        }

        state.sections.remove(section_id);
        state.rules.retain(|r| r.section_id != *section_id);
        record(
            &mut state,
            actor_id,
            AuditAction::Deleted,
            EntityType::Section,
            section_id,
            None,
            Vec::new(),
        );
        Ok(())
    }

    // ---- directory --------------------------------------------------------

    /// Look up a user in the seeded directory
    pub fn lookup_user(&self, user_id: &str) -> DomainResult<User> {
        let state = self.lock();
        state
            .users
            .get(user_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("User", user_id))
    }

    // ---- audit queries -----------------------------------------------------

    /// Audit entries matching the filter, in insertion order
    pub fn query_audit(&self, filter: &AuditFilter) -> Vec<AuditLogEntry> {
        let state = self.lock();
        filter.apply(state.audit.entries())
    }

    /// Audit entries for data points currently owned by the given user,
    /// resolved by joining through present entity state
    pub fn audit_entries_for_owner(&self, owner_id: &str) -> Vec<AuditLogEntry> {
        let state = self.lock();
        let owned: Vec<&str> = state
            .data_points
            .values()
            .filter(|dp| dp.owner_id == owner_id)
            .map(|dp| dp.id.as_str())
            .collect();
        state
            .audit
            .entries()
            .iter()
            .filter(|e| {
                e.entity_type == EntityType::DataPoint && owned.contains(&e.entity_id.as_str())
            })
            .cloned()
            .collect()
    }

    /// Number of audit entries recorded so far; never decreases
    pub fn audit_len(&self) -> usize {
        let state = self.lock();
        state.audit.len()
    }
}

// ---- helpers --------------------------------------------------------------

/// An explicit request for "complete" requires an owner regardless of the
/// automatic derivation
fn check_explicit_complete(
    requested: Option<CompletenessStatus>,
    dp: &DataPoint,
) -> DomainResult<()> {
    if requested == Some(CompletenessStatus::Complete) && !dp.has_owner() {
        return Err(DomainError::missing_fields(vec![MissingField::new(
            "owner_id",
            "Completeness status 'complete' requires an owner.",
        )]));
    }
    Ok(())
}

/// Evaluate the section's active rules against a prospective data point
fn run_section_rules(state: &StoreState, dp: &DataPoint) -> DomainResult<()> {
    let period = state
        .sections
        .get(&dp.section_id)
        .and_then(|s| state.periods.get(&s.period_id));
    let rules: Vec<&ValidationRule> = state
        .rules
        .iter()
        .filter(|r| r.section_id == dp.section_id)
        .collect();
    evaluate_rules(&rules, dp, period)
}

fn recompute_section_progress(state: &mut StoreState, section_id: &str) {
    let points: Vec<DataPoint> = state
        .data_points
        .values()
        .filter(|dp| dp.section_id == *section_id)
        .cloned()
        .collect();
    let refs: Vec<&DataPoint> = points.iter().collect();
    let progress = derive_section_progress(&refs);
    if let Some(section) = state.sections.get_mut(section_id) {
        section.progress = progress;
    }
}

/// Data point ids removed from completeness denominators by accepted
/// exceptions in the period
fn exempted_ids(state: &StoreState, period_id: &str) -> Vec<String> {
    let mut ids = Vec::new();
    for exception in state
        .exceptions
        .values()
        .filter(|e| e.status == ExceptionStatus::Accepted && e.period_id == *period_id)
    {
        if let Some(ref data_point_id) = exception.data_point_id {
            ids.push(data_point_id.clone());
        }
        if let Some(ref section_id) = exception.section_id {
            ids.extend(
                state
                    .data_points
                    .values()
                    .filter(|dp| dp.section_id == *section_id)
                    .map(|dp| dp.id.clone()),
            );
        }
    }
    ids
}

fn apply_update(dp: &mut DataPoint, update: &DataPointUpdate) {
    if let Some(ref title) = update.title {
        dp.title = title.clone();
    }
    if let Some(ref content) = update.content {
        dp.content = content.clone();
    }
    if let Some(ref value) = update.value {
        dp.value = value.clone();
    }
    if let Some(ref unit) = update.unit {
        dp.unit = unit.clone();
    }
    if let Some(ref classification) = update.classification {
        dp.classification = classification.clone();
    }
    if let Some(ref data_type) = update.data_type {
        dp.data_type = data_type.clone();
    }
    if let Some(ref source) = update.source {
        dp.source = source.clone();
    }
    if let Some(information_type) = update.information_type {
        dp.information_type = information_type;
    }
    if let Some(ref owner_id) = update.owner_id {
        dp.owner_id = owner_id.clone();
    }
    if let Some(ref contributor_ids) = update.contributor_ids {
        dp.contributor_ids = contributor_ids.clone();
    }
    if let Some(is_blocked) = update.is_blocked {
        dp.is_blocked = is_blocked;
    }
    if let Some(ref blocker_reason) = update.blocker_reason {
        dp.blocker_reason = blocker_reason.clone();
    }
    if let Some(blocker_due_date) = update.blocker_due_date {
        dp.blocker_due_date = Some(blocker_due_date);
    }
    if let Some(provenance_needs_review) = update.provenance_needs_review {
        dp.provenance_needs_review = provenance_needs_review;
    }
    if let Some(ref provenance_review_reason) = update.provenance_review_reason {
        dp.provenance_review_reason = provenance_review_reason.clone();
    }
    if let Some(ref source_references) = update.source_references {
        dp.source_references = source_references.clone();
    }
}

fn record(
    state: &mut StoreState,
    actor_id: &str,
    action: AuditAction,
    entity_type: EntityType,
    entity_id: &str,
    note: Option<String>,
    changes: Vec<FieldChange>,
) {
    let actor_name = state
        .users
        .get(actor_id)
        .map(|u| u.name.clone())
        .unwrap_or_else(|| actor_id.to_string());
    let mut entry = AuditLogEntry::new(actor_id, actor_name, action, entity_type, entity_id)
        .with_changes(changes);
    if let Some(note) = note {
        entry = entry.with_note(note);
    }
    state.audit.append(entry);
}
