//! Gap-resolution workflow engine
//!
//! Enforces the forward-only missing → estimated → provided state machine.
//! Transitions never skip a stage and never regress; a target of
//! "estimated" requires the full estimate triple before any state changes.
//! The permission gate is evaluated before legality so unauthorized callers
//! learn nothing about the current state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use verdant_domain::{
    CompletenessStatus, ConfidenceLevel, DataPoint, DomainError, DomainResult, EstimateType,
    GapStatus, InformationType, MissingField, MissingReasonCategory, ReportSection,
    ReportingPeriod, User,
};

/// Request to advance a data point's gap status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapTransitionRequest {
    /// Target gap status
    pub target: GapStatus,
    /// Estimate type, required when the target is estimated
    pub estimate_type: Option<EstimateType>,
    /// Estimate method, required when the target is estimated
    pub estimate_method: Option<String>,
    /// Confidence level, required when the target is estimated
    pub confidence_level: Option<ConfidenceLevel>,
    /// Free-text reason, recorded when the target is missing
    pub missing_reason: Option<String>,
    /// Categorized reason, recorded when the target is missing
    pub missing_reason_category: Option<MissingReasonCategory>,
}

impl GapTransitionRequest {
    /// Request a transition with no estimate or reason fields
    pub fn to(target: GapStatus) -> Self {
        Self {
            target,
            estimate_type: None,
            estimate_method: None,
            confidence_level: None,
            missing_reason: None,
            missing_reason_category: None,
        }
    }

    /// Request a transition to missing with a recorded reason
    pub fn missing(reason: impl Into<String>, category: MissingReasonCategory) -> Self {
        Self {
            missing_reason: Some(reason.into()),
            missing_reason_category: Some(category),
            ..Self::to(GapStatus::Missing)
        }
    }

    /// Request a transition to estimated with the full triple
    pub fn estimated(
        estimate_type: EstimateType,
        estimate_method: impl Into<String>,
        confidence_level: ConfidenceLevel,
    ) -> Self {
        Self {
            target: GapStatus::Estimated,
            estimate_type: Some(estimate_type),
            estimate_method: Some(estimate_method.into()),
            confidence_level: Some(confidence_level),
            missing_reason: None,
            missing_reason_category: None,
        }
    }
}

/// Whether the actor may change this data point's gap status: global admin,
/// data point owner, section owner, or reporting period owner.
pub fn can_transition(
    actor: &User,
    dp: &DataPoint,
    section: &ReportSection,
    period: &ReportingPeriod,
) -> bool {
    actor.is_admin()
        || actor.id == dp.owner_id
        || actor.id == section.owner_id
        || actor.id == period.owner_id
}

/// Validate the estimate triple for an estimated-target request
fn require_estimate_fields(req: &GapTransitionRequest) -> DomainResult<()> {
    let mut missing = Vec::new();
    if req.estimate_type.is_none() {
        missing.push(MissingField::new(
            "estimate_type",
            "EstimateType is required when transitioning to 'estimated' status.",
        ));
    }
    if req
        .estimate_method
        .as_deref()
        .map(str::trim)
        .unwrap_or("")
        .is_empty()
    {
        missing.push(MissingField::new(
            "estimate_method",
            "EstimateMethod is required when transitioning to 'estimated' status.",
        ));
    }
    if req.confidence_level.is_none() {
        missing.push(MissingField::new(
            "confidence_level",
            "ConfidenceLevel is required when transitioning to 'estimated' status.",
        ));
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DomainError::missing_fields(missing))
    }
}

/// Reject illegal transitions per the ordering unset < missing < estimated
/// < provided
fn check_legality(current: GapStatus, target: GapStatus) -> DomainResult<()> {
    if current == target {
        return Err(DomainError::validation(
            "Data point is already in this status.",
        ));
    }

    if target.rank() < current.rank() {
        return Err(DomainError::validation(format!(
            "Gap status cannot move backwards from '{}' to '{}'.",
            current, target
        )));
    }

    match (current, target) {
        (GapStatus::Unset, GapStatus::Missing)
        | (GapStatus::Missing, GapStatus::Estimated)
        | (GapStatus::Estimated, GapStatus::Provided) => Ok(()),
        (_, GapStatus::Provided) => Err(DomainError::validation(
            "Cannot skip the 'estimated' status: data must be estimated before it is provided.",
        )),
        (GapStatus::Unset, GapStatus::Estimated) => Err(DomainError::validation(
            "Cannot skip the 'missing' status: flag the data point as missing first.",
        )),
        _ => Err(DomainError::validation(format!(
            "Illegal gap status transition from '{}' to '{}'.",
            current, target
        ))),
    }
}

/// Apply a gap transition to the data point, mutating it in place.
///
/// The estimate-triple requirement is checked before legality so an
/// estimated-target request always surfaces the missing-field failure, then
/// legality, then side effects. Callers must have evaluated the permission
/// gate already.
pub fn apply_transition(
    dp: &mut DataPoint,
    req: &GapTransitionRequest,
    actor_id: &str,
    now: DateTime<Utc>,
) -> DomainResult<()> {
    if req.target == GapStatus::Estimated {
        require_estimate_fields(req)?;
    }

    check_legality(dp.gap_status, req.target)?;

    // provided marks the data point complete, which requires an owner
    if req.target == GapStatus::Provided && !dp.has_owner() {
        return Err(DomainError::missing_fields(vec![MissingField::new(
            "owner_id",
            "Owner is required when transitioning to 'provided' status.",
        )]));
    }

    match req.target {
        GapStatus::Missing => {
            dp.gap_status = GapStatus::Missing;
            dp.is_missing = true;
            dp.completeness_status = CompletenessStatus::Missing;
            dp.missing_reason = req.missing_reason.clone().unwrap_or_default();
            dp.missing_reason_category = req.missing_reason_category;
            dp.flagged_by = actor_id.to_string();
            dp.flagged_at = Some(now);
        }
        GapStatus::Estimated => {
            dp.gap_status = GapStatus::Estimated;
            dp.estimate_type = req.estimate_type;
            dp.estimate_method = req.estimate_method.clone().unwrap_or_default();
            dp.confidence_level = req.confidence_level;
            dp.estimate_author = actor_id.to_string();
            dp.estimate_created_at = Some(now);
            dp.is_missing = false;
            dp.information_type = InformationType::Estimate;
            if dp.completeness_status == CompletenessStatus::Missing {
                dp.completeness_status = CompletenessStatus::Incomplete;
            }
        }
        GapStatus::Provided => {
            // preserve the superseded estimate before overwriting its role
            if dp.gap_status == GapStatus::Estimated {
                let snapshot = dp.estimate_snapshot();
                dp.previous_estimate_snapshot =
                    Some(serde_json::to_string(&snapshot).unwrap_or_default());
            }
            dp.gap_status = GapStatus::Provided;
            dp.is_missing = false;
            dp.completeness_status = CompletenessStatus::Complete;
        }
        GapStatus::Unset => unreachable!("legality check rejects transitions to unset"),
    }

    dp.updated_at = now;
    Ok(())
}
