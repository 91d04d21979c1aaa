//! Vetting state controller.
//!
//! Transitions a supplier's vetting status based on an admin action and
//! appends one audit row per transition. Audit failure is logged, never
//! surfaced: the state transition already happened and stays valid.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::common::{ApiError, ApiResult};
use crate::domains::suppliers::models::{Supplier, VettingStatus, VettingUpdate};
use crate::domains::suppliers::store::SupplierStore;

use super::models::{NewVettingReview, VettingAction};
use super::store::VettingStore;

/// Admin-submitted vetting request.
#[derive(Debug, Clone, Deserialize)]
pub struct VettingActionRequest {
    pub supplier_id: Uuid,
    pub action: VettingAction,
    pub actor: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub checklist: Option<Value>,
}

/// The transition table: which supplier fields each action sets.
///
/// `reject` soft-flags only - the row is never deleted. `verify_cert`
/// records a compliance check without moving the vetting status.
pub fn update_for_action(
    action: VettingAction,
    notes: Option<&str>,
    checklist: Option<&Value>,
    now: DateTime<Utc>,
) -> VettingUpdate {
    match action {
        VettingAction::Approve => VettingUpdate {
            verified: Some(true),
            vetting_status: Some(VettingStatus::Verified),
            verification_date: Some(now),
            last_verified_at: Some(now),
            ..Default::default()
        },
        VettingAction::Reject => VettingUpdate {
            verified: Some(false),
            vetting_status: Some(VettingStatus::Rejected),
            ..Default::default()
        },
        VettingAction::RequestDocs => VettingUpdate {
            vetting_status: Some(VettingStatus::NeedsInfo),
            vetting_notes: notes.map(str::to_string),
            ..Default::default()
        },
        VettingAction::VerifyCert => VettingUpdate {
            last_verified_at: Some(now),
            compliance_flags: checklist.cloned(),
            ..Default::default()
        },
    }
}

/// Apply a vetting action and append the audit row.
pub async fn apply_vetting_action(
    suppliers: &dyn SupplierStore,
    reviews: &dyn VettingStore,
    request: &VettingActionRequest,
) -> ApiResult<Supplier> {
    if request.actor.trim().is_empty() {
        return Err(ApiError::BadRequest("actor is required".into()));
    }

    let update = update_for_action(
        request.action,
        request.notes.as_deref(),
        request.checklist.as_ref(),
        Utc::now(),
    );

    let supplier = suppliers
        .apply_vetting(request.supplier_id, &update)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("supplier not found: {}", request.supplier_id))
        })?;

    info!(
        supplier_id = %supplier.id,
        action = ?request.action,
        actor = %request.actor,
        "vetting action applied"
    );

    // Best-effort audit: the supplier update already succeeded
    let review = NewVettingReview {
        supplier_id: request.supplier_id,
        action: request.action,
        actor: request.actor.clone(),
        checklist: request.checklist.clone(),
        notes: request.notes.clone(),
    };
    if let Err(e) = reviews.insert(&review).await {
        warn!(
            supplier_id = %request.supplier_id,
            error = %e,
            "vetting review insert failed; transition kept"
        );
    }

    Ok(supplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_approve_sets_verified_and_timestamps() {
        let now = Utc::now();
        let update = update_for_action(VettingAction::Approve, None, None, now);

        assert_eq!(update.verified, Some(true));
        assert_eq!(update.vetting_status, Some(VettingStatus::Verified));
        assert_eq!(update.verification_date, Some(now));
        assert_eq!(update.last_verified_at, Some(now));
        assert!(update.vetting_notes.is_none());
    }

    #[test]
    fn test_reject_flags_without_touching_dates() {
        let update = update_for_action(VettingAction::Reject, None, None, Utc::now());

        assert_eq!(update.verified, Some(false));
        assert_eq!(update.vetting_status, Some(VettingStatus::Rejected));
        assert!(update.verification_date.is_none());
        assert!(update.last_verified_at.is_none());
    }

    #[test]
    fn test_request_docs_records_notes() {
        let update = update_for_action(
            VettingAction::RequestDocs,
            Some("please send the FSC license"),
            None,
            Utc::now(),
        );

        assert_eq!(update.vetting_status, Some(VettingStatus::NeedsInfo));
        assert_eq!(
            update.vetting_notes.as_deref(),
            Some("please send the FSC license")
        );
        assert!(update.verified.is_none());
    }

    #[test]
    fn test_verify_cert_leaves_vetting_status_alone() {
        let now = Utc::now();
        let checklist = json!({"certifications_verified": true});
        let update = update_for_action(VettingAction::VerifyCert, None, Some(&checklist), now);

        assert!(update.vetting_status.is_none());
        assert_eq!(update.last_verified_at, Some(now));
        assert_eq!(update.compliance_flags, Some(checklist));
    }

    #[test]
    fn test_action_deserializes_from_snake_case() {
        let action: VettingAction = serde_json::from_str("\"request_docs\"").unwrap();
        assert_eq!(action, VettingAction::RequestDocs);
    }
}
