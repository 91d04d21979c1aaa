//! Vetting audit trail - append-only review records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Admin action over a supplier's vetting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vetting_action", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VettingAction {
    Approve,
    Reject,
    RequestDocs,
    VerifyCert,
}

/// One audit row per vetting action. Never mutated or deleted.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct VettingReview {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub action: VettingAction,
    pub actor: String,
    /// Map of boolean compliance flags checked by the reviewer
    pub checklist: Option<Value>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVettingReview {
    pub supplier_id: Uuid,
    pub action: VettingAction,
    pub actor: String,
    pub checklist: Option<Value>,
    pub notes: Option<String>,
}
