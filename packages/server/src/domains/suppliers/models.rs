//! Supplier model - SQL persistence layer
//!
//! The supplier row is the relational source of truth for identity and
//! vetting state. Extracted product documents live in the document store
//! (see `domains::products`), linked only by `supplier_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Verification status for scraped suppliers.
///
/// Distinct from [`VettingStatus`]: this tracks whether the supplier's
/// data has been verified at all, while vetting tracks the admin review
/// workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "verification_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Unverified,
    Pending,
    Verified,
    Rejected,
}

/// Where a supplier record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "data_source", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Scrape,
    Manual,
    Api,
    Claim,
}

/// Admin vetting workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vetting_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VettingStatus {
    Pending,
    NeedsInfo,
    Verified,
    Rejected,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub employee_count: Option<i32>,

    // Sustainability profile
    pub sustainability_score: Option<i32>,
    pub carbon_footprint: Option<f64>,
    pub water_usage: Option<f64>,
    pub waste_recycled: Option<f64>,
    pub renewable_energy: Option<bool>,
    pub certifications: Option<Vec<String>>,

    // Admin vetting
    pub verified: bool,
    pub verification_date: Option<DateTime<Utc>>,
    pub vetting_status: VettingStatus,
    pub vetting_notes: Option<String>,
    pub compliance_flags: Option<Value>,
    pub last_verified_at: Option<DateTime<Utc>>,

    // Scrape provenance and claim flow
    pub verification_status: VerificationStatus,
    pub data_source: DataSource,
    pub scraped_url: Option<String>,
    pub is_claimed: bool,
    pub claim_token: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity fields written by scrape ingestion, keyed by website.
///
/// A conflicting upsert overwrites these and nothing else - vetting
/// fields survive re-ingestion.
#[derive(Debug, Clone)]
pub struct ScrapedSupplierUpsert {
    pub name: String,
    pub description: Option<String>,
    pub website: String,
}

/// A supplier submitted through the registration form.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub contact_email: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub employee_count: Option<i32>,
    #[serde(default)]
    pub certifications: Option<Vec<String>>,
    #[serde(default)]
    pub sustainability_score: Option<i32>,
    #[serde(default)]
    pub carbon_footprint: Option<f64>,
    #[serde(default)]
    pub water_usage: Option<f64>,
    #[serde(default)]
    pub waste_recycled: Option<f64>,
    #[serde(default)]
    pub renewable_energy: Option<bool>,
}

/// Field changes produced by a vetting action.
///
/// `None` leaves the column untouched, so one UPDATE statement covers the
/// whole transition table.
#[derive(Debug, Clone, Default)]
pub struct VettingUpdate {
    pub verified: Option<bool>,
    pub vetting_status: Option<VettingStatus>,
    pub vetting_notes: Option<String>,
    pub verification_date: Option<DateTime<Utc>>,
    pub last_verified_at: Option<DateTime<Utc>>,
    pub compliance_flags: Option<Value>,
}
