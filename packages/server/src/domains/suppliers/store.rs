//! Supplier storage trait.
//!
//! Handlers depend on this seam rather than on a concrete database
//! client, so the whole vetting/ingestion flow is testable against the
//! in-memory implementation.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::models::{
    DataSource, NewSupplier, ScrapedSupplierUpsert, Supplier, VerificationStatus, VettingUpdate,
};

/// Featured suppliers must be verified with at least this score.
pub const FEATURED_MIN_SCORE: i32 = 80;

/// Caller-supplied search filters over the supplier table.
#[derive(Debug, Clone, Default)]
pub struct SupplierFilters {
    /// Free-text match over name or description
    pub q: Option<String>,
    /// Exact category match
    pub category: Option<String>,
    /// Minimum sustainability score (inclusive)
    pub min_score: Option<i32>,
    /// Substring location match
    pub location: Option<String>,
    /// Certification membership test
    pub certification: Option<String>,
    pub verification_status: Option<VerificationStatus>,
    pub data_source: Option<DataSource>,
    /// Admin flag: include suppliers that have not been verified
    pub include_unverified: bool,
    /// Verified suppliers with score >= 80 only
    pub featured: bool,
    pub limit: i64,
    pub offset: i64,
}

impl SupplierFilters {
    pub fn new() -> Self {
        Self {
            limit: 50,
            ..Default::default()
        }
    }
}

/// One page of search results plus the unpaginated total.
#[derive(Debug, Clone)]
pub struct SupplierPage {
    pub suppliers: Vec<Supplier>,
    pub total: i64,
}

#[async_trait]
pub trait SupplierStore: Send + Sync {
    /// Upsert a scraped supplier keyed by website.
    ///
    /// Conflict resolution overwrites identity fields only; vetting state
    /// on an existing row is preserved.
    async fn upsert_scraped(&self, upsert: &ScrapedSupplierUpsert) -> Result<Supplier>;

    /// Insert a supplier from the registration form (unverified, pending
    /// admin approval). `score` is the final computed sustainability score.
    async fn insert_registered(&self, new: &NewSupplier, score: i32) -> Result<Supplier>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Supplier>>;

    /// Apply a vetting field update. Returns `None` for an unknown id.
    async fn apply_vetting(&self, id: Uuid, update: &VettingUpdate) -> Result<Option<Supplier>>;

    /// Filtered, paginated read ordered by sustainability score
    /// descending, nulls last.
    async fn search(&self, filters: &SupplierFilters) -> Result<SupplierPage>;

    /// All suppliers, newest first (admin review queue).
    async fn list_all(&self) -> Result<Vec<Supplier>>;
}
