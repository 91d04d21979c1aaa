//! Vetting review storage trait.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::models::{NewVettingReview, VettingReview};

#[async_trait]
pub trait VettingStore: Send + Sync {
    /// Append one audit row.
    async fn insert(&self, review: &NewVettingReview) -> Result<VettingReview>;

    /// Reviews for a supplier, newest first.
    async fn list_for_supplier(&self, supplier_id: Uuid) -> Result<Vec<VettingReview>>;
}
