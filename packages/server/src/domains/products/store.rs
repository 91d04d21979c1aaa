//! Product document storage trait.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::model::RawProduct;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a batch of product documents, returning the number written.
    ///
    /// There is no cross-store transaction with the supplier upsert; a
    /// failure here leaves the supplier row in place and is surfaced to
    /// the caller.
    async fn insert_many(&self, products: &[RawProduct]) -> Result<u64>;

    /// Products ingested for one supplier.
    async fn find_by_supplier(&self, supplier_id: Uuid) -> Result<Vec<RawProduct>>;
}
