//! In-memory product store for testing.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::RwLock;
use uuid::Uuid;

use super::model::RawProduct;
use super::store::ProductStore;

#[derive(Default)]
pub struct MemoryProductStore {
    products: RwLock<Vec<RawProduct>>,
    fail_writes: RwLock<bool>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail (partial-failure tests).
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.write().unwrap() = fail;
    }

    /// Number of stored product documents.
    pub fn len(&self) -> usize {
        self.products.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn insert_many(&self, products: &[RawProduct]) -> Result<u64> {
        if *self.fail_writes.read().unwrap() {
            bail!("product store write failed");
        }

        self.products
            .write()
            .unwrap()
            .extend(products.iter().cloned());
        Ok(products.len() as u64)
    }

    async fn find_by_supplier(&self, supplier_id: Uuid) -> Result<Vec<RawProduct>> {
        Ok(self
            .products
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.supplier_id == supplier_id)
            .cloned()
            .collect())
    }
}
