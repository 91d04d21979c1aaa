//! In-memory vetting review store for testing.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::RwLock;
use uuid::Uuid;

use super::models::{NewVettingReview, VettingReview};
use super::store::VettingStore;

#[derive(Default)]
pub struct MemoryVettingStore {
    reviews: RwLock<Vec<VettingReview>>,
    fail_writes: RwLock<bool>,
}

impl MemoryVettingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent inserts fail (audit-failure tests).
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.write().unwrap() = fail;
    }

    /// Number of stored reviews.
    pub fn len(&self) -> usize {
        self.reviews.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VettingStore for MemoryVettingStore {
    async fn insert(&self, review: &NewVettingReview) -> Result<VettingReview> {
        if *self.fail_writes.read().unwrap() {
            bail!("vetting review insert failed");
        }

        let row = VettingReview {
            id: Uuid::new_v4(),
            supplier_id: review.supplier_id,
            action: review.action,
            actor: review.actor.clone(),
            checklist: review.checklist.clone(),
            notes: review.notes.clone(),
            created_at: Utc::now(),
        };

        self.reviews.write().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_for_supplier(&self, supplier_id: Uuid) -> Result<Vec<VettingReview>> {
        let mut rows: Vec<VettingReview> = self
            .reviews
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.supplier_id == supplier_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}
