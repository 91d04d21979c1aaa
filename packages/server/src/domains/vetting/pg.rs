//! Postgres-backed vetting review store.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{NewVettingReview, VettingReview};
use super::store::VettingStore;

pub struct PgVettingStore {
    pool: PgPool,
}

impl PgVettingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VettingStore for PgVettingStore {
    async fn insert(&self, review: &NewVettingReview) -> Result<VettingReview> {
        sqlx::query_as::<_, VettingReview>(
            "INSERT INTO vetting_reviews (supplier_id, action, actor, checklist, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(review.supplier_id)
        .bind(review.action)
        .bind(&review.actor)
        .bind(&review.checklist)
        .bind(&review.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn list_for_supplier(&self, supplier_id: Uuid) -> Result<Vec<VettingReview>> {
        sqlx::query_as::<_, VettingReview>(
            "SELECT * FROM vetting_reviews
             WHERE supplier_id = $1
             ORDER BY created_at DESC",
        )
        .bind(supplier_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }
}
