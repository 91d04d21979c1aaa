//! Postgres-backed supplier store.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::models::{
    DataSource, NewSupplier, ScrapedSupplierUpsert, Supplier, VerificationStatus, VettingUpdate,
};
use super::store::{SupplierFilters, SupplierPage, SupplierStore, FEATURED_MIN_SCORE};

pub struct PgSupplierStore {
    pool: PgPool,
}

impl PgSupplierStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append WHERE clauses for the caller-supplied filters.
///
/// The builder already holds `... WHERE 1=1`, so every clause starts with
/// `AND`. Shared between the page query and the count query.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, f: &SupplierFilters) {
    if let Some(q) = f.q.as_deref().filter(|q| !q.trim().is_empty()) {
        let pattern = format!("%{}%", q.trim());
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(category) = &f.category {
        qb.push(" AND category = ").push_bind(category.clone());
    }

    if let Some(min_score) = f.min_score {
        qb.push(" AND sustainability_score >= ").push_bind(min_score);
    }

    if let Some(location) = &f.location {
        qb.push(" AND location ILIKE ")
            .push_bind(format!("%{}%", location));
    }

    if let Some(certification) = &f.certification {
        qb.push(" AND certifications @> ")
            .push_bind(vec![certification.clone()]);
    }

    if let Some(status) = f.verification_status {
        qb.push(" AND verification_status = ").push_bind(status);
    }

    if let Some(source) = f.data_source {
        qb.push(" AND data_source = ").push_bind(source);
    }

    if f.featured {
        qb.push(" AND verified = true AND sustainability_score >= ")
            .push_bind(FEATURED_MIN_SCORE);
    } else if !f.include_unverified {
        // Default visibility: hide unverified suppliers from buyers
        qb.push(" AND verified = true");
    }
}

#[async_trait]
impl SupplierStore for PgSupplierStore {
    async fn upsert_scraped(&self, upsert: &ScrapedSupplierUpsert) -> Result<Supplier> {
        sqlx::query_as::<_, Supplier>(
            "INSERT INTO suppliers (
                name, description, website, scraped_url,
                is_claimed, data_source, verification_status
             )
             VALUES ($1, $2, $3, $3, false, $4, $5)
             ON CONFLICT (website) DO UPDATE
             SET name = EXCLUDED.name,
                 description = EXCLUDED.description,
                 scraped_url = EXCLUDED.scraped_url,
                 updated_at = now()
             RETURNING *",
        )
        .bind(&upsert.name)
        .bind(&upsert.description)
        .bind(&upsert.website)
        .bind(DataSource::Scrape)
        .bind(VerificationStatus::Unverified)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn insert_registered(&self, new: &NewSupplier, score: i32) -> Result<Supplier> {
        sqlx::query_as::<_, Supplier>(
            "INSERT INTO suppliers (
                name, description, category, location, website,
                contact_email, contact_phone, employee_count, certifications,
                sustainability_score, carbon_footprint, water_usage,
                waste_recycled, renewable_energy,
                verified, data_source, verification_status
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                     false, $15, $16)
             RETURNING *",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.category)
        .bind(&new.location)
        .bind(&new.website)
        .bind(&new.contact_email)
        .bind(&new.contact_phone)
        .bind(new.employee_count)
        .bind(new.certifications.clone().unwrap_or_default())
        .bind(score)
        .bind(new.carbon_footprint)
        .bind(new.water_usage)
        .bind(new.waste_recycled)
        .bind(new.renewable_energy.unwrap_or(false))
        .bind(DataSource::Manual)
        .bind(VerificationStatus::Pending)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Supplier>> {
        sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn apply_vetting(&self, id: Uuid, update: &VettingUpdate) -> Result<Option<Supplier>> {
        sqlx::query_as::<_, Supplier>(
            "UPDATE suppliers SET
                verified = COALESCE($2, verified),
                vetting_status = COALESCE($3, vetting_status),
                vetting_notes = COALESCE($4, vetting_notes),
                verification_date = COALESCE($5, verification_date),
                last_verified_at = COALESCE($6, last_verified_at),
                compliance_flags = COALESCE($7, compliance_flags),
                updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(update.verified)
        .bind(update.vetting_status)
        .bind(&update.vetting_notes)
        .bind(update.verification_date)
        .bind(update.last_verified_at)
        .bind(&update.compliance_flags)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn search(&self, filters: &SupplierFilters) -> Result<SupplierPage> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM suppliers WHERE 1=1");
        push_filters(&mut count_qb, filters);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM suppliers WHERE 1=1");
        push_filters(&mut qb, filters);
        qb.push(" ORDER BY sustainability_score DESC NULLS LAST");
        qb.push(" LIMIT ").push_bind(filters.limit);
        qb.push(" OFFSET ").push_bind(filters.offset);

        let suppliers = qb
            .build_query_as::<Supplier>()
            .fetch_all(&self.pool)
            .await?;

        Ok(SupplierPage { suppliers, total })
    }

    async fn list_all(&self) -> Result<Vec<Supplier>> {
        sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }
}
