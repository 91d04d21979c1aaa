//! In-memory supplier store for testing and development.
//!
//! Mirrors the Postgres store's semantics (upsert keyed by website,
//! vetting updates, search filters and ordering) without a database.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::models::{
    DataSource, NewSupplier, ScrapedSupplierUpsert, Supplier, VerificationStatus, VettingStatus,
    VettingUpdate,
};
use super::store::{SupplierFilters, SupplierPage, SupplierStore, FEATURED_MIN_SCORE};

#[derive(Default)]
pub struct MemorySupplierStore {
    suppliers: RwLock<HashMap<Uuid, Supplier>>,
}

impl MemorySupplierStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored suppliers.
    pub fn len(&self) -> usize {
        self.suppliers.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seed a supplier directly (test setup).
    pub fn insert_raw(&self, supplier: Supplier) {
        self.suppliers
            .write()
            .unwrap()
            .insert(supplier.id, supplier);
    }

    fn matches(supplier: &Supplier, f: &SupplierFilters) -> bool {
        if let Some(q) = f.q.as_deref().filter(|q| !q.trim().is_empty()) {
            let q = q.trim().to_lowercase();
            let in_name = supplier.name.to_lowercase().contains(&q);
            let in_description = supplier
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&q));
            if !in_name && !in_description {
                return false;
            }
        }

        if let Some(category) = &f.category {
            if supplier.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }

        if let Some(min_score) = f.min_score {
            if supplier.sustainability_score.map_or(true, |s| s < min_score) {
                return false;
            }
        }

        if let Some(location) = &f.location {
            let location = location.to_lowercase();
            if !supplier
                .location
                .as_deref()
                .is_some_and(|l| l.to_lowercase().contains(&location))
            {
                return false;
            }
        }

        if let Some(certification) = &f.certification {
            if !supplier
                .certifications
                .as_deref()
                .is_some_and(|certs| certs.iter().any(|c| c == certification))
            {
                return false;
            }
        }

        if let Some(status) = f.verification_status {
            if supplier.verification_status != status {
                return false;
            }
        }

        if let Some(source) = f.data_source {
            if supplier.data_source != source {
                return false;
            }
        }

        if f.featured {
            if !supplier.verified
                || supplier
                    .sustainability_score
                    .map_or(true, |s| s < FEATURED_MIN_SCORE)
            {
                return false;
            }
        } else if !f.include_unverified && !supplier.verified {
            return false;
        }

        true
    }
}

/// Fresh supplier row with ingestion defaults.
fn scraped_supplier(upsert: &ScrapedSupplierUpsert) -> Supplier {
    let now = Utc::now();
    Supplier {
        id: Uuid::new_v4(),
        name: upsert.name.clone(),
        description: upsert.description.clone(),
        category: None,
        location: None,
        website: Some(upsert.website.clone()),
        contact_email: None,
        contact_phone: None,
        employee_count: None,
        sustainability_score: None,
        carbon_footprint: None,
        water_usage: None,
        waste_recycled: None,
        renewable_energy: None,
        certifications: None,
        verified: false,
        verification_date: None,
        vetting_status: VettingStatus::Pending,
        vetting_notes: None,
        compliance_flags: None,
        last_verified_at: None,
        verification_status: VerificationStatus::Unverified,
        data_source: DataSource::Scrape,
        scraped_url: Some(upsert.website.clone()),
        is_claimed: false,
        claim_token: Some(Uuid::new_v4()),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl SupplierStore for MemorySupplierStore {
    async fn upsert_scraped(&self, upsert: &ScrapedSupplierUpsert) -> Result<Supplier> {
        let mut suppliers = self.suppliers.write().unwrap();

        let existing_id = suppliers
            .values()
            .find(|s| s.website.as_deref() == Some(upsert.website.as_str()))
            .map(|s| s.id);

        let supplier = match existing_id {
            Some(id) => {
                let row = suppliers.get_mut(&id).expect("id from same map");
                // Identity fields only; vetting state survives re-ingestion
                row.name = upsert.name.clone();
                row.description = upsert.description.clone();
                row.scraped_url = Some(upsert.website.clone());
                row.updated_at = Utc::now();
                row.clone()
            }
            None => {
                let row = scraped_supplier(upsert);
                suppliers.insert(row.id, row.clone());
                row
            }
        };

        Ok(supplier)
    }

    async fn insert_registered(&self, new: &NewSupplier, score: i32) -> Result<Supplier> {
        let now = Utc::now();
        let supplier = Supplier {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            description: Some(new.description.clone()),
            category: Some(new.category.clone()),
            location: Some(new.location.clone()),
            website: new.website.clone(),
            contact_email: Some(new.contact_email.clone()),
            contact_phone: new.contact_phone.clone(),
            employee_count: new.employee_count,
            sustainability_score: Some(score),
            carbon_footprint: new.carbon_footprint,
            water_usage: new.water_usage,
            waste_recycled: new.waste_recycled,
            renewable_energy: Some(new.renewable_energy.unwrap_or(false)),
            certifications: Some(new.certifications.clone().unwrap_or_default()),
            verified: false,
            verification_date: None,
            vetting_status: VettingStatus::Pending,
            vetting_notes: None,
            compliance_flags: None,
            last_verified_at: None,
            verification_status: VerificationStatus::Pending,
            data_source: DataSource::Manual,
            scraped_url: None,
            is_claimed: false,
            claim_token: None,
            created_at: now,
            updated_at: now,
        };

        self.suppliers
            .write()
            .unwrap()
            .insert(supplier.id, supplier.clone());
        Ok(supplier)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Supplier>> {
        Ok(self.suppliers.read().unwrap().get(&id).cloned())
    }

    async fn apply_vetting(&self, id: Uuid, update: &VettingUpdate) -> Result<Option<Supplier>> {
        let mut suppliers = self.suppliers.write().unwrap();
        let Some(row) = suppliers.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(verified) = update.verified {
            row.verified = verified;
        }
        if let Some(status) = update.vetting_status {
            row.vetting_status = status;
        }
        if let Some(notes) = &update.vetting_notes {
            row.vetting_notes = Some(notes.clone());
        }
        if let Some(date) = update.verification_date {
            row.verification_date = Some(date);
        }
        if let Some(date) = update.last_verified_at {
            row.last_verified_at = Some(date);
        }
        if let Some(flags) = &update.compliance_flags {
            row.compliance_flags = Some(flags.clone());
        }
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn search(&self, filters: &SupplierFilters) -> Result<SupplierPage> {
        let suppliers = self.suppliers.read().unwrap();

        let mut matched: Vec<Supplier> = suppliers
            .values()
            .filter(|s| Self::matches(s, filters))
            .cloned()
            .collect();

        // Score descending, nulls last
        matched.sort_by(|a, b| match (b.sustainability_score, a.sustainability_score) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Greater,
            (None, Some(_)) => std::cmp::Ordering::Less,
            (None, None) => std::cmp::Ordering::Equal,
        });

        let total = matched.len() as i64;
        let page = matched
            .into_iter()
            .skip(filters.offset.max(0) as usize)
            .take(filters.limit.max(0) as usize)
            .collect();

        Ok(SupplierPage {
            suppliers: page,
            total,
        })
    }

    async fn list_all(&self) -> Result<Vec<Supplier>> {
        let mut all: Vec<Supplier> = self.suppliers.read().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}
