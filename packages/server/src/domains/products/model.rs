//! Raw product documents - the flexible half of the hybrid model.
//!
//! Extraction confidence varies wildly across supplier sites, so product
//! records stay schema-flexible in the document store rather than being
//! forced into relational columns. Provenance fields are always stamped.

use chrono::{DateTime, Utc};
use ingestion::ExtractedProduct;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Confidence bucket for an ingested product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Where a product document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSource {
    Scrape,
    Manual,
    Api,
    PdfUpload,
}

/// A loosely-typed extracted product tied to a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProduct {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability_attributes: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,

    pub supplier_id: Uuid,
    pub supplier_name: String,

    // Provenance - conservative defaults regardless of model confidence
    pub verification_status: crate::domains::suppliers::VerificationStatus,
    pub risk_level: RiskLevel,
    pub data_source: ProductSource,
    pub ingested_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
}

impl RawProduct {
    /// Stamp an extracted product with scrape provenance.
    ///
    /// Everything from a scrape starts unverified and high-risk; vetting
    /// upgrades it later.
    pub fn from_extracted(
        product: &ExtractedProduct,
        supplier_id: Uuid,
        supplier_name: &str,
    ) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            sustainability_attributes: product.sustainability_attributes.clone(),
            certifications: product.certifications.clone(),
            supplier_id,
            supplier_name: supplier_name.to_string(),
            verification_status: crate::domains::suppliers::VerificationStatus::Unverified,
            risk_level: RiskLevel::High,
            data_source: ProductSource::Scrape,
            ingested_at: Utc::now(),
            verified_at: None,
            verified_by: None,
        }
    }
}
