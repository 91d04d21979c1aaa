//! Supplier ingestion - the hybrid write path.
//!
//! Scrape -> AI extraction -> supplier upsert (relational) -> product
//! documents (document store). Runs sequentially inside one request; a
//! failed fetch or failed validation aborts the whole operation before
//! anything is persisted. There is no retry and no cross-store rollback:
//! if the product insert fails after the supplier upsert, the supplier
//! row stays and the error is surfaced.

use ingestion::{clean_html, Extractor, PageFetcher};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::common::{ApiError, ApiResult};
use crate::domains::products::{ProductStore, RawProduct};
use crate::domains::suppliers::models::{ScrapedSupplierUpsert, VerificationStatus};
use crate::domains::suppliers::store::SupplierStore;

#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub products_ingested: u64,
    pub claim_link: Option<String>,
    pub verification_status: VerificationStatus,
}

pub async fn ingest_supplier(
    fetcher: &dyn PageFetcher,
    extractor: &dyn Extractor,
    suppliers: &dyn SupplierStore,
    products: &dyn ProductStore,
    url: &str,
) -> ApiResult<IngestOutcome> {
    if url.trim().is_empty() {
        return Err(ApiError::BadRequest("URL required".into()));
    }

    // 1. Scrape the target URL
    let html = fetcher.fetch(url).await?;
    let content = clean_html(&html);

    // 2. AI extraction, validated against the typed schema
    let extracted = extractor.extract(&content).await?;

    // 3. Supplier identity -> relational store, keyed by website
    let upsert = ScrapedSupplierUpsert {
        name: extracted.name.clone(),
        description: extracted.description.clone(),
        website: url.to_string(),
    };
    let supplier = suppliers.upsert_scraped(&upsert).await?;

    // 4. Product data -> document store, stamped unverified/high-risk
    let docs: Vec<RawProduct> = extracted
        .products
        .iter()
        .map(|p| RawProduct::from_extracted(p, supplier.id, &supplier.name))
        .collect();

    let products_ingested = if docs.is_empty() {
        0
    } else {
        match products.insert_many(&docs).await {
            Ok(count) => count,
            Err(e) => {
                // Supplier row already persisted; surface, don't roll back
                warn!(supplier_id = %supplier.id, error = %e, "product insert failed after supplier upsert");
                return Err(ApiError::Internal(format!("product insert failed: {}", e)));
            }
        }
    };

    info!(
        supplier_id = %supplier.id,
        supplier_name = %supplier.name,
        products_ingested,
        "hybrid ingestion complete"
    );

    Ok(IngestOutcome {
        supplier_id: supplier.id,
        supplier_name: supplier.name,
        products_ingested,
        claim_link: supplier
            .claim_token
            .map(|token| format!("/claim?token={}", token)),
        verification_status: VerificationStatus::Unverified,
    })
}
