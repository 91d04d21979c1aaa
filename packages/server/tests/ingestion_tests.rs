//! Integration tests for the hybrid ingestion flow.
//!
//! Scrape -> extraction -> supplier upsert (relational) -> product
//! documents (document store), exercised end to end over in-memory
//! stores and mock fetcher/extractor.

use std::sync::Arc;

use server_core::common::ApiError;
use server_core::domains::products::{MemoryProductStore, ProductStore, RiskLevel};
use server_core::domains::suppliers::actions::ingest_supplier;
use server_core::domains::suppliers::{
    MemorySupplierStore, SupplierFilters, SupplierStore, VerificationStatus, VettingStatus,
};
use ingestion::testing::{MockExtractor, MockFetcher};

const SITE: &str = "https://ecotimber.example";

const SITE_HTML: &str = r#"
    <html><body>
        <h1>EcoTimber Supply</h1>
        <p>Reclaimed and FSC-certified lumber.</p>
    </body></html>
"#;

fn extraction_response() -> String {
    serde_json::json!({
        "name": "EcoTimber Supply",
        "description": "Reclaimed and FSC-certified lumber",
        "products": [
            {
                "name": "Reclaimed Oak Flooring",
                "category": "Flooring",
                "certifications": ["FSC"]
            },
            {
                "name": "Bamboo Panels",
                "description": "Rapidly renewable panels"
            }
        ]
    })
    .to_string()
}

struct Harness {
    fetcher: Arc<MockFetcher>,
    extractor: Arc<MockExtractor>,
    suppliers: Arc<MemorySupplierStore>,
    products: Arc<MemoryProductStore>,
}

impl Harness {
    fn new() -> Self {
        Self {
            fetcher: Arc::new(MockFetcher::new().with_page(SITE, SITE_HTML)),
            extractor: Arc::new(MockExtractor::new().with_response(extraction_response())),
            suppliers: Arc::new(MemorySupplierStore::new()),
            products: Arc::new(MemoryProductStore::new()),
        }
    }

    async fn ingest(&self, url: &str) -> Result<server_core::domains::suppliers::actions::IngestOutcome, ApiError> {
        ingest_supplier(
            self.fetcher.as_ref(),
            self.extractor.as_ref(),
            self.suppliers.as_ref(),
            self.products.as_ref(),
            url,
        )
        .await
    }
}

#[tokio::test]
async fn test_ingestion_writes_both_stores() {
    let h = Harness::new();

    let outcome = h.ingest(SITE).await.unwrap();

    assert_eq!(outcome.supplier_name, "EcoTimber Supply");
    assert_eq!(outcome.products_ingested, 2);
    assert_eq!(outcome.verification_status, VerificationStatus::Unverified);
    assert_eq!(h.suppliers.len(), 1);
    assert_eq!(h.products.len(), 2);

    // Claim link carries the generated token
    let link = outcome.claim_link.unwrap();
    assert!(link.starts_with("/claim?token="));
}

#[tokio::test]
async fn test_ingested_products_are_stamped_high_risk() {
    let h = Harness::new();
    let outcome = h.ingest(SITE).await.unwrap();

    let products = h
        .products
        .find_by_supplier(outcome.supplier_id)
        .await
        .unwrap();

    assert_eq!(products.len(), 2);
    for product in &products {
        assert_eq!(product.verification_status, VerificationStatus::Unverified);
        assert_eq!(product.risk_level, RiskLevel::High);
        assert_eq!(product.supplier_id, outcome.supplier_id);
        assert_eq!(product.supplier_name, "EcoTimber Supply");
    }
}

#[tokio::test]
async fn test_reingestion_upserts_instead_of_duplicating() {
    let h = Harness::new();

    let first = h.ingest(SITE).await.unwrap();
    let second = h.ingest(SITE).await.unwrap();

    assert_eq!(first.supplier_id, second.supplier_id);
    assert_eq!(h.suppliers.len(), 1);
}

#[tokio::test]
async fn test_reingestion_preserves_vetting_state() {
    let h = Harness::new();
    let first = h.ingest(SITE).await.unwrap();

    // Admin approves between scrapes
    let update = server_core::domains::vetting::update_for_action(
        server_core::domains::vetting::VettingAction::Approve,
        None,
        None,
        chrono::Utc::now(),
    );
    h.suppliers
        .apply_vetting(first.supplier_id, &update)
        .await
        .unwrap()
        .unwrap();

    h.ingest(SITE).await.unwrap();

    let supplier = h
        .suppliers
        .find_by_id(first.supplier_id)
        .await
        .unwrap()
        .unwrap();
    assert!(supplier.verified);
    assert_eq!(supplier.vetting_status, VettingStatus::Verified);
}

#[tokio::test]
async fn test_fetch_failure_persists_nothing() {
    let h = Harness::new();

    let err = h.ingest("https://down.example").await.unwrap_err();

    assert!(matches!(err, ApiError::Internal(_)));
    assert!(h.suppliers.is_empty());
    assert!(h.products.is_empty());
}

#[tokio::test]
async fn test_invalid_extraction_persists_nothing() {
    let h = Harness::new();
    let extractor = MockExtractor::new().with_response(r#"{"description": "no name field"}"#);

    let err = ingest_supplier(
        h.fetcher.as_ref(),
        &extractor,
        h.suppliers.as_ref(),
        h.products.as_ref(),
        SITE,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidExtraction(_)));
    assert!(h.suppliers.is_empty());
    assert!(h.products.is_empty());
}

#[tokio::test]
async fn test_product_write_failure_keeps_supplier_row() {
    let h = Harness::new();
    h.products.fail_writes(true);

    let err = h.ingest(SITE).await.unwrap_err();

    // No rollback across stores: the supplier row stays, the error surfaces
    assert!(matches!(err, ApiError::Internal(_)));
    assert_eq!(h.suppliers.len(), 1);
    assert!(h.products.is_empty());
}

#[tokio::test]
async fn test_empty_url_is_rejected() {
    let h = Harness::new();

    let err = h.ingest("   ").await.unwrap_err();

    assert!(matches!(err, ApiError::BadRequest(_)));
    assert_eq!(h.fetcher.fetch_count(), 0);
}

#[tokio::test]
async fn test_scraped_supplier_is_hidden_from_default_search() {
    let h = Harness::new();
    h.ingest(SITE).await.unwrap();

    let visible = h.suppliers.search(&SupplierFilters::new()).await.unwrap();
    assert_eq!(visible.total, 0);

    let mut admin_filters = SupplierFilters::new();
    admin_filters.include_unverified = true;
    let all = h.suppliers.search(&admin_filters).await.unwrap();
    assert_eq!(all.total, 1);
}

#[tokio::test]
async fn test_extraction_without_products_ingests_supplier_only() {
    let h = Harness::new();
    let extractor =
        MockExtractor::new().with_response(r#"{"name": "Quiet Supplier", "products": []}"#);

    let outcome = ingest_supplier(
        h.fetcher.as_ref(),
        &extractor,
        h.suppliers.as_ref(),
        h.products.as_ref(),
        SITE,
    )
    .await
    .unwrap();

    assert_eq!(outcome.products_ingested, 0);
    assert_eq!(h.suppliers.len(), 1);
    assert!(h.products.is_empty());
}
