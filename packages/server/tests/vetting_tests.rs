//! Integration tests for the admin vetting workflow.
//!
//! Actions transition supplier state and append audit rows; audit
//! failure never rolls back a completed transition.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use server_core::common::ApiError;
use server_core::domains::suppliers::actions::ingest_supplier;
use server_core::domains::suppliers::{
    MemorySupplierStore, SupplierFilters, SupplierStore, VettingStatus,
};
use server_core::domains::products::MemoryProductStore;
use server_core::domains::vetting::actions::{apply_vetting_action, VettingActionRequest};
use server_core::domains::vetting::{MemoryVettingStore, VettingAction, VettingStore};
use ingestion::testing::{MockExtractor, MockFetcher};

const SITE: &str = "https://verdant.example";

struct Harness {
    suppliers: Arc<MemorySupplierStore>,
    reviews: Arc<MemoryVettingStore>,
}

impl Harness {
    /// Ingest one scraped supplier and return its id.
    async fn with_scraped_supplier() -> (Self, Uuid) {
        let fetcher = MockFetcher::new().with_page(SITE, "<body>Verdant Materials</body>");
        let extractor = MockExtractor::new()
            .with_response(r#"{"name": "Verdant Materials", "products": []}"#);
        let suppliers = Arc::new(MemorySupplierStore::new());
        let products = MemoryProductStore::new();

        let outcome = ingest_supplier(
            &fetcher,
            &extractor,
            suppliers.as_ref(),
            &products,
            SITE,
        )
        .await
        .unwrap();

        (
            Self {
                suppliers,
                reviews: Arc::new(MemoryVettingStore::new()),
            },
            outcome.supplier_id,
        )
    }

    fn request(&self, supplier_id: Uuid, action: VettingAction) -> VettingActionRequest {
        VettingActionRequest {
            supplier_id,
            action,
            actor: "admin@greenchainz.com".into(),
            notes: None,
            checklist: None,
        }
    }

    async fn apply(&self, request: &VettingActionRequest) -> Result<server_core::domains::suppliers::Supplier, ApiError> {
        apply_vetting_action(self.suppliers.as_ref(), self.reviews.as_ref(), request).await
    }
}

#[tokio::test]
async fn test_approve_makes_supplier_visible() {
    let (h, id) = Harness::with_scraped_supplier().await;

    let supplier = h.apply(&h.request(id, VettingAction::Approve)).await.unwrap();

    assert!(supplier.verified);
    assert_eq!(supplier.vetting_status, VettingStatus::Verified);
    assert!(supplier.verification_date.is_some());

    let visible = h.suppliers.search(&SupplierFilters::new()).await.unwrap();
    assert_eq!(visible.total, 1);
}

#[tokio::test]
async fn test_reject_soft_flags_without_deleting() {
    let (h, id) = Harness::with_scraped_supplier().await;
    h.apply(&h.request(id, VettingAction::Approve)).await.unwrap();

    let supplier = h.apply(&h.request(id, VettingAction::Reject)).await.unwrap();

    assert!(!supplier.verified);
    assert_eq!(supplier.vetting_status, VettingStatus::Rejected);

    // The row survives; it just drops out of default search
    assert!(h.suppliers.find_by_id(id).await.unwrap().is_some());
    let visible = h.suppliers.search(&SupplierFilters::new()).await.unwrap();
    assert_eq!(visible.total, 0);
}

#[tokio::test]
async fn test_request_docs_records_notes() {
    let (h, id) = Harness::with_scraped_supplier().await;

    let mut request = h.request(id, VettingAction::RequestDocs);
    request.notes = Some("Please upload your FSC chain-of-custody certificate".into());
    let supplier = h.apply(&request).await.unwrap();

    assert_eq!(supplier.vetting_status, VettingStatus::NeedsInfo);
    assert_eq!(
        supplier.vetting_notes.as_deref(),
        Some("Please upload your FSC chain-of-custody certificate")
    );
    assert!(!supplier.verified);
}

#[tokio::test]
async fn test_verify_cert_records_checklist_without_status_change() {
    let (h, id) = Harness::with_scraped_supplier().await;
    let before = h.suppliers.find_by_id(id).await.unwrap().unwrap();

    let mut request = h.request(id, VettingAction::VerifyCert);
    request.checklist = Some(json!({"leed": true, "fsc": false}));
    let supplier = h.apply(&request).await.unwrap();

    assert_eq!(supplier.vetting_status, before.vetting_status);
    assert_eq!(supplier.verified, before.verified);
    assert!(supplier.last_verified_at.is_some());
    assert_eq!(
        supplier.compliance_flags,
        Some(json!({"leed": true, "fsc": false}))
    );
}

#[tokio::test]
async fn test_every_action_appends_one_audit_row() {
    let (h, id) = Harness::with_scraped_supplier().await;

    h.apply(&h.request(id, VettingAction::RequestDocs)).await.unwrap();
    h.apply(&h.request(id, VettingAction::Approve)).await.unwrap();
    h.apply(&h.request(id, VettingAction::Reject)).await.unwrap();

    let trail = h.reviews.list_for_supplier(id).await.unwrap();
    assert_eq!(trail.len(), 3);
    // Newest first
    assert_eq!(trail[0].action, VettingAction::Reject);
    assert_eq!(trail[2].action, VettingAction::RequestDocs);
    assert!(trail.iter().all(|r| r.actor == "admin@greenchainz.com"));
}

#[tokio::test]
async fn test_audit_failure_keeps_the_transition() {
    let (h, id) = Harness::with_scraped_supplier().await;
    h.reviews.fail_writes(true);

    let supplier = h.apply(&h.request(id, VettingAction::Approve)).await.unwrap();

    assert!(supplier.verified);
    assert!(h.reviews.is_empty());
}

#[tokio::test]
async fn test_unknown_supplier_is_not_found() {
    let (h, _) = Harness::with_scraped_supplier().await;

    let err = h
        .apply(&h.request(Uuid::new_v4(), VettingAction::Approve))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NotFound(_)));
    assert!(h.reviews.is_empty());
}

#[tokio::test]
async fn test_actor_is_required() {
    let (h, id) = Harness::with_scraped_supplier().await;

    let mut request = h.request(id, VettingAction::Approve);
    request.actor = "  ".into();
    let err = h.apply(&request).await.unwrap_err();

    assert!(matches!(err, ApiError::BadRequest(_)));
    let supplier = h.suppliers.find_by_id(id).await.unwrap().unwrap();
    assert!(!supplier.verified);
}
