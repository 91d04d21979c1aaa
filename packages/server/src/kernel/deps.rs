//! Shared dependency container.
//!
//! Stores and external clients are explicitly constructed at startup and
//! passed in behind trait objects, so request handlers never touch
//! module-scope globals and tests can swap in mocks/in-memory stores.

use std::sync::Arc;

use ingestion::{Extractor, PageFetcher};

use crate::domains::products::ProductStore;
use crate::domains::suppliers::SupplierStore;
use crate::domains::vetting::VettingStore;
use crate::kernel::ocr::FormsAnalyzer;
use crate::kernel::verifier::BlobFetcher;

#[derive(Clone)]
pub struct ServerDeps {
    pub suppliers: Arc<dyn SupplierStore>,
    pub products: Arc<dyn ProductStore>,
    pub reviews: Arc<dyn VettingStore>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub extractor: Arc<dyn Extractor>,
    pub blobs: Arc<dyn BlobFetcher>,
    pub ocr: Arc<dyn FormsAnalyzer>,
}

impl ServerDeps {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        suppliers: Arc<dyn SupplierStore>,
        products: Arc<dyn ProductStore>,
        reviews: Arc<dyn VettingStore>,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn Extractor>,
        blobs: Arc<dyn BlobFetcher>,
        ocr: Arc<dyn FormsAnalyzer>,
    ) -> Self {
        Self {
            suppliers,
            products,
            reviews,
            fetcher,
            extractor,
            blobs,
            ocr,
        }
    }
}
