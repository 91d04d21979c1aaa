//! Testing utilities including mock implementations.
//!
//! Useful for testing applications that use the ingestion library without
//! making real AI or network calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    RwLock,
};

use crate::error::{IngestError, Result};
use crate::extract::{Extractor, SupplierExtraction};
use crate::page::PageFetcher;

/// A mock page fetcher returning canned HTML per URL.
#[derive(Default)]
pub struct MockFetcher {
    pages: RwLock<HashMap<String, String>>,
    failures: RwLock<HashMap<String, u16>>,
    fetch_count: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), html.into());
        self
    }

    /// Fail `url` with the given HTTP status.
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.failures.write().unwrap().insert(url.into(), status);
        self
    }

    /// Number of fetches performed.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = self.failures.read().unwrap().get(url) {
            return Err(IngestError::Fetch {
                url: url.to_string(),
                status: *status,
            });
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| IngestError::Fetch {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// A mock extractor returning a fixed raw model response.
///
/// The raw response still goes through `parse_extraction`, so tests can
/// exercise the schema-validation path with malformed payloads.
#[derive(Default)]
pub struct MockExtractor {
    raw_response: RwLock<Option<String>>,
    extract_count: AtomicUsize,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `raw` as the model response for every call.
    pub fn with_response(self, raw: impl Into<String>) -> Self {
        *self.raw_response.write().unwrap() = Some(raw.into());
        self
    }

    /// Number of extractions performed.
    pub fn extract_count(&self) -> usize {
        self.extract_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(&self, _content: &str) -> Result<SupplierExtraction> {
        self.extract_count.fetch_add(1, Ordering::SeqCst);

        let raw = self
            .raw_response
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| IngestError::AI("MockExtractor has no response configured".into()))?;

        crate::extract::parse_extraction(&raw)
    }
}
