//! Integration tests for the certificate document verifier.

use anyhow::{bail, Result};
use async_trait::async_trait;

use server_core::common::ApiError;
use server_core::kernel::ocr::FormsAnalyzer;
use server_core::kernel::verifier::{verify_document, BlobFetcher};

struct StaticBlob(Vec<u8>);

#[async_trait]
impl BlobFetcher for StaticBlob {
    async fn download(&self, _url: &str) -> Result<Vec<u8>> {
        Ok(self.0.clone())
    }
}

struct FailingBlob;

#[async_trait]
impl BlobFetcher for FailingBlob {
    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        bail!("download failed: {}", url)
    }
}

struct StaticOcr(Vec<String>);

#[async_trait]
impl FormsAnalyzer for StaticOcr {
    async fn analyze(&self, _document: &[u8]) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn test_leed_certificate_round_trip() {
    let blobs = StaticBlob(b"%PDF-1.4 fake".to_vec());
    let ocr = StaticOcr(vec![
        "LEED Gold Certification".into(),
        "Valid through 12/31/2026".into(),
    ]);

    let result = verify_document(&blobs, &ocr, "https://docs.example/cert.pdf", "doc-1")
        .await
        .unwrap();

    assert!(result.verified);
    assert_eq!(result.document_id, "doc-1");
    assert_eq!(result.details.cert_type, "LEED");
    assert_eq!(result.details.level, "GOLD/PLATINUM");
    assert_eq!(result.details.expiry_date.as_deref(), Some("12/31/2026"));
    assert!(result.details.text_found);
}

#[tokio::test]
async fn test_unrelated_document_is_rejected() {
    let blobs = StaticBlob(vec![0u8; 16]);
    let ocr = StaticOcr(vec!["Invoice".into(), "Total due: $420".into()]);

    let result = verify_document(&blobs, &ocr, "https://docs.example/invoice.pdf", "doc-2")
        .await
        .unwrap();

    assert!(!result.verified);
    assert_eq!(result.details.cert_type, "UNKNOWN");
    assert!(result.details.expiry_date.is_none());
}

#[tokio::test]
async fn test_case_insensitive_keyword_match() {
    let blobs = StaticBlob(vec![]);
    let ocr = StaticOcr(vec!["forest stewardship council".into()]);

    let result = verify_document(&blobs, &ocr, "https://docs.example/fsc.pdf", "doc-3")
        .await
        .unwrap();

    assert!(result.verified);
    assert_eq!(result.details.cert_type, "FSC");
}

#[tokio::test]
async fn test_empty_file_url_is_bad_request() {
    let blobs = StaticBlob(vec![]);
    let ocr = StaticOcr(vec![]);

    let err = verify_document(&blobs, &ocr, "", "doc-4").await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn test_download_failure_is_internal() {
    let ocr = StaticOcr(vec![]);

    let err = verify_document(&FailingBlob, &ocr, "https://gone.example/x.pdf", "doc-5")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Internal(_)));
}
