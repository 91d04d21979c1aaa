//! Certificate document verifier.
//!
//! Downloads a previously uploaded certificate, runs it through the
//! forms-analysis service, and scans the recognized text for known
//! certification keywords plus an expiry date. The keyword match is a
//! heuristic gate: LEED or FSC wording counts as verified, a
//! gold/platinum marker upgrades the level, and the first date found is
//! reported verbatim without plausibility checks.

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::info;

use crate::common::{ApiError, ApiResult};
use crate::kernel::ocr::FormsAnalyzer;

const RAW_TEXT_SAMPLE_LEN: usize = 500;

/// Downloads a document into memory.
#[async_trait]
pub trait BlobFetcher: Send + Sync {
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP blob fetcher backed by reqwest.
pub struct HttpBlobFetcher {
    client: reqwest::Client,
}

impl Default for HttpBlobFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpBlobFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }
}

#[async_trait]
impl BlobFetcher for HttpBlobFetcher {
    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("failed to download {}", url))?
            .error_for_status()
            .with_context(|| format!("failed to download {}", url))?;

        Ok(response.bytes().await?.to_vec())
    }
}

/// What the keyword scan found in the recognized text.
#[derive(Debug, Clone, Serialize)]
pub struct CertificateScan {
    #[serde(rename = "type")]
    pub cert_type: String,
    pub level: String,
    pub text_found: bool,
    pub expiry_date: Option<String>,
    pub raw_text_sample: String,
}

/// Verification verdict for one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentVerification {
    pub document_id: String,
    pub verified: bool,
    pub details: CertificateScan,
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d{1,2}/\d{1,2}/\d{4})|(\d{4}-\d{1,2}-\d{1,2})").expect("static regex")
    })
}

/// Find the first slash- or hyphen-delimited date in the text.
pub fn find_expiry_date(text: &str) -> Option<String> {
    date_pattern().find(text).map(|m| m.as_str().to_string())
}

/// Scan uppercased OCR text for the certification keyword families.
pub fn scan_certificate_text(raw_text: &str) -> (bool, CertificateScan) {
    let is_leed = raw_text.contains("LEED");
    let is_fsc = raw_text.contains("FSC") || raw_text.contains("FOREST STEWARDSHIP");
    let is_gold = raw_text.contains("GOLD") || raw_text.contains("PLATINUM");

    let cert_type = if is_leed {
        "LEED"
    } else if is_fsc {
        "FSC"
    } else {
        "UNKNOWN"
    };

    let scan = CertificateScan {
        cert_type: cert_type.to_string(),
        level: if is_gold { "GOLD/PLATINUM" } else { "STANDARD" }.to_string(),
        text_found: !raw_text.is_empty(),
        expiry_date: find_expiry_date(raw_text),
        raw_text_sample: raw_text.chars().take(RAW_TEXT_SAMPLE_LEN).collect(),
    };

    (is_leed || is_fsc, scan)
}

/// Download, OCR and scan one certificate document.
pub async fn verify_document(
    blobs: &dyn BlobFetcher,
    ocr: &dyn FormsAnalyzer,
    file_url: &str,
    document_id: &str,
) -> ApiResult<DocumentVerification> {
    if file_url.trim().is_empty() {
        return Err(ApiError::BadRequest("No fileUrl provided".into()));
    }

    let bytes = blobs
        .download(file_url)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let blocks = ocr
        .analyze(&bytes)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let raw_text = blocks.join(" ").to_uppercase();
    let (verified, details) = scan_certificate_text(&raw_text);

    info!(
        document_id,
        verified,
        cert_type = %details.cert_type,
        "document verification complete"
    );

    Ok(DocumentVerification {
        document_id: document_id.to_string(),
        verified,
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leed_certificate_verifies() {
        let (verified, scan) = scan_certificate_text("LEED GOLD CERTIFICATE EXPIRES 12/31/2025");
        assert!(verified);
        assert_eq!(scan.cert_type, "LEED");
        assert_eq!(scan.level, "GOLD/PLATINUM");
        assert_eq!(scan.expiry_date.as_deref(), Some("12/31/2025"));
    }

    #[test]
    fn test_forest_stewardship_counts_as_fsc() {
        let (verified, scan) = scan_certificate_text("FOREST STEWARDSHIP COUNCIL CHAIN OF CUSTODY");
        assert!(verified);
        assert_eq!(scan.cert_type, "FSC");
        assert_eq!(scan.level, "STANDARD");
    }

    #[test]
    fn test_leed_takes_precedence_over_fsc() {
        let (_, scan) = scan_certificate_text("LEED AND FSC CERTIFIED");
        assert_eq!(scan.cert_type, "LEED");
    }

    #[test]
    fn test_unrelated_document_is_not_verified() {
        let (verified, scan) = scan_certificate_text("INVOICE #42 TOTAL DUE 2024-01-15");
        assert!(!verified);
        assert_eq!(scan.cert_type, "UNKNOWN");
        // Date extraction still runs; no plausibility check
        assert_eq!(scan.expiry_date.as_deref(), Some("2024-01-15"));
    }

    #[test]
    fn test_first_date_wins() {
        assert_eq!(
            find_expiry_date("ISSUED 1/2/2020 EXPIRES 3/4/2026").as_deref(),
            Some("1/2/2020")
        );
    }

    #[test]
    fn test_hyphen_dates_match() {
        assert_eq!(
            find_expiry_date("VALID UNTIL 2025-6-30").as_deref(),
            Some("2025-6-30")
        );
    }

    #[test]
    fn test_no_date_returns_none() {
        assert!(find_expiry_date("NO DATES HERE").is_none());
    }
}
