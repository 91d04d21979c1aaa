//! OCR/forms-analysis client.
//!
//! The verifier only needs recognized text blocks, so the seam is a small
//! trait. The HTTP implementation targets a Textract-compatible
//! forms-analysis endpoint (bytes in, `Blocks[].Text` out) fronted by an
//! API gateway; request signing happens at the gateway, not here.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Recognizes text in a document image/PDF.
#[async_trait]
pub trait FormsAnalyzer: Send + Sync {
    /// Analyze a document and return its recognized text blocks in
    /// reading order.
    async fn analyze(&self, document: &[u8]) -> Result<Vec<String>>;
}

/// HTTP client for a hosted forms-analysis service.
pub struct FormsOcrClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl FormsOcrClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: endpoint.into(),
            api_key,
        }
    }
}

#[derive(Serialize)]
struct AnalyzeRequest {
    #[serde(rename = "Document")]
    document: DocumentBytes,
    #[serde(rename = "FeatureTypes")]
    feature_types: Vec<String>,
}

#[derive(Serialize)]
struct DocumentBytes {
    #[serde(rename = "Bytes")]
    bytes: String,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    #[serde(rename = "Blocks", default)]
    blocks: Vec<Block>,
}

#[derive(Deserialize)]
struct Block {
    #[serde(rename = "Text")]
    text: Option<String>,
}

#[async_trait]
impl FormsAnalyzer for FormsOcrClient {
    async fn analyze(&self, document: &[u8]) -> Result<Vec<String>> {
        let request = AnalyzeRequest {
            document: DocumentBytes {
                bytes: base64::engine::general_purpose::STANDARD.encode(document),
            },
            feature_types: vec!["FORMS".to_string()],
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key);
        }

        let response = builder
            .send()
            .await
            .context("forms-analysis request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("forms-analysis service returned {}: {}", status, body));
        }

        let analysis: AnalyzeResponse = response
            .json()
            .await
            .context("invalid forms-analysis response")?;

        Ok(analysis
            .blocks
            .into_iter()
            .filter_map(|b| b.text)
            .collect())
    }
}
