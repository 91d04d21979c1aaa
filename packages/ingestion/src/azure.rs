//! Azure OpenAI implementation of the `Extractor` trait.
//!
//! Talks to an Azure OpenAI deployment's chat-completions endpoint with a
//! JSON response format and the fixed extraction prompt.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};
use crate::extract::{parse_extraction, Extractor, SupplierExtraction};
use crate::prompts::EXTRACTION_PROMPT;

const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Azure OpenAI chat-completion client.
#[derive(Clone)]
pub struct AzureOpenAI {
    client: Client,
    api_key: String,
    endpoint: String,
    deployment: String,
    api_version: String,
}

impl AzureOpenAI {
    /// Create a new client for a deployment.
    ///
    /// `endpoint` is the resource base URL, e.g.
    /// `https://my-resource.openai.azure.com`.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            deployment: deployment.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Create from environment variables `AZURE_OPENAI_API_KEY`,
    /// `AZURE_OPENAI_ENDPOINT` and `AZURE_OPENAI_DEPLOYMENT_NAME`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("AZURE_OPENAI_API_KEY")
            .map_err(|_| IngestError::Config("AZURE_OPENAI_API_KEY not set".into()))?;
        let endpoint = std::env::var("AZURE_OPENAI_ENDPOINT")
            .map_err(|_| IngestError::Config("AZURE_OPENAI_ENDPOINT not set".into()))?;
        let deployment = std::env::var("AZURE_OPENAI_DEPLOYMENT_NAME")
            .map_err(|_| IngestError::Config("AZURE_OPENAI_DEPLOYMENT_NAME not set".into()))?;

        let mut client = Self::new(api_key, endpoint, deployment);
        if let Ok(version) = std::env::var("AZURE_OPENAI_API_VERSION") {
            client = client.with_api_version(version);
        }
        Ok(client)
    }

    /// Set the API version (default: 2024-02-15-preview).
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }

    /// Make a chat completion request and return the message content.
    async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
            temperature: 0.3,
            max_tokens: 4000,
        };

        let response = self
            .client
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| IngestError::AI(Box::new(e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(IngestError::AI(
                format!("Azure OpenAI API error: {}", error_text).into(),
            ));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| IngestError::AI(Box::new(e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| IngestError::AI("No response from Azure OpenAI".into()))
    }
}

#[async_trait]
impl Extractor for AzureOpenAI {
    async fn extract(&self, content: &str) -> Result<SupplierExtraction> {
        let user = format!(
            "Extract supplier and product data from the following website content:\n\n{}",
            content
        );
        let raw = self.chat(EXTRACTION_PROMPT, &user).await?;
        parse_extraction(&raw)
    }
}

// Request/Response types

#[derive(Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}
