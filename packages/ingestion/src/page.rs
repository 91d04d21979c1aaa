//! Page fetching and HTML cleanup.
//!
//! The fetcher retrieves raw HTML; `clean_html` strips non-content markup
//! and collapses whitespace so the model only sees readable body text.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Character budget for cleaned page text submitted to the model.
pub const CONTENT_BUDGET: usize = 15_000;

/// Elements whose text content never belongs in an extraction.
const SKIP_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "svg", "header", "aside", "noscript",
];

/// Fetches raw HTML for a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page. Fails with `IngestError::Fetch` on a non-2xx status.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP fetcher backed by reqwest.
pub struct HttpPageFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for HttpPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpPageFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: "GreenChainz-Bot/1.0 (+https://greenchainz.com/bot)".to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        url::Url::parse(url).map_err(|_| IngestError::InvalidUrl {
            url: url.to_string(),
        })?;

        debug!(url = %url, "fetching supplier page");
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                IngestError::Http(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| IngestError::Http(Box::new(e)))
    }
}

/// Strip non-content elements and collapse whitespace.
///
/// Walks the body, skipping `script`, `style`, `nav`, `footer`, `svg`,
/// `header` and `aside` subtrees, then joins the remaining text nodes with
/// single spaces and truncates to [`CONTENT_BUDGET`] characters.
pub fn clean_html(html: &str) -> String {
    let document = Html::parse_document(html);
    let body_selector = Selector::parse("body").expect("static selector");

    let mut raw = String::new();
    if let Some(body) = document.select(&body_selector).next() {
        collect_text(body, &mut raw);
    }

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(CONTENT_BUDGET).collect()
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push(' ');
                out.push_str(text);
            }
            Node::Element(el) => {
                if SKIP_TAGS.contains(&el.name()) {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(child_ref, out);
                }
            }
            _ => {}
        }
    }
}
