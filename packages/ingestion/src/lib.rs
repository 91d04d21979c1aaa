//! Supplier Page Scraping and AI Extraction
//!
//! Fetches a supplier's web page, strips non-content markup, and asks a
//! hosted language model for a structured extraction of the supplier's
//! identity and product catalog. The output is validated against a typed
//! schema before anything is persisted by the caller.
//!
//! # Modules
//!
//! - [`page`] - Page fetching and HTML cleanup
//! - [`extract`] - Typed extraction schema and the `Extractor` trait
//! - [`azure`] - Azure OpenAI implementation of `Extractor`
//! - [`prompts`] - Fixed extraction prompt
//! - [`testing`] - Mock implementations for testing

pub mod azure;
pub mod error;
pub mod extract;
pub mod page;
pub mod prompts;
pub mod testing;

pub use azure::AzureOpenAI;
pub use error::{IngestError, Result};
pub use extract::{parse_extraction, ExtractedProduct, Extractor, SupplierExtraction};
pub use page::{clean_html, HttpPageFetcher, PageFetcher, CONTENT_BUDGET};
