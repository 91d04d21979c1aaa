//! Typed extraction schema and the `Extractor` trait.
//!
//! The model is asked for JSON matching [`SupplierExtraction`]. Anything
//! that does not deserialize into that shape is rejected with
//! [`IngestError::InvalidExtraction`] and nothing is persisted.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{IngestError, Result};

/// A product pulled out of a supplier page.
///
/// `sustainability_attributes` is an open key-value map because the
/// relevant attributes vary by product type (R-Value, VOC content,
/// recycled content percentage, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedProduct {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability_attributes: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
}

/// The validated result of an AI extraction over one supplier page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplierExtraction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub products: Vec<ExtractedProduct>,
}

/// Extracts structured supplier data from cleaned page text.
///
/// Implementations wrap a specific LLM provider and handle prompting and
/// response parsing.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract supplier identity and products from cleaned page text.
    async fn extract(&self, content: &str) -> Result<SupplierExtraction>;
}

/// Parse a model response into the extraction schema.
///
/// Tolerates a markdown code fence around the JSON; any other deviation
/// from the schema fails with `InvalidExtraction`.
pub fn parse_extraction(raw: &str) -> Result<SupplierExtraction> {
    serde_json::from_str(raw)
        .or_else(|_| {
            let json_str = raw
                .trim()
                .trim_start_matches("```json")
                .trim_start_matches("```")
                .trim_end_matches("```")
                .trim();
            serde_json::from_str(json_str)
        })
        .map_err(|e| IngestError::InvalidExtraction(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extraction_plain_json() {
        let raw = r#"{
            "name": "EcoBuild Supply",
            "description": "Recycled materials",
            "products": [
                {"name": "GreenFoam", "category": "Insulation", "certifications": ["LEED"]}
            ]
        }"#;

        let parsed = parse_extraction(raw).unwrap();
        assert_eq!(parsed.name, "EcoBuild Supply");
        assert_eq!(parsed.products.len(), 1);
        assert_eq!(parsed.products[0].category.as_deref(), Some("Insulation"));
    }

    #[test]
    fn test_parse_extraction_markdown_fence() {
        let raw = "```json\n{\"name\": \"Acme\", \"products\": []}\n```";
        let parsed = parse_extraction(raw).unwrap();
        assert_eq!(parsed.name, "Acme");
        assert!(parsed.products.is_empty());
    }

    #[test]
    fn test_parse_extraction_missing_products_defaults_empty() {
        let parsed = parse_extraction(r#"{"name": "Acme"}"#).unwrap();
        assert!(parsed.products.is_empty());
        assert!(parsed.description.is_none());
    }

    #[test]
    fn test_parse_extraction_rejects_missing_name() {
        let err = parse_extraction(r#"{"description": "no name here"}"#).unwrap_err();
        assert!(matches!(err, IngestError::InvalidExtraction(_)));
    }

    #[test]
    fn test_parse_extraction_rejects_non_json() {
        let err = parse_extraction("Sorry, I could not find any supplier data.").unwrap_err();
        assert!(matches!(err, IngestError::InvalidExtraction(_)));
    }

    #[test]
    fn test_open_attribute_map_round_trips() {
        let raw = r#"{
            "name": "Acme",
            "products": [{
                "name": "FoamBoard",
                "sustainability_attributes": {"r_value": 6.5, "recycled_content": "80%"}
            }]
        }"#;

        let parsed = parse_extraction(raw).unwrap();
        let attrs = parsed.products[0].sustainability_attributes.as_ref().unwrap();
        assert_eq!(attrs.get("recycled_content").unwrap(), "80%");
    }
}
