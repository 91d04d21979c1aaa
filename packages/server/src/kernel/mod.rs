pub mod deps;
pub mod ocr;
pub mod verifier;

pub use deps::ServerDeps;
pub use ocr::{FormsAnalyzer, FormsOcrClient};
pub use verifier::{verify_document, CertificateScan, DocumentVerification, HttpBlobFetcher};
