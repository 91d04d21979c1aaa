pub mod ingest;
pub mod register;
pub mod search;

pub use ingest::{ingest_supplier, IngestOutcome};
pub use register::{compute_score, register_supplier};
pub use search::{search_suppliers, SupplierSearchParams};
