pub mod actions;
pub mod memory;
pub mod models;
pub mod pg;
pub mod store;

pub use memory::MemorySupplierStore;
pub use models::{
    DataSource, NewSupplier, ScrapedSupplierUpsert, Supplier, VerificationStatus, VettingStatus,
    VettingUpdate,
};
pub use pg::PgSupplierStore;
pub use store::{SupplierFilters, SupplierPage, SupplierStore, FEATURED_MIN_SCORE};
