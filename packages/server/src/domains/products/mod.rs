pub mod memory;
pub mod model;
pub mod mongo;
pub mod store;

pub use memory::MemoryProductStore;
pub use model::{ProductSource, RawProduct, RiskLevel};
pub use mongo::MongoProductStore;
pub use store::ProductStore;
