pub mod actions;
pub mod memory;
pub mod models;
pub mod pg;
pub mod store;

pub use actions::{apply_vetting_action, update_for_action};
pub use memory::MemoryVettingStore;
pub use models::{NewVettingReview, VettingAction, VettingReview};
pub use pg::PgVettingStore;
pub use store::VettingStore;
