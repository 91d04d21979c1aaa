// HTTP routes
pub mod health;
pub mod ingest;
pub mod register;
pub mod suppliers;
pub mod verify;
pub mod vetting;

pub use health::*;
pub use ingest::*;
pub use register::*;
pub use suppliers::*;
pub use verify::*;
pub use vetting::*;
