// GreenChainz Supplier Directory - API Core
//
// Backend for the sustainable construction materials marketplace:
// suppliers are ingested from their websites or register directly,
// administrators vet them, and buyers search the catalog.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
