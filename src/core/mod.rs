//! Catalog builder core.
//!
//! ## Module Structure
//!
//! - `data`: origins, locations and messages
//! - `doctree`: serialized document trees and extraction rules
//! - `templates`: marker extraction from page templates
//! - `catalog`: per-domain message store
//! - `registry`: domain mapping and the catalog registry
//! - `identity`: occurrence id minting
//! - `timestamp`: build creation time
//! - `render`: catalog templates and idempotent writes
//! - `builder`: the builder lifecycle
//! - `build`: document discovery and orchestration
//! - `setup`: builder registration and config options

pub mod build;
pub mod builder;
pub mod catalog;
pub mod data;
pub mod doctree;
pub mod error;
pub mod file_scanner;
pub mod identity;
pub mod registry;
pub mod render;
pub mod setup;
pub mod templates;
pub mod timestamp;

pub use build::run_build;
pub use builder::{BuildSummary, Builder, DomainReport, MessageCatalogBuilder};
pub use catalog::Catalog;
pub use error::BuildError;
pub use registry::CatalogRegistry;
