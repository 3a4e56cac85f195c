//! Core data types shared by the extraction and rendering phases.
//!
//! ## Module Structure
//!
//! - `origin`: Origin (one concrete occurrence of a message)
//! - `message`: Message and Location (the deduplicated catalog view)

pub mod message;
pub mod origin;

pub use message::{Location, Message};
pub use origin::Origin;
