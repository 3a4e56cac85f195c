//! potgen - gettext message catalog builder
//!
//! potgen walks serialized document trees and page templates, collects every
//! translatable message with its source locations, groups messages into
//! domains and writes one gettext template catalog (`.pot`) per domain.
//! Catalogs whose content did not change are left untouched.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Catalog builder (document model, extraction, registry, rendering)
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
