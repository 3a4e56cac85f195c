//! Error types of the extraction and writing pipeline.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::core::templates::MarkerError;

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("invalid SOURCE_DATE_EPOCH value: {0:?}")]
    Invalid(String),
}

/// Why a template file could not be processed.
#[derive(Debug, Error)]
pub enum TemplateFailure {
    #[error("failed to read template: {0}")]
    Read(#[from] io::Error),
    #[error(transparent)]
    Markers(#[from] MarkerError),
}

/// Build failures. Each variant's message already includes the underlying
/// error, so none is exposed as `source()`.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A broken template aborts the whole build.
    #[error("{}: {error}", path.display())]
    Template {
        path: PathBuf,
        error: TemplateFailure,
    },
    #[error("failed to load document {}: {error}", path.display())]
    Document {
        path: PathBuf,
        error: serde_json::Error,
    },
    #[error("{}: {error}", path.display())]
    Io { path: PathBuf, error: io::Error },
}

impl BuildError {
    pub fn io(path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error,
        }
    }
}
