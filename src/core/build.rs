//! Build orchestration: discover documents and drive a [`Builder`] through
//! its lifecycle.

use std::path::Path;

use crate::{
    config::Config,
    core::{
        builder::{BuildSummary, Builder, MessageCatalogBuilder},
        doctree::Document,
        error::BuildError,
        file_scanner::{DocumentFile, scan_documents},
        timestamp::BuildTimestamp,
    },
};

/// Drive `builder` over `documents` in order.
///
/// Any error aborts the build before `finish`, so no catalog is written.
pub fn drive<B: Builder>(builder: &mut B, documents: &[DocumentFile]) -> Result<B::Summary, BuildError> {
    builder.init()?;
    for file in documents {
        tracing::debug!("reading {}", file.path.display());
        let doc = Document::load(file.docname.clone(), &file.path)?;
        builder.write_doc(&doc)?;
    }
    builder.finish()
}

/// Build all message catalogs for the project at `project_dir`.
pub fn run_build(
    project_dir: &Path,
    config: Config,
    timestamp: BuildTimestamp,
) -> Result<BuildSummary, BuildError> {
    let ignores = config.ignores.clone();
    let mut builder = MessageCatalogBuilder::new(config, project_dir, timestamp);

    let scan = scan_documents(builder.source_dir(), &ignores);
    tracing::info!(
        "found {} documents in {}",
        scan.documents.len(),
        builder.source_dir().display()
    );
    if scan.skipped_count > 0 {
        tracing::warn!("{} paths could not be read and were skipped", scan.skipped_count);
    }

    drive(&mut builder, &scan.documents)
}
