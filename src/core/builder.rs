//! The message catalog builder and its lifecycle.
//!
//! A host drives a [`Builder`] through three hooks:
//!
//! 1. `init`: once, before any document (template extraction)
//! 2. `write_doc`: once per document
//! 3. `finish`: once, after the last document (render and write catalogs)

use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;

use crate::{
    config::{AdditionalTarget, Config},
    core::{
        catalog::Catalog,
        data::Origin,
        doctree::{
            Doctree, Document, NodeId, extract_messages, is_in_substitution_definition,
            split_index_msg, toctree_messages, translatable_index,
        },
        error::BuildError,
        identity::{IdMinter, IdStrategy},
        registry::{CatalogRegistry, TEMPLATE_DOMAIN, docname_to_domain},
        render::{
            CATALOG_EXTENSION, CatalogTemplate, PotTemplate, RenderContext, WriteOutcome,
            write_if_changed,
        },
        templates::{JinjaMarkerExtractor, MarkerExtractor, collect_templates},
        timestamp::BuildTimestamp,
    },
    utils::{canon_path, normalize_path, relative_path},
};

/// Lifecycle hooks called by a build host.
pub trait Builder {
    type Summary;

    fn init(&mut self) -> Result<(), BuildError>;
    fn write_doc(&mut self, doc: &Document) -> Result<(), BuildError>;
    fn finish(&self) -> Result<Self::Summary, BuildError>;
}

/// Outcome for one domain catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainReport {
    pub domain: String,
    pub path: PathBuf,
    pub message_count: usize,
    pub outcome: WriteOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct BuildSummary {
    pub domains: Vec<DomainReport>,
    pub template_count: usize,
    pub document_count: usize,
}

impl BuildSummary {
    pub fn written_count(&self) -> usize {
        self.domains
            .iter()
            .filter(|d| d.outcome == WriteOutcome::Written)
            .count()
    }

    pub fn unchanged_count(&self) -> usize {
        self.domains.len() - self.written_count()
    }
}

/// Builds gettext message catalogs (`.pot` files).
pub struct MessageCatalogBuilder {
    config: Config,
    /// Directory relative document sources are resolved against.
    source_dir: PathBuf,
    project_dir: PathBuf,
    outdir: PathBuf,
    timestamp: BuildTimestamp,
    registry: CatalogRegistry,
    ids: IdMinter,
    extractor: Box<dyn MarkerExtractor>,
    template: Box<dyn CatalogTemplate>,
    template_count: usize,
    document_count: usize,
    warned_reserved_domain: bool,
}

impl MessageCatalogBuilder {
    pub const NAME: &'static str = "gettext";

    /// Create a builder for one build of the project at `project_dir`.
    pub fn new(config: Config, project_dir: impl Into<PathBuf>, timestamp: BuildTimestamp) -> Self {
        let project_dir = project_dir.into();
        let source_dir = normalize_path(&project_dir.join(&config.source_root));
        let outdir = normalize_path(&project_dir.join(&config.output_dir));
        let ids = IdMinter::new(IdStrategy::for_display(config.show_ids));
        Self {
            template: Box::new(PotTemplate::new(&outdir)),
            extractor: Box::new(JinjaMarkerExtractor),
            config,
            source_dir,
            project_dir,
            outdir,
            timestamp,
            registry: CatalogRegistry::new(),
            ids,
            template_count: 0,
            document_count: 0,
            warned_reserved_domain: false,
        }
    }

    pub fn with_extractor(mut self, extractor: impl MarkerExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn with_template(mut self, template: impl CatalogTemplate + 'static) -> Self {
        self.template = Box::new(template);
        self
    }

    pub fn registry(&self) -> &CatalogRegistry {
        &self.registry
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    pub fn catalog_path(&self, domain: &str) -> PathBuf {
        self.outdir
            .join(format!("{}.{}", domain, CATALOG_EXTENSION))
    }

    fn render_context<'a>(&'a self, catalog: &Catalog) -> RenderContext<'a> {
        RenderContext {
            project: &self.config.project,
            version: &self.config.version,
            copyright: &self.config.copyright,
            last_translator: &self.config.last_translator,
            language_team: &self.config.language_team,
            ctime: self.timestamp.as_str(),
            display_location: self.config.show_locations,
            display_uuid: self.config.show_ids,
            messages: catalog.iter().collect(),
        }
    }

    fn extract_from_templates(&mut self) -> Result<(), BuildError> {
        let files = collect_templates(
            &self.project_dir,
            &self.config.templates_path,
            self.config.template_extension(),
        );
        tracing::info!("targets for {} template files", files.len());
        self.template_count = files.len();

        for file in files {
            tracing::debug!("reading template {}", file);
            let path = PathBuf::from(&file);
            let content = fs::read_to_string(&path).map_err(|e| BuildError::Template {
                path: path.clone(),
                error: e.into(),
            })?;
            let found = self
                .extractor
                .extract(&content)
                .map_err(|e| BuildError::Template {
                    path: path.clone(),
                    error: e.into(),
                })?;
            let scope = canon_path(&relative_path(&path, &self.project_dir));
            for marker in found {
                let uid = self.ids.mint(&scope, &marker.message);
                let origin = Origin::new(file.clone(), Some(marker.line), uid);
                self.registry
                    .catalog_mut(TEMPLATE_DOMAIN)
                    .add(marker.message, origin);
            }
        }
        Ok(())
    }
}

impl Builder for MessageCatalogBuilder {
    type Summary = BuildSummary;

    fn init(&mut self) -> Result<(), BuildError> {
        self.extract_from_templates()
    }

    fn write_doc(&mut self, doc: &Document) -> Result<(), BuildError> {
        let domain = docname_to_domain(&doc.docname, &self.config.compact);
        if domain == TEMPLATE_DOMAIN && !self.warned_reserved_domain {
            tracing::warn!(
                "document '{}' maps to the reserved domain '{}'; its messages are merged with template messages",
                doc.docname,
                TEMPLATE_DOMAIN
            );
            self.warned_reserved_domain = true;
        }
        tracing::debug!("extracting {} into domain '{}'", doc.docname, domain);
        self.document_count += 1;

        let source_dir = &self.source_dir;
        let ids = &mut self.ids;
        let catalog = self.registry.catalog_mut(&domain);

        // Navigation nodes are shared across documents: record the location only.
        for (id, msg) in toctree_messages(&doc.toc) {
            let (source, line) = node_position(doc, &doc.toc, id, source_dir);
            catalog.add(msg, Origin::without_identity(source, line).with_empty_uid());
        }

        for (id, msg) in extract_messages(&doc.body, &self.config.additional_targets) {
            if is_in_substitution_definition(&doc.body, id) {
                continue;
            }
            let origin = node_origin(doc, id, &msg, source_dir, ids);
            catalog.add(msg, origin);
        }

        if self.config.extracts(AdditionalTarget::Index) {
            for (id, entries) in translatable_index(&doc.body) {
                for entry in entries {
                    let parts = match split_index_msg(&entry.entry_type, &entry.value) {
                        Ok(parts) => parts,
                        Err(e) => {
                            tracing::warn!("{}: skipping {}", doc.docname, e);
                            continue;
                        }
                    };
                    for part in parts {
                        let origin = node_origin(doc, id, &part, source_dir, ids);
                        catalog.add(part, origin);
                    }
                }
            }
        }

        Ok(())
    }

    fn finish(&self) -> Result<BuildSummary, BuildError> {
        tracing::info!("writing {} message catalogs", self.registry.len());
        let catalogs: Vec<(&str, &Catalog)> = self.registry.iter().collect();

        let domains = catalogs
            .par_iter()
            .map(|&(domain, catalog)| {
                let content = self.template.render(&self.render_context(catalog));
                let path = self.catalog_path(domain);
                let outcome =
                    write_if_changed(&path, &content).map_err(|e| BuildError::io(&path, e))?;
                tracing::debug!("{} -> {:?}", path.display(), outcome);
                Ok(DomainReport {
                    domain: domain.to_string(),
                    path,
                    message_count: catalog.len(),
                    outcome,
                })
            })
            .collect::<Result<Vec<_>, BuildError>>()?;

        Ok(BuildSummary {
            domains,
            template_count: self.template_count,
            document_count: self.document_count,
        })
    }
}

/// Source and line of a node, with relative sources anchored at `source_dir`.
fn node_position(
    doc: &Document,
    tree: &Doctree,
    id: NodeId,
    source_dir: &Path,
) -> (String, Option<u32>) {
    let (source, line) = doc.position(tree, id);
    if source.is_empty() || Path::new(&source).is_absolute() {
        return (source, line);
    }
    (source_dir.join(source).to_string_lossy().into_owned(), line)
}

/// Origin of a body node. Replicated nodes carry no identity.
fn node_origin(
    doc: &Document,
    id: NodeId,
    text: &str,
    source_dir: &Path,
    ids: &mut IdMinter,
) -> Origin {
    let (source, line) = node_position(doc, &doc.body, id, source_dir);
    if doc.body.get(id).replicated {
        return Origin::without_identity(source, line);
    }
    Origin::new(source, line, ids.mint(&doc.docname, text))
}
