//! Domain name → catalog mapping.

use std::collections::BTreeMap;

use crate::config::Compact;
use crate::core::catalog::Catalog;

/// Domain reserved for messages extracted from template files.
pub const TEMPLATE_DOMAIN: &str = "templates";

/// Derive the translation domain of a document.
///
/// - `Compact::Domain(name)` puts every document into `name`.
/// - `Compact::Enabled(true)` groups documents by their top-level directory.
/// - `Compact::Enabled(false)` gives every document its own domain.
///
/// # Examples
///
/// ```
/// use potgen::config::Compact;
/// use potgen::core::registry::docname_to_domain;
///
/// assert_eq!(docname_to_domain("guide/install", &Compact::Enabled(true)), "guide");
/// assert_eq!(docname_to_domain("guide/install", &Compact::Enabled(false)), "guide/install");
/// assert_eq!(docname_to_domain("guide/install", &Compact::Domain("docs".into())), "docs");
/// ```
pub fn docname_to_domain(docname: &str, compact: &Compact) -> String {
    match compact {
        Compact::Domain(name) => name.clone(),
        Compact::Enabled(true) => docname
            .split_once('/')
            .map_or(docname, |(head, _)| head)
            .to_string(),
        Compact::Enabled(false) => docname.to_string(),
    }
}

/// All catalogs of one build, keyed by domain.
///
/// Domains iterate in lexicographic order so output is stable between runs.
#[derive(Debug, Default)]
pub struct CatalogRegistry {
    catalogs: BTreeMap<String, Catalog>,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the catalog of `domain`, creating it on first reference.
    pub fn catalog_mut(&mut self, domain: &str) -> &mut Catalog {
        self.catalogs.entry(domain.to_string()).or_default()
    }

    pub fn get(&self, domain: &str) -> Option<&Catalog> {
        self.catalogs.get(domain)
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.catalogs.contains_key(domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Catalog)> {
        self.catalogs
            .iter()
            .map(|(domain, catalog)| (domain.as_str(), catalog))
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::data::Origin;

    #[test]
    fn test_docname_to_domain_top_level_document() {
        assert_eq!(docname_to_domain("index", &Compact::Enabled(true)), "index");
        assert_eq!(docname_to_domain("index", &Compact::Enabled(false)), "index");
    }

    #[test]
    fn test_docname_to_domain_nested() {
        assert_eq!(
            docname_to_domain("api/core/catalog", &Compact::Enabled(true)),
            "api"
        );
        assert_eq!(
            docname_to_domain("api/core/catalog", &Compact::Enabled(false)),
            "api/core/catalog"
        );
    }

    #[test]
    fn test_catalog_created_on_demand() {
        let mut registry = CatalogRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("index").is_none());

        registry
            .catalog_mut("index")
            .add("Hello", Origin::new("index.rst", Some(1), "u"));
        registry
            .catalog_mut("index")
            .add("World", Origin::new("index.rst", Some(2), "v"));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("index").map(|c| c.messages()),
            Some(vec!["Hello", "World"])
        );
    }

    #[test]
    fn test_domains_iterate_sorted() {
        let mut registry = CatalogRegistry::new();
        registry.catalog_mut("usage");
        registry.catalog_mut(TEMPLATE_DOMAIN);
        registry.catalog_mut("api");

        let domains: Vec<&str> = registry.iter().map(|(domain, _)| domain).collect();
        assert_eq!(domains, vec!["api", "templates", "usage"]);
    }
}
