//! Serialized document trees.
//!
//! Documents are read from `<docname>.doctree.json` files and stored as an
//! arena with parent links, so extraction rules can walk both down (preorder
//! traversal) and up (ancestor chains).
//!
//! ## Module Structure
//!
//! - `walk`: translatable-run extraction and the substitution ancestor rule
//! - `index`: splitting of composite index entries

pub mod index;
pub mod walk;

use std::{fs, path::Path};

use serde::Deserialize;

use crate::core::error::BuildError;

pub use index::{IndexEntryError, split_index_msg};
pub use walk::{
    extract_messages, is_in_substitution_definition, toctree_messages, translatable_index,
};

/// File suffix of serialized documents.
pub const DOCTREE_SUFFIX: &str = ".doctree.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    Section,
    Title,
    Paragraph,
    Caption,
    Term,
    Rubric,
    Line,
    LiteralBlock,
    DoctestBlock,
    Raw,
    Image,
    Index,
    Toctree,
    SubstitutionDefinition,
    SubstitutionReference,
    Only,
    Comment,
    #[serde(other)]
    Other,
}

/// An entry of a `toctree` node. Only explicit titles are translatable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TocEntry {
    #[serde(default)]
    pub title: Option<String>,
    pub target: String,
}

/// A raw entry of an `index` node, e.g. `("pair", "loop; statement")`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub value: String,
    #[serde(default)]
    pub target_id: String,
    #[serde(default)]
    pub main: bool,
    #[serde(default)]
    pub category_key: Option<String>,
}

/// A node as it appears in the serialized file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub text: Option<String>,
    pub source: Option<String>,
    pub line: Option<u32>,
    /// `false` opts a node out of extraction.
    pub translatable: bool,
    /// Replicated nodes (copies of content defined elsewhere) carry no identity.
    pub replicated: bool,
    pub caption: Option<String>,
    pub entries: Vec<TocEntry>,
    pub index_entries: Vec<IndexEntry>,
    pub alt: Option<String>,
    pub children: Vec<Node>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            kind: NodeKind::Other,
            text: None,
            source: None,
            line: None,
            translatable: true,
            replicated: false,
            caption: None,
            entries: Vec::new(),
            index_entries: Vec::new(),
            alt: None,
            children: Vec::new(),
        }
    }
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn text(kind: NodeKind, text: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            line: Some(line),
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// A node stored in a [`Doctree`].
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: NodeKind,
    pub text: Option<String>,
    pub source: Option<String>,
    pub line: Option<u32>,
    pub translatable: bool,
    pub replicated: bool,
    pub caption: Option<String>,
    pub entries: Vec<TocEntry>,
    pub index_entries: Vec<IndexEntry>,
    pub alt: Option<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Arena of nodes rooted at a `document` node.
///
/// Nodes are stored in document (preorder) order.
#[derive(Debug, Clone)]
pub struct Doctree {
    nodes: Vec<NodeData>,
}

impl Doctree {
    pub fn new(children: Vec<Node>) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        let (root, _) = tree.push(Node::new(NodeKind::Document), None);
        for child in children {
            tree.insert(child, root);
        }
        tree
    }

    fn push(&mut self, node: Node, parent: Option<NodeId>) -> (NodeId, Vec<Node>) {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind: node.kind,
            text: node.text,
            source: node.source,
            line: node.line,
            translatable: node.translatable,
            replicated: node.replicated,
            caption: node.caption,
            entries: node.entries,
            index_entries: node.index_entries,
            alt: node.alt,
            parent,
            children: Vec::new(),
        });
        (id, node.children)
    }

    fn insert(&mut self, node: Node, parent: NodeId) -> NodeId {
        let (id, children) = self.push(node, Some(parent));
        self.nodes[parent.0].children.push(id);
        for child in children {
            self.insert(child, id);
        }
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    /// Every node in document order, root first.
    pub fn traverse(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// `id` itself followed by each ancestor up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), |&current| self.parent(current))
    }

    /// Nearest source and line information on the ancestor chain.
    pub fn position(&self, id: NodeId) -> (Option<&str>, Option<u32>) {
        let source = self
            .ancestors(id)
            .find_map(|node| self.get(node).source.as_deref());
        let line = self.ancestors(id).find_map(|node| self.get(node).line);
        (source, line)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct SerializedDocument {
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    toc: Vec<Node>,
    #[serde(default)]
    body: Vec<Node>,
}

/// A document: its body tree and its navigation (table of contents) tree.
#[derive(Debug, Clone)]
pub struct Document {
    pub docname: String,
    /// Path of the document's source file, used when a node has none.
    pub source: Option<String>,
    pub toc: Doctree,
    pub body: Doctree,
}

impl Document {
    pub fn new(docname: impl Into<String>, toc: Vec<Node>, body: Vec<Node>) -> Self {
        Self {
            docname: docname.into(),
            source: None,
            toc: Doctree::new(toc),
            body: Doctree::new(body),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn from_json(docname: impl Into<String>, content: &str) -> serde_json::Result<Self> {
        let file: SerializedDocument = serde_json::from_str(content)?;
        Ok(Self {
            docname: docname.into(),
            source: file.source,
            toc: Doctree::new(file.toc),
            body: Doctree::new(file.body),
        })
    }

    pub fn load(docname: impl Into<String>, path: &Path) -> Result<Self, BuildError> {
        let content = fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
        Self::from_json(docname, &content).map_err(|error| BuildError::Document {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Source and line to record for a node of `tree`.
    pub fn position(&self, tree: &Doctree, id: NodeId) -> (String, Option<u32>) {
        let (source, line) = tree.position(id);
        let source = source.or(self.source.as_deref()).unwrap_or_default();
        (source.to_string(), line)
    }
}
