use crate::config::AdditionalTarget;
use crate::core::doctree::{Doctree, IndexEntry, NodeId, NodeKind};

/// Collect the translatable text runs of `tree` in document order.
///
/// Prose nodes always yield their text with line breaks folded into spaces.
/// Literal, doctest and raw blocks and image alt texts are only collected when
/// enabled in `targets`; block contents are kept verbatim.
pub fn extract_messages(tree: &Doctree, targets: &[AdditionalTarget]) -> Vec<(NodeId, String)> {
    let enabled = |target: AdditionalTarget| targets.contains(&target);

    tree.traverse()
        .filter_map(|id| {
            let node = tree.get(id);
            if !node.translatable {
                return None;
            }
            let msg = match node.kind {
                NodeKind::Title
                | NodeKind::Paragraph
                | NodeKind::Caption
                | NodeKind::Term
                | NodeKind::Rubric
                | NodeKind::Line => node.text.as_deref().map(normalize),
                NodeKind::LiteralBlock if enabled(AdditionalTarget::LiteralBlock) => {
                    node.text.clone()
                }
                NodeKind::DoctestBlock if enabled(AdditionalTarget::DoctestBlock) => {
                    node.text.clone()
                }
                NodeKind::Raw if enabled(AdditionalTarget::Raw) => node.text.clone(),
                NodeKind::Image if enabled(AdditionalTarget::Image) => {
                    node.alt.as_deref().map(normalize)
                }
                _ => None,
            }?;
            (!msg.trim().is_empty()).then_some((id, msg))
        })
        .collect()
}

/// Collect toctree captions and explicit entry titles from a navigation tree.
pub fn toctree_messages(tree: &Doctree) -> Vec<(NodeId, String)> {
    let mut messages = Vec::new();
    for id in tree.traverse() {
        let node = tree.get(id);
        if node.kind != NodeKind::Toctree || !node.translatable {
            continue;
        }
        let caption = node.caption.as_deref().map(normalize);
        let titles = node
            .entries
            .iter()
            .filter_map(|entry| entry.title.as_deref().map(normalize));
        for msg in caption.into_iter().chain(titles) {
            if !msg.is_empty() {
                messages.push((id, msg));
            }
        }
    }
    messages
}

/// Index nodes with their raw entries.
pub fn translatable_index(tree: &Doctree) -> impl Iterator<Item = (NodeId, &[IndexEntry])> {
    tree.traverse().filter_map(|id| {
        let node = tree.get(id);
        (node.kind == NodeKind::Index && node.translatable && !node.index_entries.is_empty())
            .then_some((id, node.index_entries.as_slice()))
    })
}

/// Whether `id` is, or sits inside, a substitution definition.
///
/// Substitution definitions are not rendered where they are defined, so their
/// text must not be extracted at the definition site.
pub fn is_in_substitution_definition(tree: &Doctree, id: NodeId) -> bool {
    tree.ancestors(id)
        .any(|node| tree.get(node).kind == NodeKind::SubstitutionDefinition)
}

fn normalize(text: &str) -> String {
    text.replace('\n', " ").trim().to_string()
}
