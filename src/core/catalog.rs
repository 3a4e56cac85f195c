//! Per-domain message aggregation.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::core::data::{Location, Message, Origin};

/// `(source, line, uid)` as recorded for one occurrence.
type Occurrence = (String, Option<u32>, String);

/// Catalog of translatable messages for one domain.
///
/// Append-only for the duration of a build: messages keep the order in which
/// their text was first added.
#[derive(Debug, Default)]
pub struct Catalog {
    metadata: IndexMap<String, Vec<Occurrence>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `text`.
    ///
    /// Occurrences without identity are dropped.
    pub fn add(&mut self, text: impl Into<String>, origin: Origin) {
        let Some(uid) = origin.uid else {
            return;
        };
        self.metadata
            .entry(text.into())
            .or_default()
            .push((origin.source, origin.line, uid));
    }

    /// Iterate over the deduplicated view, one `Message` per distinct text.
    pub fn iter(&self) -> impl Iterator<Item = Message> + '_ {
        self.metadata.iter().map(|(text, occurrences)| {
            let locations: BTreeSet<Location> = occurrences
                .iter()
                .map(|(source, line, _)| Location::new(source.clone(), *line))
                .collect();
            Message {
                text: text.clone(),
                locations: locations.into_iter().collect(),
                uuids: occurrences.iter().map(|(_, _, uid)| uid.clone()).collect(),
            }
        })
    }

    /// Distinct message texts in first-insertion order.
    pub fn messages(&self) -> Vec<&str> {
        self.metadata.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }
}
