//! Occurrence identity minting.

use std::collections::HashMap;

use uuid::Uuid;

/// Namespace for stable ids.
const STABLE_NAMESPACE: Uuid = Uuid::from_u128(0x6c1f_0a7e_93d2_4b8a_a5f0_2e7d_c4b1_9e36);

/// How occurrence ids are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    /// Fresh random id per occurrence (UUID v4, 32 hex digits).
    Random,
    /// Reproducible id derived from the scope, the text and how many times the
    /// same text was already seen in that scope (UUID v5).
    Stable,
}

impl IdStrategy {
    /// Displayed ids have to survive rebuilds; hidden ones do not.
    pub fn for_display(show_ids: bool) -> Self {
        if show_ids { Self::Stable } else { Self::Random }
    }
}

#[derive(Debug)]
pub struct IdMinter {
    strategy: IdStrategy,
    seen: HashMap<(String, String), u32>,
}

impl IdMinter {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            seen: HashMap::new(),
        }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Mint the id of one occurrence of `text` within `scope` (a docname or a
    /// template path).
    pub fn mint(&mut self, scope: &str, text: &str) -> String {
        match self.strategy {
            IdStrategy::Random => Uuid::new_v4().simple().to_string(),
            IdStrategy::Stable => {
                let counter = self
                    .seen
                    .entry((scope.to_string(), text.to_string()))
                    .or_insert(0);
                let name = format!("{}\0{}\0{}", scope, text, counter);
                *counter += 1;
                Uuid::new_v5(&STABLE_NAMESPACE, name.as_bytes())
                    .simple()
                    .to_string()
            }
        }
    }
}
