use std::fmt;

/// One concrete occurrence of a translatable message.
///
/// An origin without a `uid` carries no identity: it belongs to content that is
/// structurally replicated (e.g. a node copied into several places) and the
/// catalog drops it. An origin whose `uid` is the empty string still records a
/// location but does not mint a distinct translation-memory identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Path or identifier of the containing unit. Empty when unknown.
    pub source: String,
    /// Line number, `None` when unknown.
    pub line: Option<u32>,
    pub uid: Option<String>,
}

impl Origin {
    pub fn new(source: impl Into<String>, line: Option<u32>, uid: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            line,
            uid: Some(uid.into()),
        }
    }

    /// An occurrence that must not be recorded as a translation unit.
    pub fn without_identity(source: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            source: source.into(),
            line,
            uid: None,
        }
    }

    /// Replace the identity with the empty sentinel.
    ///
    /// Used for navigation nodes, which are shared across the document tree.
    pub fn with_empty_uid(mut self) -> Self {
        self.uid = Some(String::new());
        self
    }

    pub fn has_identity(&self) -> bool {
        self.uid.is_some()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.source, line)?,
            None => write!(f, "{}", self.source)?,
        }
        match &self.uid {
            Some(uid) => write!(f, "; uid={:?}", uid),
            None => Ok(()),
        }
    }
}
