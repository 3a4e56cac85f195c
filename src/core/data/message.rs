/// Position of a message occurrence in its source.
///
/// Ordering is lexicographic on `source`, then numeric on `line`, with an
/// unknown line sorting before every known one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub source: String,
    pub line: Option<u32>,
}

impl Location {
    pub fn new(source: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            source: source.into(),
            line,
        }
    }
}

/// A deduplicated translation unit.
///
/// `locations` holds every distinct `(source, line)` pair, sorted ascending.
/// `uuids` holds the id of every recorded occurrence in insertion order, so an
/// occurrence repeated at the same location still contributes one id each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub locations: Vec<Location>,
    pub uuids: Vec<String>,
}
