//! Tolerant path extraction over a [`Document`].

use super::Document;

/// Outcome of walking a key path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// A key on the path did not exist.
    Missing,
    /// An element on the path was present but empty.
    Null,
    /// The value at the end of the path.
    Found(&'a Document),
}

/// Walk `doc` by successive key lookups.
///
/// Stops at the first explicit null. A missing key (or a key looked up on a
/// non-map) ends the walk as [`Lookup::Missing`].
pub fn lookup<'a, S: AsRef<str>>(doc: &'a Document, path: &[S]) -> Lookup<'a> {
    let mut current = doc;
    for token in path {
        match current.get(token.as_ref()) {
            Some(Document::Null) => return Lookup::Null,
            Some(next) => current = next,
            None => return Lookup::Missing,
        }
    }
    if current.is_null() {
        Lookup::Null
    } else {
        Lookup::Found(current)
    }
}

/// Extract the value at `path` as a sequence.
///
/// Missing or empty values give an empty sequence, a list is returned element
/// by element, and any other single value is wrapped in a one-element
/// sequence. The input is never modified.
pub fn extract_path<S: AsRef<str>>(doc: &Document, path: &[S]) -> Vec<Document> {
    match lookup(doc, path) {
        Lookup::Found(value) if !value.is_empty() => match value {
            Document::List(items) => items.clone(),
            other => vec![other.clone()],
        },
        _ => Vec::new(),
    }
}

/// Extract the scalar text at `path`, if any.
pub fn extract_text<S: AsRef<str>>(doc: &Document, path: &[S]) -> Option<String> {
    let Lookup::Found(value) = lookup(doc, path) else {
        return None;
    };
    let text = match value {
        Document::List(items) => items.iter().find_map(Document::as_text),
        other => other.as_text(),
    };
    text.filter(|s| !s.is_empty()).map(str::to_string)
}
