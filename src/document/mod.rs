//! Parsed SOAP documents.
//!
//! XMLA responses are converted into a [`Document`]: a small recursive value
//! with four shapes. The conversion follows the usual XML-to-mapping rules:
//!
//! - an element with only text becomes [`Document::Text`]
//! - an element with nothing in it becomes [`Document::Null`]
//! - attributes become `@name` keys, mixed text becomes `#text`
//! - repeated sibling elements collapse into a [`Document::List`]
//!
//! Because a single child and many children end up with different shapes,
//! everything downstream reads the tree through [`extract_path`], which
//! always hands back a sequence.

mod parse;
mod path;

pub use parse::{parse_document, ParseError};
pub use path::{extract_path, extract_text, lookup, Lookup};

/// Key under which mixed element text is stored.
pub const TEXT_KEY: &str = "#text";

/// A parsed XML document in nested-mapping form.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Document {
    /// An empty element (or an explicit absence of value).
    #[default]
    Null,
    /// A text-only element or an attribute value.
    Text(String),
    /// An element with attributes or children, in document order.
    Map(Vec<(String, Document)>),
    /// Repeated sibling elements sharing one name.
    List(Vec<Document>),
}

impl Document {
    /// Build a map from key/value pairs.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Document)>) -> Self {
        Document::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a text leaf.
    pub fn text(s: impl Into<String>) -> Self {
        Document::Text(s.into())
    }

    /// Build a list.
    pub fn list(items: impl IntoIterator<Item = Document>) -> Self {
        Document::List(items.into_iter().collect())
    }

    /// Look up a key on a map. Any other shape has no keys.
    pub fn get(&self, key: &str) -> Option<&Document> {
        match self {
            Document::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Whether the value counts as empty: null, empty text, empty map or list.
    pub fn is_empty(&self) -> bool {
        match self {
            Document::Null => true,
            Document::Text(s) => s.is_empty(),
            Document::Map(entries) => entries.is_empty(),
            Document::List(items) => items.is_empty(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    /// The scalar text of this node.
    ///
    /// A text leaf yields its string; a map yields its `#text` entry, which
    /// is where element text lands once the element also carries attributes.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Document::Text(s) => Some(s),
            Document::Map(_) => self.get(TEXT_KEY).and_then(Document::as_text),
            _ => None,
        }
    }

    /// Convenience accessor for a child's scalar text.
    pub fn text_of(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Document::as_text)
    }

    /// Insert a child, collapsing repeated names into a list.
    pub(crate) fn push_child(entries: &mut Vec<(String, Document)>, key: String, value: Document) {
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, Document::List(items))) => items.push(value),
            Some((_, existing)) => {
                let first = std::mem::take(existing);
                *existing = Document::List(vec![first, value]);
            }
            None => entries.push((key, value)),
        }
    }
}

impl From<&Document> for serde_json::Value {
    fn from(doc: &Document) -> Self {
        match doc {
            Document::Null => serde_json::Value::Null,
            Document::Text(s) => serde_json::Value::String(s.clone()),
            Document::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
            Document::List(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
        }
    }
}
