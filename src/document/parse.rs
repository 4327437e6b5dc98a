//! XML text to [`Document`] conversion.
//!
//! Namespace prefixes are dropped from element and attribute names, so a
//! `SOAP-ENV:Envelope` and a `soap:Envelope` both read as `Envelope`.
//! Namespace declarations are not kept.

use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use super::{Document, TEXT_KEY};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] AttrError),

    #[error("document has no root element")]
    NoRoot,

    #[error("document ended inside <{0}>")]
    Unclosed(String),
}

/// An element that has been opened but not yet closed.
struct Frame {
    name: String,
    entries: Vec<(String, Document)>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, ParseError> {
        let mut entries = Vec::new();
        for attr in start.attributes().with_checks(false) {
            let attr = attr?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let name = format!("@{}", lossy(attr.key.local_name().as_ref()));
            let value = attr.unescape_value()?.into_owned();
            entries.push((name, Document::Text(value)));
        }

        Ok(Self {
            name: lossy(start.local_name().as_ref()),
            entries,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Document) {
        let text = self.text.trim();
        let value = if self.entries.is_empty() {
            if text.is_empty() {
                Document::Null
            } else {
                Document::Text(text.to_string())
            }
        } else {
            let mut entries = self.entries;
            if !text.is_empty() {
                entries.push((TEXT_KEY.to_string(), Document::Text(text.to_string())));
            }
            Document::Map(entries)
        };
        (self.name, value)
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Parse an XML string into a [`Document`].
///
/// The result is a single-entry map keyed by the root element's local name.
pub fn parse_document(xml: &str) -> Result<Document, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Document)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(Frame::open(&e)?),
            Event::Empty(e) => {
                let (name, value) = Frame::open(&e)?.close();
                attach(&mut stack, &mut root, name, value);
            }
            Event::End(_) => {
                if let Some(frame) = stack.pop() {
                    let (name, value) = frame.close();
                    attach(&mut stack, &mut root, name, value);
                }
            }
            Event::Text(e) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(ParseError::Unclosed(frame.name));
    }

    let (name, value) = root.ok_or(ParseError::NoRoot)?;
    Ok(Document::Map(vec![(name, value)]))
}

fn attach(
    stack: &mut [Frame],
    root: &mut Option<(String, Document)>,
    name: String,
    value: Document,
) {
    match stack.last_mut() {
        Some(parent) => Document::push_child(&mut parent.entries, name, value),
        None => {
            if root.is_none() {
                *root = Some((name, value));
            }
        }
    }
}
