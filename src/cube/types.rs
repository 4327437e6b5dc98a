//! Typed views over the axis and cell sections of an Execute response.

use crate::document::{extract_path, Document};

/// A single member of one hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Member {
    /// Display value.
    pub caption: String,
    /// Hierarchy unique name. Servers send it on row-axis members.
    pub hierarchy: Option<String>,
}

impl Member {
    pub fn new(caption: &str) -> Self {
        Self {
            caption: caption.into(),
            hierarchy: None,
        }
    }

    pub fn with_hierarchy(mut self, hierarchy: &str) -> Self {
        self.hierarchy = Some(hierarchy.into());
        self
    }

    pub(crate) fn from_document(doc: &Document) -> Self {
        Self {
            caption: doc.text_of("Caption").unwrap_or_default().to_string(),
            hierarchy: doc.text_of("@Hierarchy").map(str::to_string),
        }
    }
}

/// One coordinate along an axis: a member per active hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tuple {
    pub members: Vec<Member>,
}

impl Tuple {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub(crate) fn from_document(doc: &Document) -> Self {
        Self {
            members: extract_path(doc, &["Member"])
                .iter()
                .map(Member::from_document)
                .collect(),
        }
    }

    /// Member captions in order.
    pub fn captions(&self) -> Vec<String> {
        self.members.iter().map(|m| m.caption.clone()).collect()
    }

    /// Captions joined with `|`, used as a column name.
    pub fn joined_caption(&self) -> String {
        self.members
            .iter()
            .map(|m| m.caption.as_str())
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// An ordered list of tuples.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Axis {
    pub tuples: Vec<Tuple>,
}

impl Axis {
    pub fn new(tuples: Vec<Tuple>) -> Self {
        Self { tuples }
    }

    pub(crate) fn from_document(doc: &Document) -> Self {
        Self {
            tuples: extract_path(doc, &["Tuples", "Tuple"])
                .iter()
                .map(Tuple::from_document)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tuple> {
        self.tuples.get(index)
    }
}

/// The columns (horizontal) and rows (vertical) axes of a result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Axes {
    pub horizontal: Axis,
    pub vertical: Axis,
}

/// Index of the columns axis in the response.
pub const HORIZONTAL_AXIS: usize = 0;
/// Index of the rows axis in the response.
pub const VERTICAL_AXIS: usize = 1;

impl Axes {
    /// Split extracted `Axis` elements by position.
    pub(crate) fn from_documents(axes: &[Document]) -> Self {
        let axis_at = |index: usize| axes.get(index).map(Axis::from_document).unwrap_or_default();
        Self {
            horizontal: axis_at(HORIZONTAL_AXIS),
            vertical: axis_at(VERTICAL_AXIS),
        }
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    /// Value text, untyped.
    pub value: Option<String>,
    /// Position in the row-major grid, when the server sends it.
    pub ordinal: Option<usize>,
}

impl Cell {
    pub fn new(value: &str) -> Self {
        Self {
            value: Some(value.into()),
            ordinal: None,
        }
    }

    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = Some(ordinal);
        self
    }

    pub(crate) fn from_document(doc: &Document) -> Self {
        Self {
            value: doc
                .get("Value")
                .and_then(Document::as_text)
                .map(str::to_string),
            ordinal: doc
                .text_of("@CellOrdinal")
                .and_then(|s| s.trim().parse().ok()),
        }
    }
}

/// Lay cells out in a row-major grid of `len` slots.
///
/// Cells carrying an ordinal go to that slot; the others fill by position.
/// Slots nothing lands in stay empty.
pub fn cell_grid(cells: &[Cell], len: usize) -> Vec<Option<String>> {
    let mut grid = vec![None; len];
    for (position, cell) in cells.iter().enumerate() {
        let slot = cell.ordinal.unwrap_or(position);
        if let Some(target) = grid.get_mut(slot) {
            *target = cell.value.clone();
        }
    }
    grid
}
