//! Cube result model.
//!
//! [`CubeModel`] wraps the parsed body of an Execute response and exposes the
//! pieces the row flattener needs: the fault description, the two axes, and
//! the flat cell sequence. Axis parsing is done once and cached.

mod types;

pub use types::{cell_grid, Axes, Axis, Cell, Member, Tuple, HORIZONTAL_AXIS, VERTICAL_AXIS};

use std::cell::OnceCell;

use crate::client::{XmlaError, XmlaResult};
use crate::dialect::{Dialect, XmlaDialect};
use crate::document::{extract_path, extract_text, Document};

/// A parsed Execute response.
#[derive(Debug)]
pub struct CubeModel {
    document: Document,
    dialect: Dialect,
    axes: OnceCell<Axes>,
}

impl CubeModel {
    pub fn new(document: Document, dialect: Dialect) -> Self {
        Self {
            document,
            dialect,
            axes: OnceCell::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The SOAP fault description, if the server returned one.
    pub fn error_message(&self) -> Option<String> {
        extract_text(&self.document, self.dialect.fault_path())
    }

    /// Fail with [`XmlaError::Fault`] when the response is a fault.
    pub fn check_fault(&self) -> XmlaResult<()> {
        match self.error_message() {
            Some(description) => Err(XmlaError::Fault(description)),
            None => Ok(()),
        }
    }

    /// Columns and rows axes. Parsed on first use.
    pub fn axes(&self) -> &Axes {
        self.axes.get_or_init(|| {
            let axes = extract_path(&self.document, self.dialect.axes_path());
            Axes::from_documents(&axes)
        })
    }

    /// Whether [`CubeModel::axes`] has already been parsed.
    pub fn axes_parsed(&self) -> bool {
        self.axes.get().is_some()
    }

    pub fn horizontal_axis(&self) -> &Axis {
        &self.axes().horizontal
    }

    pub fn vertical_axis(&self) -> &Axis {
        &self.axes().vertical
    }

    /// All cells in server order.
    pub fn cells(&self) -> Vec<Cell> {
        extract_path(&self.document, self.dialect.cells_path())
            .iter()
            .map(Cell::from_document)
            .collect()
    }

    /// One name per column tuple: member captions joined with `|`.
    pub fn column_names(&self) -> Vec<String> {
        self.horizontal_axis()
            .tuples
            .iter()
            .map(Tuple::joined_caption)
            .collect()
    }

    /// Hierarchy names of the first row tuple, used as row header columns.
    pub fn row_header_names(&self) -> Vec<String> {
        self.vertical_axis()
            .get(0)
            .map(|tuple| {
                tuple
                    .members
                    .iter()
                    .map(|m| m.hierarchy.clone().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Member captions of row tuple `row`.
    pub fn row_captions(&self, row: usize) -> Vec<String> {
        self.vertical_axis()
            .get(row)
            .map(Tuple::captions)
            .unwrap_or_default()
    }

    /// `(columns, rows)`
    pub fn size(&self) -> (usize, usize) {
        (self.horizontal_axis().len(), self.vertical_axis().len())
    }
}
