//! Flattening cube results into rows.
//!
//! Each tuple on the rows axis becomes one [`FlatRow`]. Row headers come
//! first, named after the hierarchies of the first row tuple, followed by
//! one column per tuple on the columns axis:
//!
//! ```text
//!              | Unit Sales | Store Cost |
//!   [Store] USA|     10     |     20     |   ->  {"[Store]": "USA", "Unit Sales": "10", "Store Cost": "20"}
//!   [Store] MEX|     30     |     40     |   ->  {"[Store]": "MEX", "Unit Sales": "30", "Store Cost": "40"}
//! ```
//!
//! Cell values stay untyped text. Rows are produced lazily and the iterator
//! cannot be restarted.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::client::XmlaResult;
use crate::cube::{cell_grid, CubeModel};

// =============================================================================
// Record Limit
// =============================================================================

/// A soft cap on the number of rows produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLimit {
    limit: i64,
    count: u64,
}

impl RecordLimit {
    /// Sentinel for "no limit".
    pub const UNLIMITED: i64 = -1;

    /// Any negative limit means unlimited.
    pub fn new(limit: i64) -> Self {
        Self { limit, count: 0 }
    }

    pub fn unlimited() -> Self {
        Self::new(Self::UNLIMITED)
    }

    pub fn from_option(limit: Option<u64>) -> Self {
        limit.map_or_else(Self::unlimited, |n| {
            Self::new(i64::try_from(n).unwrap_or(i64::MAX))
        })
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Rows counted so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_unlimited(&self) -> bool {
        self.limit < 0
    }

    /// Whether no further row may be produced.
    pub fn is_reached(&self) -> bool {
        !self.is_unlimited() && self.count >= self.limit as u64
    }

    fn record(&mut self) {
        self.count += 1;
    }
}

impl Default for RecordLimit {
    fn default() -> Self {
        Self::unlimited()
    }
}

// =============================================================================
// Flat Row
// =============================================================================

/// One output record: column names to untyped values, in column order.
///
/// Inserting a name that is already present overwrites the value and keeps
/// the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRow {
    values: Vec<(String, Option<String>)>,
}

impl FlatRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.values.push((name, value)),
        }
    }

    /// The value of `name`. Absent columns and null values both give `None`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(n, v)| {
                    let value = v
                        .as_ref()
                        .map_or(serde_json::Value::Null, |s| serde_json::Value::String(s.clone()));
                    (n.clone(), value)
                })
                .collect(),
        )
    }
}

impl Serialize for FlatRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for FlatRow {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        let mut row = FlatRow::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}

// =============================================================================
// Row Iterator
// =============================================================================

/// Lazy row stream over one cube result.
#[derive(Debug)]
pub struct Rows {
    cube: CubeModel,
    header_names: Vec<String>,
    column_names: Vec<String>,
    grid: Vec<Option<String>>,
    rows: usize,
    next_row: usize,
    limit: RecordLimit,
}

/// Start flattening `cube`.
///
/// A SOAP fault is reported here, before any row is produced.
pub fn flatten(cube: CubeModel, limit: RecordLimit) -> XmlaResult<Rows> {
    cube.check_fault()?;

    let column_names = cube.column_names();
    let header_names = cube.row_header_names();
    let (columns, rows) = cube.size();
    let cells = cube.cells();
    if cells.len() != columns * rows {
        tracing::debug!(
            cells = cells.len(),
            columns,
            rows,
            "cell count differs from axis sizes"
        );
    }
    let grid = cell_grid(&cells, columns * rows);

    Ok(Rows {
        cube,
        header_names,
        column_names,
        grid,
        rows,
        next_row: 0,
        limit,
    })
}

impl Rows {
    /// Header column names followed by data column names.
    pub fn column_names(&self) -> Vec<String> {
        self.header_names
            .iter()
            .chain(self.column_names.iter())
            .cloned()
            .collect()
    }

    /// Rows produced so far.
    pub fn produced(&self) -> u64 {
        self.limit.count()
    }

    fn build_row(&self, row: usize) -> FlatRow {
        let mut flat = FlatRow::new();
        for (header, caption) in self.header_names.iter().zip(self.cube.row_captions(row)) {
            flat.insert(header.as_str(), Some(caption));
        }
        let width = self.column_names.len();
        for (column, name) in self.column_names.iter().enumerate() {
            let value = self.grid.get(row * width + column).cloned().flatten();
            flat.insert(name.as_str(), value);
        }
        flat
    }
}

impl Iterator for Rows {
    type Item = FlatRow;

    fn next(&mut self) -> Option<FlatRow> {
        if self.next_row >= self.rows || self.limit.is_reached() {
            return None;
        }
        let row = self.build_row(self.next_row);
        self.next_row += 1;
        self.limit.record();
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows - self.next_row;
        let remaining = if self.limit.is_unlimited() {
            remaining
        } else {
            let left = (self.limit.limit() as u64).saturating_sub(self.limit.count());
            remaining.min(usize::try_from(left).unwrap_or(usize::MAX))
        };
        (remaining, Some(remaining))
    }
}
