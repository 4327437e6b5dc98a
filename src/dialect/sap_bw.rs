//! SAP BW dialect.
//!
//! SAP BW rejects `CurrentMember.Properties` on the rows axis:
//! - every dimension is cross-joined as `D.Children`
//! - member properties are requested with `DIMENSION PROPERTIES ... ON ROWS`

use super::{RowsStyle, XmlaDialect};

/// SAP BW dialect.
#[derive(Debug, Clone, Copy)]
pub struct SapBw;

impl XmlaDialect for SapBw {
    fn name(&self) -> &'static str {
        "sap_bw"
    }

    fn rows_style(&self) -> RowsStyle {
        RowsStyle::CrossJoinChildren
    }

    fn supports_dimension_properties_clause(&self) -> bool {
        true
    }
}
