//! Power BI / Analysis Services dialect.
//!
//! Same request shape and MDX style as Mondrian.

use super::XmlaDialect;

/// Power BI dialect.
#[derive(Debug, Clone, Copy)]
pub struct PowerBi;

impl XmlaDialect for PowerBi {
    fn name(&self) -> &'static str {
        "power_bi"
    }
}
