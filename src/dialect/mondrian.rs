//! Mondrian (Pentaho) dialect.
//!
//! Mondrian is the reference XMLA server and uses the shared envelope as is.
//! Selected member properties are embedded in the rows axis through
//! `CurrentMember.Properties`.

use super::XmlaDialect;

/// Mondrian dialect.
#[derive(Debug, Clone, Copy)]
pub struct Mondrian;

impl XmlaDialect for Mondrian {
    fn name(&self) -> &'static str {
        "mondrian"
    }
}
