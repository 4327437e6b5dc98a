//! XMLA server dialects.
//!
//! Each server family implements [`XmlaDialect`] to describe its SOAP request
//! templates, where the interesting parts of a response live, and how MDX
//! row axes are written:
//!
//! | Dialect  | Rows axis                                    | Properties clause            |
//! |----------|----------------------------------------------|------------------------------|
//! | Mondrian | `D.Children` or `D.CurrentMember.Properties` | embedded per dimension       |
//! | Power BI | `D.Children` or `D.CurrentMember.Properties` | embedded per dimension       |
//! | SAP BW   | `D1.Children * D2.Children`                  | `DIMENSION PROPERTIES ... ON ROWS` |
//!
//! # Usage
//!
//! ```ignore
//! use olapflat::dialect::{Dialect, XmlaDialect};
//!
//! let dialect: Dialect = "sap_bw".parse()?;
//! let body = dialect.discover_request("MDSCHEMA_CUBES");
//! ```

mod mondrian;
mod power_bi;
mod sap_bw;
pub mod templates;

pub use mondrian::Mondrian;
pub use power_bi::PowerBi;
pub use sap_bw::SapBw;

use std::fmt;
use std::str::FromStr;

/// How a dialect writes the rows axis of a SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowsStyle {
    /// Each dimension is `D.Children`, or `D.CurrentMember.Properties("p")`
    /// when a property was selected for it.
    EmbeddedProperties,
    /// Every dimension is `D.Children`; properties go in a separate
    /// `DIMENSION PROPERTIES` clause.
    CrossJoinChildren,
}

/// XMLA dialect trait - request templates, response paths and MDX shape.
///
/// The defaults describe the shared XMLA 1.1 envelope. Implementations
/// override only what differs.
pub trait XmlaDialect: fmt::Debug {
    /// Dialect name for display/logging and configuration.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Requests
    // =========================================================================

    /// Discover body template with a `{request_type}` placeholder.
    fn discover_template(&self) -> &'static str {
        templates::DISCOVER_REQUEST
    }

    /// Execute body template with `{statement}` and `{catalog}` placeholders.
    fn execute_template(&self) -> &'static str {
        templates::EXECUTE_REQUEST
    }

    /// Render a Discover request for a schema rowset.
    fn discover_request(&self, request_type: &str) -> String {
        templates::render_discover(self.discover_template(), request_type)
    }

    /// Render an Execute request for an MDX statement.
    fn execute_request(&self, statement: &str, catalog: &str) -> String {
        templates::render_execute(self.execute_template(), statement, catalog)
    }

    // =========================================================================
    // Response Paths
    // =========================================================================

    fn discover_rows_path(&self) -> &'static [&'static str] {
        templates::DISCOVER_ROWS_PATH
    }

    fn cells_path(&self) -> &'static [&'static str] {
        templates::CELLS_PATH
    }

    fn axes_path(&self) -> &'static [&'static str] {
        templates::AXES_PATH
    }

    fn fault_path(&self) -> &'static [&'static str] {
        templates::FAULT_PATH
    }

    // =========================================================================
    // MDX
    // =========================================================================

    /// How the rows axis is written.
    fn rows_style(&self) -> RowsStyle {
        RowsStyle::EmbeddedProperties
    }

    /// Whether selected properties are listed in a `DIMENSION PROPERTIES`
    /// clause after the rows axis.
    fn supports_dimension_properties_clause(&self) -> bool {
        false
    }
}

/// Supported XMLA server dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Mondrian,
    SapBw,
    PowerBi,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn XmlaDialect {
        match self {
            Dialect::Mondrian => &Mondrian,
            Dialect::SapBw => &SapBw,
            Dialect::PowerBi => &PowerBi,
        }
    }

    /// All dialects, in declaration order.
    pub fn all() -> [Dialect; 3] {
        [Dialect::Mondrian, Dialect::SapBw, Dialect::PowerBi]
    }
}

// Implement XmlaDialect for Dialect enum by delegating to concrete types
impl XmlaDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn discover_template(&self) -> &'static str {
        self.dialect().discover_template()
    }

    fn execute_template(&self) -> &'static str {
        self.dialect().execute_template()
    }

    fn discover_request(&self, request_type: &str) -> String {
        self.dialect().discover_request(request_type)
    }

    fn execute_request(&self, statement: &str, catalog: &str) -> String {
        self.dialect().execute_request(statement, catalog)
    }

    fn discover_rows_path(&self) -> &'static [&'static str] {
        self.dialect().discover_rows_path()
    }

    fn cells_path(&self) -> &'static [&'static str] {
        self.dialect().cells_path()
    }

    fn axes_path(&self) -> &'static [&'static str] {
        self.dialect().axes_path()
    }

    fn fault_path(&self) -> &'static [&'static str] {
        self.dialect().fault_path()
    }

    fn rows_style(&self) -> RowsStyle {
        self.dialect().rows_style()
    }

    fn supports_dimension_properties_clause(&self) -> bool {
        self.dialect().supports_dimension_properties_clause()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}

/// Error for an unrecognized dialect or request type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Dialect {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mondrian" => Ok(Dialect::Mondrian),
            "sap_bw" | "sapbw" | "sap-bw" => Ok(Dialect::SapBw),
            "power_bi" | "powerbi" | "power-bi" => Ok(Dialect::PowerBi),
            other => Err(UnknownName {
                kind: "server type",
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Discover Request Types
// =============================================================================

/// Schema rowsets that can be requested with Discover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Catalogs,
    Cubes,
    Dimensions,
    Hierarchies,
    Measures,
    Properties,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Catalogs => "DBSCHEMA_CATALOGS",
            RequestType::Cubes => "MDSCHEMA_CUBES",
            RequestType::Dimensions => "MDSCHEMA_DIMENSIONS",
            RequestType::Hierarchies => "MDSCHEMA_HIERARCHIES",
            RequestType::Measures => "MDSCHEMA_MEASURES",
            RequestType::Properties => "MDSCHEMA_PROPERTIES",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestType {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DBSCHEMA_CATALOGS" | "CATALOGS" => Ok(RequestType::Catalogs),
            "MDSCHEMA_CUBES" | "CUBES" => Ok(RequestType::Cubes),
            "MDSCHEMA_DIMENSIONS" | "DIMENSIONS" => Ok(RequestType::Dimensions),
            "MDSCHEMA_HIERARCHIES" | "HIERARCHIES" => Ok(RequestType::Hierarchies),
            "MDSCHEMA_MEASURES" | "MEASURES" => Ok(RequestType::Measures),
            "MDSCHEMA_PROPERTIES" | "PROPERTIES" => Ok(RequestType::Properties),
            _ => Err(UnknownName {
                kind: "request type",
                value: s.to_string(),
            }),
        }
    }
}
