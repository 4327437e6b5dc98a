//! MDX generation.
//!
//! - [`token`] - MDX tokens and token streams
//! - [`property`] - matching selected properties to dimensions
//! - [`query`] - SELECT statement builder
//!
//! # Example
//!
//! ```ignore
//! use olapflat::mdx::{build, MdxRequest};
//! use olapflat::Dialect;
//!
//! let mdx = build(
//!     &MdxRequest::new("Sales")
//!         .dimensions(["[Store].[Store Country]"])
//!         .measures(["[Measures].[Unit Sales]"]),
//!     Dialect::Mondrian,
//! );
//! ```

pub mod property;
pub mod query;
pub mod token;

use serde::{Deserialize, Serialize};

pub use property::{match_property, property_name, resolve_property};
pub use query::{AxisItem, MdxQuery};
pub use token::{Token, TokenStream};

use crate::dialect::Dialect;

/// What the caller wants to read from a cube.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdxRequest {
    pub cube: String,
    /// Hierarchy unique names, cross-joined on rows.
    pub dimensions: Vec<String>,
    /// Measure unique names, listed on columns.
    pub measures: Vec<String>,
    /// `<dimension>.<property>` tagged names.
    pub properties: Vec<String>,
}

impl MdxRequest {
    pub fn new(cube: &str) -> Self {
        Self {
            cube: cube.into(),
            ..Default::default()
        }
    }

    pub fn dimensions<S: Into<String>>(mut self, dimensions: impl IntoIterator<Item = S>) -> Self {
        self.dimensions = dimensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn measures<S: Into<String>>(mut self, measures: impl IntoIterator<Item = S>) -> Self {
        self.measures = measures.into_iter().map(Into::into).collect();
        self
    }

    pub fn properties<S: Into<String>>(mut self, properties: impl IntoIterator<Item = S>) -> Self {
        self.properties = properties.into_iter().map(Into::into).collect();
        self
    }
}

/// Build the MDX statement for `request` in `dialect`.
pub fn build(request: &MdxRequest, dialect: Dialect) -> String {
    MdxQuery::from_request(request, dialect).to_mdx()
}

/// Build the MDX statement from its parts.
pub fn build_mdx<S: AsRef<str>>(
    cube: &str,
    dimensions: &[S],
    measures: &[S],
    properties: &[S],
    dialect: Dialect,
) -> String {
    let request = MdxRequest::new(cube)
        .dimensions(dimensions.iter().map(|s| s.as_ref().to_string()))
        .measures(measures.iter().map(|s| s.as_ref().to_string()))
        .properties(properties.iter().map(|s| s.as_ref().to_string()));
    build(&request, dialect)
}
