//! # olapflat
//!
//! An XMLA client that compiles multi-dialect MDX and flattens cube results
//! into rows.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        MdxRequest (cube, dimensions, measures, props)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [mdx + dialect]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 MDX statement (String)                   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [client + transport]
//! ┌─────────────────────────────────────────────────────────┐
//! │          SOAP Execute → Document (parsed XML)            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [cube]
//! ┌─────────────────────────────────────────────────────────┐
//! │       CubeModel (axes, tuples, members, cells)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [rows]
//! ┌─────────────────────────────────────────────────────────┐
//! │              Iterator<Item = FlatRow>                    │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod config;
pub mod connector;
pub mod cube;
pub mod dialect;
pub mod discovery;
pub mod document;
pub mod logging;
pub mod mdx;
pub mod rows;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::client::{Auth, HttpTransport, Transport, XmlaClient, XmlaError, XmlaResult};
    pub use crate::connector::{Connector, XmlaConnector};
    pub use crate::cube::{Axes, Axis, Cell, CubeModel, Member, Tuple};
    pub use crate::dialect::{Dialect, RequestType, XmlaDialect};
    pub use crate::document::{extract_path, Document};
    pub use crate::mdx::{MdxQuery, MdxRequest};
    pub use crate::rows::{flatten, FlatRow, RecordLimit, Rows};
}

pub use client::{XmlaClient, XmlaError, XmlaResult};
pub use cube::CubeModel;
pub use dialect::Dialect;
pub use document::Document;
pub use mdx::{MdxQuery, MdxRequest};
pub use rows::{flatten, FlatRow, RecordLimit};
