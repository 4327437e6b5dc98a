//! XMLA client.
//!
//! [`XmlaClient`] renders SOAP requests through the active [`Dialect`],
//! sends them over a [`Transport`], and parses the answer into a
//! [`Document`].
//!
//! # Example
//!
//! ```ignore
//! use olapflat::client::{Auth, XmlaClient};
//! use olapflat::{Dialect, MdxRequest, RecordLimit};
//!
//! let client = XmlaClient::connect("http://olap/xmla", Auth::None, Dialect::Mondrian, None)?;
//! let request = MdxRequest::new("Sales").dimensions(["[Store]"]).measures(["[Measures].[Unit Sales]"]);
//! for row in client.query(&request, RecordLimit::unlimited()).await? {
//!     println!("{}", row.to_json());
//! }
//! ```

pub mod auth;
mod error;
pub mod transport;

pub use auth::Auth;
pub use error::{XmlaError, XmlaResult};
pub use transport::{HttpTransport, Transport};

use std::time::Duration;

use tracing::{debug, info};

use crate::cube::CubeModel;
use crate::dialect::templates::DEFAULT_CATALOG;
use crate::dialect::{Dialect, RequestType, XmlaDialect};
use crate::document::{extract_path, parse_document, Document};
use crate::mdx::{self, MdxRequest};
use crate::rows::{flatten, RecordLimit, Rows};

/// Client bound to one endpoint, dialect and catalog.
#[derive(Debug, Clone)]
pub struct XmlaClient<T = HttpTransport> {
    transport: T,
    dialect: Dialect,
    catalog: String,
}

impl XmlaClient<HttpTransport> {
    /// Connect over HTTP.
    pub fn connect(
        endpoint: impl Into<String>,
        auth: Auth,
        dialect: Dialect,
        timeout: Option<Duration>,
    ) -> XmlaResult<Self> {
        let transport = HttpTransport::new(endpoint, auth, timeout)?;
        Ok(Self::new(transport, dialect))
    }
}

impl<T: Transport> XmlaClient<T> {
    pub fn new(transport: T, dialect: Dialect) -> Self {
        Self {
            transport,
            dialect,
            catalog: DEFAULT_CATALOG.to_string(),
        }
    }

    /// Catalog named in Execute requests.
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = catalog.into();
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a body and parse the response.
    async fn post(&self, body: String) -> XmlaResult<Document> {
        let text = self.transport.post(body).await?;
        Ok(parse_document(&text)?)
    }

    /// Fetch the rows of a schema rowset.
    pub async fn discover(&self, request_type: RequestType) -> XmlaResult<Vec<Document>> {
        debug!(request_type = %request_type, dialect = %self.dialect, "discover");
        let body = self.dialect.discover_request(request_type.as_str());
        let document = self.post(body).await?;
        Ok(extract_path(&document, self.dialect.discover_rows_path()))
    }

    /// Run an MDX statement and return the raw parsed response.
    pub async fn execute(&self, mdx: &str) -> XmlaResult<Document> {
        debug!(mdx, catalog = %self.catalog, "execute");
        let body = self.dialect.execute_request(mdx, &self.catalog);
        self.post(body).await
    }

    /// Run an MDX statement and wrap the response as a cube.
    pub async fn execute_cube(&self, mdx: &str) -> XmlaResult<CubeModel> {
        let document = self.execute(mdx).await?;
        Ok(CubeModel::new(document, self.dialect))
    }

    /// MDX for `request` in this client's dialect.
    pub fn build_mdx_query(&self, request: &MdxRequest) -> String {
        mdx::build(request, self.dialect)
    }

    /// Build, execute and flatten in one go.
    pub async fn query(&self, request: &MdxRequest, limit: RecordLimit) -> XmlaResult<Rows> {
        let mdx = self.build_mdx_query(request);
        info!(cube = %request.cube, mdx = %mdx, "running MDX query");
        let cube = self.execute_cube(&mdx).await?;
        let rows = flatten(cube, limit)?;
        let (columns, total) = (rows.column_names().len(), rows.size_hint().0);
        info!(columns, rows = total, "cube result ready");
        Ok(rows)
    }
}
