//! Dataset connector contract.
//!
//! A host application reads an XMLA cube as a dataset through [`Connector`]:
//! it may ask for a schema up front, then pulls rows.
//!
//! ```text
//!   Settings ──► XmlaConnector ──► MDX ──► Transport ──► CubeModel ──► Rows
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::{HttpTransport, Transport, XmlaClient, XmlaError, XmlaResult};
use crate::config::{Settings, SettingsError};
use crate::mdx::MdxRequest;
use crate::rows::{RecordLimit, Rows};

/// Column list a host can declare before reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSchema {
    pub columns: Vec<SchemaColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
}

/// Errors raised while building a connector.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Xmla(#[from] XmlaError),
}

/// What a dataset host needs from a data source.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Schema of the rows, or `None` to let the host infer it.
    fn read_schema(&self) -> Option<DatasetSchema>;

    /// Read rows. Schema and partition arguments are informational.
    async fn generate_rows(
        &self,
        schema: Option<&DatasetSchema>,
        partitioning: Option<&str>,
        partition_id: Option<&str>,
        records_limit: i64,
    ) -> XmlaResult<Rows>;

    /// Partitions of the dataset.
    fn list_partitions(&self, partitioning: Option<&str>) -> Vec<String>;
}

/// Reads one MDX request from an XMLA cube.
#[derive(Debug)]
pub struct XmlaConnector<T = HttpTransport> {
    client: XmlaClient<T>,
    request: MdxRequest,
}

impl XmlaConnector<HttpTransport> {
    /// Build from settings, connecting over HTTP.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConnectorError> {
        let connection = &settings.connection;
        let dialect = connection.dialect()?;
        let client = XmlaClient::connect(
            connection.resolved_endpoint()?,
            connection.auth.resolve()?,
            dialect,
            connection.timeout(),
        )?
        .with_catalog(connection.catalog.clone());

        info!(
            version = env!("CARGO_PKG_VERSION"),
            server_type = %dialect,
            cube = %settings.query.cube,
            "starting XMLA connector"
        );

        Ok(Self::new(client, settings.query.to_request()))
    }
}

impl<T: Transport> XmlaConnector<T> {
    pub fn new(client: XmlaClient<T>, request: MdxRequest) -> Self {
        Self { client, request }
    }

    pub fn client(&self) -> &XmlaClient<T> {
        &self.client
    }

    pub fn request(&self) -> &MdxRequest {
        &self.request
    }

    /// The MDX this connector will run.
    pub fn mdx(&self) -> String {
        self.client.build_mdx_query(&self.request)
    }
}

#[async_trait]
impl<T: Transport> Connector for XmlaConnector<T> {
    fn read_schema(&self) -> Option<DatasetSchema> {
        None
    }

    async fn generate_rows(
        &self,
        _schema: Option<&DatasetSchema>,
        _partitioning: Option<&str>,
        _partition_id: Option<&str>,
        records_limit: i64,
    ) -> XmlaResult<Rows> {
        self.client
            .query(&self.request, RecordLimit::new(records_limit))
            .await
    }

    fn list_partitions(&self, _partitioning: Option<&str>) -> Vec<String> {
        Vec::new()
    }
}
