//! The network seam: one SOAP body out, one response body back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tracing::{debug, error};

use super::auth::Auth;
use super::{XmlaError, XmlaResult};
use crate::dialect::templates;

/// Something that can deliver a SOAP request and return the response body.
///
/// The HTTP implementation is [`HttpTransport`]; tests substitute an
/// in-memory one.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` and return the full response text.
    async fn post(&self, body: String) -> XmlaResult<String>;
}

/// SOAP 1.1 over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    auth: Auth,
}

impl HttpTransport {
    /// Build a transport for `endpoint`.
    ///
    /// Without a timeout requests wait as long as the server takes.
    pub fn new(endpoint: impl Into<String>, auth: Auth, timeout: Option<Duration>) -> XmlaResult<Self> {
        auth.ensure_supported()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(XmlaError::Network)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            auth,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, body: String) -> XmlaResult<String> {
        debug!(endpoint = %self.endpoint, bytes = body.len(), "posting XMLA request");

        let request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, HeaderValue::from_static(templates::CONTENT_TYPE))
            .header("SOAPAction", HeaderValue::from_static(templates::SOAP_ACTION))
            .body(body);

        let response = self.auth.apply(request)?.send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), endpoint = %self.endpoint, body = %text, "XMLA request failed");
            return Err(XmlaError::Http {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        Ok(response.text().await?)
    }
}
