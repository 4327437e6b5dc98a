//! XMLA client error types.

use thiserror::Error;

use crate::document::ParseError;

/// Result type for XMLA operations.
pub type XmlaResult<T> = Result<T, XmlaError>;

/// Errors that can occur while talking to an XMLA server.
#[derive(Error, Debug)]
pub enum XmlaError {
    /// The server answered with a non-success HTTP status.
    #[error("XMLA request to {url} failed with HTTP {status}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Endpoint the request was sent to.
        url: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server returned a SOAP fault.
    #[error("XMLA fault: {0}")]
    Fault(String),

    /// The response body is not well-formed XML.
    #[error("malformed XMLA response: {0}")]
    Xml(#[from] ParseError),

    /// The configured authentication scheme is not available over HTTP.
    #[error("unsupported authentication scheme: {0}")]
    UnsupportedAuth(String),

    /// An unknown server type was configured.
    #[error("unknown server type: {0}")]
    UnknownDialect(String),
}

impl XmlaError {
    pub fn fault(description: impl Into<String>) -> Self {
        Self::Fault(description.into())
    }

    /// Whether the server itself rejected the request.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /// HTTP status, when the error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for XmlaError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e)
    }
}

impl From<crate::dialect::UnknownName> for XmlaError {
    fn from(e: crate::dialect::UnknownName) -> Self {
        Self::UnknownDialect(e.value)
    }
}
