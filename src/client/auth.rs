//! HTTP authentication for XMLA endpoints.

use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};

use super::{XmlaError, XmlaResult};

/// Authentication scheme, as written in the `[connection.auth]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Auth {
    /// Anonymous access.
    #[default]
    None,
    /// HTTP Basic.
    Basic { username: String, password: String },
    /// `Authorization: Bearer <token>`.
    Bearer {
        #[serde(rename = "bearer_token")]
        token: String,
    },
    /// Windows NTLM. Needs a platform security provider.
    Ntlm { username: String, password: String },
    /// Windows Kerberos / Negotiate. Needs a platform security provider.
    /// Without a principal the ticket cache is used.
    Kerberos {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
    },
}

impl Auth {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Auth::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Auth::Bearer {
            token: token.into(),
        }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            Auth::None => "none",
            Auth::Basic { .. } => "basic",
            Auth::Bearer { .. } => "bearer",
            Auth::Ntlm { .. } => "ntlm",
            Auth::Kerberos { .. } => "kerberos",
        }
    }

    /// Fail early for schemes the HTTP transport cannot speak.
    pub fn ensure_supported(&self) -> XmlaResult<()> {
        match self {
            Auth::Ntlm { .. } | Auth::Kerberos { .. } => {
                Err(XmlaError::UnsupportedAuth(self.scheme().to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Attach credentials to a request.
    pub fn apply(&self, request: RequestBuilder) -> XmlaResult<RequestBuilder> {
        self.ensure_supported()?;
        Ok(match self {
            Auth::Basic { username, password } => request.basic_auth(username, Some(password)),
            Auth::Bearer { token } => request.bearer_auth(token),
            _ => request,
        })
    }
}
