//! TOML-based configuration for olapflat.
//!
//! Supports a config file (olapflat.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [connection]
//! endpoint = "https://olap.example.com/xmla"
//! server_type = "mondrian"   # mondrian, sap_bw, power_bi
//! catalog = "FoodMart"
//! timeout_secs = 60
//!
//! [connection.auth]
//! type = "basic"             # none, basic, bearer, ntlm, kerberos
//! username = "analyst"
//! password = "${XMLA_PASSWORD}"
//!
//! [query]
//! cube = "Sales"
//! dimensions = ["[Store].[Store Country]"]
//! measures = ["[Measures].[Unit Sales]"]
//! properties = []
//! records_limit = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::Auth;
use crate::dialect::templates::DEFAULT_CATALOG;
use crate::dialect::Dialect;
use crate::mdx::MdxRequest;
use crate::rows::RecordLimit;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Unsupported server type: {0}")]
    UnsupportedServerType(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// XMLA endpoint and credentials.
    pub connection: ConnectionSettings,

    /// What to read.
    pub query: QuerySettings,
}

/// Connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// XMLA endpoint URL (supports ${ENV_VAR} expansion).
    pub endpoint: String,

    /// Server type (mondrian, sap_bw, power_bi).
    pub server_type: String,

    /// Catalog named in Execute requests.
    pub catalog: String,

    /// Request timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,

    /// Authentication.
    pub auth: AuthSettings,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            server_type: Dialect::default().to_string(),
            catalog: DEFAULT_CATALOG.to_string(),
            timeout_secs: None,
            auth: AuthSettings::default(),
        }
    }
}

impl ConnectionSettings {
    /// Get the server dialect.
    pub fn dialect(&self) -> Result<Dialect, SettingsError> {
        self.server_type
            .parse()
            .map_err(|_| SettingsError::UnsupportedServerType(self.server_type.clone()))
    }

    /// Get the endpoint with environment variables expanded.
    pub fn resolved_endpoint(&self) -> Result<String, SettingsError> {
        let endpoint = expand_env_vars(&self.endpoint)?;
        if endpoint.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "connection.endpoint is required".to_string(),
            ));
        }
        Ok(endpoint)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Scheme: none, basic, bearer, ntlm, kerberos.
    #[serde(rename = "type")]
    pub kind: String,

    pub username: Option<String>,

    /// Password (supports ${ENV_VAR} expansion).
    pub password: Option<String>,

    /// Bearer token (supports ${ENV_VAR} expansion).
    pub bearer_token: Option<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            kind: "none".to_string(),
            username: None,
            password: None,
            bearer_token: None,
        }
    }
}

impl AuthSettings {
    fn required(value: &Option<String>, key: &str) -> Result<String, SettingsError> {
        match value {
            Some(v) => expand_env_vars(v),
            None => Err(SettingsError::InvalidConfig(format!(
                "connection.auth.{} is required",
                key
            ))),
        }
    }

    fn optional(value: &Option<String>) -> Result<Option<String>, SettingsError> {
        value.as_deref().map(expand_env_vars).transpose()
    }

    /// Resolve into an [`Auth`], expanding environment variables.
    pub fn resolve(&self) -> Result<Auth, SettingsError> {
        match self.kind.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Auth::None),
            "basic" => Ok(Auth::Basic {
                username: Self::required(&self.username, "username")?,
                password: Self::required(&self.password, "password")?,
            }),
            "bearer" => Ok(Auth::Bearer {
                token: Self::required(&self.bearer_token, "bearer_token")?,
            }),
            "ntlm" => Ok(Auth::Ntlm {
                username: Self::required(&self.username, "username")?,
                password: Self::required(&self.password, "password")?,
            }),
            "kerberos" => Ok(Auth::Kerberos {
                username: Self::optional(&self.username)?,
                password: Self::optional(&self.password)?,
            }),
            other => Err(SettingsError::InvalidConfig(format!(
                "unknown auth type: {}",
                other
            ))),
        }
    }
}

/// Query configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct QuerySettings {
    pub cube: String,
    pub dimensions: Vec<String>,
    pub measures: Vec<String>,
    /// `<dimension>.<property>` tagged names.
    pub properties: Vec<String>,
    /// Maximum rows to read. Unset or negative means all.
    pub records_limit: Option<i64>,
}

impl QuerySettings {
    pub fn to_request(&self) -> MdxRequest {
        MdxRequest::new(&self.cube)
            .dimensions(self.dimensions.iter().cloned())
            .measures(self.measures.iter().cloned())
            .properties(self.properties.iter().cloned())
    }

    pub fn record_limit(&self) -> RecordLimit {
        RecordLimit::new(self.records_limit.unwrap_or(RecordLimit::UNLIMITED))
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `OLAPFLAT_CONFIG`
    /// 2. `./olapflat.toml`
    /// 3. `~/.config/olapflat/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("OLAPFLAT_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("olapflat.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("olapflat").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next();
            chars.by_ref().take_while(|&ch| ch != '}').collect()
        } else {
            // $VAR ends at the first non-alphanumeric, non-underscore char
            let mut name = String::new();
            while let Some(&ch) = chars.peek() {
                if !(ch.is_alphanumeric() || ch == '_') {
                    break;
                }
                name.push(ch);
                chars.next();
            }
            if name.is_empty() {
                result.push('$');
                continue;
            }
            name
        };

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
