//! Configuration module for olapflat.
//!
//! Handles the settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, AuthSettings, ConnectionSettings, QuerySettings, Settings, SettingsError,
};
