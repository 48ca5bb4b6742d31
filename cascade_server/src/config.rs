//! Server configuration loaded from environment variables

use cascade_common::{CatalogError, FormData};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,

    /// Port serving the form page and JSON endpoints
    pub port: u16,

    /// Form data file (YAML or JSON); the built-in sample is used when unset
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8090,
            data_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: match env::var("PORT") {
                Ok(port) => port.parse().map_err(|_| ConfigError::InvalidPort(port))?,
                Err(_) => defaults.port,
            },
            data_file: env::var_os("CASCADE_DATA")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        })
    }

    /// Address to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Read the configured form data
    pub fn load_form_data(&self) -> Result<FormData, CatalogError> {
        match &self.data_file {
            Some(path) => FormData::load(path),
            None => Ok(FormData::sample()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number {0:?}")]
    InvalidPort(String),
}
