//! Server configuration
//!
//! Read once from the environment at startup. Every value is optional:
//!
//! - `ORGCHART_HOST`: bind address (default `127.0.0.1`)
//! - `ORGCHART_PORT`, then `PORT`: listen port (default 3001)
//! - `ORGCHART_DATA_FILE`: JSON document path (default `public/data.json`)
//! - `ORGCHART_MAX_UPLOAD_BYTES`: request body cap (default 10 MiB)
//! - `CORS_ALLOW_ORIGIN`: single allowed origin, `*` for any

use axum::http::HeaderValue;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_DATA_FILE: &str = "public/data.json";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Local front-end dev servers allowed when `CORS_ALLOW_ORIGIN` is unset
const DEFAULT_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:3001",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid port '{value}'")]
    InvalidPort { value: String },

    #[error("Invalid upload limit '{value}', expected a byte count")]
    InvalidUploadLimit { value: String },

    #[error("Invalid CORS origin '{value}'")]
    InvalidOrigin { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub max_upload_bytes: usize,
    pub cors_origins: CorsOrigins,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors_origins: CorsOrigins::List(
                DEFAULT_ORIGINS
                    .into_iter()
                    .map(HeaderValue::from_static)
                    .collect(),
            ),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("ORGCHART_HOST") {
            config.host = host;
        }
        if let Some(port) = get("ORGCHART_PORT").or_else(|| get("PORT")) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { value: port })?;
        }
        if let Some(path) = get("ORGCHART_DATA_FILE") {
            config.data_file = PathBuf::from(path);
        }
        if let Some(limit) = get("ORGCHART_MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = limit
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidUploadLimit { value: limit })?;
        }
        if let Some(origin) = get("CORS_ALLOW_ORIGIN") {
            config.cors_origins = if origin.trim() == "*" {
                CorsOrigins::Any
            } else {
                let value = origin
                    .trim()
                    .parse::<HeaderValue>()
                    .map_err(|_| ConfigError::InvalidOrigin { value: origin.clone() })?;
                CorsOrigins::List(vec![value])
            };
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(config.data_file, PathBuf::from("public/data.json"));
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.bind_address(), "127.0.0.1:3001");
    }

    #[test]
    fn test_port_precedence() {
        assert_eq!(config(&[("PORT", "8080")]).unwrap().port, 8080);
        assert_eq!(
            config(&[("PORT", "8080"), ("ORGCHART_PORT", "9090")]).unwrap().port,
            9090
        );
        assert_eq!(config(&[("ORGCHART_PORT", "")]).unwrap().port, 3001);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config(&[("ORGCHART_PORT", "http")]),
            Err(ConfigError::InvalidPort {
                value: "http".to_string()
            })
        );
        assert!(matches!(
            config(&[("ORGCHART_MAX_UPLOAD_BYTES", "10MB")]),
            Err(ConfigError::InvalidUploadLimit { .. })
        ));
    }

    #[test]
    fn test_cors_origin() {
        assert_eq!(
            config(&[("CORS_ALLOW_ORIGIN", "*")]).unwrap().cors_origins,
            CorsOrigins::Any
        );
        assert_eq!(
            config(&[("CORS_ALLOW_ORIGIN", "http://charts.local")])
                .unwrap()
                .cors_origins,
            CorsOrigins::List(vec![HeaderValue::from_static("http://charts.local")])
        );
    }
}
