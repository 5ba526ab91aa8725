//! Server configuration
//!
//! Loaded from an optional YAML file; command-line flags override the file
//! and the file overrides the defaults.
//!
//! ```yaml
//! address: 0.0.0.0
//! port: 5000
//! data_path: test_network_data.json
//! full_data_path: network_data.json
//! analysis:
//!   top_nodes: 10
//!   max_path_depth: 5
//!   max_path_depth_limit: 10
//! ```

use crate::analysis::PathwayLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Limits and defaults for the analysis endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Nodes listed in `topNodes` when the request gives no limit
    pub top_nodes: usize,
    /// Hop limit for pathway enumeration when the request gives none
    pub max_path_depth: usize,
    /// Largest hop limit a pathway request may ask for
    pub max_path_depth_limit: usize,
    /// Stop pathway enumeration after this many paths
    pub max_paths: usize,
    /// Results returned by search when the request gives no limit
    pub search_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_nodes: 10,
            max_path_depth: 5,
            max_path_depth_limit: 10,
            max_paths: 1000,
            search_limit: 50,
        }
    }
}

impl AnalysisConfig {
    pub fn pathway_limits(&self) -> PathwayLimits {
        PathwayLimits {
            default_depth: self.max_path_depth,
            depth_limit: self.max_path_depth_limit,
            max_paths: self.max_paths,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
    /// Network document served by default
    pub data_path: PathBuf,
    /// Network document served for `dataset=full`, loaded on first use
    pub full_data_path: PathBuf,
    /// Serve static files from this directory instead of the embedded pages
    pub static_dir: Option<PathBuf>,
    pub analysis: AnalysisConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 5000,
            data_path: PathBuf::from("test_network_data.json"),
            full_data_path: PathBuf::from("network_data.json"),
            static_dir: None,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read a YAML config file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ServerConfig = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.address.trim().is_empty() {
            return Err(ConfigError::Invalid("address must not be empty".to_string()));
        }
        if self.analysis.max_paths == 0 {
            return Err(ConfigError::Invalid("analysis.max_paths must be at least 1".to_string()));
        }
        if self.analysis.max_path_depth > self.analysis.max_path_depth_limit {
            return Err(ConfigError::Invalid(
                "analysis.max_path_depth must not exceed analysis.max_path_depth_limit".to_string(),
            ));
        }
        Ok(())
    }

    /// `address:port` for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.analysis.top_nodes, 10);
        assert_eq!(config.analysis.max_path_depth, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port: 8080\nanalysis:\n  max_paths: 50\n").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.address, "0.0.0.0");
        assert_eq!(config.analysis.max_paths, 50);
        assert_eq!(config.analysis.search_limit, 50);
        assert_eq!(config.data_path, PathBuf::from("test_network_data.json"));
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port: not-a-number").unwrap();
        assert!(matches!(
            ServerConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));

        assert!(matches!(
            ServerConfig::from_file("/nonexistent/linkup.yaml"),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_paths() {
        let mut config = ServerConfig::default();
        config.analysis.max_paths = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_depth_limit_bounds_default_depth() {
        let mut config = ServerConfig::default();
        let limits = config.analysis.pathway_limits();
        assert_eq!(limits.default_depth, 5);
        assert_eq!(limits.depth_limit, 10);
        assert_eq!(limits.max_paths, 1000);

        config.analysis.max_path_depth = 12;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        config.analysis.max_path_depth_limit = 12;
        assert!(config.validate().is_ok());
    }
}
