//! YAML configuration for the catalog connection and the HTTP server.
//!
//! Values come from an optional YAML file and are then overridden by
//! command-line flags. Validation happens once, after all overrides.

use crate::graph::ReferenceMatching;
use crate::ui::GraphLayout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },

    #[error("missing required setting `database.{0}` for the {1} driver")]
    Missing(&'static str, Driver),

    #[error("invalid bind address `{0}`")]
    Bind(String),
}

/// Which database the catalog query runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// MySQL / MariaDB server, read through DuckDB's mysql extension
    #[default]
    Mysql,
    /// PostgreSQL server, read through DuckDB's postgres extension
    Postgres,
    /// A local DuckDB database file
    Duckdb,
}

impl Driver {
    /// Schema that holds the user tables when none is configured
    pub fn default_schema(self, database: Option<&str>) -> String {
        match self {
            Driver::Mysql => database.unwrap_or_default().to_string(),
            Driver::Postgres => "public".to_string(),
            Driver::Duckdb => "main".to_string(),
        }
    }

    /// Default server port, if the driver talks to a server at all
    pub fn default_port(self) -> Option<u16> {
        match self {
            Driver::Mysql => Some(3306),
            Driver::Postgres => Some(5432),
            Driver::Duckdb => None,
        }
    }
}

impl std::str::FromStr for Driver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Driver::Mysql),
            "postgres" | "postgresql" | "pg" => Ok(Driver::Postgres),
            "duckdb" => Ok(Driver::Duckdb),
            _ => Err(format!(
                "Unknown driver: {}. Valid options: mysql, postgres, duckdb",
                s
            )),
        }
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Driver::Mysql => write!(f, "mysql"),
            Driver::Postgres => write!(f, "postgres"),
            Driver::Duckdb => write!(f, "duckdb"),
        }
    }
}

/// Catalog connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub driver: Driver,
    /// Database file, only used by the duckdb driver
    pub path: Option<PathBuf>,
    pub host: String,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    /// Schema to introspect (driver default when unset)
    pub schema: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: Driver::default(),
            path: None,
            host: "localhost".to_string(),
            port: None,
            user: None,
            password: None,
            database: None,
            schema: None,
        }
    }
}

impl DatabaseConfig {
    /// Check that the settings the driver needs are present
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.driver {
            Driver::Duckdb => {
                if self.path.is_none() {
                    return Err(ConfigError::Missing("path", self.driver));
                }
            }
            Driver::Mysql | Driver::Postgres => {
                if self.database.as_deref().map_or(true, str::is_empty) {
                    return Err(ConfigError::Missing("database", self.driver));
                }
                if self.user.is_none() {
                    return Err(ConfigError::Missing("user", self.driver));
                }
            }
        }
        Ok(())
    }

    /// Schema name to filter the catalog on
    pub fn effective_schema(&self) -> String {
        self.schema
            .clone()
            .unwrap_or_else(|| self.driver.default_schema(self.database.as_deref()))
    }

    /// Port to connect to, falling back to the driver default
    pub fn effective_port(&self) -> Option<u16> {
        self.port.or_else(|| self.driver.default_port())
    }

    /// Human readable target for log lines (never includes the password)
    pub fn describe(&self) -> String {
        match self.driver {
            Driver::Duckdb => format!(
                "duckdb:{}",
                self.path
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            ),
            driver => format!(
                "{}://{}@{}:{}/{}",
                driver,
                self.user.as_deref().unwrap_or_default(),
                self.host,
                self.effective_port().unwrap_or_default(),
                self.database.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Layout the page starts with
    pub layout: GraphLayout,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8887".to_string(),
            layout: GraphLayout::default(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|_| ConfigError::Bind(self.bind.clone()))
    }
}

/// Dependency inference settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// How a `<prefix>_id` column is matched to a table name
    pub matching: ReferenceMatching,
}

/// Complete YAML configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub inference: InferenceConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
database:
  driver: postgres
  host: db.internal
  port: 6543
  user: reader
  password: secret
  database: shop
server:
  bind: "0.0.0.0:9000"
  layout: grid
inference:
  matching: plural
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.database.driver, Driver::Postgres);
        assert_eq!(config.database.effective_port(), Some(6543));
        assert_eq!(config.database.effective_schema(), "public");
        assert_eq!(config.server.layout, GraphLayout::Grid);
        assert_eq!(config.inference.matching, ReferenceMatching::Plural);
        assert_eq!(config.server.bind_addr().unwrap().port(), 9000);
        assert!(config.database.validate().is_ok());
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = AppConfig::from_yaml("database:\n  database: ec_db\n").unwrap();
        assert_eq!(config.database.driver, Driver::Mysql);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.effective_port(), Some(3306));
        assert_eq!(config.database.effective_schema(), "ec_db");
        assert_eq!(config.server.bind, "127.0.0.1:8887");
        assert_eq!(config.server.layout, GraphLayout::Cose);
        assert_eq!(config.inference.matching, ReferenceMatching::Exact);
    }

    #[test]
    fn test_validate_requires_driver_settings() {
        let mut db = DatabaseConfig {
            driver: Driver::Duckdb,
            ..Default::default()
        };
        assert!(matches!(
            db.validate(),
            Err(ConfigError::Missing("path", Driver::Duckdb))
        ));

        db.driver = Driver::Mysql;
        db.user = Some("root".to_string());
        assert!(matches!(
            db.validate(),
            Err(ConfigError::Missing("database", Driver::Mysql))
        ));
    }

    #[test]
    fn test_describe_hides_password() {
        let db = DatabaseConfig {
            user: Some("ec_user".to_string()),
            password: Some("ec_pass".to_string()),
            database: Some("ec_db".to_string()),
            ..Default::default()
        };
        let described = db.describe();
        assert_eq!(described, "mysql://ec_user@localhost:3306/ec_db");
        assert!(!described.contains("ec_pass"));
    }

    #[test]
    fn test_driver_from_str() {
        assert_eq!("PostgreSQL".parse::<Driver>().unwrap(), Driver::Postgres);
        assert_eq!("mariadb".parse::<Driver>().unwrap(), Driver::Mysql);
        assert!("oracle".parse::<Driver>().is_err());
    }
}
