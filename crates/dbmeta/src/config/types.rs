//! Configuration type definitions with documented defaults.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Parameters used by `build-db` when creating a new database.
    #[serde(default)]
    pub create_database: CreateDatabaseConfig,
}

/// Parameters for creating a fresh database file.
///
/// Every field has a default, so an empty YAML document is a valid config.
#[derive(Clone, Serialize, Deserialize)]
pub struct CreateDatabaseConfig {
    /// Firebird server host (default: "localhost").
    #[serde(default = "default_host")]
    pub host: String,

    /// Firebird server port (default: 3050).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Administrative account (default: "SYSDBA").
    #[serde(default = "default_user")]
    pub user: String,

    /// Administrative password (default: "masterkey").
    #[serde(default = "default_password")]
    pub password: String,

    /// Database page size in bytes (default: 8192).
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// SQL dialect (default: 3).
    #[serde(default = "default_dialect")]
    pub dialect: u16,

    /// Database file name created inside the target directory (default: "database.fdb").
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for CreateDatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: default_password(),
            page_size: default_page_size(),
            dialect: default_dialect(),
            file_name: default_file_name(),
        }
    }
}

impl fmt::Debug for CreateDatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateDatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("page_size", &self.page_size)
            .field("dialect", &self.dialect)
            .field("file_name", &self.file_name)
            .finish()
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3050
}

fn default_user() -> String {
    "SYSDBA".to_string()
}

fn default_password() -> String {
    "masterkey".to_string()
}

fn default_page_size() -> u32 {
    8192
}

fn default_dialect() -> u16 {
    3
}

fn default_file_name() -> String {
    "database.fdb".to_string()
}
