//! Command dispatcher: the three top-level operations.
//!
//! - `build-db`: create an empty database, then run a scripts directory on it
//! - `export-scripts`: write DDL scripts for an existing database's schema
//! - `update-db`: run a scripts directory against an existing database
//!
//! Each operation opens one connection and holds it until it returns.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::connection::ConnectionSpec;
use crate::drivers::firebird;
use crate::error::{MetaError, Result};
use crate::export::{ExportSummary, SchemaExporter};
use crate::runner::{execute_scripts_in_directory, ScriptReport};

/// Runs the top-level operations with a fixed configuration.
pub struct Dispatcher {
    config: Config,
}

impl Dispatcher {
    /// Create a dispatcher.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Create a new database in `db_dir` and apply every script in `scripts_dir`.
    ///
    /// Refuses to touch an existing database file.
    pub fn build_database(&self, db_dir: &str, scripts_dir: &str) -> Result<ScriptReport> {
        require_param("--db-dir", db_dir)?;
        require_param("--scripts-dir", scripts_dir)?;

        let create = &self.config.create_database;
        let scripts_dir = Path::new(scripts_dir);
        require_directory(scripts_dir)?;

        std::fs::create_dir_all(db_dir)?;
        let db_path = std::path::absolute(Path::new(db_dir).join(&create.file_name))?;
        if db_path.exists() {
            return Err(MetaError::DatabaseExists(db_path));
        }

        info!("Phase 1: Creating database {}", db_path.display());
        let spec = ConnectionSpec::for_new_database(create, &db_path.to_string_lossy());
        let mut db = firebird::create_database(&spec, create.page_size)?;

        info!("Phase 2: Executing scripts from {}", scripts_dir.display());
        execute_scripts_in_directory(&mut db, scripts_dir)
    }

    /// Export domains, tables and procedures as one script per object.
    pub fn export_scripts(&self, connection_string: &str, output_dir: &str) -> Result<ExportSummary> {
        require_param("--connection-string", connection_string)?;
        require_param("--output-dir", output_dir)?;

        let spec = ConnectionSpec::parse(connection_string)?;
        let output_dir = PathBuf::from(output_dir);
        std::fs::create_dir_all(&output_dir)?;

        let mut db = firebird::connect(&spec)?;
        SchemaExporter::new(&mut db, output_dir).export_all()
    }

    /// Apply every script in `scripts_dir` to an existing database.
    pub fn update_database(&self, connection_string: &str, scripts_dir: &str) -> Result<ScriptReport> {
        require_param("--connection-string", connection_string)?;
        require_param("--scripts-dir", scripts_dir)?;

        let spec = ConnectionSpec::parse(connection_string)?;
        let scripts_dir = Path::new(scripts_dir);
        require_directory(scripts_dir)?;

        let mut db = firebird::connect(&spec)?;
        execute_scripts_in_directory(&mut db, scripts_dir)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn require_param(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MetaError::missing_parameter(name));
    }
    Ok(())
}

fn require_directory(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(MetaError::DirectoryNotFound(dir.to_path_buf()));
    }
    Ok(())
}
