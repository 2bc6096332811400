//! Error types for the schema tool library.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for usage and validation errors.
pub const EXIT_USAGE_ERROR: u8 = 1;

/// Exit code for every other failure (`-1` as seen by the shell).
pub const EXIT_FAILURE: u8 = 255;

/// Main error type for schema operations.
#[derive(Error, Debug)]
pub enum MetaError {
    /// A required parameter was missing or blank.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error (invalid YAML, bad connection string, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The scripts directory does not exist.
    #[error("Scripts directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The build target already contains a database file.
    #[error("Database file already exists: {}", .0.display())]
    DatabaseExists(PathBuf),

    /// Firebird connection, catalog query or statement error
    #[error("Database error: {0}")]
    Database(#[from] rsfbclient::FbError),

    /// Writing an exported object failed
    #[error("Export failed for {object}: {message}")]
    Export { object: String, message: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl MetaError {
    /// Create a Validation error naming the missing parameter.
    pub fn missing_parameter(name: &str) -> Self {
        MetaError::Validation(format!("required parameter {} is missing or blank", name))
    }

    /// Create an Export error
    pub fn export(object: impl Into<String>, message: impl Into<String>) -> Self {
        MetaError::Export {
            object: object.into(),
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            MetaError::Validation(_) | MetaError::Config(_) => EXIT_USAGE_ERROR,
            _ => EXIT_FAILURE,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, MetaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(MetaError::missing_parameter("--db-dir").exit_code(), 1);
        assert_eq!(MetaError::Config("bad".into()).exit_code(), 1);
        assert_eq!(
            MetaError::DirectoryNotFound(PathBuf::from("/nope")).exit_code(),
            255
        );
        assert_eq!(
            MetaError::DatabaseExists(PathBuf::from("/db/database.fdb")).exit_code(),
            255
        );
    }

    #[test]
    fn test_missing_parameter_names_parameter() {
        let err = MetaError::missing_parameter("--scripts-dir");
        assert!(err.to_string().contains("--scripts-dir"));
    }

    #[test]
    fn test_format_detailed_includes_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = MetaError::from(io);
        let detailed = err.format_detailed();
        assert!(detailed.starts_with("Error: IO error: denied"));
    }
}
