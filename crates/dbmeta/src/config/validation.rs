//! Configuration validation.

use super::Config;
use crate::error::{MetaError, Result};
use std::path::{Component, Path};

/// Page sizes Firebird accepts for new databases.
pub const VALID_PAGE_SIZES: [u32; 4] = [4096, 8192, 16384, 32768];

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    let create = &config.create_database;

    if create.host.trim().is_empty() {
        return Err(MetaError::Config("create_database.host is required".into()));
    }
    if create.user.trim().is_empty() {
        return Err(MetaError::Config("create_database.user is required".into()));
    }
    if !VALID_PAGE_SIZES.contains(&create.page_size) {
        return Err(MetaError::Config(format!(
            "create_database.page_size must be one of {:?}, got {}",
            VALID_PAGE_SIZES, create.page_size
        )));
    }
    if create.dialect != 1 && create.dialect != 3 {
        return Err(MetaError::Config(format!(
            "create_database.dialect must be 1 or 3, got {}",
            create.dialect
        )));
    }

    // The file must land directly inside --db-dir
    let mut components = Path::new(&create.file_name).components();
    let bare = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !bare {
        return Err(MetaError::Config(format!(
            "create_database.file_name must be a plain file name, got '{}'",
            create.file_name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CreateDatabaseConfig;

    fn valid_config() -> Config {
        Config {
            create_database: CreateDatabaseConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_host() {
        let mut config = valid_config();
        config.create_database.host = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_missing_user() {
        let mut config = valid_config();
        config.create_database.user = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_page_size() {
        let mut config = valid_config();
        config.create_database.page_size = 1000;
        assert!(validate(&config).is_err());

        config.create_database.page_size = 16384;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_dialect() {
        let mut config = valid_config();
        config.create_database.dialect = 2;
        assert!(validate(&config).is_err());

        config.create_database.dialect = 1;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_file_name_must_be_bare() {
        let mut config = valid_config();
        for bad in ["", "..", "sub/database.fdb", "/abs/database.fdb"] {
            config.create_database.file_name = bad.to_string();
            assert!(validate(&config).is_err(), "accepted '{}'", bad);
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let mut config = valid_config();
        config.create_database.password = "super_secret_password_123".to_string();
        let debug_output = format!("{:?}", config.create_database);
        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should contain [REDACTED]"
        );
        assert!(
            !debug_output.contains("super_secret_password_123"),
            "Debug output should not contain actual password value"
        );
    }
}
