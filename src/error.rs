//! Unified error type for the module generator.
//!
//! Rendering never fails; everything here comes from the filesystem,
//! the settings file, or an opt-in consistency check.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading settings or writing generated sources.
#[derive(Error, Debug)]
pub enum GenError {
    /// A generated file could not be created or written
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid TOML in settings file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Only produced when strict consistency checking is requested
    #[error("Module graph is inconsistent: {0}")]
    Inconsistent(String),
}

impl GenError {
    /// Wrap an I/O error together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, GenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_names_path() {
        let err = GenError::io(
            "/nonexistent/ex-foo.c",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to write /nonexistent/ex-foo.c: denied");
    }

    #[test]
    fn test_config_error_display() {
        let err = GenError::Config("settings path cannot be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: settings path cannot be empty"
        );
    }

    #[test]
    fn test_result_type_err() {
        let result: Result<i32> = Err(GenError::Inconsistent("dangling call".into()));
        assert!(result.is_err());
    }
}
