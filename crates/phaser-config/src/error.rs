//! Error types for preset operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving, or applying presets.
#[derive(Debug, Error)]
pub enum PresetError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Preset not found
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// Parameter id that names none of the phaser controls
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Parameter value that could not be parsed
    #[error("invalid value for parameter '{param}': {reason}")]
    InvalidValue {
        /// Id of the parameter.
        param: String,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// Validation errors
    #[error("validation failed: {0}")]
    Validation(#[from] crate::validation::ValidationError),

    /// The preset describes a processor that cannot be built
    #[error("cannot build processor: {0}")]
    Processor(#[from] phaser_core::ConfigError),

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl PresetError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PresetError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PresetError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a directory creation error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PresetError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_read_file_error() {
        let err = PresetError::read_file(
            "/presets/slow.toml",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/presets/slow.toml"));
        assert!(msg.contains("no such file"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unknown_parameter_display() {
        let err = PresetError::UnknownParameter("resonance".to_string());
        assert_eq!(err.to_string(), "unknown parameter: resonance");
    }

    #[test]
    fn test_processor_error_wraps_core() {
        let err = PresetError::from(phaser_core::ConfigError::InvalidStageCount(0));
        assert!(err.to_string().contains("invalid stage count 0"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_value_display() {
        let err = PresetError::InvalidValue {
            param: "mix".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for parameter 'mix': not a number"
        );
    }
}
