//! Error types for configfile.
//!
//! Recoverable problems in a document (missing attributes, unsupported
//! elements) are reported as diagnostics and never reach this type. Only
//! conditions that abort a load or a lookup are represented here.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the configfile library.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The subtree parser produced a key that is already present.
    #[error("An entry with the key '{0}' has already been added")]
    DuplicateKey(String),

    /// A required configuration file does not exist.
    #[error("The configuration file '{}' was not found and is not optional", .0.display())]
    FileNotFound(PathBuf),

    /// Parser constructed with an attribute name that can never match.
    #[error("Invalid attribute name: '{0}'")]
    InvalidAttributeName(String),

    /// A query helper was called without any key segments.
    #[error("Need to provide keys")]
    EmptyKeys,

    /// A typed or dynamic lookup found no value at the key.
    #[error("No value found for key '{0}'")]
    MissingValue(String),

    /// The stored value is JSON, but not a single-member object.
    #[error("Value at '{0}' is not a serialized element")]
    UnexpectedShape(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON conversion failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failed.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configfile operations.
pub type Result<T> = std::result::Result<T, ConfigFileError>;
