//! Error types for forgeplan
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::target::BuildTarget;

/// Target resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// Target identifier is not in the supported set
    #[error("Unknown build target '{name}'. Supported targets: {}", BuildTarget::supported_ids())]
    Unknown { name: String },
}

/// Property interpolation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Placeholder references a property that was never set
    #[error("Unknown property '{name}' in template '{template}'")]
    UnknownProperty { name: String, template: String },

    /// Placeholder references a command-list property
    #[error("Property '{name}' is a command list and cannot be interpolated into '{template}'")]
    NotAString { name: String, template: String },
}

/// Manifest (forgeplan.toml) errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file does not exist
    #[error("No forgeplan.toml found at '{path}'. Run 'forgeplan init' to create one.")]
    NotFound { path: PathBuf },

    /// Manifest is not valid TOML
    #[error("Failed to parse forgeplan.toml: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    /// Manifest could not be serialized
    #[error("Failed to serialize manifest: {source}")]
    Serialize {
        #[from]
        source: toml::ser::Error,
    },

    /// IO error while reading or writing the manifest
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },

    /// A required field is empty or missing
    #[error("Manifest field '{field}' is missing or empty")]
    MissingField { field: String },

    /// A configured target identifier is invalid
    #[error(transparent)]
    Target(#[from] TargetError),
}

/// Plan rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Target resolution failed
    #[error(transparent)]
    Target(#[from] TargetError),

    /// Template interpolation failed
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A shell step references a command property that was not resolved
    #[error("Step '{step}' references missing command property '{property}'")]
    MissingCommandProperty { step: String, property: String },
}

/// Top-level forgeplan error type
#[derive(Error, Debug)]
pub enum ForgeplanError {
    /// Manifest error
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Plan error
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Target error
    #[error("Target error: {0}")]
    Target(#[from] TargetError),

    /// IO error
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Generic error
    #[error("{0}")]
    Generic(String),
}
