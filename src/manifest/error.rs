//! Error taxonomy for manifest generation

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    /// The template text itself is malformed
    #[error("failed to parse template at line {line}: {reason}")]
    TemplateParse { line: usize, reason: String },

    /// The template references a field the parameter record does not have
    #[error("template references unknown field '{name}' at line {line}")]
    UnknownPlaceholder { name: String, line: usize },

    /// A placeholder could not be resolved while rendering
    #[error("no value for template field '{field}'")]
    Render { field: String },

    #[error("failed to create {}", path.display())]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid application name '{name}': {reason}")]
    InvalidApplicationName { name: String, reason: String },

    #[error("invalid storage size {size}: {reason}")]
    InvalidSize { size: f64, reason: String },
}
