use std::path::PathBuf;
use thiserror::Error;

use crate::validation::CheckReport;

/// The main error type for texoverlay operations.
#[derive(Debug, Error)]
pub enum TexOverlayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse drawing snapshot from {path}: {source}")]
    DrawingJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write drawing snapshot to {path}: {source}")]
    DrawingJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("No document open")]
    NoDocument,

    #[error("Could not find layer named \"{0}\"")]
    MissingLayer(String),

    #[error("\"{0}\" layer has no point text to export")]
    EmptyLayer(String),

    #[error("Host operation '{operation}' failed: {message}")]
    Host {
        operation: &'static str,
        message: String,
    },

    #[error("Saving as {format} failed: {message}")]
    Export {
        format: &'static str,
        message: String,
    },

    #[error("Error writing file \"{path}\": {message}")]
    WriteFailed { path: PathBuf, message: String },

    #[error("Failed to serialize report: {0}")]
    ReportJson(#[from] serde_json::Error),

    #[error("Check failed with {error_count} error(s) and {warning_count} warning(s)")]
    CheckFailed {
        error_count: usize,
        warning_count: usize,
        report: CheckReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl TexOverlayError {
    /// Returns true for the errors raised before the exporter touches the
    /// document.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            TexOverlayError::NoDocument
                | TexOverlayError::MissingLayer(_)
                | TexOverlayError::EmptyLayer(_)
        )
    }
}
