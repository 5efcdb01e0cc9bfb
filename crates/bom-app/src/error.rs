//! Error types for the bom-app service layer.

use std::path::PathBuf;

use bom_explode::ExplodeError;
use bom_graph::GraphError;

/// Application error type that wraps errors from the backend crates
/// and gives the CLI a single error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Ingest error: {0}")]
    Ingest(String),

    #[error("Failed to read settings file: {path}")]
    SettingsFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write settings file: {path}")]
    SettingsFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Explode error: {0}")]
    Explode(#[from] ExplodeError),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("No trace for item: {0}")]
    ItemNotTraced(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for bom-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<bom_ingest::IngestError> for AppError {
    fn from(err: bom_ingest::IngestError) -> Self {
        AppError::Ingest(err.to_string())
    }
}

impl From<bom_report::ReportError> for AppError {
    fn from(err: bom_report::ReportError) -> Self {
        match err {
            bom_report::ReportError::ReportNotFound { report_id } => {
                AppError::ReportNotFound(report_id)
            }
            other => AppError::Report(other.to_string()),
        }
    }
}

impl From<bom_core::BomError> for AppError {
    fn from(err: bom_core::BomError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
