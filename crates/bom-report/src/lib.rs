//! bom-report: order report files and content-addressed report ids.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::compute_report_id;
pub use store::ReportStore;
pub use types::*;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Report not found: {report_id}")]
    ReportNotFound { report_id: String },
}
