//! Shared application service layer for BOM explosion.
//!
//! The CLI talks only to this crate: settings loading, table ingestion,
//! end-to-end explode runs with optional report persistence, and trace
//! queries on the result.

pub mod error;
pub mod explode_service;
pub mod query;
pub mod settings;
pub mod table_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use explode_service::{
    ENGINE_VERSION, ExplodeRequest, ExplodeResponse, RunTimingSummary, list_reports, load_report,
    run_explode,
};
pub use query::{TracePath, list_traced_items, trace_item, trace_stored_item};
pub use settings::{AppSettings, load_optional_settings, load_settings, save_settings};
pub use table_service::{ClassCounts, TableSummary, build_graph, load_rows, summarize_table};
pub use bom_report::OrderReport;
