//! Explode runs and report persistence.

use std::path::{Path, PathBuf};
use std::time::Instant;

use bom_explode::{Aggregation, ExplodeOptions, Exploder, TemplateMarker, aggregate};
use bom_report::{OrderReport, ReportStore, compute_report_id};

use crate::error::AppResult;
use crate::settings::AppSettings;
use crate::table_service;

/// Version string mixed into every report id.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Request to explode one table.
pub struct ExplodeRequest<'a> {
    pub table_path: &'a Path,
    pub settings: &'a AppSettings,
    /// Directory of the report store; `None` keeps the result in memory.
    pub output_dir: Option<&'a Path>,
}

/// Wall-clock split of a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub load_time_s: f64,
    pub build_time_s: f64,
    pub explode_time_s: f64,
    pub save_time_s: f64,
    pub total_time_s: f64,
}

/// Response from an explode run.
#[derive(Debug, Clone)]
pub struct ExplodeResponse {
    pub report: OrderReport,
    pub aggregation: Aggregation,
    /// Report directory, when the run was saved.
    pub saved_to: Option<PathBuf>,
    pub timing: RunTimingSummary,
}

/// Load, index, explode, aggregate and optionally save.
pub fn run_explode(request: &ExplodeRequest) -> AppResult<ExplodeResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();
    let settings = request.settings;
    settings.validate()?;

    let load_started = Instant::now();
    let rows = table_service::load_rows(request.table_path, settings)?;
    timing.load_time_s = load_started.elapsed().as_secs_f64();

    let explode_settings = settings.explode_settings();
    let report_id = compute_report_id(&rows, &explode_settings, ENGINE_VERSION);

    let build_started = Instant::now();
    let graph = table_service::build_graph(rows, settings)?;
    timing.build_time_s = build_started.elapsed().as_secs_f64();

    let explode_started = Instant::now();
    let explosion = Exploder::new(&graph)
        .with_length_rule(TemplateMarker::new(&settings.length_marker))
        .with_options(ExplodeOptions {
            max_depth: settings.max_depth,
        })
        .explode()?;
    let aggregation = aggregate(explosion, &graph);
    timing.explode_time_s = explode_started.elapsed().as_secs_f64();

    let timestamp = chrono::Utc::now().to_rfc3339();
    let root_name = graph.display_name(graph.root());
    let report = OrderReport::from_aggregation(&aggregation, report_id, root_name, timestamp);

    let saved_to = match request.output_dir {
        Some(dir) => {
            let save_started = Instant::now();
            let store = ReportStore::new(dir.to_path_buf())?;
            let path = store.save_report(&report, &aggregation.traces)?;
            timing.save_time_s = save_started.elapsed().as_secs_f64();
            Some(path)
        }
        None => None,
    };

    timing.total_time_s = started.elapsed().as_secs_f64();

    tracing::info!(
        report_id = %report.report_id,
        root = %report.root,
        orders = report.orders.len(),
        lengths = report.lengths.len(),
        skipped_unknown = report.counters.skipped_unknown,
        rejected_rows = report.counters.rejected_rows,
        total_time_s = timing.total_time_s,
        "explode run completed"
    );

    Ok(ExplodeResponse {
        report,
        aggregation,
        saved_to,
        timing,
    })
}

/// Load a stored report by id.
pub fn load_report(store_dir: &Path, report_id: &str) -> AppResult<OrderReport> {
    let store = ReportStore::new(store_dir.to_path_buf())?;
    Ok(store.load_report(report_id)?)
}

/// List stored reports, newest first.
pub fn list_reports(store_dir: &Path) -> AppResult<Vec<OrderReport>> {
    let store = ReportStore::new(store_dir.to_path_buf())?;
    let mut reports = store.list_reports()?;
    reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(reports)
}
