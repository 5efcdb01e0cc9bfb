//! Report storage API.
//!
//! Layout per report: `<root>/<report_id>/report.json`, `order_list.csv`,
//! `length_list.csv` and `traces.jsonl` (one trace entry per line).

use std::fs;
use std::path::{Path, PathBuf};

use bom_explode::{TraceEntry, TraceLog};

use crate::types::OrderReport;
use crate::{ReportError, ReportResult};

#[derive(Clone)]
pub struct ReportStore {
    root_dir: PathBuf,
}

impl ReportStore {
    pub fn new(root_dir: PathBuf) -> ReportResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn report_dir(&self, report_id: &str) -> PathBuf {
        self.root_dir.join(report_id)
    }

    pub fn has_report(&self, report_id: &str) -> bool {
        self.report_dir(report_id).join("report.json").exists()
    }

    pub fn save_report(&self, report: &OrderReport, traces: &TraceLog) -> ReportResult<PathBuf> {
        let dir = self.report_dir(&report.report_id);
        fs::create_dir_all(&dir)?;

        let report_json = serde_json::to_string_pretty(report)?;
        fs::write(dir.join("report.json"), report_json)?;

        let mut orders = csv::Writer::from_path(dir.join("order_list.csv"))?;
        for line in &report.orders {
            orders.serialize(line)?;
        }
        orders.flush()?;

        let mut lengths = csv::Writer::from_path(dir.join("length_list.csv"))?;
        for line in &report.lengths {
            lengths.serialize(line)?;
        }
        lengths.flush()?;

        let mut trace_content = String::new();
        for (_, entries) in traces.iter() {
            for entry in entries {
                trace_content.push_str(&serde_json::to_string(entry)?);
                trace_content.push('\n');
            }
        }
        fs::write(dir.join("traces.jsonl"), trace_content)?;

        Ok(dir)
    }

    pub fn load_report(&self, report_id: &str) -> ReportResult<OrderReport> {
        let path = self.report_dir(report_id).join("report.json");
        if !path.exists() {
            return Err(ReportError::ReportNotFound {
                report_id: report_id.to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_traces(&self, report_id: &str) -> ReportResult<Vec<TraceEntry>> {
        let path = self.report_dir(report_id).join("traces.jsonl");
        if !path.exists() {
            return Err(ReportError::ReportNotFound {
                report_id: report_id.to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        let mut entries = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                entries.push(serde_json::from_str(line)?);
            }
        }
        Ok(entries)
    }

    /// All stored reports, ordered by report id.
    pub fn list_reports(&self) -> ReportResult<Vec<OrderReport>> {
        let mut reports = Vec::new();
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let report_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(report) = self.load_report(&report_id) {
                    reports.push(report);
                }
            }
        }
        reports.sort_by(|a, b| a.report_id.cmp(&b.report_id));
        Ok(reports)
    }

    pub fn delete_report(&self, report_id: &str) -> ReportResult<()> {
        let dir = self.report_dir(report_id);
        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        Ok(())
    }
}
