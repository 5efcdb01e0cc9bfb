//! Trace queries: which paths produced an item.

use std::path::Path;

use bom_core::ItemId;
use bom_explode::{Aggregation, EntryKind, TraceEntry};
use bom_report::ReportStore;

use crate::error::{AppError, AppResult};

/// One rendered path to an item.
#[derive(Debug, Clone, PartialEq)]
pub struct TracePath {
    /// 1-based, in traversal order.
    pub number: usize,
    pub kind: EntryKind,
    /// Cumulative quantity (pieces or mm) along this path.
    pub quantity: f64,
    /// `R -> P -> L`
    pub path: String,
}

fn render(entries: &[TraceEntry], root: &ItemId) -> Vec<TracePath> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| TracePath {
            number: i + 1,
            kind: entry.kind,
            quantity: entry.quantity,
            path: entry.render_path(root),
        })
        .collect()
}

/// Every path that produced `item`, for both count and length entries.
pub fn trace_item(aggregation: &Aggregation, item: &str) -> AppResult<Vec<TracePath>> {
    let key = ItemId::new(item)?;
    let entries = aggregation.traces.get(&key);
    if entries.is_empty() {
        return Err(AppError::ItemNotTraced(key.to_string()));
    }
    Ok(render(entries, &aggregation.root))
}

/// Same as [`trace_item`] but reading `traces.jsonl` of a stored report.
pub fn trace_stored_item(
    store_dir: &Path,
    report_id: &str,
    item: &str,
) -> AppResult<Vec<TracePath>> {
    let key = ItemId::new(item)?;
    let store = ReportStore::new(store_dir.to_path_buf())?;
    let report = store.load_report(report_id)?;
    let root = ItemId::new(&report.root)?;

    let entries: Vec<TraceEntry> = store
        .load_traces(report_id)?
        .into_iter()
        .filter(|e| e.item == key)
        .collect();
    if entries.is_empty() {
        return Err(AppError::ItemNotTraced(key.to_string()));
    }
    Ok(render(&entries, &root))
}

/// All traced item ids, sorted.
pub fn list_traced_items(aggregation: &Aggregation) -> Vec<String> {
    aggregation
        .traces
        .items()
        .map(|item| item.to_string())
        .collect()
}
