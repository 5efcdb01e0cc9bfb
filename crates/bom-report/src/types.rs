//! Report data types.

use bom_explode::{Aggregation, LengthLine, OrderLine};
use serde::{Deserialize, Serialize};

pub type ReportId = String;

/// Counters that make silently dropped material visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    pub skipped_unknown: usize,
    pub duplicate_paths: usize,
    pub rejected_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReport {
    pub report_id: ReportId,
    pub root: String,
    pub root_name: String,
    pub timestamp: String,
    pub orders: Vec<OrderLine>,
    pub lengths: Vec<LengthLine>,
    pub counters: RunCounters,
}

impl OrderReport {
    pub fn from_aggregation(
        aggregation: &Aggregation,
        report_id: ReportId,
        root_name: &str,
        timestamp: String,
    ) -> Self {
        Self {
            report_id,
            root: aggregation.root.to_string(),
            root_name: root_name.to_string(),
            timestamp,
            orders: aggregation.orders.clone(),
            lengths: aggregation.lengths.clone(),
            counters: RunCounters {
                skipped_unknown: aggregation.skipped_unknown,
                duplicate_paths: aggregation.duplicate_paths,
                rejected_rows: aggregation.rejected_rows,
            },
        }
    }
}
