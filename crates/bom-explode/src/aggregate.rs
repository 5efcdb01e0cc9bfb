//! Reduce trace entries into order totals, length totals and a trace log.

use std::collections::BTreeMap;

use bom_core::{ItemId, Length, Real, mm, to_m};
use bom_graph::GraphIndex;

use crate::engine::Explosion;
use crate::trace::{EntryKind, TraceEntry};

/// One line of the discrete order list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderLine {
    pub item: ItemId,
    pub name: String,
    pub total_quantity: Real,
}

/// One line of the length list; totals are in millimetres.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LengthLine {
    pub item: ItemId,
    pub name: String,
    pub total_mm: Real,
}

impl LengthLine {
    pub fn length(&self) -> Length {
        mm(self.total_mm)
    }

    /// Total in metres, as stock lengths are usually ordered.
    pub fn total_m(&self) -> Real {
        to_m(self.length())
    }
}

/// Entries per recorded item, each list in traversal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceLog {
    entries: BTreeMap<ItemId, Vec<TraceEntry>>,
}

impl TraceLog {
    pub fn get(&self, item: &str) -> &[TraceEntry] {
        self.entries.get(item).map_or(&[], Vec::as_slice)
    }

    /// Traced item ids, ascending.
    pub fn items(&self) -> impl Iterator<Item = &ItemId> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &[TraceEntry])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Final result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub root: ItemId,
    /// Sorted by item id.
    pub orders: Vec<OrderLine>,
    /// Sorted by item id.
    pub lengths: Vec<LengthLine>,
    pub traces: TraceLog,
    pub skipped_unknown: usize,
    pub duplicate_paths: usize,
    pub rejected_rows: usize,
}

impl Aggregation {
    pub fn order(&self, item: &str) -> Option<&OrderLine> {
        self.orders.iter().find(|l| l.item.as_str() == item)
    }

    pub fn length(&self, item: &str) -> Option<&LengthLine> {
        self.lengths.iter().find(|l| l.item.as_str() == item)
    }
}

/// Group entries by item and sum them, keeping counts and lengths apart.
///
/// Display names come from the graph index (first non-empty name in the
/// table, empty if none).
pub fn aggregate(explosion: Explosion, graph: &GraphIndex) -> Aggregation {
    let mut counts: BTreeMap<ItemId, Real> = BTreeMap::new();
    let mut lengths: BTreeMap<ItemId, Real> = BTreeMap::new();
    let mut traces: BTreeMap<ItemId, Vec<TraceEntry>> = BTreeMap::new();

    for entry in explosion.entries {
        let totals = match entry.kind {
            EntryKind::Count => &mut counts,
            EntryKind::Length => &mut lengths,
        };
        *totals.entry(entry.item.clone()).or_insert(0.0) += entry.quantity;
        traces.entry(entry.item.clone()).or_default().push(entry);
    }

    let orders = counts
        .into_iter()
        .map(|(item, total_quantity)| OrderLine {
            name: graph.display_name(&item).to_string(),
            item,
            total_quantity,
        })
        .collect();

    let lengths = lengths
        .into_iter()
        .map(|(item, total_mm)| LengthLine {
            name: graph.display_name(&item).to_string(),
            item,
            total_mm,
        })
        .collect();

    Aggregation {
        root: explosion.root,
        orders,
        lengths,
        traces: TraceLog { entries: traces },
        skipped_unknown: explosion.skipped_unknown,
        duplicate_paths: explosion.duplicate_paths,
        rejected_rows: explosion.rejected_rows,
    }
}
