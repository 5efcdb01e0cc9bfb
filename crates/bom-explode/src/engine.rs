//! Depth-first explosion with multiplier propagation.
//!
//! Starting at the root, every child edge multiplies the running quantity by
//! its `quantity_per`. The child's class decides what happens next:
//!
//! - buy/make: recorded as a terminal entry (count or length), never exploded
//!   further even if the table lists children for it
//! - phantom: passed through, its children are exploded with the multiplier
//! - unknown: skipped and counted
//!
//! A node without children is a structural leaf and recorded as well.
//!
//! Whether an item is counted or measured by length is decided once per item,
//! from its first row in the table, so no item ever lands in both lists.
//!
//! Each call returns its own [`Partial`]; callers merge them in child order.
//! The only run-scoped mutable state is the set of path keys already handled,
//! which stops duplicated table rows from being counted twice.

use std::collections::HashSet;

use bom_core::{ComponentRow, ItemId, Real};
use bom_graph::GraphIndex;

use crate::classify::{NodeClass, classify};
use crate::error::{ExplodeError, ExplodeResult};
use crate::length::{LengthRule, TemplateMarker};
use crate::trace::{EntryKind, PathStep, TraceEntry};

/// Default recursion budget.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Knobs for one explosion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplodeOptions {
    /// Maximum phantom nesting below the start item.
    pub max_depth: usize,
}

impl Default for ExplodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Raw output of a run: entries in discovery order plus counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub root: ItemId,
    /// Count and length entries, interleaved in traversal order.
    pub entries: Vec<TraceEntry>,
    /// Edges skipped because their row classified as unknown.
    pub skipped_unknown: usize,
    /// Edges skipped because the exact same path was already handled.
    pub duplicate_paths: usize,
    /// Rows the graph index dropped for an invalid quantity.
    pub rejected_rows: usize,
}

impl Explosion {
    /// Entries feeding the discrete order list.
    pub fn discrete(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Count)
    }

    /// Entries feeding the length list.
    pub fn length(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Length)
    }
}

/// Contribution of one subtree.
#[derive(Debug, Default)]
struct Partial {
    entries: Vec<TraceEntry>,
    skipped_unknown: usize,
    duplicate_paths: usize,
}

impl Partial {
    fn merge(&mut self, other: Partial) {
        self.entries.extend(other.entries);
        self.skipped_unknown += other.skipped_unknown;
        self.duplicate_paths += other.duplicate_paths;
    }
}

/// Explosion engine over a built graph index.
pub struct Exploder<'g, L = TemplateMarker> {
    graph: &'g GraphIndex,
    length_rule: L,
    options: ExplodeOptions,
}

impl<'g> Exploder<'g, TemplateMarker> {
    /// Engine with the default "mm" length rule and default options.
    pub fn new(graph: &'g GraphIndex) -> Self {
        Self {
            graph,
            length_rule: TemplateMarker::default(),
            options: ExplodeOptions::default(),
        }
    }
}

impl<'g, L: LengthRule> Exploder<'g, L> {
    /// Replace the length predicate.
    pub fn with_length_rule<M: LengthRule>(self, length_rule: M) -> Exploder<'g, M> {
        Exploder {
            graph: self.graph,
            length_rule,
            options: self.options,
        }
    }

    pub fn with_options(mut self, options: ExplodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Explode the graph's root.
    pub fn explode(&self) -> ExplodeResult<Explosion> {
        self.explode_from(self.graph.root())
    }

    /// Explode starting at any item of the table (e.g. a sub-assembly).
    pub fn explode_from(&self, start: &ItemId) -> ExplodeResult<Explosion> {
        let known = start == self.graph.root()
            || self.graph.rows().iter().any(|r| &r.item == start);
        if !known {
            return Err(ExplodeError::UnknownItem {
                item: start.clone(),
            });
        }

        let mut seen: HashSet<Vec<PathStep>> = HashSet::new();
        let partial = self.descend(start, 1.0, &[], 0, &mut seen)?;

        tracing::debug!(
            root = %start,
            entries = partial.entries.len(),
            skipped_unknown = partial.skipped_unknown,
            duplicate_paths = partial.duplicate_paths,
            "explosion finished"
        );

        Ok(Explosion {
            root: start.clone(),
            entries: partial.entries,
            skipped_unknown: partial.skipped_unknown,
            duplicate_paths: partial.duplicate_paths,
            rejected_rows: self.graph.rejected_rows().len(),
        })
    }

    fn descend(
        &self,
        node: &ItemId,
        multiplier: Real,
        path: &[PathStep],
        depth: usize,
        seen: &mut HashSet<Vec<PathStep>>,
    ) -> ExplodeResult<Partial> {
        if depth > self.options.max_depth {
            return Err(ExplodeError::DepthExceeded {
                item: node.clone(),
                depth,
                limit: self.options.max_depth,
            });
        }

        let mut partial = Partial::default();

        if !self.graph.has_children(node) {
            let kind = match self.graph.first_row(node) {
                Some(first) => self.route(first),
                None => EntryKind::Count,
            };
            partial
                .entries
                .push(TraceEntry::new(node.clone(), kind, multiplier, path.to_vec()));
            return Ok(partial);
        }

        for row in self.graph.children(node) {
            let mut next_path = path.to_vec();
            next_path.push(PathStep::new(row.item.clone(), row.quantity_per));

            if seen.contains(&next_path) {
                tracing::trace!(item = %row.item, parent = %node, "duplicate path skipped");
                partial.duplicate_paths += 1;
                continue;
            }
            seen.insert(next_path.clone());

            let next_multiplier = multiplier * row.quantity_per;
            match classify(row) {
                NodeClass::Buy | NodeClass::Make => {
                    partial
                        .entries
                        .push(self.terminal(row, next_multiplier, next_path));
                }
                NodeClass::Phantom => {
                    let sub =
                        self.descend(&row.item, next_multiplier, &next_path, depth + 1, seen)?;
                    partial.merge(sub);
                }
                NodeClass::Unknown => {
                    tracing::warn!(
                        item = %row.item,
                        parent = %node,
                        procurement = %row.procurement_class,
                        line_type = %row.line_type,
                        "unknown classification, row skipped"
                    );
                    partial.skipped_unknown += 1;
                }
            }
        }

        Ok(partial)
    }

    fn terminal(&self, row: &ComponentRow, quantity: Real, path: Vec<PathStep>) -> TraceEntry {
        let first = self.graph.first_row(&row.item).unwrap_or(row);
        let kind = self.route(first);
        if self.route(row) != kind {
            tracing::warn!(
                item = %row.item,
                template = %row.template,
                first_template = %first.template,
                route = ?kind,
                "template disagrees with the item's first row, keeping the first row's route"
            );
        }
        TraceEntry::new(row.item.clone(), kind, quantity, path)
    }

    fn route(&self, row: &ComponentRow) -> EntryKind {
        if self.length_rule.is_length(row) {
            EntryKind::Length
        } else {
            EntryKind::Count
        }
    }
}

/// Explode `graph` from its root with the default length rule.
pub fn explode(graph: &GraphIndex, options: ExplodeOptions) -> ExplodeResult<Explosion> {
    Exploder::new(graph).with_options(options).explode()
}
