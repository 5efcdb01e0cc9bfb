//! Core graph index structure.

use std::collections::HashMap;

use bom_core::{BomError, ComponentRow, ItemId};

/// A row excluded from the index because its quantity was unusable.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 0-based position in the input table.
    pub row: usize,
    pub item: ItemId,
    pub parent: Option<ItemId>,
    pub reason: BomError,
}

/// The graph index: the input rows plus parent -> child adjacency.
///
/// Children of a parent are kept in input row order, so traversal (and
/// therefore trace ordering) is reproducible for identical inputs.
/// Built once by [`crate::GraphBuilder`]; read-only afterwards.
#[derive(Debug, Clone)]
pub struct GraphIndex {
    pub(crate) rows: Vec<ComponentRow>,
    pub(crate) root: ItemId,

    /// Parent id -> indices into `rows`, in input order.
    pub(crate) children: HashMap<ItemId, Vec<usize>>,

    /// First non-empty display name seen per item.
    pub(crate) names: HashMap<ItemId, String>,

    /// Index of the first indexed row per item.
    pub(crate) first_rows: HashMap<ItemId, usize>,

    pub(crate) rejected: Vec<RejectedRow>,
}

impl GraphIndex {
    /// The root assembly of this run.
    pub fn root(&self) -> &ItemId {
        &self.root
    }

    /// Return all input rows, including rejected ones.
    pub fn rows(&self) -> &[ComponentRow] {
        &self.rows
    }

    /// Get a row by its input position.
    pub fn row(&self, index: usize) -> Option<&ComponentRow> {
        self.rows.get(index)
    }

    /// Direct child rows of `parent`, in input order.
    pub fn children<'a>(
        &'a self,
        parent: &str,
    ) -> impl Iterator<Item = &'a ComponentRow> + use<'a> {
        self.child_indices(parent)
            .iter()
            .filter_map(move |&i| self.rows.get(i))
    }

    /// Input positions of the direct child rows of `parent`.
    pub fn child_indices(&self, parent: &str) -> &[usize] {
        self.children.get(parent).map_or(&[], Vec::as_slice)
    }

    pub fn has_children(&self, parent: &str) -> bool {
        !self.child_indices(parent).is_empty()
    }

    /// Number of distinct parents with at least one child.
    pub fn parent_count(&self) -> usize {
        self.children.len()
    }

    /// Number of distinct item identifiers in the table.
    pub fn item_count(&self) -> usize {
        let mut seen: std::collections::HashSet<&ItemId> = std::collections::HashSet::new();
        for row in &self.rows {
            seen.insert(&row.item);
        }
        seen.len()
    }

    /// First non-empty display name for `item`, or `""` if there is none.
    pub fn display_name(&self, item: &str) -> &str {
        self.names.get(item).map_or("", String::as_str)
    }

    /// The first row of `item` in table order, skipping rejected rows.
    ///
    /// Per-item attributes that must not vary between occurrences (the
    /// length/count route) are read from this row.
    pub fn first_row(&self, item: &str) -> Option<&ComponentRow> {
        self.first_rows.get(item).and_then(|&i| self.rows.get(i))
    }

    /// Rows dropped under [`crate::InvalidQuantityPolicy::Skip`].
    pub fn rejected_rows(&self) -> &[RejectedRow] {
        &self.rejected
    }
}
