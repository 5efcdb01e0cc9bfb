//! Incremental graph index builder.

use std::collections::{HashMap, HashSet};

use bom_core::{ComponentRow, ItemId};

use crate::error::GraphResult;
use crate::graph::GraphIndex;
use crate::validate;

/// What to do with a row whose quantity is zero, negative or not finite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InvalidQuantityPolicy {
    /// Fail the build with `GraphError::InvalidQuantity`.
    #[default]
    Reject,
    /// Leave the row out of the index and report it as rejected.
    Skip,
}

/// Builder for constructing a graph index incrementally.
///
/// Use `add_row` (or `extend`) in table order, then call `build()` to
/// resolve the root, validate rows and freeze everything into a `GraphIndex`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    rows: Vec<ComponentRow>,
    policy: InvalidQuantityPolicy,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the invalid-quantity policy (default: reject).
    pub fn with_invalid_quantity(mut self, policy: InvalidQuantityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Append one row; order of calls is the table order.
    pub fn add_row(&mut self, row: ComponentRow) -> usize {
        self.rows.push(row);
        self.rows.len() - 1
    }

    /// Number of rows added so far.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Build and validate the index.
    pub fn build(self) -> GraphResult<GraphIndex> {
        let root_index = validate::find_root(&self.rows)?;
        let rejected = validate::validate_rows(&self.rows, root_index, self.policy)?;
        for r in &rejected {
            tracing::warn!(
                row = r.row,
                item = %r.item,
                parent = ?r.parent.as_ref().map(ItemId::as_str),
                reason = %r.reason,
                "row rejected: invalid quantity"
            );
        }

        let skip: HashSet<usize> = rejected.iter().map(|r| r.row).collect();
        let children = Self::build_adjacency(&self.rows, &skip);
        let names = Self::collect_names(&self.rows);
        let first_rows = Self::collect_first_rows(&self.rows, &skip);
        let root = self.rows[root_index].item.clone();

        tracing::debug!(
            rows = self.rows.len(),
            parents = children.len(),
            rejected = rejected.len(),
            root = %root,
            "graph index built"
        );

        Ok(GraphIndex {
            rows: self.rows,
            root,
            children,
            names,
            first_rows,
            rejected,
        })
    }

    /// Group row indices by parent, keeping input order within each group.
    fn build_adjacency(
        rows: &[ComponentRow],
        skip: &HashSet<usize>,
    ) -> HashMap<ItemId, Vec<usize>> {
        let mut children: HashMap<ItemId, Vec<usize>> = HashMap::new();
        for (i, row) in rows.iter().enumerate() {
            if skip.contains(&i) {
                continue;
            }
            if let Some(parent) = &row.parent {
                children.entry(parent.clone()).or_default().push(i);
            }
        }
        children
    }

    fn collect_first_rows(rows: &[ComponentRow], skip: &HashSet<usize>) -> HashMap<ItemId, usize> {
        let mut first: HashMap<ItemId, usize> = HashMap::new();
        for (i, row) in rows.iter().enumerate() {
            if !skip.contains(&i) {
                first.entry(row.item.clone()).or_insert(i);
            }
        }
        first
    }

    fn collect_names(rows: &[ComponentRow]) -> HashMap<ItemId, String> {
        let mut names: HashMap<ItemId, String> = HashMap::new();
        for row in rows {
            let name = row.display_name.trim();
            if !name.is_empty() && !names.contains_key(&row.item) {
                names.insert(row.item.clone(), name.to_string());
            }
        }
        names
    }
}

impl Extend<ComponentRow> for GraphBuilder {
    fn extend<T: IntoIterator<Item = ComponentRow>>(&mut self, iter: T) {
        self.rows.extend(iter);
    }
}

impl FromIterator<ComponentRow> for GraphBuilder {
    fn from_iter<T: IntoIterator<Item = ComponentRow>>(iter: T) -> Self {
        let mut builder = Self::new();
        builder.extend(iter);
        builder
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn id(s: &str) -> ItemId {
        ItemId::new(s).unwrap()
    }

    proptest! {
        #[test]
        fn children_keep_table_order(parents in prop::collection::vec(0usize..4, 1..40)) {
            // Parents are P0..P3, all direct children of the root
            let mut rows = vec![ComponentRow::root(id("R"))];
            for p in 0..4 {
                rows.push(ComponentRow::new(id(&format!("P{p}")), Some(id("R")), 1.0));
            }
            for (i, &p) in parents.iter().enumerate() {
                rows.push(ComponentRow::new(id(&format!("C{i}")), Some(id(&format!("P{p}"))), 1.0));
            }
            let graph: GraphBuilder = rows.into_iter().collect();
            let graph = graph.build().unwrap();

            for p in 0..4 {
                let expected: Vec<String> = parents
                    .iter()
                    .enumerate()
                    .filter(|&(_, &q)| q == p)
                    .map(|(i, _)| format!("C{i}"))
                    .collect();
                let actual: Vec<String> = graph
                    .children(&format!("P{p}"))
                    .map(|r| r.item.to_string())
                    .collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
