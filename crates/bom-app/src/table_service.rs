//! Table loading, graph building and the validation summary.

use std::collections::HashSet;
use std::path::Path;

use bom_core::ComponentRow;
use bom_explode::{LengthRule, NodeClass, TemplateMarker, classify};
use bom_graph::{GraphBuilder, GraphIndex};

use crate::error::AppResult;
use crate::settings::AppSettings;

/// Number of table rows per procurement class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub buy: usize,
    pub make: usize,
    pub phantom: usize,
    pub unknown: usize,
}

impl ClassCounts {
    fn record(&mut self, class: NodeClass) {
        match class {
            NodeClass::Buy => self.buy += 1,
            NodeClass::Make => self.make += 1,
            NodeClass::Phantom => self.phantom += 1,
            NodeClass::Unknown => self.unknown += 1,
        }
    }
}

/// What `validate` reports about a table without exploding it.
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub row_count: usize,
    pub root: String,
    pub root_name: String,
    pub item_count: usize,
    pub parent_count: usize,
    /// Class counts over non-root rows.
    pub classes: ClassCounts,
    pub length_rows: usize,
    pub rejected_rows: usize,
}

/// Read the table at `path` with the ingest part of `settings`.
pub fn load_rows(path: &Path, settings: &AppSettings) -> AppResult<Vec<ComponentRow>> {
    let rows = bom_ingest::read_table(path, &settings.ingest_options())?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "table loaded");
    Ok(rows)
}

pub fn build_graph(rows: Vec<ComponentRow>, settings: &AppSettings) -> AppResult<GraphIndex> {
    let mut builder = GraphBuilder::new().with_invalid_quantity(settings.invalid_quantity);
    builder.extend(rows);
    Ok(builder.build()?)
}

/// Build the graph and count what is in it.
pub fn summarize_table(rows: Vec<ComponentRow>, settings: &AppSettings) -> AppResult<TableSummary> {
    let graph = build_graph(rows, settings)?;
    let marker = TemplateMarker::new(&settings.length_marker);
    let rejected: HashSet<usize> = graph.rejected_rows().iter().map(|r| r.row).collect();

    let mut classes = ClassCounts::default();
    let mut length_rows = 0;
    for (i, row) in graph.rows().iter().enumerate() {
        if row.is_root() || rejected.contains(&i) {
            continue;
        }
        classes.record(classify(row));
        if marker.is_length(row) {
            length_rows += 1;
        }
    }

    let root = graph.root();
    Ok(TableSummary {
        row_count: graph.rows().len(),
        root: root.to_string(),
        root_name: graph.display_name(root).to_string(),
        item_count: graph.item_count(),
        parent_count: graph.parent_count(),
        classes,
        length_rows,
        rejected_rows: rejected.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bom_core::ItemId;
    use bom_graph::InvalidQuantityPolicy;

    fn id(s: &str) -> ItemId {
        ItemId::new(s).unwrap()
    }

    fn rows() -> Vec<ComponentRow> {
        vec![
            ComponentRow::root(id("R")).with_name("Frame"),
            ComponentRow::new(id("P"), Some(id("R")), 1.0)
                .with_procurement("Production")
                .with_line_type("Phantom"),
            ComponentRow::new(id("B"), Some(id("P")), 2.0).with_procurement("Purchase"),
            ComponentRow::new(id("L"), Some(id("R")), 3.0)
                .with_procurement("Purchase")
                .with_template("Tube 20mm"),
            ComponentRow::new(id("M"), Some(id("R")), 1.0).with_procurement("Production"),
            ComponentRow::new(id("X"), Some(id("R")), 0.0).with_procurement("Service"),
        ]
    }

    #[test]
    fn counts_classes_and_lengths() {
        let settings = AppSettings {
            invalid_quantity: InvalidQuantityPolicy::Skip,
            ..AppSettings::default()
        };
        let summary = summarize_table(rows(), &settings).unwrap();

        assert_eq!(summary.row_count, 6);
        assert_eq!(summary.root, "R");
        assert_eq!(summary.root_name, "Frame");
        assert_eq!(summary.item_count, 6);
        assert_eq!(
            summary.classes,
            ClassCounts {
                buy: 2,
                make: 1,
                phantom: 1,
                unknown: 0,
            }
        );
        assert_eq!(summary.length_rows, 1);
        assert_eq!(summary.rejected_rows, 1);
    }

    #[test]
    fn reject_policy_fails_summary() {
        assert!(summarize_table(rows(), &AppSettings::default()).is_err());
    }
}
