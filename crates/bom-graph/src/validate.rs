//! Row validation logic.

use bom_core::{ComponentRow, ensure_positive};

use crate::builder::InvalidQuantityPolicy;
use crate::error::{GraphError, GraphResult};
use crate::graph::RejectedRow;

/// Position of the root row: the first row with `level == 0`.
pub(crate) fn find_root(rows: &[ComponentRow]) -> GraphResult<usize> {
    rows.iter()
        .position(ComponentRow::is_root)
        .ok_or(GraphError::MissingRoot)
}

/// Validate every non-root row: parent present, quantity positive.
///
/// Under [`InvalidQuantityPolicy::Skip`] bad-quantity rows are returned as
/// rejected instead of failing the build. A missing parent is always fatal.
pub(crate) fn validate_rows(
    rows: &[ComponentRow],
    root_index: usize,
    policy: InvalidQuantityPolicy,
) -> GraphResult<Vec<RejectedRow>> {
    let mut rejected = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        if i == root_index {
            continue;
        }

        // Secondary level-0 rows without a parent carry no edge; nothing to check
        if row.is_root() && row.parent.is_none() {
            continue;
        }

        if row.parent.is_none() {
            return Err(GraphError::MissingParent {
                row: i,
                item: row.item.clone(),
            });
        }

        if let Err(reason) = ensure_positive(row.quantity_per, "qtyper") {
            match policy {
                InvalidQuantityPolicy::Reject => {
                    return Err(GraphError::InvalidQuantity {
                        row: i,
                        item: row.item.clone(),
                        value: row.quantity_per,
                    });
                }
                InvalidQuantityPolicy::Skip => rejected.push(RejectedRow {
                    row: i,
                    item: row.item.clone(),
                    parent: row.parent.clone(),
                    reason,
                }),
            }
        }
    }

    Ok(rejected)
}
