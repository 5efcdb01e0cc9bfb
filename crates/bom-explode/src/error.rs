//! Error types for explosion runs.

use bom_core::ItemId;
use bom_graph::GraphError;
use thiserror::Error;

/// Errors that abort an explosion run. A failed run yields no totals.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExplodeError {
    #[error(
        "Recursion budget exceeded at {item}: depth {depth} > {limit} (cyclic or unexpectedly deep BOM)"
    )]
    DepthExceeded {
        item: ItemId,
        depth: usize,
        limit: usize,
    },

    #[error("Start item not found in table: {item}")]
    UnknownItem { item: ItemId },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type ExplodeResult<T> = Result<T, ExplodeError>;
