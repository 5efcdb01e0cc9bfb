//! Graph-specific error types.

use bom_core::ItemId;

/// Graph construction and validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// No row has `level == 0`.
    MissingRoot,

    /// A row's quantity is zero, negative or not finite.
    InvalidQuantity { row: usize, item: ItemId, value: f64 },

    /// A non-root row has no parent.
    MissingParent { row: usize, item: ItemId },
}

pub type GraphResult<T> = Result<T, GraphError>;

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::MissingRoot => {
                write!(f, "No root row found (no row with level 0)")
            }
            GraphError::InvalidQuantity { row, item, value } => {
                write!(
                    f,
                    "Row {} ({}) has invalid quantity {} (expected a positive number)",
                    row, item, value
                )
            }
            GraphError::MissingParent { row, item } => {
                write!(f, "Row {} ({}) is not a root row but has no parent", row, item)
            }
        }
    }
}

impl std::error::Error for GraphError {}
