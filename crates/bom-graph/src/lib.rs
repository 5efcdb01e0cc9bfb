//! bom-graph: graph index layer for BOM explosion.
//!
//! Provides:
//! - The parent -> children adjacency index (`GraphIndex`)
//! - An incremental builder that resolves the root and validates rows
//! - The policy for rows whose quantity is not a positive number
//!
//! # Example
//!
//! ```
//! use bom_core::{ComponentRow, ItemId};
//! use bom_graph::GraphBuilder;
//!
//! let id = |s: &str| ItemId::new(s).unwrap();
//! let mut builder = GraphBuilder::new();
//! builder.add_row(ComponentRow::root(id("R")));
//! builder.add_row(ComponentRow::new(id("A"), Some(id("R")), 2.0));
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.root().as_str(), "R");
//! assert_eq!(graph.children(&id("R")).count(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::{GraphBuilder, InvalidQuantityPolicy};
pub use error::{GraphError, GraphResult};
pub use graph::{GraphIndex, RejectedRow};
