//! bom-explode: multi-level BOM explosion.
//!
//! Turns a parent/child component table into a flat order list: total
//! quantity per orderable item for one unit of the root, a separate list of
//! length-measured items in millimetres, and every path that produced them.
//!
//! # Example
//!
//! ```
//! use bom_core::{ComponentRow, ItemId};
//! use bom_explode::{ExplodeSettings, explode_rows};
//!
//! let id = |s: &str| ItemId::new(s).unwrap();
//! let rows = vec![
//!     ComponentRow::root(id("R")),
//!     ComponentRow::new(id("A"), Some(id("R")), 2.0).with_procurement("Production"),
//! ];
//! let result = explode_rows(rows, &ExplodeSettings::default()).unwrap();
//! assert_eq!(result.order("A").unwrap().total_quantity, 2.0);
//! ```

pub mod aggregate;
pub mod classify;
pub mod engine;
pub mod error;
pub mod length;
pub mod trace;

pub use aggregate::{Aggregation, LengthLine, OrderLine, TraceLog, aggregate};
pub use classify::{NodeClass, classify, classify_fields};
pub use engine::{DEFAULT_MAX_DEPTH, ExplodeOptions, Exploder, Explosion, explode};
pub use error::{ExplodeError, ExplodeResult};
pub use length::{DEFAULT_LENGTH_MARKER, LengthRule, TemplateMarker, is_length};
pub use trace::{EntryKind, PathStep, TraceEntry};

use bom_core::ComponentRow;
use bom_graph::{GraphBuilder, InvalidQuantityPolicy};

/// Everything that parameterizes a run from rows to totals.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExplodeSettings {
    pub max_depth: usize,
    pub length_marker: String,
    pub invalid_quantity: InvalidQuantityPolicy,
}

impl Default for ExplodeSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            length_marker: DEFAULT_LENGTH_MARKER.to_string(),
            invalid_quantity: InvalidQuantityPolicy::default(),
        }
    }
}

/// Build the index, explode from the root and aggregate in one go.
pub fn explode_rows(
    rows: impl IntoIterator<Item = ComponentRow>,
    settings: &ExplodeSettings,
) -> ExplodeResult<Aggregation> {
    let mut builder = GraphBuilder::new().with_invalid_quantity(settings.invalid_quantity);
    builder.extend(rows);
    let graph = builder.build()?;

    let explosion = Exploder::new(&graph)
        .with_length_rule(TemplateMarker::new(&settings.length_marker))
        .with_options(ExplodeOptions {
            max_depth: settings.max_depth,
        })
        .explode()?;

    Ok(aggregate(explosion, &graph))
}
