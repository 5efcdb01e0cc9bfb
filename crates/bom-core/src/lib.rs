//! bom-core: stable foundation for the BOM explosion workspace.
//!
//! Contains:
//! - ids (canonical component identifiers)
//! - row (normalized BOM rows as handed to the engine)
//! - numeric (Real + tolerances + float helpers)
//! - units (uom length types for length-measured items)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod row;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{BomError, BomResult};
pub use ids::ItemId;
pub use numeric::*;
pub use row::ComponentRow;
pub use units::*;
