//! Normalized BOM rows.

use crate::ids::ItemId;
use crate::numeric::Real;

/// One BOM edge/node record, already parsed and normalized.
///
/// A row says: `quantity_per` units of `item` go into one unit of `parent`.
/// The root row has no parent and `level == 0`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentRow {
    pub item: ItemId,
    pub parent: Option<ItemId>,
    pub quantity_per: Real,
    /// Free-text template; used to spot length-measured items.
    pub template: String,
    /// Raw make/buy text ("Purchased", "Production", ...).
    pub procurement_class: String,
    /// Raw line type; secondary phantom indicator.
    pub line_type: String,
    pub display_name: String,
    pub level: u32,
}

impl ComponentRow {
    /// Row with empty text fields and a level of 1.
    pub fn new(item: ItemId, parent: Option<ItemId>, quantity_per: Real) -> Self {
        Self {
            item,
            parent,
            quantity_per,
            template: String::new(),
            procurement_class: String::new(),
            line_type: String::new(),
            display_name: String::new(),
            level: 1,
        }
    }

    /// Root row: no parent, quantity 1, level 0.
    pub fn root(item: ItemId) -> Self {
        Self {
            level: 0,
            ..Self::new(item, None, 1.0)
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_procurement(mut self, procurement_class: impl Into<String>) -> Self {
        self.procurement_class = procurement_class.into();
        self
    }

    pub fn with_line_type(mut self, line_type: impl Into<String>) -> Self {
        self.line_type = line_type.into();
        self
    }

    pub fn with_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn is_root(&self) -> bool {
        self.level == 0
    }
}
