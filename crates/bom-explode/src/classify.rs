//! Procurement classification of BOM rows.

use bom_core::ComponentRow;

/// How a row behaves during explosion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NodeClass {
    /// Purchased; orderable line, explosion stops here.
    Buy,
    /// Produced in-house; orderable line, explosion stops here.
    Make,
    /// Pass-through assembly without inventory identity.
    Phantom,
    /// Unrecognised procurement text; neither recorded nor exploded.
    Unknown,
}

impl NodeClass {
    /// Buy and make rows end the explosion and become order lines.
    pub fn is_terminal(self) -> bool {
        matches!(self, NodeClass::Buy | NodeClass::Make)
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeClass::Buy => "buy",
            NodeClass::Make => "make",
            NodeClass::Phantom => "phantom",
            NodeClass::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for NodeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a row from its procurement class and line type.
pub fn classify(row: &ComponentRow) -> NodeClass {
    classify_fields(&row.procurement_class, &row.line_type)
}

/// Case-insensitive substring rules over both fields:
/// "purch" wins, then "production" (phantom if "phantom" also occurs).
pub fn classify_fields(procurement_class: &str, line_type: &str) -> NodeClass {
    let procurement_class = procurement_class.to_lowercase();
    let line_type = line_type.to_lowercase();
    let either = |needle: &str| procurement_class.contains(needle) || line_type.contains(needle);

    if either("purch") {
        NodeClass::Buy
    } else if either("production") {
        if either("phantom") {
            NodeClass::Phantom
        } else {
            NodeClass::Make
        }
    } else {
        NodeClass::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchased_is_buy() {
        assert_eq!(classify_fields("Purchased", ""), NodeClass::Buy);
        assert_eq!(classify_fields("PURCH", "Normal"), NodeClass::Buy);
        assert_eq!(classify_fields("", "purchase part"), NodeClass::Buy);
    }

    #[test]
    fn production_is_make_unless_phantom() {
        assert_eq!(classify_fields("Production", "Normal"), NodeClass::Make);
        assert_eq!(classify_fields("Production", "Phantom"), NodeClass::Phantom);
        assert_eq!(classify_fields("Production (phantom)", ""), NodeClass::Phantom);
    }

    #[test]
    fn phantom_without_production_is_unknown() {
        assert_eq!(classify_fields("", "Phantom"), NodeClass::Unknown);
        assert_eq!(classify_fields("Subcontract", ""), NodeClass::Unknown);
        assert_eq!(classify_fields("", ""), NodeClass::Unknown);
    }

    #[test]
    fn terminal_classes() {
        assert!(NodeClass::Buy.is_terminal());
        assert!(NodeClass::Make.is_terminal());
        assert!(!NodeClass::Phantom.is_terminal());
        assert!(!NodeClass::Unknown.is_terminal());
        assert_eq!(NodeClass::Phantom.to_string(), "phantom");
    }
}
