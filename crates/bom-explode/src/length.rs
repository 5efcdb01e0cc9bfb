//! Length predicate: which rows are ordered by length instead of by count.

use bom_core::ComponentRow;

/// Decides whether a row is a length-measured item.
///
/// Closures `Fn(&ComponentRow) -> bool` implement this too, so callers can
/// swap the rule without touching traversal.
pub trait LengthRule {
    fn is_length(&self, row: &ComponentRow) -> bool;
}

impl<F> LengthRule for F
where
    F: Fn(&ComponentRow) -> bool,
{
    fn is_length(&self, row: &ComponentRow) -> bool {
        self(row)
    }
}

/// Default marker searched for in the template text.
pub const DEFAULT_LENGTH_MARKER: &str = "mm";

/// Matches rows whose template contains a marker, case-insensitively.
///
/// An empty marker matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMarker {
    marker: String,
}

impl TemplateMarker {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.trim().to_lowercase(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl Default for TemplateMarker {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH_MARKER)
    }
}

impl LengthRule for TemplateMarker {
    fn is_length(&self, row: &ComponentRow) -> bool {
        !self.marker.is_empty() && row.template.to_lowercase().contains(&self.marker)
    }
}

/// The default rule: template contains "mm".
pub fn is_length(row: &ComponentRow) -> bool {
    TemplateMarker::default().is_length(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bom_core::ItemId;

    fn row(template: &str) -> ComponentRow {
        ComponentRow::new(ItemId::new("L").unwrap(), ItemId::parse_optional("R"), 1.0)
            .with_template(template)
    }

    #[test]
    fn default_marker_is_case_insensitive() {
        assert!(is_length(&row("Tube 10mm")));
        assert!(is_length(&row("PROFILE-MM")));
        assert!(!is_length(&row("Bolt M6")));
        assert!(!is_length(&row("")));
    }

    #[test]
    fn custom_marker_and_closure() {
        let metre = TemplateMarker::new(" Meter ");
        assert_eq!(metre.marker(), "meter");
        assert!(metre.is_length(&row("per meter")));
        assert!(!metre.is_length(&row("10mm")));

        let never = |_: &ComponentRow| false;
        assert!(!never.is_length(&row("10mm")));
    }

    #[test]
    fn empty_marker_matches_nothing() {
        assert!(!TemplateMarker::new("").is_length(&row("anything")));
    }
}
