//! Trace entries: one per distinct route from the root to a recorded item.

use std::hash::{Hash, Hasher};

use bom_core::{ItemId, Real};

/// Which result table an entry feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntryKind {
    /// Discrete count.
    Count,
    /// Length in millimetres.
    Length,
}

/// One edge on a path: the child reached and the edge quantity.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    pub item: ItemId,
    pub quantity: Real,
}

impl PathStep {
    pub fn new(item: ItemId, quantity: Real) -> Self {
        Self { item, quantity }
    }
}

// Bitwise equality so a path can key a hash set.
impl PartialEq for PathStep {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item && self.quantity.to_bits() == other.quantity.to_bits()
    }
}

impl Eq for PathStep {}

impl Hash for PathStep {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.item.hash(state);
        self.quantity.to_bits().hash(state);
    }
}

/// A recorded item with its cumulative multiplier and the path from the root.
///
/// `path` excludes the root and ends with `item`, except for a root without
/// children, whose single entry has an empty path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceEntry {
    pub item: ItemId,
    pub kind: EntryKind,
    pub quantity: Real,
    pub path: Vec<PathStep>,
}

impl TraceEntry {
    pub fn new(item: ItemId, kind: EntryKind, quantity: Real, path: Vec<PathStep>) -> Self {
        Self {
            item,
            kind,
            quantity,
            path,
        }
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// `R -> P -> L`, starting at `root`.
    pub fn render_path(&self, root: &ItemId) -> String {
        let mut out = root.to_string();
        for step in &self.path {
            out.push_str(" -> ");
            out.push_str(step.item.as_str());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn id(s: &str) -> ItemId {
        ItemId::new(s).unwrap()
    }

    #[test]
    fn path_steps_hash_by_bits() {
        let mut seen = HashSet::new();
        assert!(seen.insert(vec![PathStep::new(id("P"), 3.0)]));
        assert!(!seen.insert(vec![PathStep::new(id("P"), 3.0)]));
        assert!(seen.insert(vec![PathStep::new(id("P"), 3.5)]));
        assert!(seen.insert(vec![PathStep::new(id("Q"), 3.0)]));
    }

    #[test]
    fn render_includes_root() {
        let entry = TraceEntry::new(
            id("L"),
            EntryKind::Length,
            15.0,
            vec![PathStep::new(id("P"), 3.0), PathStep::new(id("L"), 5.0)],
        );
        assert_eq!(entry.render_path(&id("R")), "R -> P -> L");
        assert_eq!(entry.depth(), 2);
    }
}
