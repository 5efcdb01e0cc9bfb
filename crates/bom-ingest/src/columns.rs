//! Header normalization and column lookup.

use crate::{IngestError, IngestResult};

/// Trim, lower-case and drop a stray byte-order mark.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Positions of the known columns in a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub item: usize,
    pub parent: usize,
    pub quantity: usize,
    pub level: usize,
    pub template: Option<usize>,
    pub procurement: Option<usize>,
    pub line_type: Option<usize>,
    pub name: Option<usize>,
}

const ITEM: &[&str] = &["item"];
const PARENT: &[&str] = &["parentpart", "parent"];
const QUANTITY: &[&str] = &["qtyper", "quantityper", "qty"];
const LEVEL: &[&str] = &["level"];
const TEMPLATE: &[&str] = &["template"];
const PROCUREMENT: &[&str] = &["makebuy", "procurement"];
const LINE_TYPE: &[&str] = &["linetype"];
const NAME: &[&str] = &["name", "description"];

impl ColumnMap {
    /// Map normalized headers onto columns; the first alias found wins.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> IngestResult<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| normalize_header(h.as_ref()))
            .collect();
        let find = |aliases: &[&str]| {
            aliases
                .iter()
                .find_map(|alias| normalized.iter().position(|h| h == alias))
        };
        let require = |aliases: &[&str], column: &'static str| {
            find(aliases).ok_or(IngestError::MissingColumn { column })
        };

        Ok(Self {
            item: require(ITEM, "item")?,
            parent: require(PARENT, "parentpart")?,
            quantity: require(QUANTITY, "qtyper")?,
            level: require(LEVEL, "level")?,
            template: find(TEMPLATE),
            procurement: find(PROCUREMENT),
            line_type: find(LINE_TYPE),
            name: find(NAME),
        })
    }
}
