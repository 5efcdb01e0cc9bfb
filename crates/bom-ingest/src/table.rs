//! Table parsing: delimited text -> `ComponentRow`s.

use std::path::Path;

use bom_core::{ComponentRow, ItemId};
use serde::{Deserialize, Serialize};

use crate::columns::ColumnMap;
use crate::decode::{Encoding, decode};
use crate::number::{parse_decimal, parse_level};
use crate::{IngestError, IngestResult};

/// Separator written by the ERP export.
pub const DEFAULT_SEPARATOR: &str = "(#)";

// Multi-byte separators are rewritten to this byte before csv parsing.
const UNIT_SEPARATOR: u8 = 0x1f;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    pub separator: String,
    pub encoding: Encoding,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            encoding: Encoding::default(),
        }
    }
}

/// Read and parse a BOM export file.
pub fn read_table(path: &Path, options: &IngestOptions) -> IngestResult<Vec<ComponentRow>> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_table(&bytes, options)
}

/// Parse raw file content. Rows come back in file order.
pub fn parse_table(bytes: &[u8], options: &IngestOptions) -> IngestResult<Vec<ComponentRow>> {
    let text = decode(bytes, options.encoding)?;
    let (text, delimiter) = match options.separator.as_bytes() {
        [] => return Err(IngestError::EmptySeparator),
        [single] => (text, *single),
        _ => (
            text.replace(&options.separator, &char::from(UNIT_SEPARATOR).to_string()),
            UNIT_SEPARATOR,
        ),
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quoting(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map_or(idx as u64 + 2, csv::Position::line);
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        rows.push(parse_record(&record, &columns, line)?);
    }

    tracing::debug!(rows = rows.len(), "BOM table parsed");
    Ok(rows)
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    line: u64,
) -> IngestResult<ComponentRow> {
    let field = |i: usize| record.get(i).unwrap_or("").trim();
    let optional = |i: Option<usize>| i.map(field).unwrap_or("").to_string();

    let item = ItemId::new(field(columns.item)).map_err(|_| IngestError::MissingItem { line })?;
    let parent = ItemId::parse_optional(field(columns.parent));

    let level_text = field(columns.level);
    let level = parse_level(level_text).ok_or_else(|| IngestError::InvalidNumber {
        line,
        column: "level",
        value: level_text.to_string(),
    })?;

    // The root row's quantity is never used; exports often leave it blank
    let qty_text = field(columns.quantity);
    let quantity_per = if level == 0 && qty_text.is_empty() {
        1.0
    } else {
        parse_decimal(qty_text).ok_or_else(|| IngestError::InvalidNumber {
            line,
            column: "qtyper",
            value: qty_text.to_string(),
        })?
    };

    Ok(ComponentRow {
        item,
        parent,
        quantity_per,
        template: optional(columns.template),
        procurement_class: optional(columns.procurement),
        line_type: optional(columns.line_type),
        display_name: optional(columns.name),
        level,
    })
}
