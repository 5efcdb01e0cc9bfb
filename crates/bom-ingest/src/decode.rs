//! Byte decoding of the export file.

use serde::{Deserialize, Serialize};

use crate::{IngestError, IngestResult};

/// Text encoding of the input file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// ISO-8859-1: every byte is the code point of the same value.
    #[default]
    Latin1,
    Utf8,
}

pub fn decode(bytes: &[u8], encoding: Encoding) -> IngestResult<String> {
    match encoding {
        Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        Encoding::Utf8 => {
            let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
            String::from_utf8(bytes.to_vec()).map_err(|e| IngestError::Encoding(e.to_string()))
        }
    }
}
