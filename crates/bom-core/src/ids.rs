use core::borrow::Borrow;
use core::fmt;
use core::ops::Deref;
use core::str::FromStr;

use crate::{BomError, BomResult};

/// Canonical identifier of a BOM component.
///
/// Source tables mix textual codes (`"A-100"`) with numeric codes that went
/// through a float column (`"1234.0"`). Both spellings of a numeric code map to
/// the same `ItemId`, so parent/child matching never depends on how a cell was
/// typed.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(String);

impl ItemId {
    /// Canonicalize `raw` into an identifier. Blank input is rejected.
    pub fn new(raw: &str) -> BomResult<Self> {
        let canonical = canonicalize(raw);
        if canonical.is_empty() {
            return Err(BomError::EmptyId);
        }
        Ok(Self(canonical))
    }

    /// Like [`ItemId::new`], but blank input means "no identifier".
    pub fn parse_optional(raw: &str) -> Option<Self> {
        Self::new(raw).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trim, then drop an all-zero fraction from integer-looking codes.
fn canonicalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some((int, frac)) = trimmed.split_once(['.', ',']) {
        let int_is_digits = !int.is_empty() && int.bytes().all(|b| b.is_ascii_digit());
        let frac_is_zeros = !frac.is_empty() && frac.bytes().all(|b| b == b'0');
        if int_is_digits && frac_is_zeros {
            return int.to_string();
        }
    }
    trimmed.to_string()
}

impl FromStr for ItemId {
    type Err = BomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for ItemId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
