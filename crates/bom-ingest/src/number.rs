//! Locale-tolerant number parsing.

/// Parse a decimal that may use a comma as decimal separator.
///
/// Returns `None` for blank, malformed or non-finite input.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a BOM level: a non-negative integer, possibly written as `"2,0"`.
pub fn parse_level(text: &str) -> Option<u32> {
    let value = parse_decimal(text)?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}
