//! Tolerant text-to-number coercion for burned-area spreadsheets.
//!
//! Government exports format hectares as `"1,234"`, `"1 234"` or
//! `"1\u{a0}234"`. Separators are stripped before parsing. The "not a number"
//! case is an explicit `None` so callers have to decide what to do with it.

/// Parse a number after stripping thousands separators.
///
/// Commas and every Unicode whitespace character are removed. Returns `None`
/// for empty input, unparseable text and non-finite results (`"NaN"`,
/// `"inf"`, overflow).
///
/// ```
/// use burnmap_core::ingest::numeric::coerce_number;
///
/// assert_eq!(coerce_number("1,234"), Some(1234.0));
/// assert_eq!(coerce_number(" 12 500.5 "), Some(12500.5));
/// assert_eq!(coerce_number("n/a"), None);
/// ```
pub fn coerce_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// [`coerce_number`] for an optional cell; absent cells are not numbers.
#[inline]
pub fn coerce_field(raw: Option<&str>) -> Option<f64> {
    raw.and_then(coerce_number)
}
