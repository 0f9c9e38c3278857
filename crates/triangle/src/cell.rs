//! Cell parsing with sentinel detection.

use crate::error::TriangleError;

/// Cell texts that mean "no value", compared case-insensitively after
/// trimming. An empty cell is also absent.
pub const SENTINELS: [&str; 4] = [".", "NA", "Not yet published", "Not applicable"];

/// Returns `true` if `raw` marks an absent value.
pub fn is_sentinel(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || SENTINELS.iter().any(|s| s.eq_ignore_ascii_case(trimmed))
}

/// Parses one cell: `None` for a sentinel, `Some(value)` for a finite number.
///
/// Sentinels are never read as zero.
///
/// # Errors
///
/// Returns [`TriangleError::InvalidCell`] if the text is neither a sentinel
/// nor a finite number.
///
/// # Example
///
/// ```
/// use vintage_triangle::parse_cell;
///
/// assert_eq!(parse_cell(" 150.5 ").unwrap(), Some(150.5));
/// assert_eq!(parse_cell("Not yet published").unwrap(), None);
/// assert!(parse_cell("n/a?").is_err());
/// ```
pub fn parse_cell(raw: &str) -> Result<Option<f64>, TriangleError> {
    if is_sentinel(raw) {
        return Ok(None);
    }
    let invalid = || TriangleError::InvalidCell {
        value: raw.to_string(),
    };
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(Some(value))
}
