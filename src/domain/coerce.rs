//! Lenient field coercion for externally supplied records.
//!
//! Every helper here maps a malformed value to a safe default instead of
//! failing; callers decide whether the substitution is worth a log line.

/// Parse a decimal string as a non-negative finite number.
///
/// Returns `None` for empty, non-numeric, negative, NaN or infinite input.
pub fn parse_non_negative(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 { Some(value) } else { None }
}

/// Parse a decimal string, substituting `0.0` for anything unusable.
pub fn non_negative_or_zero(raw: &str) -> f64 {
    parse_non_negative(raw).unwrap_or(0.0)
}

/// Clamp an in-memory amount to `[0, ∞]`, mapping NaN and negatives to zero.
///
/// Positive infinity is kept.
pub fn clamp_non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 { 0.0 } else { value }
}

/// Clamp a relative weight to a finite non-negative value.
pub fn clamp_weight(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// Parse a boolean flag using the usual spreadsheet spellings.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parse an unsigned identifier, rejecting negatives, blanks and fractions.
pub fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}
