use crate::core::CellValue;

/// Total numeric coercion: every cell yields a finite number, never an error.
///
/// Numbers pass through unchanged (non-finite values normalize to `0.0`).
/// Strings are stripped of every character outside `[0-9.-]`, then the
/// longest parseable prefix is read as a float. Anything else, including
/// empty cells and booleans, coerces to `0.0`.
///
/// Garbage silently becoming zero is deliberate compatibility behavior:
/// downstream chart construction assumes every y-column cell is plottable,
/// and one bad cell must not abort rendering of the whole column.
#[must_use]
pub fn to_number(value: &CellValue) -> f64 {
    match value {
        CellValue::Number(n) if n.is_finite() => *n,
        CellValue::Number(_) => 0.0,
        CellValue::Text(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            parse_float_prefix(&cleaned)
        }
        CellValue::Bool(_) | CellValue::Empty => 0.0,
    }
}

/// Longest-prefix float parse over a `[0-9.-]`-only string, `0.0` when no
/// prefix parses. Matches lenient `parseFloat`-style reading, so `"12.3.4"`
/// yields `12.3` instead of rejecting the whole cell.
fn parse_float_prefix(cleaned: &str) -> f64 {
    for end in (1..=cleaned.len()).rev() {
        if let Ok(parsed) = cleaned[..end].parse::<f64>() {
            if parsed.is_finite() {
                return parsed;
            }
        }
    }
    0.0
}
