//! Number parsing for values quoted in transcripts.

use super::patterns::THOUSANDS_GROUPED;

/// Parse a number as written in a transcript (e.g. "1,696.92", "4,847",
/// "1696,92" or "1367.").
///
/// A comma followed by groups of exactly three digits is a thousands
/// separator; a single comma otherwise is a decimal separator. Trailing
/// punctuation is ignored.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim().trim_end_matches(['.', ',']);
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    if !digits.starts_with(|c: char| c.is_ascii_digit())
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return None;
    }

    let normalized = match (digits.contains(','), digits.contains('.')) {
        (true, true) => {
            // Whichever separator comes last is the decimal one
            let comma_pos = digits.rfind(',');
            let dot_pos = digits.rfind('.');
            match (comma_pos, dot_pos) {
                (Some(c), Some(d)) if c > d => digits.replace('.', "").replace(',', "."),
                _ => digits.replace(',', ""),
            }
        }
        (true, false) if THOUSANDS_GROUPED.is_match(digits) => digits.replace(',', ""),
        (true, false) if digits.matches(',').count() == 1 => digits.replace(',', "."),
        (true, false) => return None,
        (false, _) => digits.to_string(),
    };

    let value: f64 = normalized.parse().ok()?;
    Some(if negative { -value } else { value })
}
