// src/extractors/date.rs
use crate::config::patterns::{CENTURY_PREFIX, ISO_DATE_RE, SHORT_DATE_RE, SLASHED_DATE_RE};

/// Normalizes a history date token to `YYYY-MM-DD`.
///
/// `YYYY-MM-DD` passes through, `YYMMDD` gets the century prefix, and
/// `D-M-YYYY` / `D/M/YYYY` is read day-first unless only the month-first
/// reading is plausible (first group <= 12 and second > 12). Anything else
/// is returned trimmed but otherwise unchanged.
pub fn normalize_date(raw: &str) -> String {
    let cleaned = raw.trim();

    if cleaned.is_empty() || ISO_DATE_RE.is_match(cleaned) {
        return cleaned.to_string();
    }

    if let Some(caps) = SHORT_DATE_RE.captures(cleaned) {
        return format!("{}{}-{}-{}", CENTURY_PREFIX, &caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = SLASHED_DATE_RE.captures(cleaned) {
        let first: u32 = caps[1].parse().unwrap_or(0);
        let second: u32 = caps[2].parse().unwrap_or(0);
        let year = &caps[3];

        // Both readings plausible (e.g. 03/04/2025): day-first wins.
        let (month, day) = if first > 12 || second <= 12 { (second, first) } else { (first, second) };
        return format!("{}-{:02}-{:02}", year, month, day);
    }

    tracing::debug!("Unrecognised date format, passing through: '{}'", cleaned);
    cleaned.to_string()
}
