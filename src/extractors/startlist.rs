// src/extractors/startlist.rs
//! Startlist table: column headers and competitor assembly. A competitor is
//! a horse row, optionally followed by an additional-info row and an
//! extended row holding the previous-starts table.

use crate::config::patterns::{
    ADDITIONAL_ROW_CLASS, ADDITIONAL_ROW_ID, ADDITIONAL_ROW_ID_FRAGMENT, ATTR_EXPORT_TYPE, ATTR_TEST_ID,
    COLUMN_PREFIX, EXTENDED_ROW_CLASS, HORSE_PREFIX, HORSE_ROW_CLASS, HORSE_ROW_PREFIX, HORSE_ROW_RE,
};
use crate::config::selectors::{HEADER_LABEL, TABLE_HEADERS_LOCATOR, TBODY};
use crate::extractors::fields::{extract_additional_row_data, extract_row_data};
use crate::extractors::history::extract_history;
use crate::extractors::locator::{
    belongs_to_table, child_elements, class_contains, first_match, get_attribute, has_class, text_of,
};
use crate::extractors::Step;
use crate::models::{keys, ColumnHeader, Competitor};
use scraper::ElementRef;

// --- Headers ---

/// Column headers of the startlist table, in column order.
pub fn extract_table_headers(table: ElementRef<'_>) -> Vec<ColumnHeader> {
    // Ownership is checked per expression: a nested table's header cells
    // alone must not stop the row-based fallbacks from being tried.
    TABLE_HEADERS_LOCATOR
        .find_all_where(table, |cell| belongs_to_table(cell, table))
        .into_iter()
        .enumerate()
        .map(|(index, cell)| {
            let label_element = first_match(cell, &HEADER_LABEL);
            ColumnHeader {
                index,
                label: text_of(label_element.unwrap_or(cell)),
                export_type: get_attribute(cell, ATTR_EXPORT_TYPE, None)
                    .unwrap_or_else(|| format!("{}{}", COLUMN_PREFIX, index)),
                test_id: label_element.and_then(|label| get_attribute(label, ATTR_TEST_ID, None)),
            }
        })
        .collect()
}

// --- Row classification ---

pub fn is_horse_row(row: ElementRef<'_>) -> bool {
    let by_id = row
        .value()
        .attr(ATTR_TEST_ID)
        .map(|id| id.starts_with(HORSE_ROW_PREFIX) || HORSE_ROW_RE.is_match(id))
        .unwrap_or(false);
    by_id || has_class(row, HORSE_ROW_CLASS)
}

pub fn is_additional_row(row: ElementRef<'_>) -> bool {
    let by_id = row
        .value()
        .attr(ATTR_TEST_ID)
        .map(|id| id == ADDITIONAL_ROW_ID || id.contains(ADDITIONAL_ROW_ID_FRAGMENT))
        .unwrap_or(false);
    by_id || has_class(row, ADDITIONAL_ROW_CLASS)
}

pub fn is_extended_row(row: ElementRef<'_>) -> bool {
    class_contains(row, EXTENDED_ROW_CLASS)
}

// --- Assembly ---

/// All competitors of a startlist table, in row order.
pub fn extract_competitors(table: ElementRef<'_>, headers: &[ColumnHeader]) -> Vec<Competitor> {
    let Some(tbody) = first_match(table, &TBODY) else {
        tracing::warn!("Startlist table has no body");
        return Vec::new();
    };
    let rows = child_elements(tbody, "tr");

    let mut competitors = Vec::new();
    let mut cursor = 0;
    while cursor < rows.len() {
        let step = next_competitor(&rows, cursor, headers);
        competitors.extend(step.record);
        cursor += step.consumed;
    }

    tracing::debug!("Assembled {} competitors from {} rows", competitors.len(), rows.len());
    competitors
}

/// Reads the competitor starting at `rows[cursor]`, absorbing a trailing
/// additional-info row and then an extended row if present.
pub fn next_competitor(rows: &[ElementRef<'_>], cursor: usize, headers: &[ColumnHeader]) -> Step<Competitor> {
    let row = rows[cursor];
    if !is_horse_row(row) {
        tracing::trace!("Skipping non-horse row {}", cursor);
        return Step::skip();
    }

    let mut fields = extract_row_data(row, headers);
    let start_number = fields
        .remove(keys::START_NUMBER)
        .filter(|number| !number.is_empty())
        .unwrap_or_else(|| fallback_start_number(row, cursor));

    let mut consumed = 1;

    if let Some(next) = rows.get(cursor + consumed).filter(|r| is_additional_row(**r)) {
        for (key, value) in extract_additional_row_data(*next) {
            let is_set_identity = keys::IDENTITY.contains(&key.as_str()) && fields.contains_key(&key);
            if key == keys::START_NUMBER || is_set_identity {
                continue;
            }
            fields.insert(key, value);
        }
        consumed += 1;
    }

    let mut history = Vec::new();
    if let Some(next) = rows.get(cursor + consumed).filter(|r| is_extended_row(**r)) {
        history = extract_history(*next);
        consumed += 1;
    }

    tracing::trace!("Horse {} consumed {} rows ({} previous starts)", start_number, consumed, history.len());
    Step {
        record: Some(Competitor { start_number, fields, history }),
        consumed,
    }
}

fn fallback_start_number(row: ElementRef<'_>, cursor: usize) -> String {
    match row.value().attr(ATTR_TEST_ID).filter(|id| !id.is_empty()) {
        Some(id) => id.strip_prefix(HORSE_ROW_PREFIX).unwrap_or(id).to_string(),
        None => format!("{}{}", HORSE_PREFIX, cursor),
    }
}
