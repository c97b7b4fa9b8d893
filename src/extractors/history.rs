// src/extractors/history.rs
//! Previous-starts sub-table: one history entry from a body row plus its
//! optional "more info" and "race comments" rows.

use crate::config::patterns::{
    history_columns as col, ATTR_HREF, MORE_INFO_CLASS, RACE_COMMENTS_CLASS, ROW_BODY_CLASS, WAGON_PREFIX,
};
use crate::config::selectors::{
    BUTTON, HISTORY_TABLE, LINK, MORE_DETAILS_AREA, MORE_DETAILS_ITEM, RACE_COMMENT_CELL, TBODY, THEAD,
};
use crate::extractors::columns::{detect_columns, ColumnMap};
use crate::extractors::date::normalize_date;
use crate::extractors::fields::extract_shoe_info;
use crate::extractors::locator::{child_elements, class_contains, first_match, normalized_text, text_of};
use crate::extractors::Step;
use crate::models::HistoryEntry;
use scraper::ElementRef;

/// Parses the previous-starts table inside an extended row. No table, no
/// body or no entries all give an empty list.
pub fn extract_history(extended_row: ElementRef<'_>) -> Vec<HistoryEntry> {
    let Some(table) = first_match(extended_row, &HISTORY_TABLE) else {
        tracing::debug!("Extended row without a previous-starts table");
        return Vec::new();
    };
    let Some(tbody) = first_match(table, &TBODY) else {
        return Vec::new();
    };

    let columns = detect_columns(first_match(table, &THEAD));
    let rows = child_elements(tbody, "tr");

    let mut entries = Vec::new();
    let mut cursor = 0;
    while cursor < rows.len() {
        let step = next_history_entry(&rows, cursor, &columns);
        entries.extend(step.record);
        cursor += step.consumed;
    }

    entries
}

/// A body row that is neither a "more info" nor a "comments" row.
pub fn is_history_row(row: ElementRef<'_>) -> bool {
    class_contains(row, ROW_BODY_CLASS)
        && !class_contains(row, MORE_INFO_CLASS)
        && !class_contains(row, RACE_COMMENTS_CLASS)
}

/// Reads the entry starting at `rows[cursor]`. Rows that don't start an
/// entry are consumed alone without output.
pub fn next_history_entry(rows: &[ElementRef<'_>], cursor: usize, columns: &ColumnMap) -> Step<HistoryEntry> {
    let row = rows[cursor];
    if !is_history_row(row) {
        tracing::trace!("Skipping non-entry history row {}", cursor);
        return Step::skip();
    }

    let cells = child_elements(row, "td");
    let mut entry = read_entry_cells(&cells, columns);
    let mut consumed = 1;

    if !columns.is_expanded {
        if let Some(next) = rows.get(cursor + consumed).filter(|r| class_contains(**r, MORE_INFO_CLASS)) {
            merge_more_info(&mut entry, *next);
            consumed += 1;
        }
    }

    if entry.comment.is_none() {
        if let Some(next) = rows.get(cursor + consumed).filter(|r| class_contains(**r, RACE_COMMENTS_CLASS)) {
            entry.comment = read_race_comment(*next);
            consumed += 1;
        }
    }

    Step { record: Some(entry), consumed }
}

fn read_entry_cells(cells: &[ElementRef<'_>], columns: &ColumnMap) -> HistoryEntry {
    let mut entry = HistoryEntry::default();

    // Compact tables keep the date first when the date header is missing
    // or points past the end of a short row.
    let date_cell = columns
        .get(col::DATE)
        .and_then(|index| cells.get(index))
        .or_else(|| if columns.is_expanded { None } else { cells.first() });
    if let Some(cell) = date_cell {
        let link = first_match(*cell, &LINK);
        let date_text = link.map(text_of).unwrap_or_else(|| text_of(*cell));
        entry.date = normalize_date(&date_text);
        entry.race_link = link.and_then(|a| a.value().attr(ATTR_HREF)).map(str::to_string);
    }

    let text_at = |field: &str| -> Option<String> {
        let cell = cells.get(columns.get(field)?)?;
        Some(normalized_text(*cell)).filter(|text| !text.is_empty())
    };

    entry.track = text_at(col::TRACK);
    entry.driver = text_at(col::DRIVER);
    entry.placement = text_at(col::PLACE);
    entry.distance_and_lane = text_at(col::DISTANCE);
    entry.time = text_at(col::KM_TIME);
    entry.odds = text_at(col::ODDS);
    entry.prize = text_at(col::PRIZE);
    entry.wagon = text_at(col::WAGON).map(|wagon| strip_wagon_prefix(&wagon));
    entry.shoes = columns
        .get(col::SHOES)
        .and_then(|index| cells.get(index))
        .map(|cell| extract_shoe_info(*cell))
        .filter(|shoes| !shoes.is_empty());

    // Expanded rows end with the comment, unless that cell is a toggle button.
    if columns.is_expanded {
        if let Some(last) = cells.last() {
            let comment = text_of(*last);
            if !comment.is_empty() && first_match(*last, &BUTTON).is_none() {
                entry.comment = Some(comment);
            }
        }
    }

    entry
}

/// Compact layout: track, driver and wagon live in a detail row.
fn merge_more_info(entry: &mut HistoryEntry, row: ElementRef<'_>) {
    let Some(area) = child_elements(row, "td")
        .into_iter()
        .next()
        .and_then(|cell| first_match(cell, &MORE_DETAILS_AREA))
    else {
        return;
    };

    for (index, item) in area.select(&MORE_DETAILS_ITEM).enumerate() {
        let text = text_of(item);
        match index {
            0 => entry.track = Some(text),
            1 => entry.driver = Some(text),
            _ if text.starts_with(WAGON_PREFIX) => entry.wagon = Some(strip_wagon_prefix(&text)),
            _ => {}
        }
    }
}

fn read_race_comment(row: ElementRef<'_>) -> Option<String> {
    let cell = child_elements(row, "td").into_iter().next()?;
    let comment = first_match(cell, &RACE_COMMENT_CELL)
        .map(text_of)
        .unwrap_or_else(|| text_of(cell));
    Some(comment).filter(|c| !c.is_empty())
}

fn strip_wagon_prefix(text: &str) -> String {
    text.strip_prefix(WAGON_PREFIX).unwrap_or(text).trim().to_string()
}
