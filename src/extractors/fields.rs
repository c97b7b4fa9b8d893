// src/extractors/fields.rs
//! Per-cell extractors, one per field kind, plus the column dispatch that
//! applies them to a startlist row or an additional-info row.

use crate::config::patterns::{
    field_kind, FieldKind, ATTR_EXPORT_TYPE, ATTR_START_NUMBER, ATTR_TEST_ID, COLUMN_PREFIX,
    LEADING_NUMBER_RE, NON_ALPHANUMERIC_RE, SHOE_NO_INFO, SHOE_OFF, SHOE_OFF_ICON_ID, SHOE_ON,
    SHOE_ON_ICON_ID,
};
use crate::config::selectors::{
    AGE_AND_SEX, CELL_TEXT, DETAIL_COLUMNS_LOCATOR, DETAIL_HEADER, DETAIL_TEXT, DRIVER, DRIVER_NAME,
    HORSE_NAME, SHOE_ICON, SHOE_NO_INFO as SHOE_NO_INFO_SELECTOR, START_NUMBER, STATS_CELL,
    STATS_TOTAL, TRAINER, TRAINER_SHORT_NAME,
};
use crate::extractors::locator::{child_elements, first_match, get_attribute, normalized_text, text_of};
use crate::models::{keys, ColumnHeader};
use scraper::ElementRef;
use std::collections::BTreeMap;

pub type Fields = BTreeMap<String, String>;

// --- Identity (horse) cell ---

/// Start number, horse name, age/sex, driver and trainer from the horse cell.
/// Only sub-elements that exist produce keys.
pub fn extract_horse_cell(cell: ElementRef<'_>) -> Fields {
    let mut data = Fields::new();

    if let Some(number) = first_match(cell, &START_NUMBER)
        .and_then(|button| get_attribute(button, ATTR_START_NUMBER, None))
    {
        data.insert(keys::START_NUMBER.to_string(), number);
    }

    if let Some(name) = first_match(cell, &HORSE_NAME) {
        let name = LEADING_NUMBER_RE.replace(&text_of(name), "").into_owned();
        data.insert(keys::HORSE_NAME.to_string(), name);
    }

    if let Some(age) = first_match(cell, &AGE_AND_SEX) {
        data.insert(keys::AGE_AND_SEX.to_string(), text_of(age));
    }

    if let Some(driver) = first_match(cell, &DRIVER) {
        match first_match(driver, &TRAINER_SHORT_NAME) {
            Some(short) => {
                // "Kihlström (Gol)": the parenthesised part is the trainer.
                let short_text = text_of(short);
                let trainer = short_text.replace(['(', ')'], "").trim().to_string();
                let driver_name = match first_match(driver, &DRIVER_NAME) {
                    Some(name) => text_of(name),
                    None => driver
                        .text()
                        .collect::<String>()
                        .replacen(&short_text, "", 1)
                        .trim()
                        .to_string(),
                };
                data.insert(keys::TRAINER.to_string(), trainer);
                data.insert(keys::DRIVER.to_string(), driver_name);
            }
            None => {
                data.insert(keys::DRIVER.to_string(), text_of(driver));
            }
        }
    }

    // The full trainer name wins over the abbreviation.
    if let Some(trainer) = first_match(cell, &TRAINER) {
        data.insert(keys::TRAINER.to_string(), text_of(trainer));
    }

    data
}

// --- Statistics cell ---

/// Rebuilds "starts + placings" text such as `31 10-7-2` from markup that
/// renders the total and the breakdown back to back.
pub fn extract_stats(cell: ElementRef<'_>) -> String {
    let Some(stats) = first_match(cell, &STATS_CELL) else {
        return normalized_text(cell);
    };

    let total = first_match(stats, &STATS_TOTAL).map(text_of).unwrap_or_default();

    let mut placements = text_of(stats);
    if !total.is_empty() {
        placements = placements.replacen(&total, "", 1).trim().to_string();
    }

    match (total.is_empty(), placements.is_empty()) {
        (false, false) => format!("{} {}", total, placements),
        (false, true) => total,
        _ => placements,
    }
}

// --- Iconographic (shoe) cell ---

/// One symbol per shoe icon in document order; `-` per "no info" marker.
pub fn extract_shoe_info(container: ElementRef<'_>) -> String {
    let no_info = container.select(&SHOE_NO_INFO_SELECTOR).count();
    if no_info > 0 {
        return std::iter::repeat(SHOE_NO_INFO).take(no_info).collect();
    }

    container
        .select(&SHOE_ICON)
        .filter_map(|icon| match icon.value().attr(ATTR_TEST_ID) {
            Some(SHOE_ON_ICON_ID) => Some(SHOE_ON),
            Some(SHOE_OFF_ICON_ID) => Some(SHOE_OFF),
            _ => None,
        })
        .collect()
}

// --- Default text cell ---

/// Cell text with whitespace collapsed, preferring a nested
/// `startlist-cell-*` element when the cell has one.
pub fn extract_text(cell: ElementRef<'_>) -> String {
    first_match(cell, &CELL_TEXT)
        .map(normalized_text)
        .unwrap_or_else(|| normalized_text(cell))
}

// --- Row dispatch ---

/// Extracts every cell of a startlist row by its column's export type.
/// Cells beyond the declared headers are keyed `column_{index}`.
pub fn extract_row_data(row: ElementRef<'_>, headers: &[ColumnHeader]) -> Fields {
    let mut data = Fields::new();

    for (index, cell) in child_elements(row, "td").into_iter().enumerate() {
        let export_type = headers
            .get(index)
            .map(|header| header.export_type.clone())
            .unwrap_or_else(|| format!("{}{}", COLUMN_PREFIX, index));

        match field_kind(&export_type) {
            FieldKind::Identity => data.extend(extract_horse_cell(cell)),
            FieldKind::Stats => {
                data.insert(export_type, extract_stats(cell));
            }
            FieldKind::Icons => {
                data.insert(export_type, extract_shoe_info(cell));
            }
            FieldKind::Text => {
                data.insert(export_type, extract_text(cell));
            }
        }
    }

    data
}

/// Key/value pairs from an "additional info" row. Each detail column is keyed
/// by its declared export type, else by a slug of its label.
pub fn extract_additional_row_data(row: ElementRef<'_>) -> Fields {
    let mut data = Fields::new();

    for column in DETAIL_COLUMNS_LOCATOR.find_all(row) {
        // The column selector also matches header/text children; those have
        // no header of their own and are skipped below.
        let header = first_match(column, &DETAIL_HEADER);
        let value_container = first_match(column, &DETAIL_TEXT);
        let export_type = header.and_then(|h| get_attribute(h, ATTR_EXPORT_TYPE, None));

        let value = match value_container {
            None => String::new(),
            Some(container) => match export_type.as_deref().map(field_kind) {
                Some(FieldKind::Stats) => extract_stats(container),
                Some(FieldKind::Icons) => extract_shoe_info(container),
                _ => normalized_text(container),
            },
        };

        let key = match export_type {
            Some(export_type) => export_type,
            None => match header.map(|h| text_of(h).replacen(':', "", 1)) {
                Some(label) if !label.trim().is_empty() => slug(&label),
                _ => continue,
            },
        };

        data.insert(key, value);
    }

    data
}

/// Lower-cased label with non-alphanumeric runs replaced by `_`.
pub fn slug(label: &str) -> String {
    NON_ALPHANUMERIC_RE
        .replace_all(&label.trim().to_lowercase(), "_")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn horse_cell_splits_identity_fields() {
        let doc = Html::parse_document(
            r#"<table><tr><td id="c">
                <button data-start-number="4">4</button>
                <span startlist-export-id="startlist-cell-horse-split-export-4">4 Readly Express</span>
                <span startlist-export-id="startlist-cell-ageAndSex-split-export-4">9 år h</span>
                <span startlist-export-id="startlist-cell-driver-split-export-4">
                    <span class="driverName_x">Björn Goop</span>
                    <span class="trainerShortName_y">(Gop)</span>
                </span>
            </td></tr></table>"#,
        );

        let data = extract_horse_cell(first(&doc, "#c"));
        assert_eq!(data[keys::START_NUMBER], "4");
        assert_eq!(data[keys::HORSE_NAME], "Readly Express");
        assert_eq!(data[keys::AGE_AND_SEX], "9 år h");
        assert_eq!(data[keys::DRIVER], "Björn Goop");
        assert_eq!(data[keys::TRAINER], "Gop");
    }

    #[test]
    fn driver_text_minus_abbreviation_when_no_name_element() {
        let doc = Html::parse_document(
            r#"<table><tr><td id="c">
                <span startlist-export-id="startlist-cell-driver-split-export-1">Örjan Kihlström <i class="trainerShortName">(Wid)</i></span>
                <span startlist-export-id="startlist-cell-trainer-export">Daniel Wikberg</span>
            </td></tr></table>"#,
        );

        let data = extract_horse_cell(first(&doc, "#c"));
        assert_eq!(data[keys::DRIVER], "Örjan Kihlström");
        // Full trainer name overrides the abbreviation.
        assert_eq!(data[keys::TRAINER], "Daniel Wikberg");
        assert!(!data.contains_key(keys::START_NUMBER));
    }

    #[test]
    fn stats_join_total_and_breakdown() {
        let doc = Html::parse_document(
            r#"<table><tr><td id="c"><span data-test-id="startlist-cell-stats"><span class="stats_total">31</span>10-7-2</span></td></tr></table>"#,
        );
        assert_eq!(extract_stats(first(&doc, "#c")), "31 10-7-2");
    }

    #[test]
    fn stats_degrade_to_whatever_is_present() {
        let doc = Html::parse_document(
            r#"<div id="a"><span data-test-id="startlist-cell-stats"><span class="stats">12</span></span></div>
               <div id="b"><span data-test-id="startlist-cell-stats">3-1-0</span></div>
               <div id="c">  0  starts </div>
               <div id="d"><span data-test-id="startlist-cell-stats"></span></div>"#,
        );
        assert_eq!(extract_stats(first(&doc, "#a")), "12");
        assert_eq!(extract_stats(first(&doc, "#b")), "3-1-0");
        assert_eq!(extract_stats(first(&doc, "#c")), "0 starts");
        assert_eq!(extract_stats(first(&doc, "#d")), "");
    }

    #[test]
    fn shoe_icons_map_to_symbols_in_order() {
        let doc = Html::parse_document(
            r#"<div id="s"><svg data-test-id="ShoeOnFilledIcon"></svg><svg data-test-id="ShoeOffFilledIcon"></svg><svg data-test-id="ShoeUnknownIcon"></svg></div>
               <div id="n"><span class="shoeCellNoInfo_a"></span><span class="shoeCellNoInfo_a"></span></div>
               <div id="e"></div>"#,
        );
        assert_eq!(extract_shoe_info(first(&doc, "#s")), "CȻ");
        assert_eq!(extract_shoe_info(first(&doc, "#n")), "--");
        assert_eq!(extract_shoe_info(first(&doc, "#e")), "");
    }

    #[test]
    fn text_prefers_nested_cell_element() {
        let doc = Html::parse_document(
            r#"<div id="a"><i>icon</i><span data-test-id="startlist-cell-odds"> 12,5 </span></div>
               <div id="b">  Lätt
                 bana </div>"#,
        );
        assert_eq!(extract_text(first(&doc, "#a")), "12,5");
        assert_eq!(extract_text(first(&doc, "#b")), "Lätt bana");
    }

    #[test]
    fn row_dispatch_follows_column_export_type() {
        let doc = Html::parse_document(
            r#"<table><tbody><tr id="r">
                <td><span startlist-export-id="startlist-cell-horse-split-export-2">2 Don Fanucci Zet</span></td>
                <td><span data-test-id="startlist-cell-stats"><span class="stats">40</span>25-5-3</span></td>
                <td><svg data-test-id="ShoeOffFilledIcon"></svg></td>
                <td>320 000</td>
                <td>extra</td>
            </tr></tbody></table>"#,
        );
        let header = |index: usize, export_type: &str| ColumnHeader {
            index,
            label: String::new(),
            export_type: export_type.to_string(),
            test_id: None,
        };
        let headers = vec![header(0, "horse"), header(1, "lifeStats"), header(2, "shoeInfo"), header(3, "money")];

        let data = extract_row_data(first(&doc, "#r"), &headers);
        assert_eq!(data[keys::HORSE_NAME], "Don Fanucci Zet");
        assert_eq!(data["lifeStats"], "40 25-5-3");
        assert_eq!(data["shoeInfo"], "Ȼ");
        assert_eq!(data["money"], "320 000");
        assert_eq!(data["column_4"], "extra");
        assert!(!data.contains_key("horse"));
    }

    #[test]
    fn additional_row_uses_export_type_then_label_slug() {
        let doc = Html::parse_document(
            r#"<table><tbody><tr id="r"><td>
                <div class="moreDetailsColumn">
                    <span class="moreDetailsColumnHeader" startlist-export-type="currentYearStats">I år:</span>
                    <span class="moreDetailsColumnText"><span data-test-id="startlist-cell-stats"><span class="stats">5</span>2-1-0</span></span>
                </div>
                <div class="moreDetailsColumn">
                    <span class="moreDetailsColumnHeader">Senaste start (bana):</span>
                    <span class="moreDetailsColumnText">  Solvalla   250801 </span>
                </div>
                <div class="moreDetailsColumn">
                    <span class="moreDetailsColumnHeader" startlist-export-type="shoeInfo">Skor</span>
                </div>
            </td></tr></tbody></table>"#,
        );

        let data = extract_additional_row_data(first(&doc, "#r"));
        assert_eq!(data["currentYearStats"], "5 2-1-0");
        assert_eq!(data["senaste_start_bana_"], "Solvalla 250801");
        assert_eq!(data["shoeInfo"], "");
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn slug_collapses_runs() {
        assert_eq!(slug("Tränare / Ägare"), "tr_nare_gare");
        assert_eq!(slug("Vinstsumma"), "vinstsumma");
    }
}
