// src/config/selectors.rs
//! CSS selector configuration. Edit these if the HTML structure changes.

use crate::extractors::locator::{Locator, LocatorSpec};
use once_cell::sync::Lazy;
use scraper::Selector;

// --- Locator Specs (primary + fallbacks) ---

pub const GAME_CONTAINER: LocatorSpec = LocatorSpec {
    target: "game container",
    primary: r#"[data-test-id$="-game"]"#,
    fallbacks: &[
        r#"[class*="game-container"]"#,
        r#"div[class*="V85"]"#,
        r#"div[class*="V4"]"#,
        r#"div[class*="V75"]"#,
    ],
};

pub const RACE_SECTIONS: LocatorSpec = LocatorSpec {
    target: "race sections",
    primary: "[data-race-id]",
    fallbacks: &[r#"[class*="race-section"]"#, r#"section[class*="race"]"#],
};

pub const LEG_HEADER: LocatorSpec = LocatorSpec {
    target: "leg header",
    primary: "#leg-header",
    fallbacks: &[r#"[class*="leg-header"]"#, r#"[class*="race-header"]"#, "header"],
};

pub const STARTLIST_TABLE: LocatorSpec = LocatorSpec {
    target: "startlist table",
    primary: r#"table[data-test-id="startlist"]"#,
    fallbacks: &[r#"table[class*="startlist"]"#, r#"table[class*="start-list"]"#, "table"],
};

pub const TABLE_HEADERS: LocatorSpec = LocatorSpec {
    target: "table headers",
    primary: "thead th",
    fallbacks: &["tr:first-child th", "tr:first-child td"],
};

pub const DETAIL_COLUMNS: LocatorSpec = LocatorSpec {
    target: "additional detail columns",
    primary: r#"[class*="moreDetailsColumn"]"#,
    fallbacks: &[r#"[class*="details-column"], [class*="detail-column"]"#],
};

// --- Compiled Locators (Lazy Static) ---

fn compile(spec: LocatorSpec) -> Locator {
    Locator::new(spec).unwrap_or_else(|e| panic!("Failed to compile locator: {}", e))
}

pub static GAME_CONTAINER_LOCATOR: Lazy<Locator> = Lazy::new(|| compile(GAME_CONTAINER));
pub static RACE_SECTIONS_LOCATOR: Lazy<Locator> = Lazy::new(|| compile(RACE_SECTIONS));
pub static LEG_HEADER_LOCATOR: Lazy<Locator> = Lazy::new(|| compile(LEG_HEADER));
pub static STARTLIST_TABLE_LOCATOR: Lazy<Locator> = Lazy::new(|| compile(STARTLIST_TABLE));
pub static TABLE_HEADERS_LOCATOR: Lazy<Locator> = Lazy::new(|| compile(TABLE_HEADERS));
pub static DETAIL_COLUMNS_LOCATOR: Lazy<Locator> = Lazy::new(|| compile(DETAIL_COLUMNS));

// --- Single Selectors (Lazy Static) ---

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub static $name: Lazy<Selector> = Lazy::new(|| {
            Selector::parse($css).expect(concat!("Failed to compile ", stringify!($name)))
        });
    };
}

// Race metadata
selector!(RACE_TITLE, r#"[class*="title"]"#);
selector!(RACE_INFO_SPANS, r#"span[class*="body"]"#);
selector!(RACE_TIME, r#"[class*="TimeToStart"]"#);

// Startlist table structure
selector!(TBODY, "tbody");
selector!(THEAD, "thead");
selector!(TH, "th");
selector!(LINK, "a");
selector!(BUTTON, "button");
selector!(HEADER_LABEL, r#"[data-test-id*="tableCellHead"]"#);

// Horse cell
selector!(START_NUMBER, "[data-start-number]");
selector!(HORSE_NAME, r#"[startlist-export-id^="startlist-cell-horse-split-export"]"#);
selector!(AGE_AND_SEX, r#"[startlist-export-id^="startlist-cell-ageAndSex-split-export"]"#);
selector!(DRIVER, r#"[startlist-export-id^="startlist-cell-driver-split-export"]"#);
selector!(TRAINER, r#"[startlist-export-id="startlist-cell-trainer-export"]"#);
selector!(TRAINER_SHORT_NAME, r#"[class*="trainerShortName"]"#);
selector!(DRIVER_NAME, r#"[class*="driverName"]"#);

// Generic cells
selector!(CELL_TEXT, r#"[data-test-id^="startlist-cell-"]"#);
selector!(STATS_CELL, r#"[data-test-id="startlist-cell-stats"]"#);
selector!(STATS_TOTAL, r#"span[class*="stats"]"#);
selector!(SHOE_NO_INFO, r#"[class*="shoeCellNoInfo"]"#);
selector!(SHOE_ICON, r#"svg[data-test-id*="Shoe"]"#);

// Additional row
selector!(DETAIL_HEADER, r#"[class*="moreDetailsColumnHeader"]"#);
selector!(DETAIL_TEXT, r#"[class*="moreDetailsColumnText"]"#);

// Previous starts (history)
selector!(HISTORY_TABLE, r#"table[class*="PreviousStartsTable"]"#);
selector!(HISTORY_HEADER_ID, r#"[data-test-id^="table-header-"]"#);
selector!(MORE_DETAILS_AREA, r#"[class*="moreDetailsArea"]"#);
selector!(MORE_DETAILS_ITEM, r#"[class*="moreDetailsItem"]"#);
selector!(RACE_COMMENT_CELL, r#"[class*="RaceCommentCell"]"#);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_locator_spec_compiles() {
        for spec in [GAME_CONTAINER, RACE_SECTIONS, LEG_HEADER, STARTLIST_TABLE, TABLE_HEADERS, DETAIL_COLUMNS] {
            assert!(Locator::new(spec).is_ok(), "{} failed to compile", spec.target);
        }
    }

    #[test]
    fn single_selectors_compile() {
        // Forces every Lazy so a typo fails here rather than mid-extraction.
        let all: [&Lazy<Selector>; 9] = [
            &RACE_TITLE, &START_NUMBER, &HORSE_NAME, &DRIVER, &STATS_CELL,
            &SHOE_ICON, &HISTORY_TABLE, &HISTORY_HEADER_ID, &RACE_COMMENT_CELL,
        ];
        for sel in all {
            Lazy::force(sel);
        }
    }
}
