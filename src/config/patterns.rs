// src/config/patterns.rs
//! Attribute names, class markers, text patterns and dispatch tables for the
//! startlist markup. Edit these when the site changes its markup; the
//! extraction logic reads everything through this module.

use once_cell::sync::Lazy;
use regex::Regex;

// --- Attribute Names ---
pub const ATTR_TEST_ID: &str = "data-test-id";
pub const ATTR_RACE_ID: &str = "data-race-id";
pub const ATTR_START_NUMBER: &str = "data-start-number";
pub const ATTR_EXPORT_TYPE: &str = "startlist-export-type";
pub const ATTR_ID: &str = "id";
pub const ATTR_HREF: &str = "href";

// --- Game Container ---
pub const GAME_SUFFIX: &str = "-game";
pub const UNKNOWN_SOURCE_TYPE: &str = "UNKNOWN";

// --- Fallback Values ---
pub const UNKNOWN_RACE: &str = "unknown-race";
pub const COLUMN_PREFIX: &str = "column_";
pub const HORSE_PREFIX: &str = "horse_";

// --- Startlist Row Markers ---
pub const HORSE_ROW_PREFIX: &str = "horse-row-";
pub const HORSE_ROW_CLASS: &str = "horse-row";
pub const ADDITIONAL_ROW_ID: &str = "additional-table-row";
pub const ADDITIONAL_ROW_ID_FRAGMENT: &str = "additional";
pub const ADDITIONAL_ROW_CLASS: &str = "additional-row";
pub const EXTENDED_ROW_CLASS: &str = "extendedStartRow";

/// Loose match for horse rows whose test id drifted from the `horse-row-` prefix.
pub static HORSE_ROW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)horse.*row").expect("Failed to compile HORSE_ROW_RE"));

// --- Previous Starts (history) Row Markers ---
pub const ROW_BODY_CLASS: &str = "tableRowBody";
pub const MORE_INFO_CLASS: &str = "MoreInfoArea";
pub const RACE_COMMENTS_CLASS: &str = "RaceComments";

// --- Previous Starts Column Detection ---
pub const HISTORY_HEADER_PREFIX: &str = "table-header-";
pub const TRACK_FIELD: &str = "track";

/// Column identifiers the site reuses across unrelated columns. A header
/// carrying one of these falls through to the label heuristic.
pub const DISTRUSTED_HEADER_IDS: &[&str] = &["distance"];

/// Label vocabulary for history columns without a usable identifier.
/// Checked in order against the upper-cased header text; each entry is a list
/// of alternatives and every fragment of an alternative must be present.
pub const HISTORY_HEADER_VOCABULARY: &[(&[&[&str]], &str)] = &[
    (&[&["DATUM"], &["DATE"]], "date"),
    (&[&["PLAC"]], "place"),
    (&[&["DIST", "SPÅR"]], "distance"),
    (&[&["KM-TID"], &["KMTIME"]], "kmTime"),
    (&[&["SKOR"], &["SHOE"]], "shoes"),
    (&[&["ODDS"]], "odds"),
    (&[&["PRIS"], &["PRIZE"]], "firstPrize"),
    (&[&["BANA"], &["TRACK"]], "track"),
    (&[&["KUSK"], &["RYTTARE"], &["DRIVER"]], "driver"),
    (&[&["VAGN"], &["SULKY"]], "sulky"),
];

/// Column-map keys used when reading a previous-starts row.
pub mod history_columns {
    pub const DATE: &str = "date";
    pub const TRACK: &str = "track";
    pub const DRIVER: &str = "driver";
    pub const PLACE: &str = "place";
    pub const DISTANCE: &str = "distance";
    pub const KM_TIME: &str = "kmTime";
    pub const SHOES: &str = "shoes";
    pub const ODDS: &str = "odds";
    pub const PRIZE: &str = "firstPrize";
    pub const WAGON: &str = "sulky";
}

pub const WAGON_PREFIX: &str = "Vagn:";

// --- Race Metadata ---
pub const BULLET: &str = "•";
pub const DESCRIPTION_SEPARATOR: &str = " - ";

pub static DISTANCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\d+\s*m$").expect("Failed to compile DISTANCE_RE"));

// Exact match only: "Trav" is a discipline, "Travlopp" is not.
pub static DISCIPLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(trav|galopp|monté)$").expect("Failed to compile DISCIPLINE_RE"));

pub static START_METHOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)autostart|voltstart").expect("Failed to compile START_METHOD_RE"));

pub static TRACK_CONDITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)lätt|tung|god|hård|mjuk|fryst").expect("Failed to compile TRACK_CONDITION_RE")
});

pub static TRAILING_COMMA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*$").expect("Failed to compile TRAILING_COMMA_RE"));

// --- Dates ---
pub const CENTURY_PREFIX: &str = "20";

pub static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Failed to compile ISO_DATE_RE"));

pub static SHORT_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})([0-9]{2})([0-9]{2})$").expect("Failed to compile SHORT_DATE_RE"));

pub static SLASHED_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})[-/]([0-9]{1,2})[-/]([0-9]{4})$").expect("Failed to compile SLASHED_DATE_RE")
});

// --- Text Cleanup ---
pub static LEADING_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\s+").expect("Failed to compile LEADING_NUMBER_RE"));

pub static NON_ALPHANUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("Failed to compile NON_ALPHANUMERIC_RE"));

// --- Shoe Symbols ---
pub const SHOE_ON: char = 'C';
pub const SHOE_OFF: char = 'Ȼ';
pub const SHOE_NO_INFO: char = '-';
pub const SHOE_ON_ICON_ID: &str = "ShoeOnFilledIcon";
pub const SHOE_OFF_ICON_ID: &str = "ShoeOffFilledIcon";

// --- Field Kind Dispatch ---

/// How a startlist column is turned into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Horse cell: start number, name, age/sex, driver and trainer.
    Identity,
    /// "Total + breakdown" statistics, e.g. `31 10-7-2`.
    Stats,
    /// Shoe icons rendered as a symbol string.
    Icons,
    /// Plain text.
    Text,
}

/// `startlist-export-type` values with a dedicated extractor. Anything not
/// listed is read as text.
pub const FIELD_DISPATCH: &[(&str, FieldKind)] = &[
    ("horse", FieldKind::Identity),
    ("lifeStats", FieldKind::Stats),
    ("currentYearStats", FieldKind::Stats),
    ("previousYearStats", FieldKind::Stats),
    ("shoeInfo", FieldKind::Icons),
];

pub fn field_kind(export_type: &str) -> FieldKind {
    FIELD_DISPATCH
        .iter()
        .find(|(name, _)| *name == export_type)
        .map(|(_, kind)| *kind)
        .unwrap_or(FieldKind::Text)
}
