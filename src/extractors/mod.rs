// src/extractors/mod.rs
pub mod columns;
pub mod date;
pub mod fields;
pub mod history;
pub mod locator;
pub mod metadata;
pub mod race;
pub mod startlist;

// Re-export key extraction types for convenience
pub use columns::{detect_columns, ColumnMap};
pub use date::normalize_date;
pub use locator::{get_attribute, Located, Locator, LocatorSpec};
pub use metadata::classify_tokens;
pub use race::{extract_race_data, RaceExtractor};

/// One transition of a row stitcher: the record started at the cursor (if
/// the row starts one) and how many rows it used up.
#[derive(Debug)]
pub struct Step<T> {
    pub record: Option<T>,
    pub consumed: usize,
}

impl<T> Step<T> {
    /// An unrecognised row: no output, advance by one.
    pub fn skip() -> Self {
        Self { record: None, consumed: 1 }
    }
}
