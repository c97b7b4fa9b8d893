// src/lib.rs
//! Extracts races and competitors from a saved startlist page.
//!
//! ```no_run
//! use startlist_extractor::{ExtractOptions, RaceExtractor};
//!
//! let html = std::fs::read_to_string("startlist.html").unwrap();
//! let result = RaceExtractor::new(ExtractOptions::default()).extract(&html).unwrap();
//! println!("{} races, {} horses", result.races.len(), result.total_competitor_count);
//! ```
pub mod config;
pub mod extractors;
pub mod models;
pub mod storage;
pub mod utils;

pub use config::ExtractOptions;
pub use extractors::{extract_race_data, RaceExtractor};
pub use models::{ColumnHeader, Competitor, ExtractionResult, HistoryEntry, Race, RaceMetadata};
pub use utils::error::{AppError, ExtractError, StorageError};
