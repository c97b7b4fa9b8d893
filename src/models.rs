// src/models.rs
//! Output schema handed to export collaborators. Plain data; no behaviour
//! beyond construction helpers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Well-known competitor keys. Everything else in a competitor record is
/// keyed by the column's own export type.
pub mod keys {
    pub const START_NUMBER: &str = "startNumber";
    pub const HORSE_NAME: &str = "horseName";
    pub const AGE_AND_SEX: &str = "ageAndSex";
    pub const DRIVER: &str = "driver";
    pub const TRAINER: &str = "trainer";

    /// Keys a continuation row may not overwrite.
    pub const IDENTITY: &[&str] = &[START_NUMBER, HORSE_NAME, AGE_AND_SEX, DRIVER, TRAINER];
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub source_type: String,
    pub races: Vec<Race>,
    pub total_competitor_count: usize,
    pub extracted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub race_id: String,
    pub source_type: String,
    pub metadata: RaceMetadata,
    pub competitors: Vec<Competitor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_headers: Option<Vec<ColumnHeader>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// One startlist entry. The field set follows the table's own columns, so
/// the record is a map; `startNumber` is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub start_number: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryEntry>,
}

impl Competitor {
    pub fn get(&self, key: &str) -> Option<&str> {
        if key == keys::START_NUMBER {
            return Some(self.start_number.as_str()).filter(|s| !s.is_empty());
        }
        self.fields.get(key).map(String::as_str)
    }

    pub fn horse_name(&self) -> Option<&str> {
        self.get(keys::HORSE_NAME)
    }

    pub fn driver(&self) -> Option<&str> {
        self.get(keys::DRIVER)
    }

    pub fn trainer(&self) -> Option<&str> {
        self.get(keys::TRAINER)
    }
}

/// One previous start, most recent first as listed by the site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_and_lane: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odds: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wagon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A startlist column as declared by the table header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    pub index: usize,
    pub label: String,
    pub export_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn competitor_serializes_flat_with_start_number_first() {
        let mut fields = BTreeMap::new();
        fields.insert(keys::HORSE_NAME.to_string(), "Readly Express".to_string());
        fields.insert("lifeStats".to_string(), "31 10-7-2".to_string());
        let competitor = Competitor { start_number: "4".to_string(), fields, history: Vec::new() };

        let json = serde_json::to_value(&competitor).unwrap();
        assert_eq!(json["startNumber"], "4");
        assert_eq!(json["horseName"], "Readly Express");
        assert_eq!(json["lifeStats"], "31 10-7-2");
        assert!(json.get("history").is_none());
    }

    #[test]
    fn absent_metadata_fields_are_omitted() {
        let metadata = RaceMetadata { track: Some("Solvalla".to_string()), ..Default::default() };
        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(json, r#"{"track":"Solvalla"}"#);
    }

    #[test]
    fn accessors_read_well_known_keys() {
        let mut competitor = Competitor::default();
        assert_eq!(competitor.get(keys::START_NUMBER), None);
        competitor.start_number = "7".to_string();
        competitor.fields.insert(keys::DRIVER.to_string(), "Örjan Kihlström".to_string());
        assert_eq!(competitor.get(keys::START_NUMBER), Some("7"));
        assert_eq!(competitor.driver(), Some("Örjan Kihlström"));
        assert_eq!(competitor.trainer(), None);
    }
}
