// src/extractors/race.rs

// --- Imports ---
use crate::config::patterns::{ATTR_ID, ATTR_RACE_ID, ATTR_TEST_ID, GAME_SUFFIX, UNKNOWN_RACE, UNKNOWN_SOURCE_TYPE};
use crate::config::selectors::{
    GAME_CONTAINER_LOCATOR, LEG_HEADER_LOCATOR, RACE_SECTIONS_LOCATOR, STARTLIST_TABLE_LOCATOR,
};
use crate::config::ExtractOptions;
use crate::extractors::locator::get_attribute;
use crate::extractors::metadata::extract_race_metadata;
use crate::extractors::startlist::{extract_competitors, extract_table_headers};
use crate::models::{ExtractionResult, Race};
use crate::utils::error::ExtractError;
use scraper::{ElementRef, Html};

// --- Main Extractor Structure ---

/// Entry point: turns a startlist page into races and competitors.
/// Holds only options; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct RaceExtractor {
    options: ExtractOptions,
}

impl RaceExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Parses `html_content` and extracts it. See [`RaceExtractor::extract_document`].
    /// Parsing is lenient; empty or unrelated input fails on the game container.
    pub fn extract(&self, html_content: &str) -> Result<ExtractionResult, ExtractError> {
        let document = Html::parse_document(html_content);
        self.extract_document(&document)
    }

    /// Extracts all races from an already parsed document.
    ///
    /// Fails only when the game container or the race sections cannot be
    /// found; a race without a startlist table is logged and left out.
    pub fn extract_document(&self, document: &Html) -> Result<ExtractionResult, ExtractError> {
        let root = document.root_element();

        // 1. Game container
        let container = GAME_CONTAINER_LOCATOR
            .find_one(root)
            .ok_or_else(|| ExtractError::NoGameContainer { tried: GAME_CONTAINER_LOCATOR.attempted() })?;

        // 2. Source type, e.g. "V75" from "V75-game"
        let source_type = source_type_of(container);
        tracing::info!("Extracting {} game", source_type);

        // 3. Race sections
        let sections = RACE_SECTIONS_LOCATOR.find_all(root);
        if sections.is_empty() {
            return Err(ExtractError::NoRaces { tried: RACE_SECTIONS_LOCATOR.attempted() });
        }
        tracing::debug!("Found {} race sections", sections.len());

        // 4. Each race independently
        let races: Vec<Race> = sections
            .into_iter()
            .filter_map(|section| self.extract_race(section, &source_type))
            .collect();

        // 5. Aggregate
        let total_competitor_count = races.iter().map(|race| race.competitors.len()).sum();
        tracing::info!("Extracted {} races with {} competitors", races.len(), total_competitor_count);

        Ok(ExtractionResult {
            source_type,
            races,
            total_competitor_count,
            extracted_at: chrono::Utc::now(),
        })
    }

    fn extract_race(&self, section: ElementRef<'_>, source_type: &str) -> Option<Race> {
        let race_id = get_attribute(section, ATTR_RACE_ID, Some(ATTR_ID)).unwrap_or_else(|| UNKNOWN_RACE.to_string());

        let metadata = extract_race_metadata(LEG_HEADER_LOCATOR.find_one(section));

        let Some(table) = STARTLIST_TABLE_LOCATOR.find_one(section) else {
            tracing::warn!("No startlist table found for race {}", race_id);
            return None;
        };

        let headers = extract_table_headers(table);
        let competitors = extract_competitors(table, &headers);
        tracing::debug!("Race {}: {} columns, {} competitors", race_id, headers.len(), competitors.len());

        Some(Race {
            race_id,
            source_type: source_type.to_string(),
            metadata,
            competitors,
            debug_headers: self.options.debug.then_some(headers),
        })
    }
}

fn source_type_of(container: ElementRef<'_>) -> String {
    let test_id = get_attribute(container, ATTR_TEST_ID, None).unwrap_or_else(|| UNKNOWN_SOURCE_TYPE.to_string());
    test_id.strip_suffix(GAME_SUFFIX).unwrap_or(&test_id).to_string()
}

/// Convenience wrapper around [`RaceExtractor`].
pub fn extract_race_data(document: &Html, options: ExtractOptions) -> Result<ExtractionResult, ExtractError> {
    RaceExtractor::new(options).extract_document(document)
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn race_section(id: &str, body: &str) -> String {
        format!(
            r#"<section data-race-id="{id}">
                <div id="leg-header">
                    <span class="race-title">Lopp 1,</span>
                    <span class="bodyText">Solvalla</span><span class="bodyText">•</span>
                    <span class="bodyText">2140 m</span><span class="bodyText">Trav</span><span class="bodyText">Autostart</span>
                </div>
                {body}
            </section>"#
        )
    }

    fn startlist(rows: &str) -> String {
        format!(
            r#"<table data-test-id="startlist">
                <thead><tr><th startlist-export-type="horse">Häst</th><th startlist-export-type="lifeStats">Livs</th></tr></thead>
                <tbody>{rows}</tbody>
            </table>"#
        )
    }

    fn horse(number: u32, name: &str) -> String {
        format!(
            r#"<tr data-test-id="horse-row-{number}">
                <td><button data-start-number="{number}"></button><span startlist-export-id="startlist-cell-horse-split-export-{number}">{number} {name}</span></td>
                <td><span data-test-id="startlist-cell-stats"><span class="stats">31</span>10-7-2</span></td>
            </tr>"#
        )
    }

    fn page(container_id: &str, races: &str) -> String {
        format!(r#"<html><body><div data-test-id="{container_id}">{races}</div></body></html>"#)
    }

    #[test]
    fn extracts_races_and_counts_competitors() {
        let html = page(
            "V75-game",
            &[
                race_section("2025-08-16_5_1", &startlist(&(horse(1, "Hail Mary") + &horse(2, "Don Fanucci Zet")))),
                race_section("2025-08-16_5_2", &startlist(&horse(7, "Francesco Zet"))),
            ]
            .concat(),
        );

        let result = RaceExtractor::default().extract(&html).unwrap();
        assert_eq!(result.source_type, "V75");
        assert_eq!(result.races.len(), 2);
        assert_eq!(result.total_competitor_count, 3);
        assert_eq!(
            result.total_competitor_count,
            result.races.iter().map(|r| r.competitors.len()).sum::<usize>()
        );

        let race = &result.races[0];
        assert_eq!(race.race_id, "2025-08-16_5_1");
        assert_eq!(race.source_type, "V75");
        assert_eq!(race.metadata.title.as_deref(), Some("Lopp 1"));
        assert_eq!(race.metadata.track.as_deref(), Some("Solvalla"));
        assert_eq!(race.competitors[1].horse_name(), Some("Don Fanucci Zet"));
        assert_eq!(race.competitors[1].get("lifeStats"), Some("31 10-7-2"));
        assert!(race.debug_headers.is_none());
    }

    #[test]
    fn race_without_table_is_skipped() {
        let html = page(
            "V4-game",
            &[race_section("r1", "<p>Startlistan är inte publicerad</p>"), race_section("r2", &startlist(&horse(3, "Ecurie D.")))]
                .concat(),
        );

        let result = RaceExtractor::default().extract(&html).unwrap();
        assert_eq!(result.source_type, "V4");
        assert_eq!(result.races.len(), 1);
        assert_eq!(result.races[0].race_id, "r2");
    }

    #[test]
    fn missing_container_is_fatal_and_lists_selectors() {
        let err = RaceExtractor::default().extract("<html><body><p>Hej</p></body></html>").unwrap_err();
        match &err {
            ExtractError::NoGameContainer { tried } => {
                assert_eq!(tried.len(), 5);
                assert_eq!(tried[0], r#"[data-test-id$="-game"]"#);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(err.to_string().contains(r#"div[class*="V75"]"#));
    }

    #[test]
    fn missing_races_is_fatal() {
        let err = RaceExtractor::default().extract(&page("V85-game", "<p>Inga lopp</p>")).unwrap_err();
        assert!(matches!(err, ExtractError::NoRaces { ref tried } if tried.len() == 3));
    }

    #[test]
    fn container_found_by_fallback_has_unknown_source_type() {
        let html = r#"<div class="game-container"><section data-race-id="r1"></section></div>"#;
        let result = RaceExtractor::default().extract(html).unwrap();
        assert_eq!(result.source_type, "UNKNOWN");
        assert!(result.races.is_empty());
        assert_eq!(result.total_competitor_count, 0);
    }

    #[test]
    fn race_id_falls_back_to_element_id_then_sentinel() {
        let html = page(
            "V86-game",
            &format!(
                r#"<section class="race-section" id="avd-3">{t}</section><section class="race-section">{t}</section>"#,
                t = startlist(&horse(1, "Borups Victory"))
            ),
        );
        let result = RaceExtractor::default().extract(&html).unwrap();
        let ids: Vec<&str> = result.races.iter().map(|r| r.race_id.as_str()).collect();
        assert_eq!(ids, vec!["avd-3", "unknown-race"]);
    }

    #[test]
    fn debug_flag_attaches_headers() {
        let html = page("V75-game", &race_section("r1", &startlist(&horse(1, "Hail Mary"))));
        let result = RaceExtractor::new(ExtractOptions { debug: true }).extract(&html).unwrap();

        let headers = result.races[0].debug_headers.as_ref().unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1].export_type, "lifeStats");
    }

    #[test]
    fn empty_input_reports_missing_game_container() {
        for input in ["", "  \n "] {
            match RaceExtractor::default().extract(input) {
                Err(ExtractError::NoGameContainer { tried }) => assert_eq!(tried, GAME_CONTAINER_LOCATOR.attempted()),
                other => panic!("expected NoGameContainer, got {:?}", other),
            }
        }
    }
}
