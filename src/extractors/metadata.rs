// src/extractors/metadata.rs
use crate::config::patterns::{
    BULLET, DESCRIPTION_SEPARATOR, DISCIPLINE_RE, DISTANCE_RE, START_METHOD_RE, TRACK_CONDITION_RE,
    TRAILING_COMMA_RE,
};
use crate::config::selectors::{RACE_INFO_SPANS, RACE_TIME, RACE_TITLE};
use crate::extractors::locator::{first_match, text_of};
use crate::models::RaceMetadata;
use scraper::ElementRef;

/// Reads title, info tokens and start time from a race's leg header.
/// A missing header yields empty metadata.
pub fn extract_race_metadata(leg_header: Option<ElementRef<'_>>) -> RaceMetadata {
    let Some(header) = leg_header else {
        tracing::debug!("No leg header; race metadata left empty");
        return RaceMetadata::default();
    };

    let tokens: Vec<String> = header
        .select(&RACE_INFO_SPANS)
        .map(text_of)
        .filter(|text| !text.is_empty() && text != BULLET)
        .collect();

    let mut metadata = classify_tokens(&tokens);

    metadata.title = first_match(header, &RACE_TITLE)
        .map(|title| TRAILING_COMMA_RE.replace(&text_of(title), "").into_owned());
    metadata.time = first_match(header, &RACE_TIME).map(text_of);

    metadata
}

/// Buckets header tokens into typed slots, first matching rule wins.
/// A token whose slot is already taken keeps falling through the rules;
/// whatever matches nothing is joined, in order, into `description`.
pub fn classify_tokens(tokens: &[String]) -> RaceMetadata {
    let mut metadata = RaceMetadata::default();
    let mut residual: Vec<&str> = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        let text = token.as_str();

        if metadata.distance.is_none() && DISTANCE_RE.is_match(text) {
            metadata.distance = Some(token.clone());
        } else if metadata.discipline.is_none() && DISCIPLINE_RE.is_match(text) {
            metadata.discipline = Some(token.clone());
        } else if metadata.start_method.is_none() && START_METHOD_RE.is_match(text) {
            metadata.start_method = Some(token.clone());
        } else if metadata.track.is_none() && index == 0 {
            metadata.track = Some(token.clone());
        } else if metadata.track_condition.is_none() && TRACK_CONDITION_RE.is_match(text) {
            metadata.track_condition = Some(token.clone());
        } else {
            residual.push(text);
        }
    }

    if !residual.is_empty() {
        metadata.description = Some(residual.join(DESCRIPTION_SEPARATOR));
    }

    metadata
}
