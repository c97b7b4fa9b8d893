// src/extractors/columns.rs
use crate::config::patterns::{
    ATTR_TEST_ID, DISTRUSTED_HEADER_IDS, HISTORY_HEADER_PREFIX, HISTORY_HEADER_VOCABULARY, TRACK_FIELD,
};
use crate::config::selectors::{HISTORY_HEADER_ID, TH};
use crate::extractors::locator::{belongs_to_table, first_match, text_of};
use scraper::ElementRef;
use std::collections::BTreeMap;

/// Field name -> column index for one previous-starts table. Built once per
/// table from its header row and dropped with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    /// Expanded layout has its own track column; compact layout puts track,
    /// driver and wagon in a "more info" row instead.
    pub is_expanded: bool,
    columns: BTreeMap<String, usize>,
}

impl ColumnMap {
    pub fn get(&self, field: &str) -> Option<usize> {
        self.columns.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn insert(&mut self, field: &str, index: usize) {
        self.columns.insert(field.to_string(), index);
        if field == TRACK_FIELD {
            self.is_expanded = true;
        }
    }
}

/// Builds the column map from a `<thead>`. A missing head gives an empty,
/// compact map.
pub fn detect_columns(thead: Option<ElementRef<'_>>) -> ColumnMap {
    let mut map = ColumnMap::default();
    let Some(thead) = thead else {
        return map;
    };

    // Header cells of this table only; a nested table inside a header cell
    // must not shift the indices.
    let owner = thead
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == "table");
    let headers = thead
        .select(&TH)
        .filter(|th| owner.map_or(true, |table| belongs_to_table(*th, table)));

    for (index, th) in headers.enumerate() {
        match field_from_identifier(th) {
            Some(field) => map.insert(&field, index),
            None => match field_from_label(&text_of(th)) {
                Some(field) => map.insert(field, index),
                None => tracing::trace!("Unmapped history column {}: '{}'", index, text_of(th)),
            },
        }
    }

    tracing::debug!("Detected {} history columns (expanded: {})", map.len(), map.is_expanded);
    map
}

/// `data-test-id="table-header-<field>"` on the cell or a descendant, unless
/// the field is on the distrust list.
fn field_from_identifier(th: ElementRef<'_>) -> Option<String> {
    let test_id = th
        .value()
        .attr(ATTR_TEST_ID)
        .filter(|id| id.starts_with(HISTORY_HEADER_PREFIX))
        .or_else(|| first_match(th, &HISTORY_HEADER_ID).and_then(|el| el.value().attr(ATTR_TEST_ID)))?;

    let field = test_id.strip_prefix(HISTORY_HEADER_PREFIX)?;
    if field.is_empty() || DISTRUSTED_HEADER_IDS.contains(&field) {
        return None;
    }
    Some(field.to_string())
}

/// Case-insensitive label match against the header vocabulary, in priority order.
pub fn field_from_label(label: &str) -> Option<&'static str> {
    let upper = label.trim().to_uppercase();
    HISTORY_HEADER_VOCABULARY
        .iter()
        .find(|(alternatives, _)| {
            alternatives
                .iter()
                .any(|fragments| fragments.iter().all(|fragment| upper.contains(fragment)))
        })
        .map(|(_, field)| *field)
}
