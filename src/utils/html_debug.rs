// src/utils/html_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::utils::error::AppError;

/// Opening tags of the markup the extractor keys on, with their highlight type.
pub const MARKER_PATTERNS: &[(&str, &str)] = &[
    (r#"(?i)<[a-z]+[^>]*data-test-id="[^"]*-game"[^>]*>"#, "game"),
    (r#"(?i)<[a-z]+[^>]*data-race-id="[^"]*"[^>]*>"#, "race"),
    (r#"(?i)<tr[^>]*data-test-id="horse-row-[^"]*"[^>]*>"#, "horse"),
    (r#"(?i)<tr[^>]*data-test-id="[^"]*additional[^"]*"[^>]*>"#, "additional"),
    (r#"<tr[^>]*class="[^"]*extendedStartRow[^"]*"[^>]*>"#, "extended"),
];

/// Annotates `html` with a marker before each highlighted range and writes
/// it to `filename`. Overlapping ranges keep the earliest.
pub fn save_debug_html(html: &str, filename: &Path, highlights: &[(usize, usize, &str)]) -> Result<(), AppError> {
    let mut file = File::create(filename)?;

    // Add debug styling in head
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    debug_html.push_str(".highlight-game { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-race { background-color: #FFA500; }\n");
    debug_html.push_str(".highlight-horse { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-additional { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-extended { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0); // Sort by position

    for (start, end, highlight_type) in sorted_highlights {
        if start < last_pos {
            continue;
        }
        debug_html.push_str(&html[last_pos..start]);

        // Markup tags are wrapped in table rows, so use a visible marker
        // element rather than wrapping the tag itself.
        debug_html.push_str(&format!(
            "<mark class=\"highlight-{}\" title=\"Position: {}-{}\">[{}]</mark>",
            highlight_type, start, end, highlight_type
        ));
        debug_html.push_str(&html[start..end]);

        last_pos = end;
    }

    // Add any remaining content
    if last_pos < html.len() {
        debug_html.push_str(&html[last_pos..]);
    }

    debug_html.push_str("\n</body>\n</html>");
    file.write_all(debug_html.as_bytes())?;

    tracing::info!("Saved debug HTML to {}", filename.display());
    Ok(())
}

/// Creates a debug copy of `html` with every match of `patterns` marked.
pub fn create_debug_html(html: &str, filename: &Path, patterns: &[(&str, &str)]) -> Result<usize, AppError> {
    use regex::Regex;

    let mut highlights = Vec::new();

    for (pattern, highlight_type) in patterns {
        let re = Regex::new(pattern).map_err(|e| {
            AppError::Config(format!("Invalid regex pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(html) {
            highlights.push((mat.start(), mat.end(), *highlight_type));
        }
    }

    save_debug_html(html, filename, &highlights)?;
    Ok(highlights.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_startlist_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotated.html");
        let html = r#"<div data-test-id="V75-game"><section data-race-id="r1"><table><tbody>
            <tr data-test-id="horse-row-1"><td>1</td></tr>
            <tr data-test-id="additional-table-row"><td></td></tr>
            <tr class="x_extendedStartRow_y"><td></td></tr>
        </tbody></table></section></div>"#;

        let count = create_debug_html(html, &path, MARKER_PATTERNS).unwrap();
        assert_eq!(count, 5);

        let written = std::fs::read_to_string(&path).unwrap();
        for marker in ["[game]", "[race]", "[horse]", "[additional]", "[extended]"] {
            assert!(written.contains(marker), "missing {}", marker);
        }
        assert!(written.contains(r#"<tr data-test-id="horse-row-1">"#));
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = create_debug_html("<p></p>", &dir.path().join("x.html"), &[("(", "broken")]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
