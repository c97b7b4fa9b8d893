// src/config/mod.rs
pub mod patterns;
pub mod selectors;

/// Runtime options for a single extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Attach the raw column headers to every race.
    pub debug: bool,
}
