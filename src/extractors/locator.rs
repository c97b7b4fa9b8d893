// src/extractors/locator.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use scraper::{ElementRef, Selector};

// --- Data Structures ---

/// A logical lookup target: a primary CSS expression plus ordered fallbacks.
/// Static configuration; compiled into a [`Locator`] once.
#[derive(Debug, Clone, Copy)]
pub struct LocatorSpec {
    pub target: &'static str,
    pub primary: &'static str,
    pub fallbacks: &'static [&'static str],
}

impl LocatorSpec {
    /// Every expression in the order it is tried.
    pub fn expressions(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.primary).chain(self.fallbacks.iter().copied())
    }
}

/// The outcome of a successful lookup and the expression that produced it.
#[derive(Debug)]
pub struct Located<'a> {
    pub nodes: Vec<ElementRef<'a>>,
    pub expression: &'static str,
    pub is_fallback: bool,
}

pub struct Locator {
    spec: LocatorSpec,
    selectors: Vec<(&'static str, Selector)>,
}

impl Locator {
    /// Compiles every expression of the spec. Fails on the first expression
    /// that is not valid CSS.
    pub fn new(spec: LocatorSpec) -> Result<Self, ExtractError> {
        let selectors = spec
            .expressions()
            .map(|expression| {
                Selector::parse(expression)
                    .map(|selector| (expression, selector))
                    .map_err(|e| ExtractError::InvalidSelector {
                        target: spec.target.to_string(),
                        expression: expression.to_string(),
                        reason: format!("{:?}", e),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { spec, selectors })
    }

    /// All expressions this locator tries, for error reports.
    pub fn attempted(&self) -> Vec<String> {
        self.spec.expressions().map(str::to_string).collect()
    }

    /// Tries the primary expression, then each fallback in order, and returns
    /// the first non-empty match set. A fallback hit is logged as a warning.
    pub fn locate<'a>(&self, scope: ElementRef<'a>, first_only: bool) -> Option<Located<'a>> {
        self.locate_where(scope, first_only, |_| true)
    }

    /// Like [`Locator::locate`], but only nodes accepted by `keep` count. An
    /// expression whose matches are all rejected is treated as a miss, so the
    /// next fallback is tried.
    pub fn locate_where<'a, F>(&self, scope: ElementRef<'a>, first_only: bool, keep: F) -> Option<Located<'a>>
    where
        F: Fn(ElementRef<'a>) -> bool,
    {
        for (index, (expression, selector)) in self.selectors.iter().enumerate() {
            let matches = scope.select(selector).filter(|node| keep(*node));
            let nodes: Vec<ElementRef<'a>> = if first_only {
                matches.take(1).collect()
            } else {
                matches.collect()
            };

            if nodes.is_empty() {
                tracing::trace!("{}: no match for '{}'", self.spec.target, expression);
                continue;
            }

            let is_fallback = index > 0;
            if is_fallback {
                tracing::warn!(
                    "Using fallback selector for {}: {} (primary failed: {})",
                    self.spec.target,
                    expression,
                    self.spec.primary
                );
            }
            return Some(Located { nodes, expression, is_fallback });
        }

        tracing::debug!("{}: all {} selectors failed", self.spec.target, self.selectors.len());
        None
    }

    pub fn find_one<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.locate(scope, true).and_then(|found| found.nodes.into_iter().next())
    }

    pub fn find_all<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        self.locate(scope, false).map(|found| found.nodes).unwrap_or_default()
    }

    pub fn find_all_where<'a, F>(&self, scope: ElementRef<'a>, keep: F) -> Vec<ElementRef<'a>>
    where
        F: Fn(ElementRef<'a>) -> bool,
    {
        self.locate_where(scope, false, keep).map(|found| found.nodes).unwrap_or_default()
    }
}

// --- Accessors ---

/// Returns `name` if present and non-empty, else `fallback` under the same
/// rule, else `None`.
pub fn get_attribute(element: ElementRef<'_>, name: &str, fallback: Option<&str>) -> Option<String> {
    let value = element.value();
    if let Some(found) = value.attr(name).filter(|v| !v.is_empty()) {
        return Some(found.to_string());
    }

    let fallback = fallback?;
    let found = value.attr(fallback).filter(|v| !v.is_empty())?;
    tracing::warn!("Using fallback attribute: {} (primary failed: {})", fallback, name);
    Some(found.to_string())
}

/// Concatenated text content, trimmed.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text content with whitespace runs collapsed to single spaces.
pub fn normalized_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First descendant matching `selector`.
pub fn first_match<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).next()
}

/// True if the element's `class` attribute contains `fragment` anywhere,
/// the way CSS-module class names are matched (`foo_extendedStartRow__x1`).
pub fn class_contains(element: ElementRef<'_>, fragment: &str) -> bool {
    element
        .value()
        .attr("class")
        .map(|class| class.contains(fragment))
        .unwrap_or(false)
}

/// True if one of the element's class tokens equals `name`.
pub fn has_class(element: ElementRef<'_>, name: &str) -> bool {
    element.value().classes().any(|class| class == name)
}

/// Direct element children with the given tag name.
pub fn child_elements<'a>(element: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == tag)
        .collect()
}

/// True if `element`'s nearest enclosing `<table>` is `table` itself.
pub fn belongs_to_table(element: ElementRef<'_>, table: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "table")
        .map(|owner| owner.id() == table.id())
        .unwrap_or(false)
}
