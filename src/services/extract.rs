// src/services/extract.rs

//! Event extraction from scraped calendar content.
//!
//! The calendar markup is not stable, so extraction is an ordered chain of
//! strategies. Each strategy turns [`RawContent`] into candidates; the first
//! strategy that produces at least one acceptable candidate wins and the rest
//! are never consulted.
//!
//! 1. [`StructuredPairs`]: selector-located items with a date and a body.
//! 2. [`SameLine`]: a date pattern and its title on one text line.
//! 3. [`Lookahead`]: as `SameLine`, but a bare date line takes the following
//!    line as its title.

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::DateParseError;
use crate::models::{Event, RawContent};
use crate::services::date;
use crate::utils::normalize_whitespace;

/// Minimum title length, in grapheme clusters.
pub const MIN_TITLE_LEN: usize = 2;

/// `MM.DD` with optional `(요일)` marker, optionally followed by a separator
/// and a second `MM.DD(요일)`. Group 1 is the token.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[^\d.])(\d{1,2}\.\d{1,2}(?:\s*\(\s*[\p{Hangul}\p{Han}]\s*\))?(?:\s*[~\-]\s*\d{1,2}\.\d{1,2}(?:\s*\(\s*[\p{Hangul}\p{Han}]\s*\))?)?)",
    )
    .unwrap()
});

static MONTH_DAY_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}\.\d{1,2}").unwrap());

/// Find the first date token in `text`.
fn find_date(text: &str) -> Option<&str> {
    DATE_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether `text` contains a date token anywhere.
pub fn contains_date(text: &str) -> bool {
    find_date(text).is_some()
}

/// A title paired with the raw date token it was found next to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub date_token: String,
}

impl Candidate {
    pub fn new(title: impl Into<String>, date_token: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date_token: date_token.into(),
        }
    }

    /// Clean the title and check it is usable.
    ///
    /// Returns `None` when the title is shorter than [`MIN_TITLE_LEN`] once the
    /// date token is removed, or when it still holds a date (a sign that line
    /// boundaries were misaligned).
    pub fn accept(self) -> Option<Self> {
        let title = normalize_whitespace(&self.title.replace(&self.date_token, ""));
        if title.graphemes(true).count() < MIN_TITLE_LEN || contains_date(&title) {
            return None;
        }
        Some(Self {
            title,
            date_token: self.date_token.trim().to_string(),
        })
    }

    /// Parse the date token into an event.
    pub fn into_event(self, year: i32) -> Result<Event, DateParseError> {
        let (start, end) = date::parse_raw(&self.date_token, year)?;
        Ok(Event::new(self.title, start, end))
    }
}

/// One way of finding candidates in scraped content.
pub trait ExtractStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Produce raw candidates; validation happens in [`EventExtractor`].
    fn candidates(&self, content: &RawContent) -> Vec<Candidate>;
}

/// Pair the date and body elements of each structured fragment.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredPairs;

impl ExtractStrategy for StructuredPairs {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn candidates(&self, content: &RawContent) -> Vec<Candidate> {
        content
            .fragments
            .iter()
            .filter_map(|fragment| {
                let date = fragment.date.as_deref().map(str::trim)?;
                if !MONTH_DAY_DIGITS.is_match(date) {
                    return None;
                }
                // Without a body element the title is whatever else the item says.
                let title = match fragment.body.as_deref().map(str::trim) {
                    Some(body) if !body.is_empty() => body.to_string(),
                    _ => fragment.text.replace(date, ""),
                };
                Some(Candidate::new(title, date))
            })
            .collect()
    }
}

/// A date and its title on the same text line.
#[derive(Debug, Default, Clone, Copy)]
pub struct SameLine;

impl ExtractStrategy for SameLine {
    fn name(&self) -> &'static str {
        "same-line"
    }

    fn candidates(&self, content: &RawContent) -> Vec<Candidate> {
        content
            .lines
            .iter()
            .filter_map(|line| {
                let token = find_date(line)?;
                Some(Candidate::new(line.replacen(token, "", 1), token))
            })
            .collect()
    }
}

/// Same-line scan where a bare date line borrows the next line as its title.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lookahead;

impl ExtractStrategy for Lookahead {
    fn name(&self) -> &'static str {
        "lookahead"
    }

    fn candidates(&self, content: &RawContent) -> Vec<Candidate> {
        let lines = &content.lines;
        let mut candidates = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];
            i += 1;

            let Some(token) = find_date(line) else {
                continue;
            };
            let remainder = normalize_whitespace(&line.replacen(token, "", 1));

            if remainder.graphemes(true).count() < MIN_TITLE_LEN {
                if let Some(next) = lines.get(i).filter(|next| !contains_date(next)) {
                    candidates.push(Candidate::new(next.clone(), token));
                    i += 1;
                    continue;
                }
            }
            candidates.push(Candidate::new(remainder, token));
        }

        candidates
    }
}

/// Outcome of one extraction pass.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Parsed events, in discovery order
    pub events: Vec<Event>,

    /// Name of the strategy that produced them, if any did
    pub strategy: Option<&'static str>,

    /// Candidates dropped for an unusable title
    pub rejected: usize,

    /// Candidates dropped because their date did not parse
    pub failures: Vec<DateParseError>,
}

/// Runs the strategy chain and parses the winning candidates.
pub struct EventExtractor {
    strategies: Vec<Box<dyn ExtractStrategy>>,
}

impl EventExtractor {
    /// Create an extractor with the default strategy order.
    pub fn new() -> Self {
        Self::with_strategies(vec![
            Box::new(StructuredPairs),
            Box::new(SameLine),
            Box::new(Lookahead),
        ])
    }

    /// Create an extractor with a custom strategy order.
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractStrategy>>) -> Self {
        Self { strategies }
    }

    /// Extract events, applying `year` to every parsed date.
    ///
    /// Never fails: unparseable candidates are tallied in
    /// [`Extraction::failures`] and an empty result means no strategy matched.
    pub fn extract(&self, content: &RawContent, year: i32) -> Extraction {
        let mut outcome = Extraction::default();

        for strategy in &self.strategies {
            let raw = strategy.candidates(content);
            let raw_count = raw.len();
            let accepted: Vec<Candidate> = raw.into_iter().filter_map(Candidate::accept).collect();

            log::debug!(
                "Strategy '{}': {} candidates, {} accepted",
                strategy.name(),
                raw_count,
                accepted.len()
            );

            if accepted.is_empty() {
                continue;
            }

            outcome.strategy = Some(strategy.name());
            outcome.rejected = raw_count - accepted.len();
            for candidate in accepted {
                match candidate.into_event(year) {
                    Ok(event) => outcome.events.push(event),
                    Err(error) => {
                        log::debug!("Dropping candidate: {}", error);
                        outcome.failures.push(error);
                    }
                }
            }
            break;
        }

        match outcome.strategy {
            Some(name) => log::info!(
                "Extracted {} events via '{}' ({} rejected, {} unparseable)",
                outcome.events.len(),
                name,
                outcome.rejected,
                outcome.failures.len()
            ),
            None => log::warn!("No extraction strategy matched the calendar content"),
        }

        outcome
    }
}

impl Default for EventExtractor {
    fn default() -> Self {
        Self::new()
    }
}
