// src/pipeline/calendar.rs

//! Academic calendar pipeline.

use chrono::{Datelike, NaiveDate};
use reqwest::Client;

use crate::error::Result;
use crate::models::{ClassificationResult, Config, Event, RawContent};
use crate::services::{
    CalendarScraper, EventClassifier, EventExtractor, Notifier, dedup_events, message,
};

/// Summary of a calendar run.
#[derive(Debug, Default)]
pub struct CalendarOutcome {
    /// Deduplicated events, ascending by start
    pub events: Vec<Event>,

    /// Extraction strategy that produced the events
    pub strategy: Option<&'static str>,

    /// Candidates dropped for bad titles or dates
    pub dropped: usize,

    pub result: ClassificationResult,

    /// Whether a message went out
    pub sent: bool,
}

/// Extract, deduplicate, sort and classify scraped calendar content.
///
/// The reference year is taken from `today`.
pub fn process_calendar(
    content: &RawContent,
    today: NaiveDate,
    classifier: &EventClassifier,
) -> CalendarOutcome {
    let extraction = EventExtractor::new().extract(content, today.year());
    let dropped = extraction.rejected + extraction.failures.len();

    let mut events = dedup_events(extraction.events);
    events.sort_by_key(|event| event.start);

    let result = classifier.classify(&events, today);
    CalendarOutcome {
        events,
        strategy: extraction.strategy,
        dropped,
        result,
        sent: false,
    }
}

/// Run the calendar pipeline: fetch, classify, notify.
///
/// An empty extraction is logged and ends the run without error.
pub async fn run_calendar(
    config: &Config,
    client: &Client,
    notifier: &dyn Notifier,
    today: NaiveDate,
) -> Result<CalendarOutcome> {
    log::info!("Calendar run for {}", today);

    let scraper = CalendarScraper::new(&config.calendar.url, config.calendar.selectors.clone());
    let content = scraper.fetch(client).await?;

    let classifier = EventClassifier::from_config(&config.calendar);
    let mut outcome = process_calendar(&content, today, &classifier);

    if outcome.events.is_empty() {
        log::warn!("No calendar events found; the page layout may have changed");
        return Ok(outcome);
    }

    log::info!(
        "{} events: {} today, {} upcoming",
        outcome.events.len(),
        outcome.result.today_titles.len(),
        outcome.result.upcoming.len()
    );

    match message::calendar_message(&config.calendar.title, &outcome.result, today) {
        Some(msg) => {
            notifier.send(&msg).await?;
            outcome.sent = true;
        }
        None => log::info!("Nothing to report today"),
    }

    Ok(outcome)
}
