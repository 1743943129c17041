// src/services/classify.rs

//! Today/upcoming classification of calendar events.

use chrono::NaiveDate;

use crate::models::{CalendarConfig, ClassificationResult, Event, UpcomingEvent};

/// Default lookahead window in days.
pub const DEFAULT_LOOKAHEAD_DAYS: i64 = 60;

/// Default number of upcoming events reported.
pub const DEFAULT_UPCOMING_LIMIT: usize = 2;

/// Splits events into those running today and the nearest future ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventClassifier {
    lookahead_days: i64,
    upcoming_limit: usize,
}

impl EventClassifier {
    pub fn new(lookahead_days: i64, upcoming_limit: usize) -> Self {
        Self {
            lookahead_days,
            upcoming_limit,
        }
    }

    pub fn from_config(config: &CalendarConfig) -> Self {
        Self::new(config.lookahead_days, config.upcoming_limit)
    }

    /// Classify `events` relative to `today`.
    ///
    /// Today titles keep input order. Upcoming events start strictly after
    /// today, within the lookahead window, sorted by start (ties keep input
    /// order) and capped at the upcoming limit.
    pub fn classify(&self, events: &[Event], today: NaiveDate) -> ClassificationResult {
        let today_titles = events
            .iter()
            .filter(|event| event.is_active_on(today))
            .map(|event| event.title.clone())
            .collect();

        let mut upcoming: Vec<UpcomingEvent> = events
            .iter()
            .filter(|event| event.start > today)
            .map(|event| UpcomingEvent {
                title: event.title.clone(),
                start_date: event.start,
                d_day: event.days_until(today),
            })
            .filter(|item| item.d_day <= self.lookahead_days)
            .collect();

        // sort_by_key is stable
        upcoming.sort_by_key(|item| item.start_date);
        upcoming.truncate(self.upcoming_limit);

        ClassificationResult {
            today_titles,
            upcoming,
        }
    }
}

impl Default for EventClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKAHEAD_DAYS, DEFAULT_UPCOMING_LIMIT)
    }
}
