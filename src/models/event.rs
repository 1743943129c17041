//! Calendar event and classification data structures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A schedule entry recovered from the academic calendar page.
///
/// `start <= end` always holds for events built by the date parser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    /// Event title (at least two characters after trimming)
    pub title: String,

    /// First day of the event
    pub start: NaiveDate,

    /// Last day of the event (inclusive)
    pub end: NaiveDate,
}

impl Event {
    pub fn new(title: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            title: title.into(),
            start,
            end,
        }
    }

    /// Whether `today` falls inside the event, both ends inclusive.
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.start <= today && today <= self.end
    }

    /// Signed number of days from `today` to the event start.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.start - today).num_days()
    }
}

/// An event that starts after today, with its countdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEvent {
    pub title: String,
    pub start_date: NaiveDate,
    pub d_day: i64,
}

/// Calendar notification payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Titles of events running today
    pub today_titles: Vec<String>,

    /// Nearest future events, ascending by start
    pub upcoming: Vec<UpcomingEvent>,
}

impl ClassificationResult {
    /// True when there is nothing worth sending.
    pub fn is_empty(&self) -> bool {
        self.today_titles.is_empty() && self.upcoming.is_empty()
    }
}
