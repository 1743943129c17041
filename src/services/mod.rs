//! Service layer for the notifier.
//!
//! This module contains the business logic for:
//! - Date token parsing (`date`)
//! - Event extraction, de-duplication and classification (`EventExtractor`,
//!   `dedup_events`, `EventClassifier`)
//! - Page scraping (`CalendarScraper`, `BoardScraper`)
//! - Message formatting and delivery (`message`, `Notifier`)

mod board;
mod calendar;
mod classify;
pub mod date;
mod dedup;
pub mod extract;
pub mod message;
mod notify;

pub use board::BoardScraper;
pub use calendar::{CalendarScraper, flatten_lines};
pub use classify::{DEFAULT_LOOKAHEAD_DAYS, DEFAULT_UPCOMING_LIMIT, EventClassifier};
pub use dedup::dedup_events;
pub use extract::{EventExtractor, Extraction};
pub use message::Message;
pub use notify::{ConsoleNotifier, Notifier, TelegramNotifier, build_notifier};
