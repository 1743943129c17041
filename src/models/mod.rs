// src/models/mod.rs

//! Domain models for the notifier.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod content;
mod event;
mod post;
mod selectors;

// Re-export all public types
pub use config::{
    BoardConfig, CHAT_ID_ENV, CalendarConfig, Config, CrawlerConfig, TOKEN_ENV, TelegramConfig,
};
pub use content::{Fragment, RawContent};
pub use event::{ClassificationResult, Event, UpcomingEvent};
pub use post::{PostIdentity, SNAPSHOT_DELIMITER};
pub use selectors::{BoardSelectors, CalendarSelectors};
