// src/error.rs

//! Unified error handling for the notifier.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for notifier operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Message delivery failed
    #[error("Notification error: {0}")]
    Notify(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a notification delivery error.
    pub fn notify(message: impl fmt::Display) -> Self {
        Self::Notify(message.to_string())
    }
}

/// Failure to turn a date token into a calendar range.
///
/// Always local to a single candidate: the extractor drops the candidate
/// and keeps going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Token or one half of a range is empty
    #[error("empty date token")]
    Empty,

    /// No `MM.DD` pattern anywhere in the token
    #[error("no date in '{0}'")]
    NoDate(String),

    /// A half does not look like `MM.DD`, or the range has too many halves
    #[error("malformed date '{0}'")]
    Malformed(String),

    /// Month or day outside the calendar
    #[error("date out of range: {year}.{month}.{day}")]
    OutOfRange { year: i32, month: u32, day: u32 },

    /// End precedes start once the reference year is applied
    #[error("range ends before it starts: {start} ~ {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
}
