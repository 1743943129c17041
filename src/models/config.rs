//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{BoardSelectors, CalendarSelectors};

/// Environment variable overriding `telegram.token`.
pub const TOKEN_ENV: &str = "TELEGRAM_TOKEN";

/// Environment variable overriding `telegram.chat_id`.
pub const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Academic calendar page settings
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Notice board settings
    #[serde(default)]
    pub board: BoardConfig,

    /// Telegram delivery settings
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// IANA time zone that defines "today"
    #[serde(default = "defaults::timezone")]
    pub timezone: String,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Fill Telegram credentials from the environment when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            self.telegram.token = Some(token);
        }
        if let Ok(chat_id) = std::env::var(CHAT_ID_ENV) {
            self.telegram.chat_id = Some(chat_id);
        }
        self
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.calendar.url.trim().is_empty() {
            return Err(AppError::validation("calendar.url is empty"));
        }
        if self.calendar.selectors.item_selectors.is_empty() {
            return Err(AppError::validation(
                "calendar.selectors.item_selectors is empty",
            ));
        }
        if self.calendar.lookahead_days < 0 {
            return Err(AppError::validation("calendar.lookahead_days must be >= 0"));
        }
        if self.calendar.upcoming_limit == 0 {
            return Err(AppError::validation("calendar.upcoming_limit must be > 0"));
        }
        if self.board.url.trim().is_empty() {
            return Err(AppError::validation("board.url is empty"));
        }
        if self.board.top_n == 0 {
            return Err(AppError::validation("board.top_n must be > 0"));
        }
        if self.board.selectors.link_selectors.is_empty() {
            return Err(AppError::validation("board.selectors.link_selectors is empty"));
        }
        if self.board.snapshot_file.trim().is_empty() {
            return Err(AppError::validation("board.snapshot_file is empty"));
        }
        self.tz()?;
        Ok(())
    }

    /// Parsed time zone.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| AppError::config(format!("Unknown timezone '{}': {}", self.timezone, e)))
    }

    /// Today's calendar date in the configured time zone.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.tz()?).date_naive())
    }

    /// Location of the board snapshot under a storage root.
    pub fn snapshot_path(&self, root: &Path) -> PathBuf {
        root.join(&self.board.snapshot_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            calendar: CalendarConfig::default(),
            board: BoardConfig::default(),
            telegram: TelegramConfig::default(),
            timezone: defaults::timezone(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Skip TLS certificate verification (the university site ships a broken chain)
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            accept_invalid_certs: false,
        }
    }
}

/// Academic calendar settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Calendar page URL
    #[serde(default = "defaults::calendar_url")]
    pub url: String,

    /// Heading of the calendar message
    #[serde(default = "defaults::calendar_title")]
    pub title: String,

    /// Maximum days ahead an event may start and still count as upcoming
    #[serde(default = "defaults::lookahead_days")]
    pub lookahead_days: i64,

    /// Number of upcoming events to report
    #[serde(default = "defaults::upcoming_limit")]
    pub upcoming_limit: usize,

    #[serde(default)]
    pub selectors: CalendarSelectors,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            url: defaults::calendar_url(),
            title: defaults::calendar_title(),
            lookahead_days: defaults::lookahead_days(),
            upcoming_limit: defaults::upcoming_limit(),
            selectors: CalendarSelectors::default(),
        }
    }
}

/// Notice board settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Board list URL
    #[serde(default = "defaults::board_url")]
    pub url: String,

    /// Base URL for resolving relative post links
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Number of posts from the top of the board to watch
    #[serde(default = "defaults::top_n")]
    pub top_n: usize,

    /// Snapshot file name, relative to the storage directory
    #[serde(default = "defaults::snapshot_file")]
    pub snapshot_file: String,

    /// Message template for a new post (`{title}`, `{url}`)
    #[serde(default = "defaults::post_template")]
    pub template: String,

    #[serde(default)]
    pub selectors: BoardSelectors,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            url: defaults::board_url(),
            base_url: defaults::base_url(),
            top_n: defaults::top_n(),
            snapshot_file: defaults::snapshot_file(),
            template: defaults::post_template(),
            selectors: BoardSelectors::default(),
        }
    }
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub chat_id: Option<String>,

    /// Bot API root, overridable for testing against a local server
    #[serde(default = "defaults::api_base")]
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            chat_id: None,
            api_base: defaults::api_base(),
        }
    }
}

impl TelegramConfig {
    /// Token and chat id, if both are present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let token = self.token.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let chat_id = self.chat_id.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((token, chat_id))
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/91.0.4472.124 Safari/537.36".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Calendar defaults
    pub fn calendar_url() -> String {
        "https://www.kw.ac.kr/ko/life/bachelor_calendar.jsp".into()
    }
    pub fn calendar_title() -> String {
        "광운대 학사일정".into()
    }
    pub fn lookahead_days() -> i64 {
        60
    }
    pub fn upcoming_limit() -> usize {
        2
    }

    // Board defaults
    pub fn board_url() -> String {
        "https://www.kw.ac.kr/ko/life/notice.jsp".into()
    }
    pub fn base_url() -> String {
        "https://www.kw.ac.kr".into()
    }
    pub fn top_n() -> usize {
        5
    }
    pub fn snapshot_file() -> String {
        "data.txt".into()
    }
    pub fn post_template() -> String {
        "📢 [광운대 새 공지]\n{title}\n\n{url}".into()
    }

    // Telegram defaults
    pub fn api_base() -> String {
        "https://api.telegram.org".into()
    }

    pub fn timezone() -> String {
        "Asia/Seoul".into()
    }
}
