//! Notice board post identity.

use serde::{Deserialize, Serialize};

/// Separator between title and URL in a snapshot line.
pub const SNAPSHOT_DELIMITER: char = '|';

/// A post on the notice board, identified by its exact title and URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PostIdentity {
    /// Post title, whitespace collapsed
    pub title: String,

    /// Absolute URL of the post
    pub url: String,
}

impl PostIdentity {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Serialize as a single `title|url` snapshot line.
    pub fn to_line(&self) -> String {
        format!("{}{}{}", self.title, SNAPSHOT_DELIMITER, self.url)
    }

    /// Parse a `title|url` snapshot line.
    ///
    /// Splits at the last delimiter so titles containing `|` survive.
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (title, url) = line.rsplit_once(SNAPSHOT_DELIMITER)?;
        Some(Self::new(title, url))
    }

    /// Format the post for display using a template.
    ///
    /// Supported placeholders: `{title}`, `{url}`.
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{title}", &self.title)
            .replace("{url}", &self.url)
    }
}
