// src/models/selectors.rs

//! CSS selectors for scraping the calendar page and the notice board.

use serde::{Deserialize, Serialize};

/// Selectors for the academic calendar list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarSelectors {
    /// Item selectors tried in order; the first one matching anything wins
    #[serde(default = "defaults::item_selectors")]
    pub item_selectors: Vec<String>,

    /// Selector for the date element within an item
    #[serde(default = "defaults::date_selector")]
    pub date_selector: String,

    /// Selector for the event title element within an item
    #[serde(default = "defaults::body_selector")]
    pub body_selector: String,
}

impl Default for CalendarSelectors {
    fn default() -> Self {
        Self {
            item_selectors: defaults::item_selectors(),
            date_selector: defaults::date_selector(),
            body_selector: defaults::body_selector(),
        }
    }
}

/// Selectors for the notice board list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardSelectors {
    /// Selector for each post row
    #[serde(default = "defaults::row_selector")]
    pub row_selector: String,

    /// Link selectors tried in order within a row
    #[serde(default = "defaults::link_selectors")]
    pub link_selectors: Vec<String>,

    /// HTML attribute holding the post link
    #[serde(default = "defaults::attr_name")]
    pub attr_name: String,
}

impl Default for BoardSelectors {
    fn default() -> Self {
        Self {
            row_selector: defaults::row_selector(),
            link_selectors: defaults::link_selectors(),
            attr_name: defaults::attr_name(),
        }
    }
}

mod defaults {
    pub fn item_selectors() -> Vec<String> {
        vec![
            "div.schedule-list-box div.list ul li".into(),
            "div.schedule-list-box li".into(),
            "div.list ul li".into(),
        ]
    }
    pub fn date_selector() -> String {
        "strong".into()
    }
    pub fn body_selector() -> String {
        "p".into()
    }

    pub fn row_selector() -> String {
        ".board-list-box ul li".into()
    }
    pub fn link_selectors() -> Vec<String> {
        vec!["div.board-text > a".into(), "a".into()]
    }
    pub fn attr_name() -> String {
        "href".into()
    }
}
