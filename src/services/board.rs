// src/services/board.rs

//! Notice board scraper.
//!
//! Reads the top rows of the board list into [`PostIdentity`] records.

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::Result;
use crate::models::{BoardConfig, PostIdentity};
use crate::utils::{http, normalize_whitespace, parse_selector, resolve_url};

/// Scraper for the notice board list.
pub struct BoardScraper {
    config: BoardConfig,
}

impl BoardScraper {
    pub fn new(config: BoardConfig) -> Self {
        Self { config }
    }

    /// Fetch the board and read its top posts.
    pub async fn fetch(&self, client: &Client) -> Result<Vec<PostIdentity>> {
        log::info!("Fetching notice board: {}", self.config.url);
        let document = http::fetch_page_async(client, &self.config.url).await?;
        self.scrape(&document)
    }

    /// Read up to `top_n` posts, top of board first.
    ///
    /// Rows without a link element are skipped but still count toward the
    /// limit, so pinned separators cannot push real posts into view.
    pub fn scrape(&self, document: &Html) -> Result<Vec<PostIdentity>> {
        let selectors = &self.config.selectors;
        let row_sel = parse_selector(&selectors.row_selector)?;
        let link_sels = selectors
            .link_selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>>>()?;
        let base_url = Url::parse(&self.config.base_url)?;

        let rows: Vec<ElementRef> = document.select(&row_sel).collect();
        if rows.is_empty() {
            log::warn!(
                "Board row selector '{}' matched nothing",
                selectors.row_selector
            );
        }

        let posts: Vec<PostIdentity> = rows
            .iter()
            .take(self.config.top_n)
            .enumerate()
            .filter_map(|(i, row)| {
                let post = self.parse_row(row, &link_sels, &base_url);
                match &post {
                    Some(p) => log::debug!("  [{}] {}", i + 1, p.title),
                    None => log::debug!("  [{}] no link, skipped", i + 1),
                }
                post
            })
            .collect();

        log::info!("Read {} posts from the top of the board", posts.len());
        Ok(posts)
    }

    fn parse_row(
        &self,
        row: &ElementRef,
        link_sels: &[Selector],
        base_url: &Url,
    ) -> Option<PostIdentity> {
        let link = link_sels.iter().find_map(|sel| row.select(sel).next())?;

        let title = normalize_whitespace(&link.text().collect::<Vec<_>>().join(" "));
        if title.is_empty() {
            return None;
        }

        let url = match link.value().attr(&self.config.selectors.attr_name) {
            Some(href) if !href.trim().is_empty() => resolve_url(base_url, href.trim()),
            _ => self.config.url.clone(),
        };

        Some(PostIdentity::new(title, url))
    }
}
