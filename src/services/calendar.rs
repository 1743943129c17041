// src/services/calendar.rs

//! Academic calendar page scraper.
//!
//! Turns the calendar HTML into [`RawContent`]: selector-located list items
//! plus the flattened page text, so the extractor can fall back from one to
//! the other.

use reqwest::Client;
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::Result;
use crate::models::{CalendarSelectors, Fragment, RawContent};
use crate::utils::{http, normalize_whitespace, parse_selector};

/// Elements whose text never belongs to the page content.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Scraper for the academic calendar page.
pub struct CalendarScraper {
    url: String,
    selectors: CalendarSelectors,
}

impl CalendarScraper {
    pub fn new(url: impl Into<String>, selectors: CalendarSelectors) -> Self {
        Self {
            url: url.into(),
            selectors,
        }
    }

    /// Fetch the page and collect its content.
    pub async fn fetch(&self, client: &Client) -> Result<RawContent> {
        log::info!("Fetching calendar page: {}", self.url);
        let document = http::fetch_page_async(client, &self.url).await?;
        self.scrape(&document)
    }

    /// Collect fragments and text lines from a parsed document.
    pub fn scrape(&self, document: &Html) -> Result<RawContent> {
        let fragments = self.fragments(document)?;
        let lines = flatten_lines(document);
        log::debug!(
            "Calendar page: {} fragments, {} text lines",
            fragments.len(),
            lines.len()
        );
        Ok(RawContent { fragments, lines })
    }

    /// List items from the first item selector that matches anything.
    fn fragments(&self, document: &Html) -> Result<Vec<Fragment>> {
        let date_sel = parse_selector(&self.selectors.date_selector)?;
        let body_sel = parse_selector(&self.selectors.body_selector)?;

        for (attempt, raw) in self.selectors.item_selectors.iter().enumerate() {
            let item_sel = parse_selector(raw)?;
            let items: Vec<ElementRef> = document.select(&item_sel).collect();
            if items.is_empty() {
                log::debug!("Item selector #{} '{}' matched nothing", attempt + 1, raw);
                continue;
            }

            log::debug!(
                "Item selector #{} '{}' matched {} items",
                attempt + 1,
                raw,
                items.len()
            );
            return Ok(items
                .iter()
                .map(|item| to_fragment(item, &date_sel, &body_sel))
                .collect());
        }

        Ok(Vec::new())
    }
}

fn to_fragment(item: &ElementRef, date_sel: &Selector, body_sel: &Selector) -> Fragment {
    let text_of = |sel: &Selector| {
        item.select(sel)
            .next()
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
            .filter(|s| !s.is_empty())
    };

    Fragment {
        date: text_of(date_sel),
        body: text_of(body_sel),
        text: normalize_whitespace(&item.text().collect::<Vec<_>>().join(" ")),
    }
}

/// Visible page text, one trimmed non-empty line per entry.
pub fn flatten_lines(document: &Html) -> Vec<String> {
    document
        .tree
        .nodes()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some((node, text)),
            _ => None,
        })
        .filter(|(node, _)| {
            !node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            })
        })
        .flat_map(|(_, text)| text.lines().map(normalize_whitespace).collect::<Vec<_>>())
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRUCTURED: &str = r#"
        <html><body>
        <div class="schedule-list-box">
          <div class="list"><ul>
            <li><strong>02.20(금)</strong><p>학위수여식</p></li>
            <li><strong>02.02(월) ~ 02.27(금)</strong><p> 2026학년도 1학기
                등록기간 </p></li>
            <li><strong>03.02(월)</strong><span>개강</span></li>
          </ul></div>
        </div>
        </body></html>
    "#;

    fn scraper() -> CalendarScraper {
        CalendarScraper::new("https://example.com", CalendarSelectors::default())
    }

    #[test]
    fn test_fragments_from_primary_selector() {
        let document = Html::parse_document(STRUCTURED);
        let content = scraper().scrape(&document).unwrap();

        assert_eq!(content.fragments.len(), 3);
        assert_eq!(content.fragments[0].date.as_deref(), Some("02.20(금)"));
        assert_eq!(content.fragments[0].body.as_deref(), Some("학위수여식"));
        assert_eq!(
            content.fragments[1].body.as_deref(),
            Some("2026학년도 1학기 등록기간")
        );
        assert_eq!(content.fragments[2].body, None);
        assert_eq!(content.fragments[2].text, "03.02(월) 개강");
    }

    #[test]
    fn test_fragments_fall_back_to_later_selector() {
        let html = r#"<div class="list"><ul><li><strong>03.02(월)</strong><p>개강</p></li></ul></div>"#;
        let document = Html::parse_document(html);
        let content = scraper().scrape(&document).unwrap();

        assert_eq!(content.fragments.len(), 1);
        assert_eq!(content.fragments[0].body.as_deref(), Some("개강"));
    }

    #[test]
    fn test_no_fragments_still_yields_lines() {
        let html = r#"<table><tr><td>03.02(월)</td><td>개강</td></tr></table>"#;
        let document = Html::parse_document(html);
        let content = scraper().scrape(&document).unwrap();

        assert!(content.fragments.is_empty());
        assert_eq!(content.lines, vec!["03.02(월)", "개강"]);
    }

    #[test]
    fn test_flatten_skips_scripts_and_styles() {
        let html = r#"
            <html><head><style>.a { color: red }</style></head>
            <body><script>var d = "01.01 스크립트";</script>
            <p>03.02(월) 개강</p><noscript>켜주세요</noscript></body></html>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(flatten_lines(&document), vec!["03.02(월) 개강"]);
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        let selectors = CalendarSelectors {
            item_selectors: vec!["[[bad".into()],
            ..CalendarSelectors::default()
        };
        let document = Html::parse_document(STRUCTURED);
        let result = CalendarScraper::new("https://example.com", selectors).scrape(&document);
        assert!(result.is_err());
    }
}
