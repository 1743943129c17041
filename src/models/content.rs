//! Raw scraped content handed to the event extractor.

/// One list item from the calendar page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    /// Text of the date sub-element, if the item has one
    pub date: Option<String>,

    /// Text of the body/title sub-element, if the item has one
    pub body: Option<String>,

    /// Whole text of the item
    pub text: String,
}

impl Fragment {
    pub fn new(date: Option<&str>, body: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            date: date.map(str::to_string),
            body: body.map(str::to_string),
            text: text.into(),
        }
    }
}

/// Everything scraped from the calendar page.
///
/// Either shape may be empty; extraction strategies pick the one they need.
#[derive(Debug, Clone, Default)]
pub struct RawContent {
    /// Structured items located by CSS selectors
    pub fragments: Vec<Fragment>,

    /// Flattened page text, one entry per non-empty line
    pub lines: Vec<String>,
}

impl RawContent {
    pub fn from_fragments(fragments: Vec<Fragment>) -> Self {
        Self {
            fragments,
            lines: Vec::new(),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: Vec::new(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty() && self.lines.is_empty()
    }
}
