// src/services/message.rs

//! Notification message formatting.

use chrono::NaiveDate;

use crate::models::{ClassificationResult, PostIdentity};

/// A message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,

    /// Whether `text` uses Telegram Markdown
    pub markdown: bool,
}

impl Message {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: false,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: true,
        }
    }
}

/// Escape characters that legacy Telegram Markdown treats as markup.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Build the calendar digest, or `None` when there is nothing to report.
pub fn calendar_message(
    heading: &str,
    result: &ClassificationResult,
    today: NaiveDate,
) -> Option<Message> {
    if result.is_empty() {
        return None;
    }

    let mut lines = vec![format!(
        "📆 *{}* ({})",
        escape_markdown(heading),
        today.format("%m/%d")
    )];

    if !result.today_titles.is_empty() {
        lines.push("\n🔔 *오늘의 일정*".to_string());
        for title in &result.today_titles {
            lines.push(format!("• {}", escape_markdown(title)));
        }
    }

    if !result.upcoming.is_empty() {
        lines.push("\n⏳ *다가오는 일정*".to_string());
        for item in &result.upcoming {
            lines.push(format!(
                "• D-{} {} ({})",
                item.d_day,
                escape_markdown(&item.title),
                item.start_date.format("%m/%d")
            ));
        }
    }

    Some(Message::markdown(lines.join("\n")))
}

/// Build the announcement for one new post.
pub fn post_message(template: &str, post: &PostIdentity) -> Message {
    Message::plain(post.format(template))
}
