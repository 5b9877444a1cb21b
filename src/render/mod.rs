//! Output boundary between the intake core and whatever UI displays results.

use chrono::{DateTime, Local, Utc};

use crate::{
    analysis::text_len,
    models::{FeedbackRecord, SentimentLabel},
};

pub mod terminal;

pub use terminal::TerminalRenderer;

pub const PREVIEW_MAX_LEN: usize = 100;
pub const NO_HISTORY_PLACEHOLDER: &str = "No feedback processed yet";

/// Implemented once per UI stack. The core calls these after each state change.
pub trait Renderer: Send + Sync {
    fn render_result(&self, record: &FeedbackRecord);

    fn render_history(&self, records: &[FeedbackRecord]);
}

/// First 100 UTF-16 units of `text`, with `...` appended when anything was cut.
///
/// A surrogate pair straddling the limit is dropped whole.
pub fn preview_text(text: &str) -> String {
    if text_len(text) <= PREVIEW_MAX_LEN {
        return text.to_string();
    }

    let mut units = 0;
    let mut cut = 0;
    for (idx, ch) in text.char_indices() {
        units += ch.len_utf16();
        if units > PREVIEW_MAX_LEN {
            break;
        }
        cut = idx + ch.len_utf8();
    }
    format!("{}...", &text[..cut])
}

/// One history row, already shaped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntryView {
    pub date: String,
    pub label: SentimentLabel,
    pub score: u8,
    pub preview: String,
}

impl HistoryEntryView {
    pub fn from_record(record: &FeedbackRecord) -> Self {
        Self {
            date: display_date(record.timestamp()),
            label: record.sentiment().label,
            score: record.sentiment().score,
            preview: preview_text(record.original_text()),
        }
    }
}

fn display_date(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
