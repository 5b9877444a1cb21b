use std::{
    fmt::Write as _,
    io::{self, Write},
    sync::Mutex,
};

use crate::models::FeedbackRecord;

use super::{HistoryEntryView, Renderer, NO_HISTORY_PLACEHOLDER};

/// Plain-text renderer for the command line.
pub struct TerminalRenderer<W: Write + Send = io::Stdout> {
    out: Mutex<W>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn emit(&self, text: &str) {
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            log::error!("Failed to write to terminal: {err}");
        }
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn render_result(&self, record: &FeedbackRecord) {
        self.emit(&format_result(record));
    }

    fn render_history(&self, records: &[FeedbackRecord]) {
        self.emit(&format_history(records));
    }
}

pub fn format_result(record: &FeedbackRecord) -> String {
    let sentiment = record.sentiment();
    let metadata = record.metadata();
    let mut out = String::new();

    let _ = writeln!(out, "Sentiment: {} ({})", sentiment.score, sentiment.label);

    let _ = writeln!(out, "\nInsights:");
    for insight in record.insights() {
        let _ = writeln!(out, "  - {insight}");
    }

    let _ = writeln!(out, "\nRecommendations:");
    for rec in record.recommendations() {
        let _ = writeln!(out, "  {}: {}", rec.kind.as_str().to_uppercase(), rec.text);
    }

    let _ = writeln!(out, "\nConfidence:       {}%", metadata.confidence);
    let _ = writeln!(out, "Processing time:  {}ms", metadata.processing_time_ms);
    let _ = writeln!(out, "Word count:       {}", metadata.word_count);
    let _ = writeln!(out, "Language:         {}", metadata.detected_language);
    out
}

pub fn format_history(records: &[FeedbackRecord]) -> String {
    if records.is_empty() {
        return format!("{NO_HISTORY_PLACEHOLDER}\n");
    }

    let mut out = String::new();
    for record in records {
        let view = HistoryEntryView::from_record(record);
        let _ = writeln!(out, "{}  {} ({})", view.date, view.label, view.score);
        let _ = writeln!(out, "  {}", view.preview);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        intake::RecordAssembler,
        models::{Category, Priority},
        utils::SystemClock,
    };
    use std::sync::Arc;

    fn record(text: &str) -> FeedbackRecord {
        RecordAssembler::new(Arc::new(SystemClock)).assemble(
            text,
            Category::Service,
            Priority::Urgent,
            2150,
        )
    }

    #[test]
    fn result_lists_tags_upper_cased() {
        let text = format_result(&record("terrible awful service, worst experience"));
        assert!(text.starts_with("Sentiment: 5 (negative)"));
        assert!(text.contains("  IMMEDIATE: Immediate response required"));
        assert!(text.contains("  FOLLOW-UP: Schedule follow-up communication"));
        assert!(text.contains("Processing time:  2150ms"));
    }

    #[test]
    fn empty_history_shows_placeholder() {
        assert_eq!(format_history(&[]), "No feedback processed yet\n");
    }

    #[test]
    fn history_rows_are_previewed() {
        let long = "word ".repeat(40);
        let text = format_history(&[record(long.trim())]);
        assert!(text.contains("neutral (50)"));
        assert!(text.trim_end().ends_with("..."));
    }

    #[test]
    fn renderer_writes_into_its_sink() {
        let renderer = TerminalRenderer::new(Vec::new());
        renderer.render_history(&[]);
        let written = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(written, "No feedback processed yet\n");
    }
}
