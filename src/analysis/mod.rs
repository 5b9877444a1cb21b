pub mod insights;
pub mod recommendations;
pub mod rules;
pub mod sentiment;

pub use insights::generate_insights;
pub use recommendations::generate_recommendations;
pub use sentiment::{analyze, classify, SentimentBreakdown};

/// Number of whitespace-separated tokens in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Length in UTF-16 code units, the unit browser-side text fields report.
///
/// Astral-plane characters such as emoji count as two.
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// As-you-type counter for an input field: blank input counts as zero words.
pub fn live_word_count(text: &str) -> usize {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        0
    } else {
        word_count(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_of_whitespace_split_once() {
        assert_eq!(word_count("one  two\t\tthree\nfour"), 4);
    }

    #[test]
    fn live_count_handles_blank_input() {
        assert_eq!(live_word_count(""), 0);
        assert_eq!(live_word_count("   \n "), 0);
        assert_eq!(live_word_count("  hello there "), 2);
    }

    #[test]
    fn text_len_counts_utf16_units() {
        assert_eq!(text_len("abc"), 3);
        assert_eq!(text_len("é"), 1);
        assert_eq!(text_len("😀"), 2);
    }
}
