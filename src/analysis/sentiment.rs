use crate::models::SentimentResult;

pub const POSITIVE_KEYWORDS: [&str; 12] = [
    "good",
    "great",
    "excellent",
    "amazing",
    "love",
    "perfect",
    "wonderful",
    "fantastic",
    "awesome",
    "satisfied",
    "happy",
    "pleased",
];

pub const NEGATIVE_KEYWORDS: [&str; 12] = [
    "bad",
    "terrible",
    "awful",
    "hate",
    "horrible",
    "worst",
    "disappointed",
    "frustrated",
    "angry",
    "poor",
    "useless",
    "broken",
];

const BASELINE_SCORE: i32 = 50;
const KEYWORD_WEIGHT: i32 = 15;

/// Classifier output together with the keywords that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentBreakdown {
    pub positive_hits: Vec<&'static str>,
    pub negative_hits: Vec<&'static str>,
    pub result: SentimentResult,
}

/// Keyword-count sentiment over the case-folded text.
///
/// Matching is plain substring containment, so "badge" counts as "bad" and
/// "unhappy" counts as "happy". Each keyword scores at most once no matter how
/// often it repeats.
pub fn analyze(text: &str) -> SentimentBreakdown {
    let folded = text.to_lowercase();

    let positive_hits = matching_keywords(&folded, &POSITIVE_KEYWORDS);
    let negative_hits = matching_keywords(&folded, &NEGATIVE_KEYWORDS);

    let raw = BASELINE_SCORE + KEYWORD_WEIGHT * positive_hits.len() as i32
        - KEYWORD_WEIGHT * negative_hits.len() as i32;

    SentimentBreakdown {
        positive_hits,
        negative_hits,
        result: SentimentResult::from_raw_score(raw),
    }
}

pub fn classify(text: &str) -> SentimentResult {
    analyze(text).result
}

fn matching_keywords(folded: &str, keywords: &[&'static str]) -> Vec<&'static str> {
    keywords
        .iter()
        .copied()
        .filter(|keyword| folded.contains(keyword))
        .collect()
}
