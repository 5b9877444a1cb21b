use crate::models::{Category, SentimentLabel, SentimentResult};

use super::{
    rules::{evaluate, fired, Rule},
    text_len, word_count,
};

pub const DETAILED_FEEDBACK: &str = "Detailed feedback provided with comprehensive information";
pub const BRIEF_FEEDBACK: &str = "Brief feedback - consider requesting more specific details";
pub const POSITIVE_SATISFACTION: &str = "Customer expresses satisfaction and positive experience";
pub const POSITIVE_TESTIMONIAL: &str = "Opportunity to leverage positive feedback for testimonials";
pub const NEGATIVE_CONCERNS: &str = "Customer concerns identified - immediate attention recommended";
pub const NEGATIVE_RECOVERY: &str = "Potential for service recovery and relationship improvement";
pub const NEUTRAL_ROOM: &str = "Neutral feedback indicates room for improvement";
pub const PRODUCT_INSIGHT: &str = "Product-related feedback affects core offering quality";
pub const SERVICE_INSIGHT: &str = "Service feedback impacts customer experience directly";
pub const SUPPORT_INSIGHT: &str = "Support feedback indicates team performance levels";
pub const GENERAL_INSIGHT: &str = "General feedback provides overall business insights";
pub const HIGH_ENGAGEMENT: &str = "Extensive feedback suggests high customer engagement";

const DETAILED_MIN_LEN: usize = 500;
const BRIEF_MAX_LEN: usize = 100;
const ENGAGED_MIN_WORDS: usize = 100;

/// Facts about a submission that the insight table keys on.
#[derive(Debug, Clone, Copy)]
pub struct InsightContext {
    /// UTF-16 code units.
    pub length: usize,
    pub word_count: usize,
    pub category: Category,
    pub label: SentimentLabel,
}

impl InsightContext {
    pub fn new(text: &str, category: Category, sentiment: SentimentResult) -> Self {
        Self {
            length: text_len(text),
            word_count: word_count(text),
            category,
            label: sentiment.label,
        }
    }
}

pub static INSIGHT_RULES: &[Rule<InsightContext, &str>] = &[
    // length: detailed and brief are disjoint, medium lengths add nothing
    Rule {
        name: "length-detailed",
        applies: |c: &InsightContext| c.length > DETAILED_MIN_LEN,
        entries: &[DETAILED_FEEDBACK],
    },
    Rule {
        name: "length-brief",
        applies: |c: &InsightContext| c.length < BRIEF_MAX_LEN,
        entries: &[BRIEF_FEEDBACK],
    },
    // sentiment
    Rule {
        name: "sentiment-positive",
        applies: |c: &InsightContext| c.label == SentimentLabel::Positive,
        entries: &[POSITIVE_SATISFACTION, POSITIVE_TESTIMONIAL],
    },
    Rule {
        name: "sentiment-negative",
        applies: |c: &InsightContext| c.label == SentimentLabel::Negative,
        entries: &[NEGATIVE_CONCERNS, NEGATIVE_RECOVERY],
    },
    Rule {
        name: "sentiment-neutral",
        applies: |c: &InsightContext| c.label == SentimentLabel::Neutral,
        entries: &[NEUTRAL_ROOM],
    },
    // category
    Rule {
        name: "category-product",
        applies: |c: &InsightContext| c.category == Category::Product,
        entries: &[PRODUCT_INSIGHT],
    },
    Rule {
        name: "category-service",
        applies: |c: &InsightContext| c.category == Category::Service,
        entries: &[SERVICE_INSIGHT],
    },
    Rule {
        name: "category-support",
        applies: |c: &InsightContext| c.category == Category::Support,
        entries: &[SUPPORT_INSIGHT],
    },
    Rule {
        name: "category-general",
        applies: |c: &InsightContext| c.category == Category::General,
        entries: &[GENERAL_INSIGHT],
    },
    // engagement
    Rule {
        name: "engagement",
        applies: |c: &InsightContext| c.word_count > ENGAGED_MIN_WORDS,
        entries: &[HIGH_ENGAGEMENT],
    },
];

pub fn generate_insights(text: &str, category: Category, sentiment: SentimentResult) -> Vec<String> {
    let context = InsightContext::new(text, category, sentiment);
    evaluate(INSIGHT_RULES, &context)
        .map(|entry| entry.to_string())
        .collect()
}

/// Rule names that fire for this submission; used for debug logging.
pub fn fired_insight_rules(context: &InsightContext) -> Vec<&'static str> {
    fired(INSIGHT_RULES, context)
}
