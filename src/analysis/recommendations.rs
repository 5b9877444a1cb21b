use crate::models::{
    Category, Priority, Recommendation, RecommendationType, SentimentLabel, SentimentResult,
};

use super::rules::{evaluate, fired, Rule};

pub const IMMEDIATE_TEXT: &str =
    "Immediate response required - escalate to senior management within 2 hours";
pub const PRIORITY_TEXT: &str = "High priority issue - respond within 24 hours with action plan";
pub const RECOVERY_TEXT: &str =
    "Implement service recovery protocol - personal follow-up recommended";
pub const ANALYSIS_TEXT: &str = "Analyze root cause to prevent similar issues in the future";
pub const LEVERAGE_TEXT: &str = "Request customer testimonial or review for marketing purposes";
pub const MAINTAIN_TEXT: &str =
    "Maintain current service standards that generated positive feedback";
pub const PRODUCT_TEXT: &str =
    "Share feedback with product development team for future improvements";
pub const TRAINING_TEXT: &str = "Consider staff training if service issues are identified";
pub const PROCESS_TEXT: &str = "Review support processes and knowledge base effectiveness";
pub const FOLLOW_UP_TEXT: &str = "Schedule follow-up communication to ensure customer satisfaction";

type Entry = (RecommendationType, &'static str);

#[derive(Debug, Clone, Copy)]
pub struct RecommendationContext {
    pub label: SentimentLabel,
    pub category: Category,
    pub priority: Priority,
}

pub static RECOMMENDATION_RULES: &[Rule<RecommendationContext, Entry>] = &[
    // priority: only urgent and high escalate
    Rule {
        name: "priority-urgent",
        applies: |c: &RecommendationContext| c.priority == Priority::Urgent,
        entries: &[(RecommendationType::Immediate, IMMEDIATE_TEXT)],
    },
    Rule {
        name: "priority-high",
        applies: |c: &RecommendationContext| c.priority == Priority::High,
        entries: &[(RecommendationType::Priority, PRIORITY_TEXT)],
    },
    // sentiment: neutral adds nothing
    Rule {
        name: "sentiment-negative",
        applies: |c: &RecommendationContext| c.label == SentimentLabel::Negative,
        entries: &[
            (RecommendationType::Recovery, RECOVERY_TEXT),
            (RecommendationType::Analysis, ANALYSIS_TEXT),
        ],
    },
    Rule {
        name: "sentiment-positive",
        applies: |c: &RecommendationContext| c.label == SentimentLabel::Positive,
        entries: &[
            (RecommendationType::Leverage, LEVERAGE_TEXT),
            (RecommendationType::Maintain, MAINTAIN_TEXT),
        ],
    },
    // category: general adds nothing
    Rule {
        name: "category-product",
        applies: |c: &RecommendationContext| c.category == Category::Product,
        entries: &[(RecommendationType::Product, PRODUCT_TEXT)],
    },
    Rule {
        name: "category-service",
        applies: |c: &RecommendationContext| c.category == Category::Service,
        entries: &[(RecommendationType::Training, TRAINING_TEXT)],
    },
    Rule {
        name: "category-support",
        applies: |c: &RecommendationContext| c.category == Category::Support,
        entries: &[(RecommendationType::Process, PROCESS_TEXT)],
    },
    Rule {
        name: "follow-up",
        applies: |_: &RecommendationContext| true,
        entries: &[(RecommendationType::FollowUp, FOLLOW_UP_TEXT)],
    },
];

/// Build the recommendation list. Always ends with the follow-up entry.
pub fn generate_recommendations(
    sentiment: SentimentResult,
    category: Category,
    priority: Priority,
) -> Vec<Recommendation> {
    let context = RecommendationContext {
        label: sentiment.label,
        category,
        priority,
    };
    evaluate(RECOMMENDATION_RULES, &context)
        .map(|(kind, text)| Recommendation::new(*kind, text))
        .collect()
}

pub fn fired_recommendation_rules(context: &RecommendationContext) -> Vec<&'static str> {
    fired(RECOMMENDATION_RULES, context)
}
