//! Feedback record data models.
//!
//! The serialized layout (camelCase keys, lowercase enum values) matches what
//! the web widget wrote into browser storage, so exported files and persisted
//! history stay interchangeable with it.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Language stamped on every record; no detection is performed.
pub const DETECTED_LANGUAGE: &str = "English";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Product,
    Service,
    Support,
    General,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Product,
        Category::Service,
        Category::Support,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Product => "product",
            Category::Service => "service",
            Category::Support => "support",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "product" => Ok(Category::Product),
            "service" => Ok(Category::Service),
            "support" => Ok(Category::Support),
            "general" => Ok(Category::General),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Label bands: `>= 70` positive, `<= 30` negative, neutral in between.
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            SentimentLabel::Positive
        } else if score <= 30 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentimentResult {
    pub score: u8,
    pub label: SentimentLabel,
}

impl SentimentResult {
    /// Clamps `raw` into `[0, 100]` and derives the label from the clamped score.
    pub fn from_raw_score(raw: i32) -> Self {
        let score = raw.clamp(0, 100) as u8;
        Self {
            score,
            label: SentimentLabel::from_score(score),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationType {
    Immediate,
    Priority,
    Recovery,
    Analysis,
    Leverage,
    Maintain,
    Product,
    Training,
    Process,
    FollowUp,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::Immediate => "immediate",
            RecommendationType::Priority => "priority",
            RecommendationType::Recovery => "recovery",
            RecommendationType::Analysis => "analysis",
            RecommendationType::Leverage => "leverage",
            RecommendationType::Maintain => "maintain",
            RecommendationType::Product => "product",
            RecommendationType::Training => "training",
            RecommendationType::Process => "process",
            RecommendationType::FollowUp => "follow-up",
        }
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub text: String,
}

impl Recommendation {
    pub fn new(kind: RecommendationType, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackMetadata {
    /// Cosmetic value in `[85, 95]`; not a quality measure.
    pub confidence: u8,
    #[serde(rename = "processingTime")]
    pub processing_time_ms: u64,
    pub word_count: usize,
    pub detected_language: String,
}

/// One analyzed submission. Fields are only readable once assembled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    id: u64,
    timestamp: DateTime<Utc>,
    original_text: String,
    category: Category,
    priority: Priority,
    sentiment: SentimentResult,
    insights: Vec<String>,
    recommendations: Vec<Recommendation>,
    metadata: FeedbackMetadata,
}

/// Field bundle used by the assembler to build a [`FeedbackRecord`].
pub(crate) struct RecordParts {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub original_text: String,
    pub category: Category,
    pub priority: Priority,
    pub sentiment: SentimentResult,
    pub insights: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub metadata: FeedbackMetadata,
}

impl FeedbackRecord {
    pub(crate) fn from_parts(parts: RecordParts) -> Self {
        Self {
            id: parts.id,
            timestamp: parts.timestamp,
            original_text: parts.original_text,
            category: parts.category,
            priority: parts.priority,
            sentiment: parts.sentiment,
            insights: parts.insights,
            recommendations: parts.recommendations,
            metadata: parts.metadata,
        }
    }
}

impl FeedbackRecord {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn sentiment(&self) -> SentimentResult {
        self.sentiment
    }

    pub fn insights(&self) -> &[String] {
        &self.insights
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn metadata(&self) -> &FeedbackMetadata {
        &self.metadata
    }
}
