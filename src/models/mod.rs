pub mod feedback;

pub use feedback::{
    Category, FeedbackMetadata, FeedbackRecord, Priority, Recommendation, RecommendationType,
    SentimentLabel, SentimentResult, DETECTED_LANGUAGE,
};
pub(crate) use feedback::RecordParts;
