use std::{
    ops::RangeInclusive,
    time::Duration,
    sync::{Arc, Mutex},
};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    analysis::{
        analyze,
        generate_insights,
        generate_recommendations,
        insights::{fired_insight_rules, InsightContext},
        recommendations::{fired_recommendation_rules, RecommendationContext},
        word_count,
    },
    models::{
        Category, FeedbackMetadata, FeedbackRecord, Priority, RecordParts, DETECTED_LANGUAGE,
    },
    utils::Clock,
};
use crate::{log_debug, log_warn};

const ENABLE_LOGS: bool = true;

pub const CONFIDENCE_RANGE: RangeInclusive<u8> = 85..=95;

/// Stored ids further ahead of the clock than this do not seed the sequence.
pub const MAX_ID_CLOCK_SKEW: Duration = Duration::from_secs(24 * 60 * 60);

struct AssemblerState {
    rng: StdRng,
    last_id: u64,
}

/// Combines classifier and rule-table output into finished records.
///
/// Reads the injected clock and random source and nothing else.
pub struct RecordAssembler {
    clock: Arc<dyn Clock>,
    state: Mutex<AssemblerState>,
}

impl RecordAssembler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_rng(clock, StdRng::from_entropy())
    }

    pub fn with_rng(clock: Arc<dyn Clock>, rng: StdRng) -> Self {
        Self {
            clock,
            state: Mutex::new(AssemblerState { rng, last_id: 0 }),
        }
    }

    /// Seed the id sequence so new ids stay above ones already persisted.
    pub fn observe_existing_id(&self, id: u64) {
        let skew_ms = u64::try_from(MAX_ID_CLOCK_SKEW.as_millis()).unwrap_or(u64::MAX);
        let ceiling = self.now_millis().saturating_add(skew_ms);
        if id > ceiling {
            log_warn!("Ignoring stored id {id}; it is ahead of the clock");
            return;
        }

        let mut state = self.lock_state();
        state.last_id = state.last_id.max(id);
    }

    pub fn assemble(
        &self,
        text: &str,
        category: Category,
        priority: Priority,
        elapsed_ms: u64,
    ) -> FeedbackRecord {
        let breakdown = analyze(text);
        let sentiment = breakdown.result;
        let insights = generate_insights(text, category, sentiment);
        let recommendations = generate_recommendations(sentiment, category, priority);

        log_debug!(
            "sentiment {} ({}) from +{:?} / -{:?}; insight rules {:?}; recommendation rules {:?}",
            sentiment.score,
            sentiment.label,
            breakdown.positive_hits,
            breakdown.negative_hits,
            fired_insight_rules(&InsightContext::new(text, category, sentiment)),
            fired_recommendation_rules(&RecommendationContext {
                label: sentiment.label,
                category,
                priority,
            })
        );

        let timestamp = self.clock.now();
        let (id, confidence) = {
            let mut state = self.lock_state();
            // Ids are creation milliseconds, bumped when two records share one.
            let millis = u64::try_from(timestamp.timestamp_millis()).unwrap_or(0);
            let id = millis.max(state.last_id.saturating_add(1));
            state.last_id = id;
            (id, state.rng.gen_range(CONFIDENCE_RANGE))
        };

        FeedbackRecord::from_parts(RecordParts {
            id,
            timestamp,
            original_text: text.to_string(),
            category,
            priority,
            sentiment,
            insights,
            recommendations,
            metadata: FeedbackMetadata {
                confidence,
                processing_time_ms: elapsed_ms,
                word_count: word_count(text),
                detected_language: DETECTED_LANGUAGE.to_string(),
            },
        })
    }

    fn now_millis(&self) -> u64 {
        u64::try_from(self.clock.now().timestamp_millis()).unwrap_or(0)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, AssemblerState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{RecommendationType, SentimentLabel},
        utils::ManualClock,
    };
    use chrono::{TimeZone, Utc};

    fn assembler() -> (Arc<ManualClock>, RecordAssembler) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 10, 14, 30, 0).unwrap(),
        ));
        let assembler = RecordAssembler::with_rng(clock.clone(), StdRng::seed_from_u64(7));
        (clock, assembler)
    }

    #[test]
    fn positive_product_scenario() {
        let (_, assembler) = assembler();
        let record = assembler.assemble(
            "This product is great and I love it",
            Category::Product,
            Priority::Low,
            2500,
        );

        assert_eq!(record.sentiment().score, 80);
        assert_eq!(record.sentiment().label, SentimentLabel::Positive);
        assert!(record
            .insights()
            .iter()
            .any(|i| i == crate::analysis::insights::PRODUCT_INSIGHT));
        assert!(record
            .insights()
            .iter()
            .any(|i| i == crate::analysis::insights::POSITIVE_SATISFACTION));

        let kinds: Vec<_> = record.recommendations().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RecommendationType::Leverage,
                RecommendationType::Maintain,
                RecommendationType::Product,
                RecommendationType::FollowUp,
            ]
        );
    }

    #[test]
    fn metadata_is_filled_in() {
        let (clock, assembler) = assembler();
        let record = assembler.assemble("short and sweet", Category::General, Priority::Medium, 3120);

        let metadata = record.metadata();
        assert!(CONFIDENCE_RANGE.contains(&metadata.confidence));
        assert_eq!(metadata.processing_time_ms, 3120);
        assert_eq!(metadata.word_count, 3);
        assert_eq!(metadata.detected_language, "English");
        assert_eq!(record.timestamp(), clock.now());
        assert_eq!(record.id(), clock.now().timestamp_millis() as u64);
        assert_eq!(record.original_text(), "short and sweet");
    }

    #[test]
    fn ids_increase_even_within_one_millisecond() {
        let (_, assembler) = assembler();
        let first = assembler.assemble("one", Category::General, Priority::Low, 0);
        let second = assembler.assemble("two", Category::General, Priority::Low, 0);
        assert!(second.id() > first.id());
    }

    #[test]
    fn ids_stay_above_observed_history() {
        let (clock, assembler) = assembler();
        let future = clock.now().timestamp_millis() as u64 + 10_000;
        assembler.observe_existing_id(future);
        let record = assembler.assemble("later", Category::General, Priority::Low, 0);
        assert_eq!(record.id(), future + 1);
    }

    #[test]
    fn stored_ids_far_in_the_future_are_ignored() {
        let (clock, assembler) = assembler();
        assembler.observe_existing_id(u64::MAX);
        let first = assembler.assemble("after bad id", Category::General, Priority::Low, 0);
        let second = assembler.assemble("and again", Category::General, Priority::Low, 0);
        assert_eq!(first.id(), clock.now().timestamp_millis() as u64);
        assert_eq!(second.id(), first.id() + 1);
    }

    #[test]
    fn id_sequence_saturates_instead_of_wrapping() {
        let (_, assembler) = assembler();
        assembler.lock_state().last_id = u64::MAX;
        let record = assembler.assemble("edge", Category::General, Priority::Low, 0);
        assert_eq!(record.id(), u64::MAX);
    }

    #[test]
    fn confidence_covers_whole_range() {
        let (_, assembler) = assembler();
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..500 {
            let record = assembler.assemble("x", Category::General, Priority::Low, 0);
            seen.insert(record.metadata().confidence);
        }
        assert_eq!(seen.first(), Some(&85));
        assert_eq!(seen.last(), Some(&95));
    }
}
