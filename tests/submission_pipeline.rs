use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use feedback_intake_lib::{
    analysis::{insights, recommendations},
    history::{HistoryOptions, HistoryStore, HISTORY_KEY},
    intake::{FeedbackForm, IntakeController, LatencySimulator, RecordAssembler},
    models::{FeedbackRecord, RecommendationType, SentimentLabel},
    render::Renderer,
    storage::{KeyValueStore, MemoryStore},
    utils::ManualClock,
    IntakeError,
};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Default)]
struct RecordingRenderer {
    results: Mutex<Vec<FeedbackRecord>>,
    history_renders: Mutex<Vec<usize>>,
}

impl Renderer for RecordingRenderer {
    fn render_result(&self, record: &FeedbackRecord) {
        self.results.lock().unwrap().push(record.clone());
    }

    fn render_history(&self, records: &[FeedbackRecord]) {
        self.history_renders.lock().unwrap().push(records.len());
    }
}

struct Harness {
    controller: IntakeController,
    storage: Arc<MemoryStore>,
    renderer: Arc<RecordingRenderer>,
}

fn harness() -> Harness {
    harness_with(Arc::new(MemoryStore::new()))
}

fn harness_with(storage: Arc<MemoryStore>) -> Harness {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    ));
    let history =
        HistoryStore::load(storage.clone(), clock.clone(), HistoryOptions::default()).unwrap();
    let renderer = Arc::new(RecordingRenderer::default());
    let controller = IntakeController::new(
        RecordAssembler::with_rng(clock, StdRng::seed_from_u64(42)),
        history,
        LatencySimulator::disabled(),
        renderer.clone(),
    );

    Harness {
        controller,
        storage,
        renderer,
    }
}

fn kinds(record: &FeedbackRecord) -> Vec<RecommendationType> {
    record.recommendations().iter().map(|r| r.kind).collect()
}

#[tokio::test]
async fn happy_product_feedback() {
    let h = harness();
    let form = FeedbackForm::new("This product is great and I love it", "product", "low");
    let record = h.controller.submit(&form).await.unwrap();

    assert_eq!(record.sentiment().score, 80);
    assert_eq!(record.sentiment().label, SentimentLabel::Positive);
    assert!(record
        .insights()
        .iter()
        .any(|i| i == insights::PRODUCT_INSIGHT));
    assert!(record
        .insights()
        .iter()
        .any(|i| i == insights::POSITIVE_TESTIMONIAL));
    assert_eq!(
        kinds(&record),
        vec![
            RecommendationType::Leverage,
            RecommendationType::Maintain,
            RecommendationType::Product,
            RecommendationType::FollowUp,
        ]
    );

    assert_eq!(h.controller.history().latest(), Some(record.clone()));
    assert_eq!(*h.renderer.results.lock().unwrap(), vec![record]);
    assert_eq!(*h.renderer.history_renders.lock().unwrap(), vec![1]);
}

#[tokio::test]
async fn urgent_service_complaint() {
    let h = harness();
    let form = FeedbackForm::new("terrible awful service, worst experience", "service", "urgent");
    let record = h.controller.submit(&form).await.unwrap();

    assert_eq!(record.sentiment().score, 5);
    assert_eq!(record.sentiment().label, SentimentLabel::Negative);
    assert_eq!(
        kinds(&record),
        vec![
            RecommendationType::Immediate,
            RecommendationType::Recovery,
            RecommendationType::Analysis,
            RecommendationType::Training,
            RecommendationType::FollowUp,
        ]
    );
    assert_eq!(
        record.recommendations()[3].text,
        recommendations::TRAINING_TEXT
    );
    assert_eq!(record.metadata().word_count, 5);
}

#[tokio::test]
async fn blank_submission_changes_nothing() {
    let h = harness();
    h.controller
        .submit(&FeedbackForm::new("kept", "general", "medium"))
        .await
        .unwrap();
    let before = h.controller.history().list();
    let stored_before = h.storage.get(HISTORY_KEY).unwrap();

    for form in [
        FeedbackForm::new("", "general", "low"),
        FeedbackForm::new("   \t", "general", "low"),
        FeedbackForm::new("text", "", "low"),
        FeedbackForm::new("text", "general", ""),
    ] {
        let err = h.controller.submit(&form).await.unwrap_err();
        assert!(matches!(err, IntakeError::Validation { .. }));
        assert!(err.is_user_facing());
    }

    assert_eq!(h.controller.history().list(), before);
    assert_eq!(h.storage.get(HISTORY_KEY).unwrap(), stored_before);
    assert_eq!(h.renderer.results.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn submitted_text_is_trimmed() {
    let h = harness();
    let record = h
        .controller
        .submit(&FeedbackForm::new("  padded note  ", "support", "high"))
        .await
        .unwrap();
    assert_eq!(record.original_text(), "padded note");
    assert_eq!(record.metadata().word_count, 2);
}

#[tokio::test]
async fn history_is_capped_and_newest_first() {
    let h = harness();
    let mut last = None;
    for i in 0..15 {
        let form = FeedbackForm::new(format!("feedback number {i}"), "general", "low");
        last = Some(h.controller.submit(&form).await.unwrap());
        assert!(h.controller.history().len() <= 10);
    }

    let list = h.controller.history().list();
    assert_eq!(list.len(), 10);
    assert_eq!(list.first(), last.as_ref());
    assert_eq!(list[9].original_text(), "feedback number 5");
    assert!(list.windows(2).all(|pair| pair[0].id() > pair[1].id()));
}

#[tokio::test]
async fn export_mirrors_history() {
    let h = harness();
    assert!(matches!(
        h.controller.export(),
        Err(IntakeError::EmptyHistory)
    ));

    for text in ["good", "bad", "fine"] {
        h.controller
            .submit(&FeedbackForm::new(text, "product", "medium"))
            .await
            .unwrap();
    }

    let artifact = h.controller.export().unwrap();
    assert_eq!(artifact.snapshot.data, h.controller.history().list());
    assert_eq!(artifact.snapshot.total_feedback, 3);
    assert_eq!(artifact.filename, "feedback-analysis-2024-06-01.json");

    let json: serde_json::Value = serde_json::from_slice(&artifact.to_bytes().unwrap()).unwrap();
    assert_eq!(json["totalFeedback"], 3);
    assert_eq!(json["data"][0]["originalText"], "fine");
    assert_eq!(json["data"][0]["metadata"]["detectedLanguage"], "English");
    assert!(json["data"][0]["metadata"]["processingTime"].is_u64());
}

#[tokio::test]
async fn clear_respects_confirmation() {
    let h = harness();
    h.controller
        .submit(&FeedbackForm::new("note", "general", "low"))
        .await
        .unwrap();

    assert!(!h.controller.clear_history(|| false).unwrap());
    assert_eq!(h.controller.history().len(), 1);
    assert!(h.storage.contains(HISTORY_KEY));

    assert!(h.controller.clear_history(|| true).unwrap());
    assert!(h.controller.history().is_empty());
    assert!(!h.storage.contains(HISTORY_KEY));
    assert_eq!(h.renderer.history_renders.lock().unwrap().last(), Some(&0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_submissions_are_serialized() {
    let h = harness();
    let controller = h.controller.clone();

    let tasks: Vec<_> = (0..24)
        .map(|i| {
            let controller = controller.clone();
            tokio::spawn(async move {
                let form = FeedbackForm::new(format!("parallel {i}"), "support", "medium");
                controller.submit(&form).await
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let list = h.controller.history().list();
    assert_eq!(list.len(), 10);
    let stored: Vec<FeedbackRecord> =
        serde_json::from_str(&h.storage.get(HISTORY_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored, list);
}

#[tokio::test]
async fn simulated_latency_is_reported() {
    let storage = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    ));
    let history = HistoryStore::load(storage, clock.clone(), HistoryOptions::default()).unwrap();
    let controller = IntakeController::new(
        RecordAssembler::with_rng(clock, StdRng::seed_from_u64(1)),
        history,
        LatencySimulator::with_rng(Some(20..30), StdRng::seed_from_u64(1)),
        Arc::new(RecordingRenderer::default()),
    );

    let record = controller
        .submit(&FeedbackForm::new("waiting", "general", "low"))
        .await
        .unwrap();
    assert!(record.metadata().processing_time_ms >= 20);
}

#[tokio::test]
async fn corrupt_stored_id_does_not_break_submissions() {
    let stored = r#"[{
        "id": 18446744073709551615,
        "timestamp": "2024-05-31T08:00:00.000Z",
        "originalText": "old entry",
        "category": "general",
        "priority": "low",
        "sentiment": {"score": 50, "label": "neutral"},
        "insights": [],
        "recommendations": [],
        "metadata": {"confidence": 90, "processingTime": 2000, "wordCount": 2, "detectedLanguage": "English"}
    }]"#;
    let h = harness_with(Arc::new(MemoryStore::with_entry(HISTORY_KEY, stored)));

    let first = h
        .controller
        .submit(&FeedbackForm::new("first after restart", "general", "low"))
        .await
        .unwrap();
    let second = h
        .controller
        .submit(&FeedbackForm::new("second after restart", "general", "low"))
        .await
        .unwrap();

    assert!(second.id() > first.id());
    assert_eq!(h.controller.history().len(), 3);
}
