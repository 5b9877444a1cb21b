use std::{sync::Arc, time::Instant};

use crate::{
    error::Result,
    history::{ExportArtifact, HistoryStore},
    models::FeedbackRecord,
    render::Renderer,
};
use crate::{log_info, log_warn};

use super::{FeedbackForm, LatencySimulator, RecordAssembler};

const ENABLE_LOGS: bool = true;

/// Submission pipeline: validate, wait, assemble, persist, render.
#[derive(Clone)]
pub struct IntakeController {
    assembler: Arc<RecordAssembler>,
    history: HistoryStore,
    latency: Arc<LatencySimulator>,
    renderer: Arc<dyn Renderer>,
}

impl IntakeController {
    pub fn new(
        assembler: RecordAssembler,
        history: HistoryStore,
        latency: LatencySimulator,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        if let Some(max_id) = history.max_id() {
            assembler.observe_existing_id(max_id);
        }

        Self {
            assembler: Arc::new(assembler),
            history,
            latency: Arc::new(latency),
            renderer,
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Run one submission end to end.
    ///
    /// Validation failures return before any waiting and leave history as it
    /// was. Overlapping submissions are safe; each `add` holds the history lock.
    pub async fn submit(&self, form: &FeedbackForm) -> Result<FeedbackRecord> {
        let feedback = match form.validate() {
            Ok(feedback) => feedback,
            Err(err) => {
                log_warn!("Rejected submission: {err}");
                return Err(err);
            }
        };

        let started = Instant::now();
        self.latency.wait().await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let record = self.assembler.assemble(
            &feedback.text,
            feedback.category,
            feedback.priority,
            elapsed_ms,
        );
        self.history.add(record.clone())?;

        log_info!(
            "Processed feedback {} ({}, {}) in {}ms: {} ({})",
            record.id(),
            record.category(),
            record.priority(),
            elapsed_ms,
            record.sentiment().label,
            record.sentiment().score
        );

        self.renderer.render_result(&record);
        self.renderer.render_history(&self.history.list());

        Ok(record)
    }

    pub fn show_history(&self) {
        self.renderer.render_history(&self.history.list());
    }

    /// Clear history only if `confirm` agrees. Returns whether anything was cleared.
    pub fn clear_history<F>(&self, confirm: F) -> Result<bool>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return Ok(false);
        }
        self.history.clear()?;
        self.renderer.render_history(&[]);
        Ok(true)
    }

    pub fn export(&self) -> Result<ExportArtifact> {
        let artifact = self.history.export()?;
        log_info!(
            "Exported {} records as {}",
            artifact.snapshot.total_feedback,
            artifact.filename
        );
        Ok(artifact)
    }
}
