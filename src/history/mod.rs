//! Bounded, newest-first feedback history backed by a key-value store.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::{
    error::{IntakeError, Result},
    models::FeedbackRecord,
    storage::KeyValueStore,
    utils::Clock,
};
use crate::{log_debug, log_info, log_warn};

pub mod export;

pub use export::{export_filename, ExportArtifact, ExportSnapshot, EXPORT_MIME_TYPE};

const ENABLE_LOGS: bool = true;

pub const HISTORY_KEY: &str = "feedbackHistory";
/// Also the ceiling: configured capacities are clamped into `1..=DEFAULT_CAPACITY`.
pub const DEFAULT_CAPACITY: usize = 10;

/// What to do when the persisted history cannot be parsed at startup.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MalformedHistoryPolicy {
    /// Start over with an empty list; the bad blob is overwritten on the next add.
    #[default]
    Reset,
    /// Refuse to start with `IntakeError::MalformedDurableState`.
    Fail,
}

#[derive(Debug, Clone, Copy)]
pub struct HistoryOptions {
    pub capacity: usize,
    pub malformed_policy: MalformedHistoryPolicy,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            malformed_policy: MalformedHistoryPolicy::Reset,
        }
    }
}

/// Shared handle to the history. Clones see the same list; every mutation
/// is serialized by one lock and persisted before the lock is released.
#[derive(Clone)]
pub struct HistoryStore {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    records: Arc<Mutex<Vec<FeedbackRecord>>>,
    capacity: usize,
}

impl HistoryStore {
    pub fn load(
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        options: HistoryOptions,
    ) -> Result<Self> {
        let capacity = options.capacity.clamp(1, DEFAULT_CAPACITY);
        if capacity != options.capacity {
            log_warn!(
                "History capacity {} is out of range; using {}",
                options.capacity,
                capacity
            );
        }
        let mut records = match storage.get(HISTORY_KEY)? {
            None => Vec::new(),
            Some(raw) => parse_history(&raw, options.malformed_policy)?,
        };

        if records.len() > capacity {
            log_warn!(
                "Stored history holds {} records; keeping the newest {}",
                records.len(),
                capacity
            );
            records.truncate(capacity);
        }

        log_info!("Loaded feedback history with {} records", records.len());

        Ok(Self {
            storage,
            clock,
            records: Arc::new(Mutex::new(records)),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert `record` at the front, evict past capacity, and persist.
    ///
    /// If persisting fails the in-memory list is left as it was.
    pub fn add(&self, record: FeedbackRecord) -> Result<()> {
        let mut guard = self.lock();
        let previous = guard.clone();

        guard.insert(0, record);
        guard.truncate(self.capacity);

        if let Err(err) = self.persist(&guard) {
            *guard = previous;
            return Err(err);
        }

        log_debug!("History now holds {} records", guard.len());
        Ok(())
    }

    /// Records newest-first.
    pub fn list(&self) -> Vec<FeedbackRecord> {
        self.lock().clone()
    }

    pub fn latest(&self) -> Option<FeedbackRecord> {
        self.lock().first().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Highest record id currently held, if any.
    pub fn max_id(&self) -> Option<u64> {
        self.lock().iter().map(FeedbackRecord::id).max()
    }

    /// Drop every record and the durable copy. Callers confirm first.
    pub fn clear(&self) -> Result<()> {
        let mut guard = self.lock();
        self.storage.remove(HISTORY_KEY)?;
        guard.clear();
        log_info!("Feedback history cleared");
        Ok(())
    }

    pub fn export(&self) -> Result<ExportArtifact> {
        let data = self.list();
        if data.is_empty() {
            return Err(IntakeError::EmptyHistory);
        }

        Ok(ExportArtifact::new(ExportSnapshot {
            export_date: self.clock.now(),
            total_feedback: data.len(),
            data,
        }))
    }

    fn persist(&self, records: &[FeedbackRecord]) -> Result<()> {
        let serialized = serde_json::to_string(records)?;
        self.storage.set(HISTORY_KEY, &serialized)?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<FeedbackRecord>> {
        match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn parse_history(raw: &str, policy: MalformedHistoryPolicy) -> Result<Vec<FeedbackRecord>> {
    // A stored `null` counts as "no history", same as a missing key.
    match serde_json::from_str::<Option<Vec<FeedbackRecord>>>(raw) {
        Ok(records) => Ok(records.unwrap_or_default()),
        Err(err) => match policy {
            MalformedHistoryPolicy::Reset => {
                log_warn!("Ignoring malformed stored history: {err}");
                Ok(Vec::new())
            }
            MalformedHistoryPolicy::Fail => Err(IntakeError::MalformedDurableState {
                key: HISTORY_KEY.to_string(),
                message: err.to_string(),
            }),
        },
    }
}
