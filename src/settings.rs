use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use crate::history::{MalformedHistoryPolicy, DEFAULT_CAPACITY};

pub const HOME_ENV: &str = "FEEDBACK_INTAKE_HOME";
pub const DEBUG_ENV: &str = "FEEDBACK_INTAKE_DEBUG";
pub const NO_DELAY_ENV: &str = "FEEDBACK_INTAKE_NO_DELAY";

const APP_DIR_NAME: &str = "feedback-intake";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Json,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LatencySettings {
    pub enabled: bool,
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for LatencySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_ms: 2000,
            max_ms: 4000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IntakeSettings {
    pub storage: StorageBackend,
    pub history_capacity: usize,
    pub malformed_history: MalformedHistoryPolicy,
    pub latency: LatencySettings,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            history_capacity: DEFAULT_CAPACITY,
            malformed_history: MalformedHistoryPolicy::default(),
            latency: LatencySettings::default(),
        }
    }
}

impl IntakeSettings {
    /// Apply process-level overrides on top of the persisted values.
    pub fn with_env_overrides(mut self) -> Self {
        if env_flag(NO_DELAY_ENV) {
            self.latency.enabled = false;
        }
        self
    }
}

/// Settings persisted as pretty JSON next to the history data.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<IntakeSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("Ignoring unreadable settings at {}: {err}", path.display());
                IntakeSettings::default()
            })
        } else {
            IntakeSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> IntakeSettings {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn update<F>(&self, change: F) -> Result<IntakeSettings>
    where
        F: FnOnce(&mut IntakeSettings),
    {
        let mut guard = match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut next = guard.clone();
        change(&mut next);
        self.persist(&next)?;
        *guard = next.clone();
        Ok(next)
    }

    fn persist(&self, data: &IntakeSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

/// Data directory: explicit flag, then `FEEDBACK_INTAKE_HOME`, then the
/// platform's local data dir.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| env::var_os(HOME_ENV).map(PathBuf::from))
        .or_else(|| dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME)))
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR_NAME}")))
}

pub fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
