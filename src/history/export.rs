use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::Result, models::FeedbackRecord};

pub const EXPORT_MIME_TYPE: &str = "application/json";

/// Serializable copy of the full history at export time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub export_date: DateTime<Utc>,
    pub total_feedback: usize,
    pub data: Vec<FeedbackRecord>,
}

#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub snapshot: ExportSnapshot,
    pub filename: String,
}

impl ExportArtifact {
    pub fn new(snapshot: ExportSnapshot) -> Self {
        let filename = export_filename(snapshot.export_date);
        Self { snapshot, filename }
    }

    pub fn mime_type(&self) -> &'static str {
        EXPORT_MIME_TYPE
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_json_pretty().map(String::into_bytes)
    }

    /// Write the artifact into `dir` under its suggested filename.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create export directory {}", dir.display()))?;
        let path = dir.join(&self.filename);
        fs::write(&path, self.to_bytes()?)
            .with_context(|| format!("failed to write export to {}", path.display()))?;
        Ok(path)
    }
}

/// `feedback-analysis-<YYYY-MM-DD>.json`, dated in UTC.
pub fn export_filename(export_date: DateTime<Utc>) -> String {
    format!("feedback-analysis-{}.json", export_date.format("%Y-%m-%d"))
}
