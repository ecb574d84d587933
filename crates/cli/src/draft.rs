//! JSON draft describing one supplier's setup answers.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use kontask_core::availability::WeeklySlots;
use kontask_core::error::CoreError;
use kontask_core::roles::validate_role;
use kontask_core::setup::{Approach, SetupPatch, SourceDocument};
use kontask_core::types::Timestamp;

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid draft JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// A hand-placed availability block, outside the weekly template.
#[derive(Debug, Clone, Deserialize)]
pub struct ManualBlock {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Setup answers as written by the operator.
///
/// Only `business_name` is required. When `document` is set the wizard runs
/// in auto mode and the document summary overrides `description`, `skills`
/// and `role`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupDraft {
    pub business_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Weekly template; the default Monday-Friday 09:00-17:00 when absent.
    #[serde(default)]
    pub weekly_slots: Option<WeeklySlots>,
    #[serde(default)]
    pub manual_blocks: Vec<ManualBlock>,
    /// Path to a document for auto-fill, relative to the draft file.
    #[serde(default)]
    pub document: Option<PathBuf>,
    /// Confirm the profile instead of skipping verification.
    #[serde(default)]
    pub verify: bool,
}

impl SetupDraft {
    /// Read and parse a draft file.
    pub fn load(path: &Path) -> Result<Self, DraftError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DraftError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, DraftError> {
        let draft: Self = serde_json::from_str(raw)?;
        validate_role(&draft.role)?;
        if let Some(slots) = &draft.weekly_slots {
            slots.validate()?;
        }
        Ok(draft)
    }

    /// Build the store patch, reading the document relative to `base_dir`.
    pub fn to_patch(&self, base_dir: &Path) -> Result<SetupPatch, DraftError> {
        let source_file = match &self.document {
            Some(rel) => {
                let path = base_dir.join(rel);
                let bytes = std::fs::read(&path).map_err(|source| DraftError::Io {
                    path: path.clone(),
                    source,
                })?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Some(SourceDocument::new(file_name, bytes)?)
            }
            None => None,
        };
        let approach = if source_file.is_some() {
            Approach::AutoFromFile
        } else {
            Approach::Manual
        };

        Ok(SetupPatch {
            business_name: Some(self.business_name.clone()),
            approach: Some(approach),
            source_file: Some(source_file),
            description: Some(self.description.clone()),
            role: Some(self.role.clone()),
            skills_text: Some(self.skills.join(", ")),
            weekly_slots: Some(self.weekly_slots.clone().unwrap_or_default()),
            time_slots: None,
        })
    }
}
