//! In-progress supplier profile data and its store.
//!
//! [`SetupStore`] owns the accumulating [`SetupData`] for one run of the
//! profile-setup wizard. Steps receive it by reference from the wizard; they
//! update it only through [`SetupStore::set_data`] and [`SetupStore::reset`].

use serde::{Deserialize, Serialize};

use crate::availability::{weekday_name, CalendarEvent, WeeklySlots};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Approach / source document
// ---------------------------------------------------------------------------

/// How the supplier fills in the profile details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Approach {
    #[default]
    #[serde(rename = "manual")]
    Manual,
    /// Details are extracted from an uploaded document.
    #[serde(rename = "auto")]
    AutoFromFile,
}

/// File extensions accepted for auto-fill documents.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "ppt", "pptx"];

/// A document selected for auto-fill. Opaque to the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    /// Wrap a document, rejecting file types the summarizer cannot read.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, CoreError> {
        let file_name = file_name.into();
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(CoreError::Validation(format!(
                "Unsupported document '{file_name}'. Must be one of: {ACCEPTED_EXTENSIONS:?}"
            )));
        }
        Ok(Self { file_name, bytes })
    }

    /// MIME type derived from the file extension.
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => "application/pdf",
            "doc" => "application/msword",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "ppt" => "application/vnd.ms-powerpoint",
            "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            _ => "application/octet-stream",
        }
    }
}

// ---------------------------------------------------------------------------
// SetupData
// ---------------------------------------------------------------------------

/// Everything the wizard collects before submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SetupData {
    pub business_name: String,
    pub approach: Approach,
    /// Only meaningful when `approach` is [`Approach::AutoFromFile`].
    pub source_file: Option<SourceDocument>,
    pub description: String,
    /// One of [`crate::roles::KNOWN_ROLES`], or empty when unset.
    pub role: String,
    pub skills_text: String,
    pub weekly_slots: WeeklySlots,
    /// Materialized from `weekly_slots` on save; may be stale in between.
    pub time_slots: Vec<CalendarEvent>,
}

impl SetupData {
    /// Skills parsed from the free-text field.
    pub fn skills_array(&self) -> Vec<String> {
        parse_skills(&self.skills_text)
    }

    /// One review line per weekday, e.g. `"Monday: 09:00 - 17:00"`.
    pub fn summary_lines(&self) -> Vec<String> {
        self.weekly_slots
            .iter()
            .map(|s| {
                if s.is_available {
                    format!("{}: {} - {}", weekday_name(s.day), s.start_time, s.end_time)
                } else {
                    format!("{}: Unavailable", weekday_name(s.day))
                }
            })
            .collect()
    }
}

/// Split comma-separated skills, trimming each and dropping empties.
pub fn parse_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// SetupPatch
// ---------------------------------------------------------------------------

/// A partial update. `None` leaves the corresponding field untouched.
///
/// `source_file` is doubly optional so a patch can clear the file.
#[derive(Debug, Clone, Default)]
pub struct SetupPatch {
    pub business_name: Option<String>,
    pub approach: Option<Approach>,
    pub source_file: Option<Option<SourceDocument>>,
    pub description: Option<String>,
    pub role: Option<String>,
    pub skills_text: Option<String>,
    pub weekly_slots: Option<WeeklySlots>,
    pub time_slots: Option<Vec<CalendarEvent>>,
}

// ---------------------------------------------------------------------------
// SetupStore
// ---------------------------------------------------------------------------

/// Owner of the wizard's [`SetupData`].
#[derive(Debug, Default)]
pub struct SetupStore {
    data: SetupData,
}

impl SetupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &SetupData {
        &self.data
    }

    /// Shallow-merge `patch` into the current data. No validation.
    pub fn set_data(&mut self, patch: SetupPatch) {
        let SetupPatch {
            business_name,
            approach,
            source_file,
            description,
            role,
            skills_text,
            weekly_slots,
            time_slots,
        } = patch;
        let data = &mut self.data;

        if let Some(v) = business_name {
            data.business_name = v;
        }
        if let Some(v) = approach {
            data.approach = v;
        }
        if let Some(v) = source_file {
            data.source_file = v;
        }
        if let Some(v) = description {
            data.description = v;
        }
        if let Some(v) = role {
            data.role = v;
        }
        if let Some(v) = skills_text {
            data.skills_text = v;
        }
        if let Some(v) = weekly_slots {
            data.weekly_slots = v;
        }
        if let Some(v) = time_slots {
            data.time_slots = v;
        }
    }

    /// Restore the default data.
    pub fn reset(&mut self) {
        self.data = SetupData::default();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
