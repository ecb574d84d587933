//! Backend capabilities the wizard depends on, and their payloads.
//!
//! The wizard never talks HTTP itself. It is handed a [`SupplierSync`] to
//! persist the finished profile and a [`DocumentSummarizer`] to auto-fill
//! from an uploaded document, so tests can swap in in-memory fakes.

use async_trait::async_trait;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::availability::{day_name, CalendarEvent, SlotTime, WeeklySlots};
use crate::setup::{Approach, SetupData, SourceDocument};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Failure reported by a backend capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// The request never produced a response (network, DNS, TLS, decode).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("Backend rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Body of the profile update call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub business_name: String,
    pub approach: Approach,
    /// The business description; the backend stores it as the PDF summary.
    #[serde(rename = "pdfSummary")]
    pub description: String,
    pub skills: Vec<String>,
    pub role: String,
    pub time_slots: Vec<CalendarEvent>,
    pub weekly_slots: WeeklySlots,
}

impl ProfilePayload {
    pub fn from_setup(data: &SetupData) -> Self {
        Self {
            business_name: data.business_name.clone(),
            approach: data.approach,
            description: data.description.clone(),
            skills: data.skills_array(),
            role: data.role.clone(),
            time_slots: data.time_slots.clone(),
            weekly_slots: data.weekly_slots.clone(),
        }
    }
}

/// One weekday entry of the availability replacement call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    #[serde(with = "day_name")]
    pub day_of_week: Weekday,
    pub is_available: bool,
    pub start_time: SlotTime,
    pub end_time: SlotTime,
}

/// One entry per weekday, Monday first, mirroring the template 1:1.
pub fn availability_payload(slots: &WeeklySlots) -> Vec<AvailabilityEntry> {
    slots
        .iter()
        .map(|s| AvailabilityEntry {
            day_of_week: s.day,
            is_available: s.is_available,
            start_time: s.start_time,
            end_time: s.end_time,
        })
        .collect()
}

/// What the summarizer extracted from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DocumentSummary {
    #[serde(default)]
    pub detected_skills: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub detected_roles: Vec<String>,
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Persists a finished supplier profile.
#[async_trait]
pub trait SupplierSync: Send + Sync {
    /// Replace the supplier's profile fields.
    async fn submit_profile(
        &self,
        supplier_id: &str,
        payload: &ProfilePayload,
    ) -> Result<(), SyncError>;

    /// Replace the supplier's full weekly availability.
    async fn submit_availability(
        &self,
        supplier_id: &str,
        slots: &[AvailabilityEntry],
    ) -> Result<(), SyncError>;
}

/// Extracts profile details from an uploaded document.
#[async_trait]
pub trait DocumentSummarizer: Send + Sync {
    async fn summarize(
        &self,
        supplier_id: &str,
        document: &SourceDocument,
    ) -> Result<DocumentSummary, SyncError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
