//! Post-matching flow: draft content shared across the flow's stages.
//!
//! A requester describes a task, browses matched suppliers, picks a date and
//! time, then reviews and pays. The post text written in the first stage is
//! read by every later stage, so it lives in a single [`PostDraft`] owned by
//! the [`PostMatchingFlow`]. Dropping the flow discards the draft.
//!
//! Leaving a stage is guarded: a post needs text, browsing needs a chosen
//! supplier, and scheduling needs a [`ScheduleChoice`].

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::availability::SlotTime;
use crate::error::CoreError;
use crate::sync::SyncError;

// ---------------------------------------------------------------------------
// PostDraft
// ---------------------------------------------------------------------------

/// The post text being written. Starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    content: String,
}

impl PostDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn clear(&mut self) {
        self.content.clear();
    }

    /// Whether the draft has no visible text.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// The four stages of the post flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostMatchingStage {
    #[default]
    DescribePost,
    BrowseSuppliers,
    ChooseSchedule,
    ReviewAndPay,
}

impl PostMatchingStage {
    /// 1-based stage number.
    pub fn number(self) -> u8 {
        match self {
            Self::DescribePost => 1,
            Self::BrowseSuppliers => 2,
            Self::ChooseSchedule => 3,
            Self::ReviewAndPay => 4,
        }
    }

    /// Progress bar title.
    pub fn title(self) -> &'static str {
        match self {
            Self::DescribePost => "1. Describe your post",
            Self::BrowseSuppliers => "2. Browse Suppliers and prices",
            Self::ChooseSchedule => "3. Choose date & time",
            Self::ReviewAndPay => "4. Review & Pay",
        }
    }

    /// Progress bar fill, in percent.
    pub fn progress(self) -> u8 {
        self.number() * 25
    }

    fn following(self) -> Option<Self> {
        match self {
            Self::DescribePost => Some(Self::BrowseSuppliers),
            Self::BrowseSuppliers => Some(Self::ChooseSchedule),
            Self::ChooseSchedule => Some(Self::ReviewAndPay),
            Self::ReviewAndPay => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

/// How often the booked task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    #[serde(rename = "Just Once")]
    JustOnce,
    #[serde(rename = "Weekly")]
    Weekly,
    #[serde(rename = "Bi-Weekly")]
    BiWeekly,
    #[serde(rename = "Monthly")]
    Monthly,
}

impl Frequency {
    pub const ALL: [Self; 4] = [Self::JustOnce, Self::Weekly, Self::BiWeekly, Self::Monthly];

    pub fn label(self) -> &'static str {
        match self {
            Self::JustOnce => "Just Once",
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Bi-Weekly",
            Self::Monthly => "Monthly",
        }
    }

    /// Discount blurb shown next to recurring options.
    pub fn description(self) -> Option<&'static str> {
        match self {
            Self::JustOnce => None,
            Self::Weekly => Some("Save 15%"),
            Self::BiWeekly => Some("Save 10% - MOST POPULAR"),
            Self::Monthly => Some("Save 5%"),
        }
    }

    /// Discount in percent.
    pub fn discount_percent(self) -> u8 {
        match self {
            Self::JustOnce => 0,
            Self::Weekly => 15,
            Self::BiWeekly => 10,
            Self::Monthly => 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Prompt services
// ---------------------------------------------------------------------------

/// A named destination offered by a prompt service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub address: String,
}

/// Pre-written post asking for a ride to `place`.
pub fn ride_request_prompt(place: &Place) -> String {
    format!(
        "I need a ride to {} at {}. Could someone help me?",
        place.name, place.address
    )
}

// ---------------------------------------------------------------------------
// Supplier matching
// ---------------------------------------------------------------------------

/// One supplier returned by the search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SupplierMatch {
    pub supplier_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub structured_summary: Option<serde_json::Value>,
}

impl SupplierMatch {
    /// Why the supplier was matched, if the backend explained it.
    pub fn reasoning(&self) -> Option<&str> {
        self.structured_summary
            .as_ref()
            .and_then(|s| s.get("reasoning"))
            .and_then(|r| r.as_str())
    }
}

/// Search outcome. With no results the backend opens a post instead and
/// returns its id.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MatchResponse {
    #[serde(default)]
    pub results: Vec<SupplierMatch>,
    #[serde(default, alias = "report")]
    pub summary: Option<String>,
    #[serde(default)]
    pub post_id: Option<String>,
}

/// Finds suppliers for a post's text.
#[async_trait]
pub trait SupplierMatcher: Send + Sync {
    async fn match_post(&self, query: &str, requester_id: &str)
        -> Result<MatchResponse, SyncError>;
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

/// First bookable start time of the day, as an hour.
pub const SCHEDULE_START_HOUR: u32 = 10;

/// Last bookable start time of the day, as an hour.
pub const SCHEDULE_END_HOUR: u32 = 17;

/// Spacing between bookable start times.
pub const SCHEDULE_STEP_MINUTES: u32 = 30;

/// Bookable start times, 10:00 to 17:00 inclusive every half hour.
pub fn schedule_slots() -> Vec<SlotTime> {
    let first = SCHEDULE_START_HOUR * 60;
    let last = SCHEDULE_END_HOUR * 60;
    (first..=last)
        .step_by(SCHEDULE_STEP_MINUTES as usize)
        .filter_map(|m| SlotTime::new(m / 60, m % 60).ok())
        .collect()
}

/// Quick date filters offered on the supplier list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFilter {
    #[default]
    #[serde(rename = "Today")]
    Today,
    #[serde(rename = "Within 3 Days")]
    WithinThreeDays,
    #[serde(rename = "Within A Week")]
    WithinAWeek,
    /// Any date from today on, picked on a calendar.
    #[serde(rename = "Choose Dates")]
    ChooseDates,
}

impl DateFilter {
    pub const ALL: [Self; 4] = [
        Self::Today,
        Self::WithinThreeDays,
        Self::WithinAWeek,
        Self::ChooseDates,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::WithinThreeDays => "Within 3 Days",
            Self::WithinAWeek => "Within A Week",
            Self::ChooseDates => "Choose Dates",
        }
    }

    /// Number of days, counting today, the filter covers. `None` is open-ended.
    fn span_days(self) -> Option<u64> {
        match self {
            Self::Today => Some(1),
            Self::WithinThreeDays => Some(3),
            Self::WithinAWeek => Some(7),
            Self::ChooseDates => None,
        }
    }

    /// Whether `date` passes the filter when the current date is `today`.
    pub fn accepts(self, date: NaiveDate, today: NaiveDate) -> bool {
        if date < today {
            return false;
        }
        match self.span_days().and_then(|n| today.checked_add_days(Days::new(n))) {
            Some(end) => date < end,
            None => true,
        }
    }
}

/// Time-of-day filters offered on the supplier list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [Self; 3] = [Self::Morning, Self::Afternoon, Self::Evening];

    /// Morning is before 12:00, afternoon until 17:00, evening after.
    pub fn contains(self, time: SlotTime) -> bool {
        let hour = time.hour();
        match self {
            Self::Morning => hour < 12,
            Self::Afternoon => (12..17).contains(&hour),
            Self::Evening => hour >= 17,
        }
    }
}

/// Bookable start times matching any of `filters`. No filters means all.
pub fn filtered_schedule_slots(filters: &[TimeOfDay]) -> Vec<SlotTime> {
    schedule_slots()
        .into_iter()
        .filter(|t| filters.is_empty() || filters.iter().any(|f| f.contains(*t)))
        .collect()
}

/// The date and start time picked for the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleChoice {
    pub date: NaiveDate,
    pub time: SlotTime,
}

impl ScheduleChoice {
    /// Accepts a date from `today` on and one of [`schedule_slots`].
    pub fn new(date: NaiveDate, time: SlotTime, today: NaiveDate) -> Result<Self, CoreError> {
        if date < today {
            return Err(CoreError::Validation(format!(
                "Cannot schedule on {date}, which is in the past"
            )));
        }
        if !schedule_slots().contains(&time) {
            return Err(CoreError::Validation(format!(
                "Start time {time} is not offered. Choose a half hour between 10:00 and 17:00"
            )));
        }
        Ok(Self { date, time })
    }
}

// ---------------------------------------------------------------------------
// PostMatchingFlow
// ---------------------------------------------------------------------------

/// One pass through the post flow.
#[derive(Debug, Default)]
pub struct PostMatchingFlow {
    draft: PostDraft,
    stage: PostMatchingStage,
    frequency: Frequency,
    matches: Vec<SupplierMatch>,
    open_post_id: Option<String>,
    selected_supplier: Option<SupplierMatch>,
    schedule: Option<ScheduleChoice>,
}

impl PostMatchingFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> PostMatchingStage {
        self.stage
    }

    pub fn draft(&self) -> &PostDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut PostDraft {
        &mut self.draft
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
    }

    pub fn matches(&self) -> &[SupplierMatch] {
        &self.matches
    }

    /// Id of the open post created when the last search found nobody.
    pub fn open_post_id(&self) -> Option<&str> {
        self.open_post_id.as_deref()
    }

    pub fn selected_supplier(&self) -> Option<&SupplierMatch> {
        self.selected_supplier.as_ref()
    }

    pub fn schedule(&self) -> Option<ScheduleChoice> {
        self.schedule
    }

    /// Pick one of the current matches. Only offered while browsing.
    pub fn select_supplier(&mut self, supplier_id: &str) -> Result<&SupplierMatch, CoreError> {
        self.require_stage(PostMatchingStage::BrowseSuppliers, "Supplier selection")?;
        let chosen = self
            .matches
            .iter()
            .find(|m| m.supplier_id == supplier_id)
            .cloned()
            .ok_or_else(|| {
                CoreError::Validation(format!("Supplier '{supplier_id}' is not among the matches"))
            })?;
        tracing::debug!(supplier_id, "Supplier selected");
        Ok(self.selected_supplier.insert(chosen))
    }

    /// Record the booking date and time. Only offered while scheduling.
    pub fn choose_schedule(&mut self, choice: ScheduleChoice) -> Result<(), CoreError> {
        self.require_stage(PostMatchingStage::ChooseSchedule, "Scheduling")?;
        tracing::debug!(date = %choice.date, time = %choice.time, "Schedule chosen");
        self.schedule = Some(choice);
        Ok(())
    }

    /// Move to the following stage.
    ///
    /// A blank draft cannot leave DescribePost, BrowseSuppliers needs a
    /// selected supplier and ChooseSchedule needs a date and time.
    pub fn proceed(&mut self) -> Result<PostMatchingStage, CoreError> {
        let missing = match self.stage {
            PostMatchingStage::DescribePost if self.draft.is_blank() => {
                Some("Describe your post before continuing")
            }
            PostMatchingStage::BrowseSuppliers if self.selected_supplier.is_none() => {
                Some("Select a supplier before continuing")
            }
            PostMatchingStage::ChooseSchedule if self.schedule.is_none() => {
                Some("Choose a date and start time before continuing")
            }
            _ => None,
        };
        if let Some(msg) = missing {
            return Err(CoreError::Validation(msg.to_string()));
        }
        let next = self.stage.following().ok_or_else(|| {
            CoreError::Validation(format!("'{}' is the final stage", self.stage.title()))
        })?;
        tracing::debug!(from = self.stage.number(), to = next.number(), "Post flow stage");
        self.stage = next;
        Ok(next)
    }

    /// Return to the supplier list from scheduling or review.
    pub fn back_to_suppliers(&mut self) -> Result<PostMatchingStage, CoreError> {
        match self.stage {
            PostMatchingStage::ChooseSchedule | PostMatchingStage::ReviewAndPay => {
                self.stage = PostMatchingStage::BrowseSuppliers;
                Ok(self.stage)
            }
            other => Err(CoreError::Validation(format!(
                "Cannot go back to suppliers from '{}'",
                other.title()
            ))),
        }
    }

    /// Search suppliers for the draft. Only offered while browsing.
    ///
    /// Replaces any previous results and drops the selected supplier. A
    /// failed search keeps both.
    pub async fn find_suppliers(
        &mut self,
        matcher: &dyn SupplierMatcher,
        requester_id: &str,
    ) -> Result<&[SupplierMatch], CoreError> {
        self.require_stage(PostMatchingStage::BrowseSuppliers, "Supplier search")?;

        let response = matcher
            .match_post(self.draft.content(), requester_id)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Supplier search failed");
                CoreError::Submission(format!("Supplier search failed: {e}"))
            })?;

        tracing::info!(
            matches = response.results.len(),
            open_post = response.post_id.is_some(),
            "Supplier search complete"
        );
        self.matches = response.results;
        self.open_post_id = response.post_id;
        self.selected_supplier = None;
        Ok(&self.matches)
    }

    fn require_stage(&self, stage: PostMatchingStage, what: &str) -> Result<(), CoreError> {
        if self.stage != stage {
            return Err(CoreError::Validation(format!(
                "{what} is not available during '{}'",
                self.stage.title()
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
