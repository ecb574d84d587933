//! Supplier profile-setup wizard: steps, transitions, and controller.
//!
//! The wizard is a plain finite-state machine:
//!
//! ```text
//! Setup --Next--> ProfileVerification --Verify|Skip--> Summary --Submit--> Complete
//!   ^                                                     |                   |
//!   +-------------------------Edit------------------------+                   |
//!   +------------------------------------Restart (resets data)----------------+
//! ```
//!
//! [`next_step`] is the transition table. [`SetupWizard`] owns the current
//! step and the [`SetupStore`], applies the guards (business name present,
//! remote submission succeeded) and records field-level errors for display.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::{generate_events, CalendarEvent, DEFAULT_HORIZON_DAYS};
use crate::error::CoreError;
use crate::roles::role_from_detected;
use crate::setup::{Approach, SetupData, SetupPatch, SetupStore};
use crate::sync::{availability_payload, DocumentSummarizer, ProfilePayload, SupplierSync};
use crate::types::{SupplierId, Timestamp};

// ---------------------------------------------------------------------------
// Steps and actions
// ---------------------------------------------------------------------------

/// The four wizard screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupStep {
    Setup,
    ProfileVerification,
    Summary,
    Complete,
}

impl SetupStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::ProfileVerification => "profile_verification",
            Self::Summary => "summary",
            Self::Complete => "complete",
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::Setup => "Set Up Your Supplier Profile",
            Self::ProfileVerification => "Verify your Identity",
            Self::Summary => "Review Your Profile",
            Self::Complete => "Profile Setup Complete!",
        }
    }
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User actions that may move the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardAction {
    Next,
    Verify,
    Skip,
    Edit,
    Submit,
    Restart,
}

impl WizardAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Verify => "verify",
            Self::Skip => "skip",
            Self::Edit => "edit",
            Self::Submit => "submit",
            Self::Restart => "restart",
        }
    }
}

impl fmt::Display for WizardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transition table. Returns `None` when `action` is not offered on `from`.
///
/// Guards (required fields, remote success) are applied by [`SetupWizard`].
pub fn next_step(from: SetupStep, action: WizardAction) -> Option<SetupStep> {
    use SetupStep::*;
    use WizardAction::*;

    match (from, action) {
        (Setup, Next) => Some(ProfileVerification),
        // Verification does not block: both paths lead to the summary.
        (ProfileVerification, Verify | Skip) => Some(Summary),
        (Summary, Edit) => Some(Setup),
        (Summary, Submit) => Some(Complete),
        (Complete, Restart) => Some(Setup),
        _ => None,
    }
}

/// [`next_step`] as a `Result`.
pub fn validate_transition(from: SetupStep, action: WizardAction) -> Result<SetupStep, CoreError> {
    next_step(from, action).ok_or(CoreError::InvalidTransition { from, action })
}

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// Error key for the business name input.
pub const FIELD_BUSINESS_NAME: &str = "business_name";

/// Error key for the auto-fill document input.
pub const FIELD_FILE: &str = "file";

/// Error key for the submission alert on the summary step.
pub const FIELD_SUBMIT: &str = "submit";

pub const MSG_BUSINESS_NAME_REQUIRED: &str = "Business name is required.";

pub const MSG_FILE_UNPARSEABLE: &str =
    "Unable to parse file. Please try manual entry or check server logs.";

pub const MSG_SUBMIT_FAILED: &str = "Failed to save form data on the server.";

/// Field key to message, for inline display.
pub type FieldErrors = BTreeMap<&'static str, String>;

// ---------------------------------------------------------------------------
// SetupWizard
// ---------------------------------------------------------------------------

/// Controller for one supplier's profile-setup run.
#[derive(Debug)]
pub struct SetupWizard {
    supplier_id: SupplierId,
    step: SetupStep,
    store: SetupStore,
    errors: FieldErrors,
    horizon_days: u32,
}

impl SetupWizard {
    pub fn new(supplier_id: impl Into<SupplierId>) -> Self {
        Self {
            supplier_id: supplier_id.into(),
            step: SetupStep::Setup,
            store: SetupStore::new(),
            errors: FieldErrors::new(),
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    /// Override the availability materialization horizon.
    pub fn with_horizon_days(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    pub fn supplier_id(&self) -> &str {
        &self.supplier_id
    }

    pub fn step(&self) -> SetupStep {
        self.step
    }

    pub fn data(&self) -> &SetupData {
        self.store.data()
    }

    /// Mutable access to the store for the active step's field edits.
    pub fn store_mut(&mut self) -> &mut SetupStore {
        &mut self.store
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    // ---- transitions ----

    /// Setup -> ProfileVerification, if a business name was entered.
    pub fn next(&mut self) -> Result<SetupStep, CoreError> {
        let to = validate_transition(self.step, WizardAction::Next)?;
        self.require_business_name()?;
        self.errors.clear();
        Ok(self.advance(to))
    }

    pub fn verify(&mut self) -> Result<SetupStep, CoreError> {
        let to = validate_transition(self.step, WizardAction::Verify)?;
        Ok(self.advance(to))
    }

    pub fn skip(&mut self) -> Result<SetupStep, CoreError> {
        let to = validate_transition(self.step, WizardAction::Skip)?;
        Ok(self.advance(to))
    }

    /// Summary -> Setup, keeping all entered data.
    pub fn edit(&mut self) -> Result<SetupStep, CoreError> {
        let to = validate_transition(self.step, WizardAction::Edit)?;
        self.errors.remove(FIELD_SUBMIT);
        Ok(self.advance(to))
    }

    /// Summary -> Complete, after the profile and availability calls succeed.
    ///
    /// The calls are sequential; availability is only sent once the profile
    /// call succeeded. Any failure keeps the wizard on Summary with a submit
    /// alert, and a retry resends both calls (each replaces server state, so
    /// resending is safe).
    pub async fn submit(&mut self, sync: &dyn SupplierSync) -> Result<SetupStep, CoreError> {
        let to = validate_transition(self.step, WizardAction::Submit)?;
        self.require_business_name()?;

        let data = self.store.data();
        let payload = ProfilePayload::from_setup(data);
        let slots = availability_payload(&data.weekly_slots);

        tracing::info!(
            supplier_id = %self.supplier_id,
            skills = payload.skills.len(),
            time_slots = payload.time_slots.len(),
            "Submitting supplier profile"
        );

        if let Err(e) = sync.submit_profile(&self.supplier_id, &payload).await {
            return Err(self.submission_failed("Profile", e));
        }
        if let Err(e) = sync.submit_availability(&self.supplier_id, &slots).await {
            return Err(self.submission_failed("Availability", e));
        }

        self.errors.clear();
        Ok(self.advance(to))
    }

    /// Complete -> Setup, resetting all collected data first.
    pub fn restart(&mut self) -> Result<SetupStep, CoreError> {
        let to = validate_transition(self.step, WizardAction::Restart)?;
        self.store.reset();
        self.errors.clear();
        Ok(self.advance(to))
    }

    // ---- setup-step operations ----

    /// Fill description, skills and role from the selected document.
    ///
    /// Requires the auto approach and a selected document. A summarizer
    /// failure records a `file` error and leaves the data untouched; manual
    /// entry and [`SetupWizard::next`] remain available.
    pub async fn auto_fill(&mut self, summarizer: &dyn DocumentSummarizer) -> Result<(), CoreError> {
        let data = self.store.data();
        if data.approach != Approach::AutoFromFile {
            return Err(CoreError::Validation(
                "Auto-fill requires the 'auto' approach".to_string(),
            ));
        }
        let Some(document) = data.source_file.as_ref() else {
            return Err(CoreError::Validation(
                "Auto-fill requires a selected document".to_string(),
            ));
        };

        let summary = match summarizer.summarize(&self.supplier_id, document).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(
                    supplier_id = %self.supplier_id,
                    file = %document.file_name,
                    error = %e,
                    "Document auto-fill failed"
                );
                self.errors.insert(FIELD_FILE, MSG_FILE_UNPARSEABLE.to_string());
                return Err(CoreError::Upload(e.to_string()));
            }
        };

        let role = role_from_detected(&summary.detected_roles).unwrap_or_default();
        tracing::debug!(
            skills = summary.detected_skills.len(),
            role,
            "Applying document summary"
        );

        self.store.set_data(SetupPatch {
            skills_text: Some(summary.detected_skills.join(", ")),
            description: Some(summary.summary),
            role: Some(role.to_string()),
            ..Default::default()
        });
        self.errors.remove(FIELD_FILE);
        Ok(())
    }

    /// Validate the weekly template and regenerate the time slots from it.
    ///
    /// Returns the number of generated events. On validation failure the
    /// existing time slots are kept.
    pub fn save_availability(&mut self, today: NaiveDate) -> Result<usize, CoreError> {
        let data = self.store.data();
        data.weekly_slots.validate()?;

        let events = generate_events(&data.weekly_slots, self.horizon_days, today);
        let count = events.len();
        self.store.set_data(SetupPatch {
            time_slots: Some(events),
            ..Default::default()
        });
        Ok(count)
    }

    /// Add a hand-placed availability block. Returns its id.
    pub fn add_time_slot(&mut self, start: Timestamp, end: Timestamp) -> Result<String, CoreError> {
        if start >= end {
            return Err(CoreError::Validation(format!(
                "Availability block must end after it starts ({start} >= {end})"
            )));
        }
        let event = CalendarEvent::manual(start, end);
        let id = event.id.clone();
        let mut slots = self.store.data().time_slots.clone();
        slots.push(event);
        self.store.set_data(SetupPatch {
            time_slots: Some(slots),
            ..Default::default()
        });
        Ok(id)
    }

    /// Remove an availability block by id. Returns whether one was removed.
    pub fn remove_time_slot(&mut self, id: &str) -> bool {
        let slots = &self.store.data().time_slots;
        let before = slots.len();
        let kept: Vec<CalendarEvent> = slots.iter().filter(|e| e.id != id).cloned().collect();
        let removed = kept.len() != before;
        if removed {
            self.store.set_data(SetupPatch {
                time_slots: Some(kept),
                ..Default::default()
            });
        }
        removed
    }

    // ---- private helpers ----

    fn advance(&mut self, to: SetupStep) -> SetupStep {
        tracing::debug!(from = %self.step, to = %to, "Wizard transition");
        self.step = to;
        to
    }

    fn require_business_name(&mut self) -> Result<(), CoreError> {
        if self.store.data().business_name.trim().is_empty() {
            self.errors
                .insert(FIELD_BUSINESS_NAME, MSG_BUSINESS_NAME_REQUIRED.to_string());
            return Err(CoreError::Validation(MSG_BUSINESS_NAME_REQUIRED.to_string()));
        }
        self.errors.remove(FIELD_BUSINESS_NAME);
        Ok(())
    }

    fn submission_failed(&mut self, what: &str, err: crate::sync::SyncError) -> CoreError {
        tracing::warn!(supplier_id = %self.supplier_id, error = %err, "{what} update failed");
        self.errors.insert(FIELD_SUBMIT, MSG_SUBMIT_FAILED.to_string());
        CoreError::Submission(format!("{what} update failed: {err}"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::Weekday;

    use super::*;
    use crate::availability::SlotTime;
    use crate::setup::SourceDocument;
    use crate::sync::{AvailabilityEntry, DocumentSummary, SyncError};

    const SUPPLIER: &str = "21419dd2-bab8-4428-964e-32aff097bef8";

    /// Records calls and fails on demand.
    #[derive(Default)]
    struct FakeSync {
        fail_profile: bool,
        fail_availability: bool,
        calls: Mutex<Vec<&'static str>>,
        availability: Mutex<Vec<AvailabilityEntry>>,
    }

    impl FakeSync {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SupplierSync for FakeSync {
        async fn submit_profile(&self, id: &str, _: &ProfilePayload) -> Result<(), SyncError> {
            assert_eq!(id, SUPPLIER);
            self.calls.lock().unwrap().push("profile");
            if self.fail_profile {
                return Err(SyncError::Rejected {
                    status: 500,
                    body: "boom".into(),
                });
            }
            Ok(())
        }

        async fn submit_availability(
            &self,
            _: &str,
            slots: &[AvailabilityEntry],
        ) -> Result<(), SyncError> {
            self.calls.lock().unwrap().push("availability");
            *self.availability.lock().unwrap() = slots.to_vec();
            if self.fail_availability {
                return Err(SyncError::Transport("connection reset".into()));
            }
            Ok(())
        }
    }

    struct FakeSummarizer(Result<DocumentSummary, SyncError>);

    #[async_trait]
    impl DocumentSummarizer for FakeSummarizer {
        async fn summarize(
            &self,
            _: &str,
            _: &SourceDocument,
        ) -> Result<DocumentSummary, SyncError> {
            self.0.clone()
        }
    }

    fn named(name: &str) -> SetupWizard {
        let mut wizard = SetupWizard::new(SUPPLIER);
        wizard.store_mut().set_data(SetupPatch {
            business_name: Some(name.into()),
            ..Default::default()
        });
        wizard
    }

    fn at_summary() -> SetupWizard {
        let mut wizard = named("Acme");
        wizard.next().unwrap();
        wizard.skip().unwrap();
        wizard
    }

    fn with_document() -> SetupWizard {
        let mut wizard = SetupWizard::new(SUPPLIER);
        wizard.store_mut().set_data(SetupPatch {
            approach: Some(Approach::AutoFromFile),
            source_file: Some(Some(SourceDocument::new("cv.pdf", vec![1]).unwrap())),
            ..Default::default()
        });
        wizard
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -- transition table --

    #[test]
    fn table_covers_documented_transitions() {
        use SetupStep::*;
        use WizardAction::*;
        assert_eq!(next_step(Setup, Next), Some(ProfileVerification));
        assert_eq!(next_step(ProfileVerification, Verify), Some(Summary));
        assert_eq!(next_step(ProfileVerification, Skip), Some(Summary));
        assert_eq!(next_step(Summary, Edit), Some(Setup));
        assert_eq!(next_step(Summary, Submit), Some(Complete));
        assert_eq!(next_step(Complete, Restart), Some(Setup));
    }

    #[test]
    fn table_rejects_everything_else() {
        use SetupStep::*;
        use WizardAction::*;
        let steps = [Setup, ProfileVerification, Summary, Complete];
        let actions = [Next, Verify, Skip, Edit, Submit, Restart];
        let allowed = 6;
        let mut count = 0;
        for step in steps {
            for action in actions {
                if next_step(step, action).is_some() {
                    count += 1;
                }
            }
        }
        assert_eq!(count, allowed);
        assert_eq!(next_step(Setup, Submit), None);
        assert_eq!(next_step(Complete, Edit), None);
    }

    #[test]
    fn invalid_transition_error_names_step_and_action() {
        let err = validate_transition(SetupStep::Setup, WizardAction::Restart).unwrap_err();
        assert_eq!(err.to_string(), "Cannot restart from step setup");
    }

    // -- next --

    #[test]
    fn next_without_business_name_stays_on_setup() {
        let mut wizard = SetupWizard::new(SUPPLIER);
        assert_matches!(wizard.next(), Err(CoreError::Validation(_)));
        assert_eq!(wizard.step(), SetupStep::Setup);
        assert_eq!(
            wizard.errors().get(FIELD_BUSINESS_NAME).map(String::as_str),
            Some(MSG_BUSINESS_NAME_REQUIRED)
        );
    }

    #[test]
    fn whitespace_business_name_is_empty() {
        let mut wizard = named("   ");
        assert!(wizard.next().is_err());
        assert_eq!(wizard.step(), SetupStep::Setup);
    }

    #[test]
    fn next_with_business_name_advances_and_clears_error() {
        let mut wizard = SetupWizard::new(SUPPLIER);
        let _ = wizard.next();

        wizard.store_mut().set_data(SetupPatch {
            business_name: Some("Acme".into()),
            ..Default::default()
        });
        assert_eq!(wizard.next().unwrap(), SetupStep::ProfileVerification);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn verify_and_skip_are_equivalent() {
        let mut a = named("Acme");
        a.next().unwrap();
        let mut b = named("Acme");
        b.next().unwrap();
        assert_eq!(a.verify().unwrap(), b.skip().unwrap());
        assert_eq!(a.step(), SetupStep::Summary);
    }

    #[test]
    fn edit_returns_to_setup_with_data_intact() {
        let mut wizard = at_summary();
        assert_eq!(wizard.edit().unwrap(), SetupStep::Setup);
        assert_eq!(wizard.data().business_name, "Acme");
    }

    #[test]
    fn out_of_order_action_leaves_step_unchanged() {
        let mut wizard = named("Acme");
        assert_matches!(
            wizard.verify(),
            Err(CoreError::InvalidTransition {
                from: SetupStep::Setup,
                action: WizardAction::Verify
            })
        );
        assert_eq!(wizard.step(), SetupStep::Setup);
    }

    // -- submit --

    #[tokio::test]
    async fn submit_sends_profile_then_availability() {
        let mut wizard = at_summary();
        let sync = FakeSync::default();

        assert_eq!(wizard.submit(&sync).await.unwrap(), SetupStep::Complete);
        assert_eq!(sync.calls(), vec!["profile", "availability"]);
        assert_eq!(sync.availability.lock().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn profile_failure_stays_on_summary_and_skips_availability() {
        let mut wizard = at_summary();
        let sync = FakeSync {
            fail_profile: true,
            ..Default::default()
        };

        assert_matches!(wizard.submit(&sync).await, Err(CoreError::Submission(_)));
        assert_eq!(wizard.step(), SetupStep::Summary);
        assert_eq!(sync.calls(), vec!["profile"]);
        assert!(wizard.errors().contains_key(FIELD_SUBMIT));
    }

    #[tokio::test]
    async fn availability_failure_stays_on_summary() {
        let mut wizard = at_summary();
        let sync = FakeSync {
            fail_availability: true,
            ..Default::default()
        };

        assert!(wizard.submit(&sync).await.is_err());
        assert_eq!(wizard.step(), SetupStep::Summary);
        assert_eq!(sync.calls(), vec!["profile", "availability"]);
    }

    #[tokio::test]
    async fn retry_after_failure_resends_both_calls() {
        let mut wizard = at_summary();
        let failing = FakeSync {
            fail_availability: true,
            ..Default::default()
        };
        assert!(wizard.submit(&failing).await.is_err());

        let healthy = FakeSync::default();
        assert_eq!(wizard.submit(&healthy).await.unwrap(), SetupStep::Complete);
        assert_eq!(healthy.calls(), vec!["profile", "availability"]);
        assert!(wizard.errors().is_empty());
    }

    #[tokio::test]
    async fn submit_rechecks_business_name() {
        let mut wizard = at_summary();
        wizard.store_mut().set_data(SetupPatch {
            business_name: Some(String::new()),
            ..Default::default()
        });
        let sync = FakeSync::default();

        assert_matches!(wizard.submit(&sync).await, Err(CoreError::Validation(_)));
        assert!(sync.calls().is_empty());
        assert_eq!(wizard.step(), SetupStep::Summary);
    }

    #[tokio::test]
    async fn full_run_and_restart_returns_to_defaults() {
        let mut wizard = named("Acme");
        wizard.store_mut().set_data(SetupPatch {
            description: Some("desc".into()),
            skills_text: Some("a, b".into()),
            ..Default::default()
        });
        wizard.save_availability(date(2026, 10, 19)).unwrap();

        wizard.next().unwrap();
        wizard.verify().unwrap();
        wizard.submit(&FakeSync::default()).await.unwrap();
        assert_eq!(wizard.step(), SetupStep::Complete);

        assert_eq!(wizard.restart().unwrap(), SetupStep::Setup);
        assert_eq!(*wizard.data(), SetupData::default());
    }

    // -- auto_fill --

    #[tokio::test]
    async fn auto_fill_applies_summary_and_matches_role() {
        let mut wizard = with_document();
        let summarizer = FakeSummarizer(Ok(DocumentSummary {
            detected_skills: vec!["pipes".into(), "leaks".into()],
            summary: "Family plumbing business".into(),
            detected_roles: vec!["PLUMBER".into(), "Electrician".into()],
        }));

        wizard.auto_fill(&summarizer).await.unwrap();

        let data = wizard.data();
        assert_eq!(data.skills_text, "pipes, leaks");
        assert_eq!(data.description, "Family plumbing business");
        assert_eq!(data.role, "Plumber");
    }

    #[tokio::test]
    async fn auto_fill_leaves_role_unset_when_unmatched() {
        let mut wizard = with_document();
        wizard.store_mut().set_data(SetupPatch {
            role: Some("Tutor".into()),
            ..Default::default()
        });
        let summarizer = FakeSummarizer(Ok(DocumentSummary {
            detected_roles: vec!["astronaut".into()],
            ..Default::default()
        }));

        wizard.auto_fill(&summarizer).await.unwrap();
        assert_eq!(wizard.data().role, "");
    }

    #[tokio::test]
    async fn auto_fill_failure_records_file_error_but_does_not_block() {
        let mut wizard = with_document();
        let summarizer = FakeSummarizer(Err(SyncError::Rejected {
            status: 422,
            body: "bad pdf".into(),
        }));

        assert_matches!(wizard.auto_fill(&summarizer).await, Err(CoreError::Upload(_)));
        assert_eq!(
            wizard.errors().get(FIELD_FILE).map(String::as_str),
            Some(MSG_FILE_UNPARSEABLE)
        );

        wizard.store_mut().set_data(SetupPatch {
            business_name: Some("Manual Co".into()),
            ..Default::default()
        });
        assert_eq!(wizard.next().unwrap(), SetupStep::ProfileVerification);
    }

    #[tokio::test]
    async fn auto_fill_requires_auto_approach_and_document() {
        let summarizer = FakeSummarizer(Ok(DocumentSummary::default()));

        let mut manual = SetupWizard::new(SUPPLIER);
        assert_matches!(manual.auto_fill(&summarizer).await, Err(CoreError::Validation(_)));

        let mut no_doc = SetupWizard::new(SUPPLIER);
        no_doc.store_mut().set_data(SetupPatch {
            approach: Some(Approach::AutoFromFile),
            ..Default::default()
        });
        assert_matches!(no_doc.auto_fill(&summarizer).await, Err(CoreError::Validation(_)));
    }

    // -- availability editing --

    #[test]
    fn save_availability_regenerates_time_slots() {
        let mut wizard = SetupWizard::new(SUPPLIER).with_horizon_days(7);
        assert_eq!(wizard.save_availability(date(2026, 10, 19)).unwrap(), 5);
        assert_eq!(wizard.data().time_slots.len(), 5);
    }

    #[test]
    fn save_availability_rejects_inverted_slot_and_keeps_old_events() {
        let mut wizard = SetupWizard::new(SUPPLIER);
        wizard.save_availability(date(2026, 10, 19)).unwrap();
        let before = wizard.data().time_slots.clone();

        let mut slots = wizard.data().weekly_slots.clone();
        slots.set_start_time(Weekday::Fri, SlotTime::parse("18:00").unwrap());
        wizard.store_mut().set_data(SetupPatch {
            weekly_slots: Some(slots),
            ..Default::default()
        });

        assert_matches!(
            wizard.save_availability(date(2026, 10, 19)),
            Err(CoreError::Validation(_))
        );
        assert_eq!(wizard.data().time_slots, before);
    }

    #[test]
    fn manual_blocks_can_be_added_and_removed() {
        let mut wizard = SetupWizard::new(SUPPLIER);
        let start = date(2026, 10, 25).and_hms_opt(10, 0, 0).unwrap();
        let end = date(2026, 10, 25).and_hms_opt(12, 0, 0).unwrap();

        let id = wizard.add_time_slot(start, end).unwrap();
        assert_eq!(wizard.data().time_slots.len(), 1);

        assert!(wizard.remove_time_slot(&id));
        assert!(!wizard.remove_time_slot(&id));
        assert!(wizard.data().time_slots.is_empty());
    }

    #[test]
    fn manual_block_must_end_after_start() {
        let mut wizard = SetupWizard::new(SUPPLIER);
        let t = date(2026, 10, 25).and_hms_opt(10, 0, 0).unwrap();
        assert!(wizard.add_time_slot(t, t).is_err());
    }
}
