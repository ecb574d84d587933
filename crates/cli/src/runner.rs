//! Drives one wizard run from a draft to completion.

use std::path::Path;

use chrono::NaiveDate;

use kontask_core::error::CoreError;
use kontask_core::sync::{DocumentSummarizer, SupplierSync};
use kontask_core::wizard::{SetupStep, SetupWizard};

use crate::draft::{DraftError, SetupDraft};

/// Summary of a finished run, for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub step: SetupStep,
    pub generated_events: usize,
    pub manual_events: usize,
    /// Whether document auto-fill succeeded.
    pub auto_filled: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Wizard(#[from] CoreError),
}

/// Apply `draft` to `wizard` and walk it Setup -> Complete.
///
/// An auto-fill failure is logged and the run continues with the draft's own
/// answers. Any other error stops the run with the wizard on the step where
/// it occurred.
pub async fn run<B>(
    wizard: &mut SetupWizard,
    draft: &SetupDraft,
    base_dir: &Path,
    today: NaiveDate,
    backend: &B,
) -> Result<RunOutcome, RunError>
where
    B: SupplierSync + DocumentSummarizer,
{
    wizard.store_mut().set_data(draft.to_patch(base_dir)?);

    let mut auto_filled = false;
    if wizard.data().source_file.is_some() {
        match wizard.auto_fill(backend).await {
            Ok(()) => auto_filled = true,
            Err(e) => tracing::warn!(error = %e, "Continuing with manual entry"),
        }
    }

    let generated_events = wizard.save_availability(today)?;
    for block in &draft.manual_blocks {
        wizard.add_time_slot(block.start, block.end)?;
    }
    tracing::info!(
        supplier_id = wizard.supplier_id(),
        generated_events,
        manual_events = draft.manual_blocks.len(),
        "Availability saved"
    );

    for line in wizard.data().summary_lines() {
        tracing::info!("{line}");
    }

    wizard.next()?;
    if draft.verify {
        wizard.verify()?;
    } else {
        wizard.skip()?;
    }
    let step = wizard.submit(backend).await?;

    Ok(RunOutcome {
        step,
        generated_events,
        manual_events: draft.manual_blocks.len(),
        auto_filled,
    })
}
