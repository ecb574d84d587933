//! `kontask-setup` -- headless supplier profile setup.
//!
//! Reads a JSON setup draft, runs the profile-setup wizard against the
//! KonTask backend (optional document auto-fill, availability, profile and
//! availability submission) and exits non-zero if the wizard does not reach
//! the Complete step.
//!
//! ```text
//! kontask-setup <draft.json>
//! ```
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                 | Description                          |
//! |------------------------|----------|-------------------------|--------------------------------------|
//! | `SUPPLIER_ID`          | yes      | --                      | Supplier whose profile is set up     |
//! | `API_SERVER`           | no       | `http://localhost:8000` | Backend base URL                     |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`                    | Per-request HTTP timeout             |
//! | `HORIZON_DAYS`         | no       | `50`                    | Days of availability to materialize  |

use std::path::{Path, PathBuf};

use anyhow::Context;
use kontask_client::KonTaskApi;
use kontask_core::wizard::SetupWizard;
use kontask_setup::config::SetupConfig;
use kontask_setup::draft::SetupDraft;
use kontask_setup::runner;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "kontask_setup=info,kontask_client=info,kontask_core=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let draft_path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: kontask-setup <draft.json>")?;

    let config = SetupConfig::from_env()?;
    let api = KonTaskApi::from_config(&config.client).context("Failed to build HTTP client")?;

    tracing::info!(
        supplier_id = %config.supplier_id,
        api_server = %config.client.api_server,
        horizon_days = config.horizon_days,
        draft = %draft_path.display(),
        "Starting kontask-setup",
    );

    let draft = SetupDraft::load(&draft_path)?;
    let base_dir = draft_path.parent().unwrap_or(Path::new("."));
    let today = chrono::Local::now().date_naive();

    let mut wizard = SetupWizard::new(config.supplier_id).with_horizon_days(config.horizon_days);
    let outcome = runner::run(&mut wizard, &draft, base_dir, today, &api)
        .await
        .with_context(|| format!("Setup stopped on step '{}'", wizard.step().label()))?;

    tracing::info!(
        step = %outcome.step,
        generated_events = outcome.generated_events,
        manual_events = outcome.manual_events,
        auto_filled = outcome.auto_filled,
        "Supplier profile setup complete",
    );
    Ok(())
}
