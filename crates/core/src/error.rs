use crate::wizard::{SetupStep, WizardAction};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cannot {action} from step {from}")]
    InvalidTransition {
        from: SetupStep,
        action: WizardAction,
    },

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Submission failed: {0}")]
    Submission(String),
}
