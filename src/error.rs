use thiserror::Error;

/// Failures raised while processing a single event. Each variant maps to
/// exactly one terminal row status in the processor's transition table.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("required column(s) missing from response sheet: {0}")]
    MissingColumns(String),

    #[error("settings sheet is missing")]
    SettingsMissing,

    #[error("master prompt has not been set")]
    MasterPromptUnset,

    #[error("API key is not configured")]
    ApiKeyMissing,

    #[error("email address is empty or invalid")]
    InvalidEmail,

    #[error("AI generation failed: {0}")]
    Generation(String),
}
