use tracing::{error, info};

use crate::agents::{GeminiAgent, Outcome};
use crate::config::Config;
use crate::error::PipelineError;
use crate::mail::{notify_admin, Mailer};
use crate::sheet::{RowStore, Schema, SettingsLookup, Status};

/// Written to the AI Response cell when generation fails, so a failed row
/// never carries a half-filled answer.
pub const RESPONSE_PLACEHOLDER: &str = "[no response generated]";

const ADMIN_SUBJECT: &str = "Pizarra: submission processing problem";

/// Runs one submission through Generating to a terminal status. Entered once
/// per form event; every fault is contained at this row boundary, so the row
/// is never left in Generating.
pub async fn process_submission(
    store: &dyn RowStore,
    agent: &GeminiAgent,
    mailer: &dyn Mailer,
    config: &Config,
    schema: &Schema,
    row: u32,
) {
    // Picked-up feedback for the teacher: the status flips to Generating
    // before any validation and is always overwritten below.
    store.write_cell(row, schema.status, Status::Generating.as_cell());

    match try_generate(store, agent, config, schema, row).await {
        Ok(answer) => {
            store.write_cell(row, schema.response, &answer);
            store.write_cell(row, schema.status, Status::Generated.as_cell());
            info!("Row {} generated ({} chars)", row, answer.len());
        }
        Err(e) => {
            let status = match &e {
                PipelineError::InvalidEmail => Status::InvalidEmail,
                PipelineError::ApiKeyMissing => Status::ApiKeyMissing,
                PipelineError::Generation(_) => Status::AiFailed,
                _ => Status::ScriptFailed,
            };

            store.write_cell(row, schema.status, status.as_cell());
            if matches!(e, PipelineError::Generation(_)) {
                store.write_cell(row, schema.response, RESPONSE_PLACEHOLDER);
            }
            if let Some(col) = schema.error_details {
                store.write_cell(row, col, &e.to_string());
            }

            error!("Row {} ended in \"{}\": {}", row, status, e);
            notify_admin(
                mailer,
                config.admin_email.as_deref(),
                ADMIN_SUBJECT,
                &format!("Row {} ended in \"{}\": {}", row, status, e),
            )
            .await;
        }
    }
}

async fn try_generate(
    store: &dyn RowStore,
    agent: &GeminiAgent,
    config: &Config,
    schema: &Schema,
    row: u32,
) -> Result<String, PipelineError> {
    let cells = store.read_row(row);
    let prompt = schema.cell(&cells, schema.prompt);
    let email = schema.cell(&cells, schema.email);

    // Containment check only; anything with an @ passes.
    if !email.contains('@') {
        return Err(PipelineError::InvalidEmail);
    }

    let api_key = match &config.gemini_api_key {
        Some(key) => key,
        None => {
            error!("GEMINI_API_KEY is not configured; row {} cannot be processed", row);
            return Err(PipelineError::ApiKeyMissing);
        }
    };

    let master_prompt = match store.master_prompt() {
        SettingsLookup::Prompt(prompt) => prompt,
        SettingsLookup::Unset => return Err(PipelineError::MasterPromptUnset),
        SettingsLookup::MissingRecord => return Err(PipelineError::SettingsMissing),
    };

    match agent.generate(prompt, &master_prompt, api_key).await {
        Outcome::Answer(text) => Ok(text),
        Outcome::Failed(reason) => Err(PipelineError::Generation(reason)),
    }
}
