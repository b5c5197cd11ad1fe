use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::dispatcher;
use crate::mail::notify_admin;
use crate::processor;
use crate::sheet::{Schema, SettingsLookup, FLAG_FALSE};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubmitForm {
    pub name: Option<String>,
    pub email: String,
    pub prompt: String,
}

/// The form-submission trigger. Appends one row and runs it through the
/// processor inline; triggers are serialized by the caller, so there is no
/// in-process queue.
pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SubmitForm>,
) -> impl IntoResponse {
    let schema = match Schema::resolve(&state.store.header(), &state.config.columns) {
        Ok(schema) => schema,
        Err(e) => {
            tracing::error!("Submission not processed: {}", e);
            notify_admin(
                state.mailer.as_ref(),
                state.config.admin_email.as_deref(),
                "Pizarra: submission processing problem",
                &format!("A submission could not be processed: {}", e),
            )
            .await;
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let width = state.store.header().len();
    let row = state.store.append_row(build_row(width, &schema, &form));

    processor::process_submission(
        state.store.as_ref(),
        &state.agent,
        state.mailer.as_ref(),
        &state.config,
        &schema,
        row,
    )
    .await;

    let cells = state.store.read_row(row);
    let status = schema.cell(&cells, schema.status).to_string();

    Json(json!({ "row": row, "status": status })).into_response()
}

fn build_row(width: usize, schema: &Schema, form: &SubmitForm) -> Vec<String> {
    let mut row = vec![String::new(); width];
    set_cell(&mut row, schema.timestamp, Utc::now().to_rfc3339());
    set_cell(
        &mut row,
        schema.student_name,
        form.name.clone().unwrap_or_default(),
    );
    set_cell(&mut row, schema.prompt, form.prompt.clone());
    set_cell(&mut row, schema.email, form.email.clone());
    set_cell(&mut row, schema.send_flag, FLAG_FALSE.to_string());
    row
}

fn set_cell(row: &mut [String], col: u32, value: String) {
    if let Some(cell) = (col as usize).checked_sub(1).and_then(|idx| row.get_mut(idx)) {
        *cell = value;
    }
}

/// The "Send Selected Answers" command.
pub async fn dispatch_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match dispatcher::send_selected(
        state.store.as_ref(),
        state.mailer.as_ref(),
        &state.config,
    )
    .await
    {
        Ok(summary) => Json(json!({
            "message": format!(
                "Send pass complete: {} sent, {} failed, {} skipped",
                summary.sent, summary.failed, summary.skipped
            ),
            "summary": summary,
        }))
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
pub struct MasterPromptForm {
    pub prompt: String,
}

/// The "Set Master Prompt" command.
pub async fn master_prompt_set(
    State(state): State<Arc<AppState>>,
    Form(form): Form<MasterPromptForm>,
) -> impl IntoResponse {
    if state.store.set_master_prompt(&form.prompt) {
        tracing::info!("Master prompt updated ({} chars)", form.prompt.len());
        Json(json!({ "message": "Master prompt updated" })).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "settings sheet is missing" })),
        )
            .into_response()
    }
}

pub async fn master_prompt_get(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.master_prompt() {
        SettingsLookup::Prompt(prompt) => Json(json!({ "prompt": prompt })).into_response(),
        SettingsLookup::Unset => Json(json!({ "prompt": null })).into_response(),
        SettingsLookup::MissingRecord => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "settings sheet is missing" })),
        )
            .into_response(),
    }
}
