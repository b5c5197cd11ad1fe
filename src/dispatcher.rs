use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::PipelineError;
use crate::mail::{notify_admin, Mailer};
use crate::sheet::{flag_is_set, RowStore, Schema, Status, FLAG_FALSE};

const SEND_SUBJECT: &str = "Your AI answer";
const ADMIN_SUBJECT: &str = "Pizarra: send pass problem";

#[derive(Debug, Default, Serialize)]
pub struct DispatchSummary {
    pub attempted: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// One sequential send pass over every flagged row. A failed send marks its
/// own row and the loop keeps going; the only error out of here is a sheet
/// with missing required columns, which aborts the whole pass.
pub async fn send_selected(
    store: &dyn RowStore,
    mailer: &dyn Mailer,
    config: &Config,
) -> Result<DispatchSummary, PipelineError> {
    let schema = match Schema::resolve(&store.header(), &config.columns) {
        Ok(schema) => schema,
        Err(e) => {
            error!("Send pass aborted: {}", e);
            notify_admin(
                mailer,
                config.admin_email.as_deref(),
                ADMIN_SUBJECT,
                &format!("Send pass aborted: {}", e),
            )
            .await;
            return Err(e);
        }
    };

    let mut summary = DispatchSummary::default();

    for row in 2..=store.last_row() {
        let cells = store.read_row(row);
        if !flag_is_set(schema.cell(&cells, schema.send_flag)) {
            continue;
        }

        let email = schema.cell(&cells, schema.email);
        let response = schema.cell(&cells, schema.response);
        let prompt = schema.cell(&cells, schema.prompt);

        // A flagged row without a complete answer is left exactly as it is,
        // flag included, so it surfaces again on the next pass.
        if email.trim().is_empty() || response.trim().is_empty() || prompt.trim().is_empty() {
            warn!("Row {} is flagged but incomplete, skipping", row);
            summary.skipped += 1;
            continue;
        }

        summary.attempted += 1;
        let body = compose_body(schema.cell(&cells, schema.student_name), response);

        match mailer.send(email, SEND_SUBJECT, &body).await {
            Ok(()) => {
                store.write_cell(row, schema.status, Status::Sent.as_cell());
                summary.sent += 1;
                info!("Row {} sent to {}", row, email);
            }
            Err(e) => {
                store.write_cell(row, schema.status, Status::SendFailed.as_cell());
                if let Some(col) = schema.error_details {
                    store.write_cell(row, col, &e.to_string());
                }
                summary.failed += 1;
                error!("Row {} send failed: {}", row, e);
                notify_admin(
                    mailer,
                    config.admin_email.as_deref(),
                    ADMIN_SUBJECT,
                    &format!("Sending row {} to {} failed: {}", row, email, e),
                )
                .await;
            }
        }

        // An attempt was made, so the request is consumed either way.
        store.write_cell(row, schema.send_flag, FLAG_FALSE);
    }

    info!(
        "Send pass complete: {} sent, {} failed, {} skipped",
        summary.sent, summary.failed, summary.skipped
    );
    Ok(summary)
}

fn compose_body(student_name: &str, response: &str) -> String {
    let greeting = if student_name.trim().is_empty() {
        "Hello,".to_string()
    } else {
        format!("Hi {},", student_name.trim())
    };

    format!(
        "{}\n\nHere is the AI's answer to your prompt:\n\n{}\n",
        greeting, response
    )
}
