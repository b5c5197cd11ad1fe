mod api;

pub use api::{dispatch_handler, master_prompt_get, master_prompt_set, submit_handler};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/submit", post(submit_handler))
        .route("/dispatch", post(dispatch_handler))
        .route(
            "/master-prompt",
            get(master_prompt_get).post(master_prompt_set),
        )
        .with_state(state)
}
