use std::sync::Arc;

use crate::agents::GeminiAgent;
use crate::config::Config;
use crate::mail::Mailer;
use crate::sheet::RowStore;

pub struct AppState {
    pub store: Arc<dyn RowStore>,
    pub mailer: Arc<dyn Mailer>,
    pub agent: GeminiAgent,
    pub config: Arc<Config>,
}
