use std::sync::Arc;

use pizarra::agents::GeminiAgent;
use pizarra::config::Config;
use pizarra::mail::{Mailer, RelayMailer};
use pizarra::routes;
use pizarra::sheet::{form_header, MemorySheet, RowStore};
use pizarra::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pizarra=info,tower_http=info".into()),
        )
        .init();

    let config = Arc::new(Config::from_env());

    let store: Arc<dyn RowStore> = Arc::new(MemorySheet::new(form_header(&config.columns)));
    let mailer: Arc<dyn Mailer> = Arc::new(RelayMailer::new(config.mail_relay_url.clone()));
    let agent = GeminiAgent::new(config.gemini_endpoint.clone());

    let state = Arc::new(AppState {
        store,
        mailer,
        agent,
        config: config.clone(),
    });

    let app = routes::router(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive());

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Pizarra listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
