use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use barberbook::config::AppConfig;
use barberbook::services::email::SmtpMailer;
use barberbook::services::sweeper;
use barberbook::state::AppState;
use barberbook::store::Storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let storage = Storage::open(Path::new(&config.data_dir))?;
    let mailer = SmtpMailer::from_config(&config)?;

    let state = Arc::new(AppState {
        store: Arc::new(Mutex::new(storage)),
        config: config.clone(),
        mailer: Box::new(mailer),
    });

    tokio::spawn(sweeper::run_sweeper(Arc::clone(&state)));

    let app = barberbook::app(Arc::clone(&state));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
