use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use syllabus_core::config_file;
use syllabus_query::{GeminiGenerator, QueryContext, TextGenerator};
use syllabus_web::{AppState, router};

#[derive(Parser)]
#[command(
    name = "syllabus-web",
    about = "Serve syllabus questions over HTTP"
)]
struct Args {
    /// Extracted syllabus JSON (default: config, then syllabus_final_structure.json)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Address to bind (default: 127.0.0.1)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (default: 5000)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = config_file::load_config().with_env_overrides();

    let generator: Option<Arc<dyn TextGenerator>> =
        match GeminiGenerator::from_config(&config.assistant()) {
            Some(generator) => {
                tracing::info!(model = generator.name(), "model fallback enabled");
                Some(Arc::new(generator))
            }
            None => {
                tracing::warn!(
                    "{} not set; model fallback disabled",
                    config_file::ENV_API_KEY
                );
                None
            }
        };

    let data_path = args.data.unwrap_or_else(|| config.json_path());
    let context = QueryContext::load(&data_path, generator);
    if !context.is_available() {
        tracing::warn!("serving in degraded mode; every question will report unavailable data");
    }

    let app = router(Arc::new(AppState::new(context)));

    let host = args.host.unwrap_or_else(|| config.host());
    let port = args.port.unwrap_or_else(|| config.port());
    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
