use anyhow::Context as _;
use clap::Parser;
use recommendation_service::{Catalog, create_flow_runner};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use wizard_flow::{Console, InMemorySessionStorage, LogFormat, SessionStorage, init_tracing};

/// Answer a few questions, get one product recommendation
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Session identifier, a fresh UUID when omitted
    #[arg(long)]
    session_id: Option<String>,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format, "warn");

    let catalog = Arc::new(Catalog::load().context("bundled catalog is invalid")?);
    let session_storage: Arc<dyn SessionStorage> = Arc::new(InMemorySessionStorage::new());
    let runner = create_flow_runner(catalog, session_storage);

    let session_id = args
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let session_id = runner.start(session_id).await?;
    info!(%session_id, "recommendation wizard started");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    Console::new(runner, session_id)
        .run(stdin.lock(), &mut stdout)
        .await
}
