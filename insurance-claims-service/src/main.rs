use clap::Parser;
use insurance_claims_service::{ClaimsLedger, ReceiptCommands, create_flow_runner};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use wizard_flow::{Console, InMemorySessionStorage, LogFormat, SessionStorage, init_tracing};

/// File a health benefits claim from the terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Session identifier, a fresh UUID when omitted
    #[arg(long)]
    session_id: Option<String>,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Start with no filed claims and unused coverage
    #[arg(long)]
    no_demo_data: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format, "warn");

    let ledger = Arc::new(if args.no_demo_data {
        ClaimsLedger::empty()
    } else {
        ClaimsLedger::with_demo_data()
    });
    let session_storage: Arc<dyn SessionStorage> = Arc::new(InMemorySessionStorage::new());
    let runner = create_flow_runner(ledger, session_storage);

    let session_id = args
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let session_id = runner.start(session_id).await?;
    info!(%session_id, "claims wizard started");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    Console::new(runner, session_id)
        .with_extension(Arc::new(ReceiptCommands))
        .run(stdin.lock(), &mut stdout)
        .await
}
