use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

use blockscope::chain::{ChainClient, JsonRpcClient};
use blockscope::core::NavigationController;
use blockscope::core::config::{load_config, resolve_endpoint};
use blockscope::core::state::ChainContext;
use blockscope::tui::{self, Screen};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "blockscope", about = "Terminal Ethereum block explorer")]
struct Args {
    /// JSON-RPC endpoint URL
    #[arg(short, long, conflicts_with = "chain")]
    url: Option<String>,

    /// Named chain from settings.toml
    #[arg(short, long)]
    chain: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to blockscope.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("blockscope.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    match explore(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            log::error!("{}", msg);
            eprintln!("blockscope: {msg}");
            ExitCode::FAILURE
        }
    }
}

/// Everything that can fail before the terminal is handed to the UI is fatal.
async fn explore(args: Args) -> Result<(), String> {
    let config = load_config().map_err(|e| e.to_string())?;
    let endpoint = resolve_endpoint(&config, args.url.as_deref(), args.chain.as_deref())
        .map_err(|e| e.to_string())?;
    log::info!("Blockscope starting up against {}", endpoint);

    let client = JsonRpcClient::new(endpoint.clone());
    let chain_id = client
        .chain_id()
        .await
        .map_err(|e| format!("cannot reach {endpoint}: {e}"))?;
    log::info!("Connected to chain {}", chain_id);

    let mut nav = NavigationController::new(
        Arc::new(client),
        ChainContext::new(endpoint, chain_id),
        Screen::default(),
    );
    nav.start().await;

    tui::run(&mut nav).await.map_err(|e| format!("terminal error: {e}"))
}
