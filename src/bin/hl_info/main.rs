//! Command line client for the Hyperliquid info API
//!
//! Run with: `cargo run --bin hl-info -- [--testnet] [--raw] mids|meta|book <coin>|symbols`

use std::time::Duration;

use clap::Parser;
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hyperliquid_info::{AssetClass, Client, ClientConfig, Network, Result};

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hl_info=info,hyperliquid_info=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();
    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "request failed");
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> Result<()> {
    let network = if args.testnet {
        Network::Testnet
    } else {
        Network::Mainnet
    };
    let mut config = ClientConfig::new(network);
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    tracing::debug!(?network, base_url = config.resolved_base_url(), "creating client");
    let client = Client::with_config(config)?;

    let output = match args.command {
        Command::Mids => client.all_mids(args.raw).await?,
        Command::Meta => client.meta(args.raw).await?,
        Command::Book { coin, n_sig_figs } => {
            client.l2_book(&coin, n_sig_figs, None, args.raw).await?
        }
        Command::Symbols => {
            let snapshot = client.ensure_symbols_loaded().await?;
            json!({
                "version": snapshot.version(),
                "perp": snapshot.display_symbols(AssetClass::Perp),
                "spot": snapshot.display_symbols(AssetClass::Spot),
            })
        }
    };

    print_json(&output)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
