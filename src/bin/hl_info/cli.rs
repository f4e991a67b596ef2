//! Command line arguments

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "hl-info", version, about = "Query the Hyperliquid info API")]
pub struct Cli {
    /// Use testnet instead of mainnet
    #[arg(long)]
    pub testnet: bool,

    /// Print responses exactly as the exchange returned them
    #[arg(long)]
    pub raw: bool,

    /// Override the API base URL
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mid prices of every asset
    Mids,
    /// Perpetuals metadata
    Meta,
    /// L2 order book for one asset
    Book {
        /// Display symbol, e.g. BTC-PERP or HYPE-SPOT
        coin: String,
        #[arg(long = "sig-figs")]
        n_sig_figs: Option<u8>,
    },
    /// Display symbols known to the symbol registry
    Symbols,
}
