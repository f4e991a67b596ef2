//! Hyperliquid info client
//!
//! A Rust client for the read-only Hyperliquid info API, with transparent
//! conversion between the exchange's internal asset identifiers (`BTC`,
//! `@107`) and display symbols (`BTC-PERP`, `HYPE-SPOT`):
//! - Info endpoints returning `serde_json::Value`, optionally rewritten
//! - A symbol registry loaded once from exchange metadata and swapped atomically
//! - A directive-driven rewriter for arbitrary JSON responses

pub mod client;
pub mod error;
pub mod info;
pub mod symbols;
pub mod transport;
pub mod types;

pub use client::{Client, ClientConfig, Network, MAINNET_URL, TESTNET_URL};
pub use error::{Error, Result};
pub use symbols::{AssetClass, AssetSymbolEntry, Direction, Directive, SymbolRegistry, SymbolSnapshot};
pub use transport::{HttpTransport, Transport, DEFAULT_WEIGHT, HEAVY_WEIGHT};
pub use types::*;
