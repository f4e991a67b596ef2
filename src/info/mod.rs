//! Info endpoint implementations for the Hyperliquid API
//!
//! This module provides high-level methods for querying market data and user state
//! from the Hyperliquid info endpoints. Every method takes a `raw_response`
//! flag; without it, asset identifiers in the response are converted to
//! display symbols.

mod account;
mod fills;
mod funding;
mod market;
mod orders;
mod perpetuals;
mod spot;
mod staking;
mod vault;

pub use market::DEFAULT_BOOK_SIG_FIGS;
