//! Symbol conversion between exchange-internal identifiers and display symbols
//!
//! The exchange addresses assets by compact internal identifiers: perpetuals by
//! name (`BTC`), spot pairs by pair name (`PURR/USDC`) or index (`@107`). This
//! module keeps a bidirectional mapping to display symbols (`BTC-PERP`,
//! `HYPE-SPOT`) and rewrites JSON payloads with it.
//!
//! - [`SymbolRegistry`] owns the current [`SymbolSnapshot`] and rebuilds it from an
//!   [`AssetCatalogSource`].
//! - [`rewrite`] walks a `serde_json::Value` and substitutes symbols wherever a
//!   [`Directive`] says they live.
//!
//! # Example
//!
//! ```
//! use hyperliquid_info::symbols::{rewrite, AssetSymbolEntry, Directive, SymbolSnapshot};
//! use serde_json::json;
//!
//! let snapshot = SymbolSnapshot::build(vec![AssetSymbolEntry::perp("BTC", "BTC-PERP")], 1);
//! let fills = json!([{"coin": "BTC", "px": "50000.0"}]);
//!
//! let converted = rewrite(fills, &Directive::coins(), &snapshot);
//! assert_eq!(converted, json!([{"coin": "BTC-PERP", "px": "50000.0"}]));
//! ```

mod catalog;
mod directive;
mod registry;
mod rewrite;
mod snapshot;

pub use catalog::{
    perp_entries, spot_entries, AssetCatalogSource, InfoCatalogSource, StaticCatalog,
    PERP_SUFFIX, SPOT_SUFFIX,
};
pub use directive::{Directive, NumericRule, SymbolRule};
pub use registry::SymbolRegistry;
pub use rewrite::{parse_number, rewrite};
pub use snapshot::{AssetClass, AssetSymbolEntry, Direction, SymbolSnapshot};
