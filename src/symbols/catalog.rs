//! Asset catalog sources for the symbol registry

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::snapshot::AssetSymbolEntry;
use crate::error::Result;
use crate::transport::{Transport, DEFAULT_WEIGHT};
use crate::types::{MetaRequest, PerpMetaResponse, SpotMetaRequest, SpotMetaResponse};

/// Display suffix for perpetual symbols
pub const PERP_SUFFIX: &str = "-PERP";

/// Display suffix for spot symbols
pub const SPOT_SUFFIX: &str = "-SPOT";

/// Supplies the asset catalog a [`SymbolRegistry`](super::SymbolRegistry) snapshot is built from
#[async_trait]
pub trait AssetCatalogSource: Send + Sync {
    /// Fetch every tradeable asset, in catalog order
    async fn fetch_asset_catalog(&self) -> Result<Vec<AssetSymbolEntry>>;
}

/// A fixed catalog, useful for tests and offline use
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<AssetSymbolEntry>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<AssetSymbolEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl AssetCatalogSource for StaticCatalog {
    async fn fetch_asset_catalog(&self) -> Result<Vec<AssetSymbolEntry>> {
        Ok(self.entries.clone())
    }
}

/// Builds the catalog from the `meta` and `spotMeta` info endpoints
#[derive(Clone)]
pub struct InfoCatalogSource {
    transport: Arc<dyn Transport>,
}

impl InfoCatalogSource {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

impl std::fmt::Debug for InfoCatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfoCatalogSource").finish_non_exhaustive()
    }
}

#[async_trait]
impl AssetCatalogSource for InfoCatalogSource {
    async fn fetch_asset_catalog(&self) -> Result<Vec<AssetSymbolEntry>> {
        let meta = serde_json::to_value(MetaRequest::default())?;
        let spot_meta = serde_json::to_value(SpotMetaRequest::default())?;

        let (perp, spot) = tokio::try_join!(
            self.transport.post_info(meta, DEFAULT_WEIGHT),
            self.transport.post_info(spot_meta, DEFAULT_WEIGHT),
        )?;
        let perp: PerpMetaResponse = serde_json::from_value(perp)?;
        let spot: SpotMetaResponse = serde_json::from_value(spot)?;

        let mut entries = perp_entries(&perp);
        entries.extend(spot_entries(&spot));
        tracing::debug!(assets = entries.len(), "fetched asset catalog");
        Ok(entries)
    }
}

/// Perpetuals are addressed by name: `BTC` displays as `BTC-PERP`
pub fn perp_entries(meta: &PerpMetaResponse) -> Vec<AssetSymbolEntry> {
    meta.universe
        .iter()
        .map(|asset| AssetSymbolEntry::perp(&asset.name, format!("{}{PERP_SUFFIX}", asset.name)))
        .collect()
}

/// Spot pairs are addressed by pair name (`PURR/USDC`, `@107`) and display as
/// the base token name (`PURR-SPOT`, `HYPE-SPOT`)
pub fn spot_entries(meta: &SpotMetaResponse) -> Vec<AssetSymbolEntry> {
    let tokens: HashMap<u32, &str> = meta
        .tokens
        .iter()
        .map(|token| (token.index, token.name.as_str()))
        .collect();

    meta.universe
        .iter()
        .filter_map(|pair| {
            let base = pair.tokens.first().and_then(|index| tokens.get(index));
            match base {
                Some(base) => Some(AssetSymbolEntry::spot(
                    &pair.name,
                    format!("{base}{SPOT_SUFFIX}"),
                )),
                None => {
                    tracing::debug!(pair = %pair.name, "skipping spot pair with unknown base token");
                    None
                }
            }
        })
        .collect()
}
