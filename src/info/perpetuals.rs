//! Perpetuals info endpoints
//!
//! This module provides methods for querying perpetuals metadata, asset contexts,
//! and a user's perpetuals account state.

use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::symbols::{AssetClass, Directive};
use crate::transport::DEFAULT_WEIGHT;
use crate::types::{InfoType, MetaRequest, PlainRequest, UserRequest};

/// Asset names in perpetuals metadata resolve against perpetuals only
fn perp_meta_directive() -> Directive {
    Directive::coins()
        .symbol_field("name")
        .within(AssetClass::Perp)
}

impl Client {
    /// Retrieve perpetuals metadata
    ///
    /// Returns the universe of perpetual assets (name, size decimals, max
    /// leverage) and margin tables. Unless `raw_response` is set, asset names
    /// are display symbols.
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::mainnet()?;
    /// let meta = client.meta(false).await?;
    /// for asset in meta["universe"].as_array().into_iter().flatten() {
    ///     println!("{}: max leverage {}", asset["name"], asset["maxLeverage"]);
    /// }
    /// ```
    pub async fn meta(&self, raw_response: bool) -> Result<Value> {
        self.query(
            &MetaRequest::default(),
            DEFAULT_WEIGHT,
            &perp_meta_directive(),
            raw_response,
        )
        .await
    }

    /// Retrieve perpetuals metadata together with asset contexts
    ///
    /// Returns a two-element array: the metadata and the per-asset contexts
    /// (funding, open interest, mark and oracle prices) in universe order.
    pub async fn meta_and_asset_ctxs(&self, raw_response: bool) -> Result<Value> {
        let request = PlainRequest::new(InfoType::MetaAndAssetCtxs);
        self.query(&request, DEFAULT_WEIGHT, &perp_meta_directive(), raw_response)
            .await
    }

    /// Retrieve a user's perpetuals account summary
    ///
    /// Includes margin summary, withdrawable balance and open positions.
    ///
    /// # Arguments
    /// * `user` - Onchain address in 42-character hexadecimal format
    /// * `raw_response` - Skip symbol conversion of the response
    pub async fn clearinghouse_state(&self, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(InfoType::ClearinghouseState, user);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }
}
