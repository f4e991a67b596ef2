//! Spot info endpoints
//!
//! This module provides methods for querying spot metadata, asset contexts,
//! token details and a user's spot balances.

use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::symbols::{AssetClass, Directive};
use crate::transport::DEFAULT_WEIGHT;
use crate::types::{InfoType, PlainRequest, SpotMetaRequest, TokenDetailsRequest, UserRequest};

/// Pair names in spot metadata resolve against spot pairs only
fn spot_meta_directive() -> Directive {
    Directive::coins()
        .symbol_field("name")
        .within(AssetClass::Spot)
}

impl Client {
    /// Retrieve spot metadata
    ///
    /// Returns the spot tokens and the spot pair universe. Unless `raw_response`
    /// is set, pair names are display symbols (`PURR-SPOT`). Token names are not
    /// pair identifiers and are left alone.
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::mainnet()?;
    /// let meta = client.spot_meta(false).await?;
    /// for pair in meta["universe"].as_array().into_iter().flatten() {
    ///     println!("{} tokens {}", pair["name"], pair["tokens"]);
    /// }
    /// ```
    pub async fn spot_meta(&self, raw_response: bool) -> Result<Value> {
        self.query(
            &SpotMetaRequest::default(),
            DEFAULT_WEIGHT,
            &spot_meta_directive(),
            raw_response,
        )
        .await
    }

    /// Retrieve spot metadata together with per-pair asset contexts
    pub async fn spot_meta_and_asset_ctxs(&self, raw_response: bool) -> Result<Value> {
        let request = PlainRequest::new(InfoType::SpotMetaAndAssetCtxs);
        self.query(&request, DEFAULT_WEIGHT, &spot_meta_directive(), raw_response)
            .await
    }

    /// Retrieve a user's spot token balances
    pub async fn spot_clearinghouse_state(&self, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(InfoType::SpotClearinghouseState, user);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve details for a token (supply, deployer, genesis, prices)
    ///
    /// # Arguments
    /// * `token_id` - The token's 34-character hex id
    /// * `raw_response` - Skip symbol conversion of the response
    pub async fn token_details(&self, token_id: &str, raw_response: bool) -> Result<Value> {
        let request = TokenDetailsRequest::new(token_id);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }
}
