//! Funding and open interest info endpoints
//!
//! Funding payments, historical and predicted funding rates, and the assets
//! currently at their open interest cap.

use serde_json::Value;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::symbols::Directive;
use crate::transport::DEFAULT_WEIGHT;
use crate::types::{FundingHistoryRequest, InfoType, PlainRequest, UserFundingRequest};

impl Client {
    /// Retrieve a user's funding payments within a time range
    ///
    /// # Arguments
    /// * `user` - Onchain address in 42-character hexadecimal format
    /// * `start_time` - Start timestamp in milliseconds, inclusive
    /// * `end_time` - Optional end timestamp in milliseconds, inclusive
    /// * `raw_response` - Skip symbol conversion of the response
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::mainnet()?;
    /// let funding = client.user_funding("0x1234...", 1681222254710, None, false).await?;
    /// for entry in funding.as_array().into_iter().flatten() {
    ///     println!("{}: {}", entry["delta"]["coin"], entry["delta"]["usdc"]);
    /// }
    /// ```
    pub async fn user_funding(
        &self,
        user: &str,
        start_time: u64,
        end_time: Option<u64>,
        raw_response: bool,
    ) -> Result<Value> {
        if end_time.is_some_and(|end| end < start_time) {
            return Err(Error::InvalidParameter(
                "start_time must be before end_time".to_string(),
            ));
        }

        let mut request = UserFundingRequest::new(user, start_time);
        if let Some(end) = end_time {
            request = request.with_end_time(end);
        }
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve historical funding rates for a perpetual
    ///
    /// # Arguments
    /// * `coin` - Display symbol (e.g., "ETH-PERP"), or the internal id when
    ///            `raw_response` is set
    /// * `start_time` - Start timestamp in milliseconds, inclusive
    /// * `end_time` - Optional end timestamp in milliseconds, inclusive
    /// * `raw_response` - Skip symbol conversion of the response
    pub async fn funding_history(
        &self,
        coin: &str,
        start_time: u64,
        end_time: Option<u64>,
        raw_response: bool,
    ) -> Result<Value> {
        if end_time.is_some_and(|end| end < start_time) {
            return Err(Error::InvalidParameter(
                "start_time must be before end_time".to_string(),
            ));
        }

        let coin = self.request_symbol(coin, raw_response).await?;
        let mut request = FundingHistoryRequest::new(coin, start_time);
        if let Some(end) = end_time {
            request = request.with_end_time(end);
        }
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve predicted funding rates across venues
    ///
    /// The response is a list of `[coin, [[venue, {fundingRate, nextFundingTime}], ...]]`
    /// pairs; the leading coin of each pair is converted.
    pub async fn predicted_fundings(&self, raw_response: bool) -> Result<Value> {
        let request = PlainRequest::new(InfoType::PredictedFundings);
        let directive = Directive::coins().tuple_heads();
        self.query(&request, DEFAULT_WEIGHT, &directive, raw_response)
            .await
    }

    /// List the perpetuals currently at their open interest cap
    pub async fn perps_at_open_interest_cap(&self, raw_response: bool) -> Result<Value> {
        let request = PlainRequest::new(InfoType::PerpsAtOpenInterestCap);
        let directive = Directive::to_display().elements();
        self.query(&request, DEFAULT_WEIGHT, &directive, raw_response)
            .await
    }
}
