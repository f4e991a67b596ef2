//! Market data info endpoints
//!
//! This module provides methods for querying market data from the Hyperliquid API,
//! including mid prices, order book snapshots, and candlestick data.

use serde_json::Value;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::symbols::Directive;
use crate::transport::DEFAULT_WEIGHT;
use crate::types::{AllMidsRequest, CandleInterval, CandleSnapshotRequest, L2BookRequest};

/// Significant figures requested for order books unless the caller chooses otherwise
pub const DEFAULT_BOOK_SIG_FIGS: u8 = 5;

impl Client {
    /// Retrieve all mid prices
    ///
    /// Returns a map from asset to mid price. Unless `raw_response` is set, keys
    /// are display symbols (`BTC-PERP`, `HYPE-SPOT`) and prices are numbers
    /// instead of strings.
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::mainnet()?;
    /// let mids = client.all_mids(false).await?;
    /// if let Some(btc_mid) = mids.get("BTC-PERP") {
    ///     println!("BTC mid price: {}", btc_mid);
    /// }
    /// ```
    pub async fn all_mids(&self, raw_response: bool) -> Result<Value> {
        let directive = Directive::to_display().root_keys().numeric_everywhere();
        self.query(&AllMidsRequest::default(), DEFAULT_WEIGHT, &directive, raw_response)
            .await
    }

    /// Retrieve L2 order book snapshot
    ///
    /// # Arguments
    /// * `coin` - Display symbol (e.g., "BTC-PERP", "HYPE-SPOT"), or the
    ///            internal id when `raw_response` is set
    /// * `n_sig_figs` - Significant figures for price aggregation (2-5).
    ///                  Defaults to 5.
    /// * `mantissa` - Optional mantissa for price aggregation, used together
    ///                with `n_sig_figs`.
    /// * `raw_response` - Skip symbol conversion of the response
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::mainnet()?;
    /// let book = client.l2_book("ETH-PERP", Some(3), None, false).await?;
    /// println!("{}", book["coin"]);
    /// ```
    pub async fn l2_book(
        &self,
        coin: &str,
        n_sig_figs: Option<u8>,
        mantissa: Option<u8>,
        raw_response: bool,
    ) -> Result<Value> {
        let mut request = L2BookRequest::new(self.request_symbol(coin, raw_response).await?)
            .with_sig_figs(n_sig_figs.unwrap_or(DEFAULT_BOOK_SIG_FIGS));
        if let Some(m) = mantissa {
            request = request.with_mantissa(m);
        }
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve candlestick (OHLCV) data
    ///
    /// Candles name their asset in the `s` member, which is converted back to a
    /// display symbol.
    ///
    /// # Arguments
    /// * `coin` - Display symbol (e.g., "BTC-PERP"), or the internal id when
    ///            `raw_response` is set
    /// * `interval` - The candle interval (e.g., OneMinute, OneHour, OneDay)
    /// * `start_time` - Start timestamp in milliseconds
    /// * `end_time` - Optional end timestamp in milliseconds
    /// * `raw_response` - Skip symbol conversion of the response
    pub async fn candle_snapshot(
        &self,
        coin: &str,
        interval: CandleInterval,
        start_time: u64,
        end_time: Option<u64>,
        raw_response: bool,
    ) -> Result<Value> {
        if end_time.is_some_and(|end| end < start_time) {
            return Err(Error::InvalidParameter(
                "end_time must not be before start_time".to_string(),
            ));
        }

        let coin = self.request_symbol(coin, raw_response).await?;
        let mut request = CandleSnapshotRequest::new(coin, interval, start_time);
        if let Some(end) = end_time {
            request = request.with_end_time(end);
        }
        let directive = Directive::to_display().symbol_field("s");
        self.query(&request, DEFAULT_WEIGHT, &directive, raw_response)
            .await
    }
}
