//! Fill info endpoints
//!
//! Trade fills and TWAP slice fills, either the most recent batch or within a
//! time range.

use serde_json::Value;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::symbols::Directive;
use crate::transport::{DEFAULT_WEIGHT, HEAVY_WEIGHT};
use crate::types::{InfoType, UserFillsByTimeRequest, UserRequest};

fn check_range(start_time: u64, end_time: Option<u64>) -> Result<()> {
    match end_time {
        Some(end) if end < start_time => Err(Error::InvalidParameter(
            "start_time must be before end_time".to_string(),
        )),
        _ => Ok(()),
    }
}

impl Client {
    /// Retrieve a user's most recent fills
    ///
    /// Returns at most 2000 fills.
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::mainnet()?;
    /// let fills = client.user_fills("0x1234...", false).await?;
    /// for fill in fills.as_array().into_iter().flatten() {
    ///     println!("{} {} @ {}", fill["coin"], fill["sz"], fill["px"]);
    /// }
    /// ```
    pub async fn user_fills(&self, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(InfoType::UserFills, user);
        self.query(&request, HEAVY_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve a user's fills within a time range, newest first
    ///
    /// # Arguments
    /// * `user` - Onchain address in 42-character hexadecimal format
    /// * `start_time` - Start timestamp in milliseconds, inclusive
    /// * `end_time` - Optional end timestamp in milliseconds, inclusive
    /// * `aggregate_by_time` - Combine partial fills of the same crossing order
    /// * `raw_response` - Skip symbol conversion of the response
    pub async fn user_fills_by_time(
        &self,
        user: &str,
        start_time: u64,
        end_time: Option<u64>,
        aggregate_by_time: Option<bool>,
        raw_response: bool,
    ) -> Result<Value> {
        check_range(start_time, end_time)?;

        let mut request = UserFillsByTimeRequest::new(user, start_time).with_reversed(true);
        if let Some(end) = end_time {
            request = request.with_end_time(end);
        }
        if let Some(aggregate) = aggregate_by_time {
            request = request.with_aggregate_by_time(aggregate);
        }
        self.query(&request, HEAVY_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve a user's most recent TWAP slice fills
    pub async fn user_twap_slice_fills(&self, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(InfoType::UserTwapSliceFills, user);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve a user's TWAP slice fills within a time range
    pub async fn user_twap_slice_fills_by_time(
        &self,
        user: &str,
        start_time: u64,
        end_time: Option<u64>,
        aggregate_by_time: Option<bool>,
        raw_response: bool,
    ) -> Result<Value> {
        check_range(start_time, end_time)?;

        let mut request = UserFillsByTimeRequest::twap_slices(user, start_time);
        if let Some(end) = end_time {
            request = request.with_end_time(end);
        }
        if let Some(aggregate) = aggregate_by_time {
            request = request.with_aggregate_by_time(aggregate);
        }
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{
        client_for, mock_catalog, mock_info, sample_entries, ScriptedTransport,
    };
    use crate::symbols::StaticCatalog;
    use mockito::Server;
    use serde_json::json;
    use std::sync::Arc;

    const USER: &str = "0x1234567890abcdef1234567890abcdef12345678";

    const FILL: &str = r#"[{
        "closedPnl": "0.0", "coin": "BTC", "crossed": true, "dir": "Open Long",
        "hash": "0xabc", "oid": 90542681, "px": "43500.0", "side": "B",
        "startPosition": "0.0", "sz": "0.1", "time": 1700000000000,
        "fee": "1.5", "feeToken": "USDC", "tid": 118906512037719
    }]"#;

    #[tokio::test]
    async fn test_user_fills_converts_coin_only() {
        let mut server = Server::new_async().await;
        let _catalog = mock_catalog(&mut server).await;
        let mock = mock_info(&mut server, json!({"type": "userFills", "user": USER}), FILL).await;

        let client = client_for(&server);
        let result = client.user_fills(USER, false).await.unwrap();

        assert_eq!(result[0]["coin"], "BTC-PERP");
        assert_eq!(result[0]["px"], "43500.0");
        assert_eq!(result[0]["feeToken"], "USDC");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_user_fills_by_time_request_shape() {
        let mut server = Server::new_async().await;
        let _catalog = mock_catalog(&mut server).await;
        let mock = mock_info(
            &mut server,
            json!({
                "type": "userFillsByTime",
                "user": USER,
                "startTime": 1700000000000u64,
                "endTime": 1700100000000u64,
                "aggregateByTime": true,
                "reversed": true
            }),
            FILL,
        )
        .await;

        let client = client_for(&server);
        let result = client
            .user_fills_by_time(USER, 1700000000000, Some(1700100000000), Some(true), false)
            .await
            .unwrap();

        assert_eq!(result[0]["coin"], "BTC-PERP");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_user_fills_by_time_rejects_inverted_range() {
        let server = Server::new_async().await;
        let client = client_for(&server);

        let err = client
            .user_fills_by_time(USER, 2000, Some(1000), None, false)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[tokio::test]
    async fn test_fill_weights() {
        let transport = Arc::new(
            ScriptedTransport::default()
                .respond(json!([]))
                .respond(json!([]))
                .respond(json!([])),
        );
        let client = Client::with_parts(
            transport.clone(),
            Arc::new(StaticCatalog::new(sample_entries())),
        );

        client.user_fills(USER, true).await.unwrap();
        client.user_fills_by_time(USER, 1, None, None, true).await.unwrap();
        client.user_twap_slice_fills(USER, true).await.unwrap();

        let weights: Vec<u32> = transport.requests().iter().map(|(_, w)| *w).collect();
        assert_eq!(weights, vec![HEAVY_WEIGHT, HEAVY_WEIGHT, DEFAULT_WEIGHT]);
    }

    #[tokio::test]
    async fn test_user_twap_slice_fills_nested_coin() {
        let mut server = Server::new_async().await;
        let _catalog = mock_catalog(&mut server).await;
        let mock = mock_info(
            &mut server,
            json!({"type": "userTwapSliceFills", "user": USER}),
            r#"[{"fill": {"coin": "@107", "px": "21.0", "sz": "3.0"}, "twapId": 3}]"#,
        )
        .await;

        let client = client_for(&server);
        let result = client.user_twap_slice_fills(USER, false).await.unwrap();

        assert_eq!(result[0]["fill"]["coin"], "HYPE-SPOT");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_user_twap_slice_fills_by_time_has_no_reversed_flag() {
        let mut server = Server::new_async().await;
        let mock = mock_info(
            &mut server,
            json!({"type": "userTwapSliceFillsByTime", "user": USER, "startTime": 1000}),
            "[]",
        )
        .await;

        let client = client_for(&server);
        let result = client
            .user_twap_slice_fills_by_time(USER, 1000, None, None, true)
            .await
            .unwrap();

        assert_eq!(result, json!([]));
        mock.assert_async().await;
    }
}
