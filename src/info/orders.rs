//! Order info endpoints
//!
//! Open orders, order history, single order status and TWAP history.

use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::symbols::Directive;
use crate::transport::{DEFAULT_WEIGHT, HEAVY_WEIGHT};
use crate::types::{InfoType, OrderId, OrderStatusRequest, UserRequest};

impl Client {
    /// Retrieve a user's open orders
    ///
    /// # Arguments
    /// * `user` - Onchain address in 42-character hexadecimal format
    /// * `raw_response` - Skip symbol conversion of the response
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::mainnet()?;
    /// let orders = client.open_orders("0x1234...", false).await?;
    /// for order in orders.as_array().into_iter().flatten() {
    ///     println!("{} {} @ {}", order["coin"], order["sz"], order["limitPx"]);
    /// }
    /// ```
    pub async fn open_orders(&self, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(InfoType::OpenOrders, user);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve a user's open orders with frontend info (trigger conditions,
    /// order type, reduce-only flags)
    pub async fn frontend_open_orders(&self, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(InfoType::FrontendOpenOrders, user);
        self.query(&request, HEAVY_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve a user's historical orders
    ///
    /// Returns at most the 2000 most recent orders.
    pub async fn historical_orders(&self, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(InfoType::HistoricalOrders, user);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Query the status of a single order
    ///
    /// # Arguments
    /// * `user` - Onchain address in 42-character hexadecimal format
    /// * `oid` - Order ID, numeric or a client order ID (hex string)
    /// * `raw_response` - Skip symbol conversion of the response
    pub async fn order_status(
        &self,
        user: &str,
        oid: impl Into<OrderId>,
        raw_response: bool,
    ) -> Result<Value> {
        let request = OrderStatusRequest::new(user, oid.into());
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve a user's TWAP order history
    pub async fn twap_history(&self, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(InfoType::TwapHistory, user);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::{client_for, mock_catalog, mock_info};
    use mockito::Server;
    use serde_json::json;

    const USER: &str = "0x1234567890abcdef1234567890abcdef12345678";

    #[tokio::test]
    async fn test_open_orders_converts_coins() {
        let mut server = Server::new_async().await;
        let _catalog = mock_catalog(&mut server).await;
        let mock = mock_info(
            &mut server,
            json!({"type": "openOrders", "user": USER}),
            r#"[
                {"coin": "BTC", "limitPx": "29792.0", "oid": 91490942, "side": "A", "sz": "0.0", "timestamp": 1681247412573},
                {"coin": "PURR/USDC", "limitPx": "0.21", "oid": 91490943, "side": "B", "sz": "100.0", "timestamp": 1681247412574}
            ]"#,
        )
        .await;

        let client = client_for(&server);
        let result = client.open_orders(USER, false).await.unwrap();

        assert_eq!(result[0]["coin"], "BTC-PERP");
        assert_eq!(result[0]["limitPx"], "29792.0");
        assert_eq!(result[1]["coin"], "PURR-SPOT");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_open_orders_empty() {
        let mut server = Server::new_async().await;
        let _catalog = mock_catalog(&mut server).await;
        let mock = mock_info(&mut server, json!({"type": "openOrders", "user": USER}), "[]").await;

        let client = client_for(&server);
        let result = client.open_orders(USER, false).await.unwrap();

        assert_eq!(result, json!([]));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_frontend_open_orders_keeps_trigger_fields() {
        let mut server = Server::new_async().await;
        let _catalog = mock_catalog(&mut server).await;
        let mock = mock_info(
            &mut server,
            json!({"type": "frontendOpenOrders", "user": USER}),
            r#"[{
                "coin": "ETH", "isPositionTpsl": false, "isTrigger": true, "limitPx": "1800.0",
                "oid": 1, "orderType": "Stop Market", "origSz": "1.0", "reduceOnly": true,
                "side": "A", "sz": "1.0", "timestamp": 1, "triggerCondition": "Price below 1850",
                "triggerPx": "1850.0", "children": []
            }]"#,
        )
        .await;

        let client = client_for(&server);
        let result = client.frontend_open_orders(USER, false).await.unwrap();

        assert_eq!(result[0]["coin"], "ETH-PERP");
        assert_eq!(result[0]["triggerCondition"], "Price below 1850");
        assert_eq!(result[0]["isTrigger"], true);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_order_status_by_oid_and_cloid() {
        let mut server = Server::new_async().await;
        let _catalog = mock_catalog(&mut server).await;
        let by_oid = mock_info(
            &mut server,
            json!({"type": "orderStatus", "user": USER, "oid": 12345}),
            r#"{"status": "order", "order": {"order": {"coin": "@107", "oid": 12345}, "status": "filled", "statusTimestamp": 1}}"#,
        )
        .await;
        let by_cloid = mock_info(
            &mut server,
            json!({"type": "orderStatus", "user": USER, "oid": "0x1234567890abcdef1234567890abcdef"}),
            r#"{"status": "unknownOid"}"#,
        )
        .await;

        let client = client_for(&server);
        let found = client.order_status(USER, 12345u64, false).await.unwrap();
        let missing = client
            .order_status(USER, "0x1234567890abcdef1234567890abcdef", false)
            .await
            .unwrap();

        assert_eq!(found["order"]["order"]["coin"], "HYPE-SPOT");
        assert_eq!(found["order"]["status"], "filled");
        assert_eq!(missing, json!({"status": "unknownOid"}));
        by_oid.assert_async().await;
        by_cloid.assert_async().await;
    }

    #[tokio::test]
    async fn test_historical_orders_raw() {
        let mut server = Server::new_async().await;
        let mock = mock_info(
            &mut server,
            json!({"type": "historicalOrders", "user": USER}),
            r#"[{"order": {"coin": "BTC", "oid": 1}, "status": "canceled", "statusTimestamp": 2}]"#,
        )
        .await;

        let client = client_for(&server);
        let result = client.historical_orders(USER, true).await.unwrap();

        assert_eq!(result[0]["order"]["coin"], "BTC");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_twap_history() {
        let mut server = Server::new_async().await;
        let _catalog = mock_catalog(&mut server).await;
        let mock = mock_info(
            &mut server,
            json!({"type": "twapHistory", "user": USER}),
            r#"[{"time": 1, "state": {"coin": "BTC", "executedNtl": "0.0", "sz": "1.0"}, "status": {"status": "finished"}, "twapId": 7}]"#,
        )
        .await;

        let client = client_for(&server);
        let result = client.twap_history(USER, false).await.unwrap();

        assert_eq!(result[0]["state"]["coin"], "BTC-PERP");
        assert_eq!(result[0]["twapId"], 7);
        mock.assert_async().await;
    }
}
