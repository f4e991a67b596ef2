//! Info API client for Hyperliquid
//!
//! [`Client`] sends every info request through a [`Transport`] and, unless the
//! caller asks for the raw response, converts exchange-internal asset
//! identifiers in the reply to display symbols using its [`SymbolRegistry`].

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::symbols::{
    self, AssetCatalogSource, Direction, Directive, InfoCatalogSource, SymbolRegistry,
    SymbolSnapshot,
};
use crate::transport::{HttpTransport, Transport};

/// Base URLs for Hyperliquid API
pub const MAINNET_URL: &str = "https://api.hyperliquid.xyz";
pub const TESTNET_URL: &str = "https://api.hyperliquid-testnet.xyz";

/// Network configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    /// Mainnet environment
    #[default]
    Mainnet,
    /// Testnet environment
    Testnet,
}

impl Network {
    /// Get the base URL for this network
    pub fn base_url(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_URL,
            Network::Testnet => TESTNET_URL,
        }
    }
}

/// Client configuration
///
/// # Example
/// ```ignore
/// let config = ClientConfig::new(Network::Testnet)
///     .with_timeout(Duration::from_secs(10));
/// let client = Client::with_config(config)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub network: Network,
    /// Overrides the network's base URL (local nodes, proxies, tests)
    pub base_url: Option<String>,
    /// Per-request timeout; none by default
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The base URL requests are sent to
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.network.base_url())
    }
}

/// Hyperliquid info API client
///
/// Cloning is cheap; clones share the transport and the symbol registry.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    registry: Arc<SymbolRegistry>,
    network: Network,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("network", &self.network)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client for the specified network
    pub fn new(network: Network) -> Result<Self> {
        Self::with_config(ClientConfig::new(network))
    }

    /// Create a new client for mainnet
    pub fn mainnet() -> Result<Self> {
        Self::new(Network::Mainnet)
    }

    /// Create a new client for testnet
    pub fn testnet() -> Result<Self> {
        Self::new(Network::Testnet)
    }

    /// Create a client from a full configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport: Arc<dyn Transport> =
            Arc::new(HttpTransport::new(config.resolved_base_url(), config.timeout)?);
        let source = Arc::new(InfoCatalogSource::new(Arc::clone(&transport)));

        Ok(Self {
            transport,
            registry: Arc::new(SymbolRegistry::new(source)),
            network: config.network,
        })
    }

    /// Create a client from injected collaborators
    pub fn with_parts(
        transport: Arc<dyn Transport>,
        source: Arc<dyn AssetCatalogSource>,
    ) -> Self {
        Self {
            transport,
            registry: Arc::new(SymbolRegistry::new(source)),
            network: Network::default(),
        }
    }

    /// Get the current network
    pub fn network(&self) -> Network {
        self.network
    }

    /// The symbol registry shared by every clone of this client
    pub fn registry(&self) -> &Arc<SymbolRegistry> {
        &self.registry
    }

    /// Load the symbol mapping if it has not been loaded yet
    pub async fn ensure_symbols_loaded(&self) -> Result<Arc<SymbolSnapshot>> {
        self.registry.ensure_loaded().await
    }

    /// Fetch the asset catalog again and swap in the new mapping
    pub async fn refresh_symbols(&self) -> Result<Arc<SymbolSnapshot>> {
        self.registry.refresh().await
    }

    /// Convert one symbol, loading the mapping first if needed.
    ///
    /// Unknown symbols are returned unchanged.
    pub async fn convert_symbol(&self, symbol: &str, direction: Direction) -> Result<String> {
        let snapshot = self.registry.ensure_loaded().await?;
        Ok(snapshot.lookup(symbol, direction).to_owned())
    }

    /// Rewrite an arbitrary response with the current mapping
    pub async fn rewrite(&self, value: Value, directive: &Directive) -> Result<Value> {
        let snapshot = self.registry.ensure_loaded().await?;
        Ok(symbols::rewrite(value, directive, &snapshot))
    }

    /// Refresh the mapping every `interval` in the background
    pub fn start_symbol_refresh(&self, interval: Duration) -> JoinHandle<()> {
        self.registry.spawn_refresh(interval)
    }

    /// Exchange-internal identifier for a display symbol (`BTC-PERP` -> `BTC`)
    pub(crate) async fn internal_symbol(&self, coin: &str) -> Result<String> {
        self.convert_symbol(coin, Direction::ToInternal).await
    }

    /// Coin to put on the wire: as given for raw requests, otherwise its internal id
    pub(crate) async fn request_symbol(&self, coin: &str, raw_response: bool) -> Result<String> {
        if raw_response {
            return Ok(coin.to_owned());
        }
        self.internal_symbol(coin).await
    }

    /// Send an info request and post-process the response.
    ///
    /// Transport errors are returned as is and the response is never rewritten.
    /// With `raw_response` the response comes back untouched and the symbol
    /// mapping is not consulted.
    pub(crate) async fn query<T>(
        &self,
        request: &T,
        weight: u32,
        directive: &Directive,
        raw_response: bool,
    ) -> Result<Value>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_value(request)?;
        let response = self.transport.post_info(body, weight).await?;
        if raw_response {
            return Ok(response);
        }

        // hold one snapshot for the whole rewrite
        let snapshot = self.registry.ensure_loaded().await?;
        Ok(symbols::rewrite(response, directive, &snapshot))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory collaborators shared by the client and info tests

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::error::{Error, Result};
    use crate::symbols::{AssetCatalogSource, AssetSymbolEntry};
    use crate::transport::Transport;

    /// Transport replaying queued responses and recording every request
    #[derive(Default)]
    pub struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<Value>>>,
        pub requests: Mutex<Vec<(Value, u32)>>,
    }

    impl ScriptedTransport {
        pub fn respond(self, response: Value) -> Self {
            self.responses.lock().unwrap().push_back(Ok(response));
            self
        }

        pub fn fail(self, error: Error) -> Self {
            self.responses.lock().unwrap().push_back(Err(error));
            self
        }

        pub fn requests(&self) -> Vec<(Value, u32)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn post_info(&self, body: Value, weight: u32) -> Result<Value> {
            self.requests.lock().unwrap().push((body, weight));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::Api("no scripted response".to_string())))
        }
    }

    /// Catalog source counting fetches; fails the first `fail_first` of them
    pub struct CountingCatalog {
        pub calls: AtomicUsize,
        pub fail_first: usize,
        pub entries: Vec<AssetSymbolEntry>,
    }

    impl CountingCatalog {
        pub fn new(entries: Vec<AssetSymbolEntry>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_first: 0,
                entries,
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AssetCatalogSource for CountingCatalog {
        async fn fetch_asset_catalog(&self) -> Result<Vec<AssetSymbolEntry>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if call < self.fail_first {
                return Err(Error::Api("HTTP 500 - meta unavailable".to_string()));
            }
            Ok(self.entries.clone())
        }
    }

    pub fn sample_entries() -> Vec<AssetSymbolEntry> {
        vec![
            AssetSymbolEntry::perp("BTC", "BTC-PERP"),
            AssetSymbolEntry::perp("ETH", "ETH-PERP"),
            AssetSymbolEntry::spot("PURR/USDC", "PURR-SPOT"),
            AssetSymbolEntry::spot("@107", "HYPE-SPOT"),
        ]
    }

    pub const META_BODY: &str = r#"{
        "universe": [
            {"name": "BTC", "szDecimals": 5, "maxLeverage": 50},
            {"name": "ETH", "szDecimals": 4, "maxLeverage": 50}
        ]
    }"#;

    pub const SPOT_META_BODY: &str = r#"{
        "tokens": [
            {"name": "USDC", "szDecimals": 8, "weiDecimals": 8, "index": 0, "tokenId": "0x6d1e7cde53ba9467b783cb7c530ce054", "isCanonical": true},
            {"name": "PURR", "szDecimals": 0, "weiDecimals": 5, "index": 1, "tokenId": "0xc1fb593aeffbeb02f85e0308e9956a90", "isCanonical": true},
            {"name": "HYPE", "szDecimals": 2, "weiDecimals": 8, "index": 150, "tokenId": "0x0d01dc56dcaaca66ad901c959b4011ec", "isCanonical": false}
        ],
        "universe": [
            {"name": "PURR/USDC", "tokens": [1, 0], "index": 0, "isCanonical": true},
            {"name": "@107", "tokens": [150, 0], "index": 107, "isCanonical": false}
        ]
    }"#;

    /// Mock the two catalog requests on a mockito server
    pub async fn mock_catalog(server: &mut mockito::ServerGuard) -> (mockito::Mock, mockito::Mock) {
        use mockito::Matcher;
        use serde_json::json;

        let meta = server
            .mock("POST", "/info")
            .match_body(Matcher::Json(json!({"type": "meta"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(META_BODY)
            .create_async()
            .await;
        let spot_meta = server
            .mock("POST", "/info")
            .match_body(Matcher::Json(json!({"type": "spotMeta"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SPOT_META_BODY)
            .create_async()
            .await;
        (meta, spot_meta)
    }

    /// Mock one info request with a JSON response body
    pub async fn mock_info(
        server: &mut mockito::ServerGuard,
        request: Value,
        response: &str,
    ) -> mockito::Mock {
        server
            .mock("POST", "/info")
            .match_body(mockito::Matcher::Json(request))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response)
            .create_async()
            .await
    }

    /// Client talking to a mockito server
    pub fn client_for(server: &mockito::ServerGuard) -> super::Client {
        super::Client::with_config(super::ClientConfig::default().with_base_url(server.url()))
            .unwrap()
    }
}
