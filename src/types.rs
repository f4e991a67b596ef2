//! Request and response types for the Hyperliquid info API
//!
//! Requests are plain serde structs tagged with their [`InfoType`]. Responses
//! are returned as `serde_json::Value`; only the metadata shapes the symbol
//! catalog is built from are typed here.

use serde::{Deserialize, Serialize};

// ============================================================================
// Common Enums
// ============================================================================

/// Info request type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InfoType {
    AllMids,
    L2Book,
    CandleSnapshot,
    Meta,
    MetaAndAssetCtxs,
    SpotMeta,
    SpotMetaAndAssetCtxs,
    ClearinghouseState,
    SpotClearinghouseState,
    OpenOrders,
    FrontendOpenOrders,
    HistoricalOrders,
    OrderStatus,
    TwapHistory,
    UserFills,
    UserFillsByTime,
    UserTwapSliceFills,
    UserTwapSliceFillsByTime,
    UserRateLimit,
    UserFees,
    Portfolio,
    UserRole,
    SubAccounts,
    PreTransferCheck,
    Referral,
    ExtraAgents,
    IsVip,
    LegalCheck,
    UserToMultiSigSigners,
    MaxBuilderFee,
    VaultDetails,
    UserVaultEquities,
    VaultSummaries,
    Delegations,
    DelegatorSummary,
    DelegatorHistory,
    DelegatorRewards,
    ValidatorSummaries,
    UserFunding,
    FundingHistory,
    PredictedFundings,
    PerpsAtOpenInterestCap,
    TokenDetails,
}

/// Candle interval for historical data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandleInterval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "3m")]
    ThreeMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "8h")]
    EightHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
}

/// Order ID - can be numeric or client-provided string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    /// Numeric order ID
    Oid(u64),
    /// Client order ID (hex string)
    Cloid(String),
}

impl From<u64> for OrderId {
    fn from(oid: u64) -> Self {
        OrderId::Oid(oid)
    }
}

impl From<&str> for OrderId {
    fn from(cloid: &str) -> Self {
        OrderId::Cloid(cloid.to_string())
    }
}

// ============================================================================
// Info Endpoint Request Types
// ============================================================================

/// Request that carries nothing but its type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlainRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
}

impl PlainRequest {
    pub fn new(request_type: InfoType) -> Self {
        Self { request_type }
    }
}

/// Request keyed by a single user address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
    pub user: String,
}

impl UserRequest {
    pub fn new(request_type: InfoType, user: impl Into<String>) -> Self {
        Self {
            request_type,
            user: user.into(),
        }
    }
}

/// Request for perpetuals metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
}

impl Default for MetaRequest {
    fn default() -> Self {
        Self {
            request_type: InfoType::Meta,
        }
    }
}

/// Request for spot metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotMetaRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
}

impl Default for SpotMetaRequest {
    fn default() -> Self {
        Self {
            request_type: InfoType::SpotMeta,
        }
    }
}

/// Request for all mid prices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllMidsRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
}

impl Default for AllMidsRequest {
    fn default() -> Self {
        Self {
            request_type: InfoType::AllMids,
        }
    }
}

/// Request for L2 order book snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L2BookRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
    pub coin: String,
    #[serde(rename = "nSigFigs", skip_serializing_if = "Option::is_none")]
    pub n_sig_figs: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mantissa: Option<u8>,
}

impl L2BookRequest {
    pub fn new(coin: impl Into<String>) -> Self {
        Self {
            request_type: InfoType::L2Book,
            coin: coin.into(),
            n_sig_figs: None,
            mantissa: None,
        }
    }

    pub fn with_sig_figs(mut self, n_sig_figs: u8) -> Self {
        self.n_sig_figs = Some(n_sig_figs);
        self
    }

    pub fn with_mantissa(mut self, mantissa: u8) -> Self {
        self.mantissa = Some(mantissa);
        self
    }
}

/// Nested request for candle snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleSnapshotInner {
    pub coin: String,
    pub interval: CandleInterval,
    #[serde(rename = "startTime")]
    pub start_time: u64,
    #[serde(rename = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
}

/// Request for candle snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleSnapshotRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
    pub req: CandleSnapshotInner,
}

impl CandleSnapshotRequest {
    pub fn new(coin: impl Into<String>, interval: CandleInterval, start_time: u64) -> Self {
        Self {
            request_type: InfoType::CandleSnapshot,
            req: CandleSnapshotInner {
                coin: coin.into(),
                interval,
                start_time,
                end_time: None,
            },
        }
    }

    pub fn with_end_time(mut self, end_time: u64) -> Self {
        self.req.end_time = Some(end_time);
        self
    }
}

/// Request for order status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
    pub user: String,
    pub oid: OrderId,
}

impl OrderStatusRequest {
    pub fn new(user: impl Into<String>, oid: OrderId) -> Self {
        Self {
            request_type: InfoType::OrderStatus,
            user: user.into(),
            oid,
        }
    }
}

/// Request for user fills (or TWAP slice fills) within a time range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFillsByTimeRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
    pub user: String,
    #[serde(rename = "startTime")]
    pub start_time: u64,
    #[serde(rename = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
    #[serde(rename = "aggregateByTime", skip_serializing_if = "Option::is_none")]
    pub aggregate_by_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reversed: Option<bool>,
}

impl UserFillsByTimeRequest {
    pub fn new(user: impl Into<String>, start_time: u64) -> Self {
        Self {
            request_type: InfoType::UserFillsByTime,
            user: user.into(),
            start_time,
            end_time: None,
            aggregate_by_time: None,
            reversed: None,
        }
    }

    /// Same shape, for TWAP slice fills
    pub fn twap_slices(user: impl Into<String>, start_time: u64) -> Self {
        Self {
            request_type: InfoType::UserTwapSliceFillsByTime,
            ..Self::new(user, start_time)
        }
    }

    pub fn with_end_time(mut self, end_time: u64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn with_aggregate_by_time(mut self, aggregate: bool) -> Self {
        self.aggregate_by_time = Some(aggregate);
        self
    }

    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = Some(reversed);
        self
    }
}

/// Request for user funding history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFundingRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
    pub user: String,
    #[serde(rename = "startTime")]
    pub start_time: u64,
    #[serde(rename = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
}

impl UserFundingRequest {
    pub fn new(user: impl Into<String>, start_time: u64) -> Self {
        Self {
            request_type: InfoType::UserFunding,
            user: user.into(),
            start_time,
            end_time: None,
        }
    }

    pub fn with_end_time(mut self, end_time: u64) -> Self {
        self.end_time = Some(end_time);
        self
    }
}

/// Request for historical funding rates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingHistoryRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
    pub coin: String,
    #[serde(rename = "startTime")]
    pub start_time: u64,
    #[serde(rename = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
}

impl FundingHistoryRequest {
    pub fn new(coin: impl Into<String>, start_time: u64) -> Self {
        Self {
            request_type: InfoType::FundingHistory,
            coin: coin.into(),
            start_time,
            end_time: None,
        }
    }

    pub fn with_end_time(mut self, end_time: u64) -> Self {
        self.end_time = Some(end_time);
        self
    }
}

/// Request for the maximum builder fee a user approved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxBuilderFeeRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
    pub user: String,
    pub builder: String,
}

impl MaxBuilderFeeRequest {
    pub fn new(user: impl Into<String>, builder: impl Into<String>) -> Self {
        Self {
            request_type: InfoType::MaxBuilderFee,
            user: user.into(),
            builder: builder.into(),
        }
    }
}

/// Request for vault details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultDetailsRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
    #[serde(rename = "vaultAddress")]
    pub vault_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl VaultDetailsRequest {
    pub fn new(vault_address: impl Into<String>) -> Self {
        Self {
            request_type: InfoType::VaultDetails,
            vault_address: vault_address.into(),
            user: None,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

/// Request for a pre-transfer check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreTransferCheckRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
    pub user: String,
    pub source: String,
}

impl PreTransferCheckRequest {
    pub fn new(user: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            request_type: InfoType::PreTransferCheck,
            user: user.into(),
            source: source.into(),
        }
    }
}

/// Request for token details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDetailsRequest {
    #[serde(rename = "type")]
    pub request_type: InfoType,
    #[serde(rename = "tokenId")]
    pub token_id: String,
}

impl TokenDetailsRequest {
    pub fn new(token_id: impl Into<String>) -> Self {
        Self {
            request_type: InfoType::TokenDetails,
            token_id: token_id.into(),
        }
    }
}

// ============================================================================
// Metadata Response Types
// ============================================================================

/// Perpetual asset metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpAssetMeta {
    pub name: String,
    pub sz_decimals: u8,
    pub max_leverage: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_isolated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_delisted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_mode: Option<String>,
}

/// Margin tier information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginTier {
    pub lower_bound: String,
    pub max_leverage: u32,
}

/// Margin table entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginTableEntry {
    pub description: String,
    #[serde(rename = "marginTiers")]
    pub margin_tiers: Vec<MarginTier>,
}

/// Perpetuals metadata response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpMetaResponse {
    pub universe: Vec<PerpAssetMeta>,
    #[serde(default)]
    pub margin_tables: Vec<(u32, MarginTableEntry)>,
}

/// Spot token metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotToken {
    pub name: String,
    pub sz_decimals: u8,
    pub wei_decimals: u8,
    pub index: u32,
    pub token_id: String,
    #[serde(default)]
    pub is_canonical: bool,
    pub evm_contract: Option<serde_json::Value>,
    pub full_name: Option<String>,
}

/// Spot pair metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotPair {
    pub name: String,
    pub tokens: Vec<u32>,
    pub index: u32,
    #[serde(default)]
    pub is_canonical: bool,
}

/// Spot metadata response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotMetaResponse {
    pub tokens: Vec<SpotToken>,
    pub universe: Vec<SpotPair>,
}
