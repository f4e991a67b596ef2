//! Account info endpoints
//!
//! Rate limits, fees, portfolio history, roles, sub-accounts, referrals and the
//! other per-user account queries.

use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::symbols::Directive;
use crate::transport::{DEFAULT_WEIGHT, HEAVY_WEIGHT};
use crate::types::{InfoType, MaxBuilderFeeRequest, PreTransferCheckRequest, UserRequest};

impl Client {
    /// Send a user-keyed request with the default coin conversion
    async fn user_query(&self, kind: InfoType, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(kind, user);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Query user rate limits
    ///
    /// Returns cumulative volume, requests used and the request cap.
    pub async fn user_rate_limit(&self, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(InfoType::UserRateLimit, user);
        self.query(&request, HEAVY_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Query user fee schedule and daily volumes
    pub async fn user_fees(&self, user: &str, raw_response: bool) -> Result<Value> {
        self.user_query(InfoType::UserFees, user, raw_response).await
    }

    /// Query a user's portfolio history (account value and PnL per period)
    pub async fn portfolio(&self, user: &str, raw_response: bool) -> Result<Value> {
        self.user_query(InfoType::Portfolio, user, raw_response).await
    }

    /// Query a user's role (user, agent, vault, sub-account or missing)
    pub async fn user_role(&self, user: &str, raw_response: bool) -> Result<Value> {
        self.user_query(InfoType::UserRole, user, raw_response).await
    }

    /// Retrieve a user's sub-accounts with their clearinghouse states
    pub async fn sub_accounts(&self, user: &str, raw_response: bool) -> Result<Value> {
        self.user_query(InfoType::SubAccounts, user, raw_response).await
    }

    /// Check whether a transfer from `source` to `user` is possible
    pub async fn pre_transfer_check(
        &self,
        user: &str,
        source: &str,
        raw_response: bool,
    ) -> Result<Value> {
        let request = PreTransferCheckRequest::new(user, source);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Query a user's referral state and rewards
    pub async fn referral(&self, user: &str, raw_response: bool) -> Result<Value> {
        self.user_query(InfoType::Referral, user, raw_response).await
    }

    /// List a user's approved agents besides the main one
    pub async fn extra_agents(&self, user: &str, raw_response: bool) -> Result<Value> {
        self.user_query(InfoType::ExtraAgents, user, raw_response).await
    }

    /// Check whether a user has VIP status
    pub async fn is_vip(&self, user: &str, raw_response: bool) -> Result<Value> {
        self.user_query(InfoType::IsVip, user, raw_response).await
    }

    /// Query a user's legal check status
    pub async fn legal_check(&self, user: &str, raw_response: bool) -> Result<Value> {
        self.user_query(InfoType::LegalCheck, user, raw_response).await
    }

    /// Resolve a multi-sig user to its authorized signers, or `null`
    pub async fn user_to_multi_sig_signers(
        &self,
        user: &str,
        raw_response: bool,
    ) -> Result<Value> {
        self.user_query(InfoType::UserToMultiSigSigners, user, raw_response)
            .await
    }

    /// Query the maximum builder fee a user has approved for `builder`
    ///
    /// Unless `raw_response` is set the fee comes back as a number.
    pub async fn max_builder_fee(
        &self,
        user: &str,
        builder: &str,
        raw_response: bool,
    ) -> Result<Value> {
        let request = MaxBuilderFeeRequest::new(user, builder);
        let directive = Directive::to_display().numeric_everywhere();
        self.query(&request, DEFAULT_WEIGHT, &directive, raw_response)
            .await
    }
}
