//! Staking info endpoints
//!
//! Delegations, delegator history and rewards, and validator summaries.

use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::symbols::Directive;
use crate::transport::DEFAULT_WEIGHT;
use crate::types::{InfoType, PlainRequest, UserRequest};

impl Client {
    /// Retrieve a user's staking delegations
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::mainnet()?;
    /// let delegations = client.delegations("0x1234...", false).await?;
    /// for d in delegations.as_array().into_iter().flatten() {
    ///     println!("{} -> {}", d["validator"], d["amount"]);
    /// }
    /// ```
    pub async fn delegations(&self, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(InfoType::Delegations, user);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve a user's staking summary (delegated, undelegated, pending withdrawals)
    pub async fn delegator_summary(&self, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(InfoType::DelegatorSummary, user);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve a user's staking history
    pub async fn delegator_history(&self, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(InfoType::DelegatorHistory, user);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve a user's staking rewards
    pub async fn delegator_rewards(&self, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(InfoType::DelegatorRewards, user);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    pub async fn validator_summaries(&self, raw_response: bool) -> Result<Value> {
        let request = PlainRequest::new(InfoType::ValidatorSummaries);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }
}
