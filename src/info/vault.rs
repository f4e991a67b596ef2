//! Vault info endpoints

use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::symbols::Directive;
use crate::transport::DEFAULT_WEIGHT;
use crate::types::{InfoType, PlainRequest, UserRequest, VaultDetailsRequest};

impl Client {
    /// Retrieve details for a vault
    ///
    /// # Arguments
    /// * `vault_address` - The vault's address
    /// * `user` - Optional user address; adds that user's follower state
    /// * `raw_response` - Skip symbol conversion of the response
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::mainnet()?;
    /// let vault = client.vault_details("0xdfc2...", None, false).await?;
    /// println!("{} (apr {})", vault["name"], vault["apr"]);
    /// ```
    pub async fn vault_details(
        &self,
        vault_address: &str,
        user: Option<&str>,
        raw_response: bool,
    ) -> Result<Value> {
        let mut request = VaultDetailsRequest::new(vault_address);
        if let Some(user) = user {
            request = request.with_user(user);
        }
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve a user's vault deposits
    pub async fn user_vault_equities(&self, user: &str, raw_response: bool) -> Result<Value> {
        let request = UserRequest::new(InfoType::UserVaultEquities, user);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }

    /// Retrieve summaries of all vaults
    pub async fn vault_summaries(&self, raw_response: bool) -> Result<Value> {
        let request = PlainRequest::new(InfoType::VaultSummaries);
        self.query(&request, DEFAULT_WEIGHT, &Directive::coins(), raw_response)
            .await
    }
}
