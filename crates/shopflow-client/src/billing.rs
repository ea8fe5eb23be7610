//! Client for the billing service.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;

use shopflow_core::{BalanceLedger, Caller, TokenPair};

use crate::error::ClientError;
use crate::response::{build_http_client, handle_response, normalize_base_url, ClientOptions};
use crate::types::{BalanceDeltaRequest, BalanceDeltaResponse, BalanceResponse};

/// Billing service client.
///
/// Every call carries the caller's token pair; the billing service
/// authenticates the caller itself and keys the balance by their login.
#[derive(Debug, Clone)]
pub struct BillingClient {
    client: Client,
    base_url: String,
}

impl BillingClient {
    /// Create a client for the billing service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, &ClientOptions::default())
    }

    /// Create a client with custom options.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: &ClientOptions,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(options)?,
            base_url: normalize_base_url(base_url),
        })
    }

    /// Get the caller's balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_balance(&self, tokens: &TokenPair) -> Result<BalanceResponse, ClientError> {
        let url = format!("{}/balance", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, tokens.authorization_value())
            .send()
            .await?;

        handle_response(response).await
    }

    /// Apply a signed delta to the caller's balance.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InsufficientFunds` or `ClientError::NotFound` for
    /// refused debits, and other variants for transport or server failures.
    pub async fn change_balance(
        &self,
        tokens: &TokenPair,
        amount: i64,
    ) -> Result<BalanceDeltaResponse, ClientError> {
        let url = format!("{}/balance", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, tokens.authorization_value())
            .json(&BalanceDeltaRequest { amount })
            .send()
            .await?;

        handle_response(response).await
    }
}

#[async_trait]
impl BalanceLedger for BillingClient {
    async fn apply_delta(&self, caller: &Caller, delta: i64) -> shopflow_core::Result<i64> {
        let response = self.change_balance(&caller.tokens, delta).await?;
        Ok(response.balance)
    }
}
