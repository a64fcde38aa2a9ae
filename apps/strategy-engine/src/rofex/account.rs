//! Account service over the Rofex risk endpoint.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::api_types::AccountReportResponse;
use super::http::RofexHttpClient;
use crate::ports::{AccountError, AccountService};

/// [`AccountService`] backed by `/rest/risk/accountReport/{account}`.
pub struct RofexAccountService {
    http: RofexHttpClient,
}

impl RofexAccountService {
    /// Create the service.
    #[must_use]
    pub const fn new(http: RofexHttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AccountService for RofexAccountService {
    async fn available_capital(&self, account: &str) -> Result<Decimal, AccountError> {
        let path = format!("/rest/risk/accountReport/{account}");
        let response: AccountReportResponse = self.http.get_json(&path, &[]).await?;
        let capital = response
            .account_data
            .map(|data| data.available_to_collateral)
            .ok_or_else(|| {
                AccountError::Malformed(format!("no accountData in report for {account}"))
            })?;
        tracing::debug!(account, %capital, "account report fetched");
        Ok(capital)
    }
}
