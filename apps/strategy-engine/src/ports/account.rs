//! Account service port.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// Account service failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Authentication was rejected.
    #[error("authentication failed: {0}")]
    Auth(String),
    /// Transport or protocol failure.
    #[error("account transport error: {0}")]
    Transport(String),
    /// The account report could not be interpreted.
    #[error("malformed account report: {0}")]
    Malformed(String),
}

/// Port for reading account state.
///
/// Balance is read fresh for every sizing decision; callers must not
/// cache it across plans.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Available capital for the given account.
    async fn available_capital(&self, account: &str) -> Result<Decimal, AccountError>;
}
