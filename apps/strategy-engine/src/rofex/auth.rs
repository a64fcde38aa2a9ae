//! Token authentication against the Rofex API.

use tokio::sync::RwLock;

use super::config::RofexConfig;
use super::error::AuthError;

const TOKEN_PATH: &str = "/auth/getToken";
const TOKEN_HEADER: &str = "X-Auth-Token";

/// Fetches and caches the session token.
///
/// The token is obtained lazily on first use and reused until a caller
/// invalidates it (typically after an HTTP 401/403), at which point the
/// next [`token`](Self::token) call re-authenticates.
pub struct AuthClient {
    http: reqwest::Client,
    config: RofexConfig,
    token: RwLock<Option<String>>,
}

impl AuthClient {
    /// Create an auth client sharing the given HTTP client.
    #[must_use]
    pub fn new(http: reqwest::Client, config: RofexConfig) -> Self {
        Self {
            http,
            config,
            token: RwLock::new(None),
        }
    }

    /// Current session token, authenticating first if needed.
    pub async fn token(&self) -> Result<String, AuthError> {
        if let Some(token) = self.token.read().await.clone() {
            return Ok(token);
        }
        self.refresh().await
    }

    /// Authenticate and cache a token, unless another task already has.
    pub async fn refresh(&self) -> Result<String, AuthError> {
        let mut guard = self.token.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(token) = guard.clone() {
            return Ok(token);
        }

        let url = format!("{}{TOKEN_PATH}", self.config.base_url());
        tracing::debug!(environment = %self.config.environment, "authenticating");

        let response = self
            .http
            .post(&url)
            .header("X-Username", &self.config.username)
            .header("X-Password", &self.config.password)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "authentication rejected");
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            });
        }

        let token = response
            .headers()
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
            .ok_or(AuthError::MissingToken)?;

        *guard = Some(token.clone());
        tracing::info!(environment = %self.config.environment, "authenticated");
        Ok(token)
    }

    /// Drop the cached token so the next call re-authenticates.
    pub async fn invalidate(&self) {
        *self.token.write().await = None;
    }
}
