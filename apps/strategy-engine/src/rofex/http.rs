//! Authenticated HTTP plumbing shared by the Rofex adapters.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::auth::AuthClient;
use super::config::RofexConfig;
use super::error::RofexError;

const TOKEN_HEADER: &str = "X-Auth-Token";

/// Thin wrapper over `reqwest` that attaches the session token and
/// retries exactly once on an expired token.
///
/// No transport-level retry: a timeout or connection error surfaces
/// immediately so stale quotes never feed a sizing decision.
#[derive(Clone)]
pub struct RofexHttpClient {
    http: reqwest::Client,
    auth: Arc<AuthClient>,
    base_url: String,
}

impl RofexHttpClient {
    /// Build the client and its auth handler from the configuration.
    pub fn new(config: RofexConfig) -> Result<Self, RofexError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RofexError::Transport(e.to_string()))?;
        let base_url = config.base_url();
        let auth = Arc::new(AuthClient::new(http.clone(), config));
        Ok(Self {
            http,
            auth,
            base_url,
        })
    }

    /// The auth handler, for adapters that need to trigger login eagerly.
    #[must_use]
    pub fn auth(&self) -> Arc<AuthClient> {
        Arc::clone(&self.auth)
    }

    /// GET `path` with the given query string and parse the JSON body.
    ///
    /// On 401/403 the cached token is dropped and the request replayed
    /// once with a fresh token.
    pub async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RofexError>
    where
        T: DeserializeOwned,
    {
        let token = self.auth.token().await?;
        let response = self.send(path, query, &token).await?;

        let response = if matches!(response.status().as_u16(), 401 | 403) {
            tracing::debug!(path, "token expired, re-authenticating");
            self.auth.invalidate().await;
            let token = self.auth.token().await?;
            self.send(path, query, &token).await?
        } else {
            response
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RofexError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(RofexError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| RofexError::JsonParse(e.to_string()))
    }

    async fn send(
        &self,
        path: &str,
        query: &[(&str, String)],
        token: &str,
    ) -> Result<reqwest::Response, RofexError> {
        let url = format!("{}{path}", self.base_url);
        self.http
            .get(&url)
            .header(TOKEN_HEADER, token)
            .query(query)
            .send()
            .await
            .map_err(|e| RofexError::Transport(e.to_string()))
    }
}
