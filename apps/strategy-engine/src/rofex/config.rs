//! Rofex adapter configuration.

use std::time::Duration;

/// Environment for the Rofex API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RofexEnvironment {
    /// reMarkets sandbox (simulated).
    Remarkets,
    /// Production trading (real money).
    Production,
}

impl RofexEnvironment {
    /// Base URL for the REST API.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Remarkets => "https://api.remarkets-primary.com.ar",
            Self::Production => "https://api.primary.com.ar",
        }
    }

    /// Whether this is production trading.
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for RofexEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remarkets => write!(f, "REMARKETS"),
            Self::Production => write!(f, "PRODUCTION"),
        }
    }
}

/// Configuration for the Rofex adapters.
#[derive(Debug, Clone)]
pub struct RofexConfig {
    /// API username.
    pub username: String,
    /// API password.
    pub password: String,
    /// Trading environment.
    pub environment: RofexEnvironment,
    /// Bounded timeout applied to every HTTP call.
    pub timeout: Duration,
    /// Base URL override (for tests against a local server).
    pub base_url_override: Option<String>,
}

impl RofexConfig {
    /// Create a configuration with a 10 second timeout.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        environment: RofexEnvironment,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            environment,
            timeout: Duration::from_secs(10),
            base_url_override: None,
        }
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point the adapters at a different base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Effective base URL.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.base_url_override
            .clone()
            .unwrap_or_else(|| self.environment.base_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_urls() {
        assert_eq!(
            RofexEnvironment::Remarkets.base_url(),
            "https://api.remarkets-primary.com.ar"
        );
        assert!(RofexEnvironment::Production.is_production());
        assert!(!RofexEnvironment::Remarkets.is_production());
    }

    #[test]
    fn override_wins_over_environment() {
        let config = RofexConfig::new("user", "pass", RofexEnvironment::Remarkets)
            .with_base_url("http://127.0.0.1:9999");
        assert_eq!(config.base_url(), "http://127.0.0.1:9999");
    }
}
