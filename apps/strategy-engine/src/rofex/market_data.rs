//! Quote provider over the Rofex market data endpoint.

use async_trait::async_trait;
use chrono::Utc;

use super::api_types::{MarketDataResponse, PricePoint};
use super::http::RofexHttpClient;
use crate::ports::{MarketDataError, Quote, QuoteProvider};

const MARKET_DATA_PATH: &str = "/rest/marketdata/get";
const ENTRIES: &str = "BI,OF,LA,OP,CL,SE,OI";

/// [`QuoteProvider`] backed by `/rest/marketdata/get`.
pub struct RofexMarketData {
    http: RofexHttpClient,
    market_id: String,
}

impl RofexMarketData {
    /// Create a provider querying the given market.
    #[must_use]
    pub fn new(http: RofexHttpClient, market_id: impl Into<String>) -> Self {
        Self {
            http,
            market_id: market_id.into(),
        }
    }
}

fn price_of(point: Option<&PricePoint>) -> Option<rust_decimal::Decimal> {
    point.and_then(|p| p.price)
}

#[async_trait]
impl QuoteProvider for RofexMarketData {
    async fn fetch(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let query = [
            ("marketId", self.market_id.clone()),
            ("symbol", symbol.to_string()),
            ("entries", ENTRIES.to_string()),
            ("depth", "1".to_string()),
        ];
        let response: MarketDataResponse = self.http.get_json(MARKET_DATA_PATH, &query).await?;

        if response.status != "OK" {
            return Err(MarketDataError::Unavailable {
                symbol: symbol.to_string(),
            });
        }
        let entries = response
            .market_data
            .ok_or_else(|| MarketDataError::Unavailable {
                symbol: symbol.to_string(),
            })?;

        let quote = Quote {
            symbol: symbol.to_string(),
            last: price_of(entries.last.as_ref()),
            bid: price_of(entries.bids.first()),
            ask: price_of(entries.offers.first()),
            open: entries.open,
            close: price_of(entries.close.as_ref()),
            settlement: price_of(entries.settlement.as_ref()),
            open_interest: entries.open_interest.and_then(|oi| oi.size),
            timestamp: Utc::now(),
        };
        tracing::debug!(symbol, last = ?quote.last, bid = ?quote.bid, ask = ?quote.ask, "quote fetched");
        Ok(quote)
    }
}
