//! Wire types for the Rofex REST API.

use rust_decimal::Decimal;
use serde::Deserialize;

/// A price with optional size, as the market data endpoint reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct PricePoint {
    /// The price.
    pub price: Option<Decimal>,
    /// Size at that price, when reported.
    pub size: Option<Decimal>,
}

/// A size-only entry (open interest).
#[derive(Debug, Clone, Deserialize)]
pub struct SizePoint {
    /// The size.
    pub size: Option<Decimal>,
}

/// Market data entries keyed by the two-letter entry codes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketDataEntries {
    /// Last trade (`LA`).
    #[serde(rename = "LA")]
    pub last: Option<PricePoint>,
    /// Bid book (`BI`), best bid first.
    #[serde(rename = "BI", default)]
    pub bids: Vec<PricePoint>,
    /// Offer book (`OF`), best offer first.
    #[serde(rename = "OF", default)]
    pub offers: Vec<PricePoint>,
    /// Session open (`OP`), a bare price.
    #[serde(rename = "OP")]
    pub open: Option<Decimal>,
    /// Previous close (`CL`).
    #[serde(rename = "CL")]
    pub close: Option<PricePoint>,
    /// Settlement (`SE`).
    #[serde(rename = "SE")]
    pub settlement: Option<PricePoint>,
    /// Open interest (`OI`).
    #[serde(rename = "OI")]
    pub open_interest: Option<SizePoint>,
}

/// Response envelope for `/rest/marketdata/get`.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketDataResponse {
    /// `"OK"` on success.
    pub status: String,
    /// The entries, absent when the symbol is unknown.
    #[serde(rename = "marketData", default)]
    pub market_data: Option<MarketDataEntries>,
}

/// The `accountData` object of an account report.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountData {
    /// Capital available to post as collateral.
    #[serde(rename = "availableToCollateral")]
    pub available_to_collateral: Decimal,
}

/// Response envelope for `/rest/risk/accountReport/{account}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountReportResponse {
    /// Account-level figures.
    #[serde(rename = "accountData")]
    pub account_data: Option<AccountData>,
}

/// The `order` object of an order-entry response.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderIds {
    /// Exchange-assigned client order id.
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,
    /// Proprietary tag echoed back.
    pub proprietary: Option<String>,
}

/// Response envelope for `/rest/order/newSingleOrder`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponse {
    /// `"OK"` when the order was accepted.
    pub status: String,
    /// Rejection description, when present.
    #[serde(alias = "description")]
    pub message: Option<String>,
    /// Order identifiers, present on acceptance.
    pub order: Option<OrderIds>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_market_data_envelope() {
        let body = r#"{
            "status": "OK",
            "marketData": {
                "LA": {"price": 25.5, "size": 10},
                "BI": [{"price": 25.0, "size": 5}],
                "OF": [{"price": 26.0, "size": 7}],
                "OP": 24.0,
                "CL": {"price": 24.8, "size": null},
                "SE": {"price": 25.1, "size": null},
                "OI": {"size": 1200}
            }
        }"#;
        let parsed: MarketDataResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status, "OK");
        let entries = parsed.market_data.unwrap();
        assert_eq!(entries.last.unwrap().price, Some(dec!(25.5)));
        assert_eq!(entries.bids[0].price, Some(dec!(25.0)));
        assert_eq!(entries.open, Some(dec!(24.0)));
        assert_eq!(entries.open_interest.unwrap().size, Some(dec!(1200)));
    }

    #[test]
    fn parses_rejection_with_description_alias() {
        let body = r#"{"status": "ERROR", "description": "Invalid instrument"}"#;
        let parsed: OrderResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status, "ERROR");
        assert_eq!(parsed.message.as_deref(), Some("Invalid instrument"));
        assert!(parsed.order.is_none());
    }

    #[test]
    fn parses_account_report() {
        let body = r#"{"accountData": {"availableToCollateral": 100000.0}}"#;
        let parsed: AccountReportResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.account_data.unwrap().available_to_collateral,
            dec!(100000.0)
        );
    }
}
