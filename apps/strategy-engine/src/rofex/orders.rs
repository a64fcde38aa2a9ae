//! Order gateway over the Rofex order-entry endpoint.

use async_trait::async_trait;

use super::api_types::OrderResponse;
use super::http::RofexHttpClient;
use crate::ports::{GatewayError, OrderAck, OrderGateway, OrderTicket};

// The Primary API takes new orders as GET requests with query params.
const NEW_ORDER_PATH: &str = "/rest/order/newSingleOrder";

/// [`OrderGateway`] backed by `/rest/order/newSingleOrder`.
pub struct RofexOrderGateway {
    http: RofexHttpClient,
}

impl RofexOrderGateway {
    /// Create the gateway.
    #[must_use]
    pub const fn new(http: RofexHttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl OrderGateway for RofexOrderGateway {
    async fn submit(&self, ticket: &OrderTicket) -> Result<OrderAck, GatewayError> {
        let query = [
            ("marketId", ticket.market_id.clone()),
            ("symbol", ticket.symbol.clone()),
            ("side", ticket.side.to_string()),
            ("orderQty", ticket.quantity.to_string()),
            ("price", ticket.price.to_string()),
            ("ordType", ticket.order_type.to_string()),
            ("timeInForce", ticket.time_in_force.to_string()),
            ("iceberg", ticket.iceberg.to_string()),
            ("cancelPrevious", ticket.cancel_previous.to_string()),
            ("account", ticket.account.clone()),
        ];
        let response: OrderResponse = self.http.get_json(NEW_ORDER_PATH, &query).await?;

        if response.status != "OK" {
            let reason = response
                .message
                .unwrap_or_else(|| format!("order entry returned status {}", response.status));
            return Err(GatewayError::Rejected { reason });
        }

        let broker_order_id = response
            .order
            .and_then(|o| o.client_id)
            .unwrap_or_else(|| ticket.client_order_id.clone());
        tracing::info!(
            symbol = %ticket.symbol,
            side = %ticket.side,
            quantity = ticket.quantity,
            price = %ticket.price,
            broker_order_id = %broker_order_id,
            "order accepted"
        );
        Ok(OrderAck { broker_order_id })
    }
}
