//! End-to-end flow: build a plan from quotes, then sequence the legs.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::Mutex;

use strategy_engine::config::EngineConfig;
use strategy_engine::execution::{LegStatus, OrderDefaults, OrderSequencer};
use strategy_engine::instrument::InstrumentRegistry;
use strategy_engine::ports::{
    AccountError, AccountService, GatewayError, MarketDataError, OrderAck, OrderGateway,
    OrderTicket, Quote, QuoteProvider,
};
use strategy_engine::strategy::StrategyBuilder;

struct FixedQuotes {
    book: HashMap<String, Decimal>,
}

#[async_trait]
impl QuoteProvider for FixedQuotes {
    async fn fetch(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let last = self
            .book
            .get(symbol)
            .copied()
            .ok_or_else(|| MarketDataError::Unavailable {
                symbol: symbol.to_string(),
            })?;
        Ok(Quote {
            symbol: symbol.to_string(),
            last: Some(last),
            bid: None,
            ask: None,
            open: None,
            close: None,
            settlement: None,
            open_interest: None,
            timestamp: Utc::now(),
        })
    }
}

struct FixedBalance(Decimal);

#[async_trait]
impl AccountService for FixedBalance {
    async fn available_capital(&self, _account: &str) -> Result<Decimal, AccountError> {
        Ok(self.0)
    }
}

/// Records submitted tickets; rejects once `fail_from` legs went through.
struct RecordingGateway {
    tickets: Mutex<Vec<OrderTicket>>,
    submitted: AtomicU64,
    fail_from: Option<u64>,
}

impl RecordingGateway {
    fn accepting() -> Self {
        Self {
            tickets: Mutex::new(Vec::new()),
            submitted: AtomicU64::new(0),
            fail_from: None,
        }
    }

    fn failing_from(leg: u64) -> Self {
        Self {
            fail_from: Some(leg),
            ..Self::accepting()
        }
    }
}

#[async_trait]
impl OrderGateway for RecordingGateway {
    async fn submit(&self, ticket: &OrderTicket) -> Result<OrderAck, GatewayError> {
        let n = self.submitted.fetch_add(1, Ordering::SeqCst);
        if self.fail_from.is_some_and(|from| n >= from) {
            return Err(GatewayError::Rejected {
                reason: "margin exceeded".to_string(),
            });
        }
        self.tickets.lock().await.push(ticket.clone());
        Ok(OrderAck {
            broker_order_id: format!("ord-{n}"),
        })
    }
}

fn dlr_condor_book() -> HashMap<String, Decimal> {
    HashMap::from([
        ("DLRDIC24P1150".to_string(), dec!(4.0)),
        ("DLRDIC24P1170".to_string(), dec!(6.5)),
        ("DLRDIC24C1250".to_string(), dec!(7.0)),
        ("DLRDIC24C1270".to_string(), dec!(4.2)),
    ])
}

fn engine_builder(
    book: HashMap<String, Decimal>,
    balance: Decimal,
) -> StrategyBuilder<FixedQuotes, FixedBalance> {
    StrategyBuilder::new(
        Arc::new(InstrumentRegistry::matba_rofex()),
        Arc::new(FixedQuotes { book }),
        Arc::new(FixedBalance(balance)),
        EngineConfig::new("REM1234"),
    )
}

#[tokio::test]
async fn condor_plan_flows_into_four_limit_orders() {
    let builder = engine_builder(dlr_condor_book(), dec!(100000));
    let plan = builder
        .iron_condor(
            "DLR",
            "DIC24",
            (dec!(1150), dec!(1170)),
            (dec!(1250), dec!(1270)),
            1,
        )
        .await
        .unwrap();

    let gateway = Arc::new(RecordingGateway::accepting());
    let sequencer = OrderSequencer::new(
        Arc::clone(&gateway),
        OrderDefaults::from_config(&EngineConfig::new("REM1234")),
    );
    let result = sequencer.submit(&plan).await;

    assert!(result.all_accepted());
    let tickets = gateway.tickets.lock().await;
    assert_eq!(tickets.len(), 4);
    let symbols: Vec<&str> = tickets.iter().map(|t| t.symbol.as_str()).collect();
    assert_eq!(
        symbols,
        ["DLRDIC24P1150", "DLRDIC24P1170", "DLRDIC24C1250", "DLRDIC24C1270"]
    );
    for ticket in tickets.iter() {
        assert_eq!(ticket.account, "REM1234");
        assert_eq!(ticket.market_id, "ROFX");
        assert_eq!(ticket.quantity, plan.contracts);
    }
    // Limit prices come from the leg quotes
    assert_eq!(tickets[0].price, dec!(4.0));
    assert_eq!(tickets[3].price, dec!(4.2));
}

#[tokio::test]
async fn rejection_mid_plan_reports_partial_outcome() {
    let builder = engine_builder(dlr_condor_book(), dec!(100000));
    let plan = builder
        .iron_condor(
            "DLR",
            "DIC24",
            (dec!(1150), dec!(1170)),
            (dec!(1250), dec!(1270)),
            1,
        )
        .await
        .unwrap();

    let gateway = Arc::new(RecordingGateway::failing_from(2));
    let sequencer = OrderSequencer::new(
        Arc::clone(&gateway),
        OrderDefaults::from_config(&EngineConfig::new("REM1234")),
    );
    let result = sequencer.submit(&plan).await;

    assert_eq!(result.accepted_count(), 2);
    assert!(matches!(result.outcomes[2].status, LegStatus::Rejected { .. }));
    assert_eq!(result.outcomes[3].status, LegStatus::NotAttempted);
    // The fourth leg never reached the gateway
    assert_eq!(gateway.submitted.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn sizing_scales_with_balance_and_premium() {
    let builder = engine_builder(dlr_condor_book(), dec!(50000));
    let plan = builder
        .iron_condor(
            "DLR",
            "DIC24",
            (dec!(1150), dec!(1170)),
            (dec!(1250), dec!(1270)),
            1,
        )
        .await
        .unwrap();

    // credit = (4.0 - 6.5) + (7.0 - 4.2) = 0.3
    assert_eq!(plan.net_premium, dec!(-0.3));
    // 50_000 * 0.02 / (0.3 * 0.10) = 33_333 (floored)
    assert_eq!(plan.contracts, 33_333);
    for leg in &plan.legs {
        assert_eq!(leg.quantity, 33_333);
    }
}
