//! Strategy Engine Binary
//!
//! Builds an example iron condor on DLR from live quotes and prints the
//! plan. Submission is off unless explicitly enabled.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ROFEX_USER`: API username
//! - `ROFEX_PASSWORD`: API password
//! - `ROFEX_ACCOUNT`: Trading account
//!
//! ## Optional
//! - `ROFEX_ENV`: REMARKETS | PRODUCTION (default: REMARKETS)
//! - `SUBMIT_ORDERS`: Set to `true` to actually send the legs
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;

use anyhow::Context;
use rust_decimal_macros::dec;

use strategy_engine::config::EngineConfig;
use strategy_engine::execution::{OrderDefaults, OrderSequencer};
use strategy_engine::instrument::InstrumentRegistry;
use strategy_engine::rofex::{
    RofexAccountService, RofexConfig, RofexEnvironment, RofexHttpClient, RofexMarketData,
    RofexOrderGateway,
};
use strategy_engine::strategy::StrategyBuilder;
use strategy_engine::telemetry::init_telemetry;

fn env_var(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_telemetry();

    let username = env_var("ROFEX_USER")?;
    let password = env_var("ROFEX_PASSWORD")?;
    let account = env_var("ROFEX_ACCOUNT")?;
    let environment = match std::env::var("ROFEX_ENV").as_deref() {
        Ok("PRODUCTION") => RofexEnvironment::Production,
        _ => RofexEnvironment::Remarkets,
    };
    if environment.is_production() {
        tracing::warn!("production environment selected, orders move real money");
    }

    let rofex_config = RofexConfig::new(username, password, environment);
    let http = RofexHttpClient::new(rofex_config)?;
    let engine_config = EngineConfig::new(account);

    let registry = Arc::new(InstrumentRegistry::matba_rofex());
    let quotes = Arc::new(RofexMarketData::new(
        http.clone(),
        engine_config.market_id.clone(),
    ));
    let accounts = Arc::new(RofexAccountService::new(http.clone()));
    let builder = StrategyBuilder::new(
        Arc::clone(&registry),
        quotes,
        accounts,
        engine_config.clone(),
    );

    let plan = builder
        .iron_condor(
            "DLR",
            "DIC24",
            (dec!(1150), dec!(1170)),
            (dec!(1250), dec!(1270)),
            1,
        )
        .await?;

    tracing::info!(
        kind = %plan.kind,
        net_premium = %plan.net_premium,
        contracts = plan.contracts,
        metrics = ?plan.metrics,
        "plan assembled"
    );
    for leg in &plan.legs {
        tracing::info!(
            symbol = %leg.symbol,
            side = %leg.side,
            quantity = leg.quantity,
            limit_price = %leg.limit_price,
            "leg"
        );
    }

    let submit = std::env::var("SUBMIT_ORDERS").map(|v| v == "true").unwrap_or(false);
    if !submit {
        tracing::info!("SUBMIT_ORDERS not set, stopping before order entry");
        return Ok(());
    }

    let gateway = Arc::new(RofexOrderGateway::new(http));
    let sequencer = OrderSequencer::new(gateway, OrderDefaults::from_config(&engine_config));
    let result = sequencer.submit(&plan).await;

    if result.all_accepted() {
        tracing::info!(legs = result.outcomes.len(), "all legs accepted");
    } else if let Some(rejection) = result.first_rejection() {
        tracing::error!(
            leg = rejection.index,
            symbol = %rejection.symbol,
            accepted = result.accepted_count(),
            "submission halted on rejection, accepted legs remain live"
        );
    }

    Ok(())
}
