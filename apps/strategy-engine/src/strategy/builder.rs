//! Strategy builder.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::instrument::{Instrument, InstrumentRegistry, OptionRight};
use crate::ports::{AccountService, OrderSide, QuoteProvider};
use crate::risk;
use crate::symbol;

use super::error::StrategyError;
use super::leg::OptionLeg;
use super::types::{PayoffMetrics, RiskBound, StrategyKind, StrategyPlan, VerticalKind};
use super::validation::{ensure_distinct, ensure_strictly_ascending};

/// Builds fully specified multi-leg plans from live quotes and the
/// account risk model.
///
/// Instrument-agnostic: every per-root difference comes from the
/// registry. Quote fetches happen strictly in leg submission order;
/// account balance is read fresh per plan.
pub struct StrategyBuilder<Q, A>
where
    Q: QuoteProvider,
    A: AccountService,
{
    registry: Arc<InstrumentRegistry>,
    quotes: Arc<Q>,
    accounts: Arc<A>,
    config: EngineConfig,
}

impl<Q, A> StrategyBuilder<Q, A>
where
    Q: QuoteProvider,
    A: AccountService,
{
    /// Create a builder over the given collaborators.
    pub fn new(
        registry: Arc<InstrumentRegistry>,
        quotes: Arc<Q>,
        accounts: Arc<A>,
        config: EngineConfig,
    ) -> Self {
        Self {
            registry,
            quotes,
            accounts,
            config,
        }
    }

    /// Build a vertical spread.
    ///
    /// `bull_call`/`bear_put` buy the leg at `long_strike` and sell the
    /// leg at `short_strike`; `bear_call`/`bull_put` invert the sides.
    pub async fn vertical_spread(
        &self,
        kind: VerticalKind,
        root: &str,
        expiration: &str,
        short_strike: Decimal,
        long_strike: Decimal,
        contracts: u64,
    ) -> Result<StrategyPlan, StrategyError> {
        let instrument = self.registry.resolve(root)?;
        let rule = instrument.strike_rule();
        let short_strike = rule.normalize(short_strike).map_err(symbol::SymbolError::from)?;
        let long_strike = rule.normalize(long_strike).map_err(symbol::SymbolError::from)?;
        ensure_distinct(short_strike, long_strike, "vertical spread strikes must differ")?;

        let right = kind.right();
        let long_symbol = symbol::encode(instrument, expiration, right, long_strike)?;
        let short_symbol = symbol::encode(instrument, expiration, right, short_strike)?;

        let long_px = self.last_price(&long_symbol).await?;
        let short_px = self.last_price(&short_symbol).await?;

        // Per-unit net premium, debit positive / credit negative
        let premium = if kind.is_debit() {
            long_px - short_px
        } else {
            short_px - long_px
        };
        let quantity = self.sized_contracts(premium.abs(), contracts).await?;

        let (long_side, short_side) = if kind.is_debit() {
            (OrderSide::Buy, OrderSide::Sell)
        } else {
            (OrderSide::Sell, OrderSide::Buy)
        };

        let legs = vec![
            leg(instrument, expiration, right, long_strike, long_side, quantity, long_px, long_symbol),
            leg(instrument, expiration, right, short_strike, short_side, quantity, short_px, short_symbol),
        ];

        // Max profit is (width - premium) for both directions; the
        // signed premium widens it for the credit kinds
        let multiplier = Decimal::from(instrument.multiplier());
        let width = (long_strike - short_strike).abs();
        let max_profit = RiskBound::Limited((width - premium) * multiplier);
        let max_loss = RiskBound::Limited(premium.abs() * multiplier);
        let breakeven = match right {
            OptionRight::Call => short_strike.min(long_strike) + premium.abs(),
            OptionRight::Put => short_strike.max(long_strike) - premium.abs(),
        };

        Ok(self.assemble(
            StrategyKind::Vertical(kind),
            instrument,
            expiration,
            legs,
            premium,
            PayoffMetrics {
                max_profit,
                max_loss,
                breakevens: vec![breakeven],
            },
            quantity,
        ))
    }

    /// Build an iron condor: short put `k1`, long put `k2`, short call
    /// `k3`, long call `k4`, with `k1 < k2 < k3 < k4`.
    pub async fn iron_condor(
        &self,
        root: &str,
        expiration: &str,
        put_strikes: (Decimal, Decimal),
        call_strikes: (Decimal, Decimal),
        contracts: u64,
    ) -> Result<StrategyPlan, StrategyError> {
        let instrument = self.registry.resolve(root)?;
        let rule = instrument.strike_rule();
        let k1 = rule.normalize(put_strikes.0).map_err(symbol::SymbolError::from)?;
        let k2 = rule.normalize(put_strikes.1).map_err(symbol::SymbolError::from)?;
        let k3 = rule.normalize(call_strikes.0).map_err(symbol::SymbolError::from)?;
        let k4 = rule.normalize(call_strikes.1).map_err(symbol::SymbolError::from)?;
        ensure_strictly_ascending(
            &[k1, k2, k3, k4],
            "iron condor requires put short < put long < call short < call long",
        )?;

        let put_short = symbol::encode(instrument, expiration, OptionRight::Put, k1)?;
        let put_long = symbol::encode(instrument, expiration, OptionRight::Put, k2)?;
        let call_short = symbol::encode(instrument, expiration, OptionRight::Call, k3)?;
        let call_long = symbol::encode(instrument, expiration, OptionRight::Call, k4)?;

        let put_short_px = self.last_price(&put_short).await?;
        let put_long_px = self.last_price(&put_long).await?;
        let call_short_px = self.last_price(&call_short).await?;
        let call_long_px = self.last_price(&call_long).await?;

        let credit = (put_short_px - put_long_px) + (call_short_px - call_long_px);
        let quantity = self.sized_contracts(credit.abs(), contracts).await?;

        let legs = vec![
            leg(instrument, expiration, OptionRight::Put, k1, OrderSide::Sell, quantity, put_short_px, put_short),
            leg(instrument, expiration, OptionRight::Put, k2, OrderSide::Buy, quantity, put_long_px, put_long),
            leg(instrument, expiration, OptionRight::Call, k3, OrderSide::Sell, quantity, call_short_px, call_short),
            leg(instrument, expiration, OptionRight::Call, k4, OrderSide::Buy, quantity, call_long_px, call_long),
        ];

        let multiplier = Decimal::from(instrument.multiplier());
        let metrics = PayoffMetrics {
            max_profit: RiskBound::Limited(credit * multiplier),
            max_loss: RiskBound::Limited(((k2 - k1) + (k4 - k3) - credit) * multiplier),
            breakevens: vec![k1 - credit, k3 + credit],
        };

        Ok(self.assemble(
            StrategyKind::IronCondor,
            instrument,
            expiration,
            legs,
            -credit,
            metrics,
            quantity,
        ))
    }

    /// Build a butterfly: long `lower`, short 2x `middle`, long `upper`,
    /// with `lower < middle < upper`.
    pub async fn butterfly(
        &self,
        right: OptionRight,
        root: &str,
        expiration: &str,
        lower: Decimal,
        middle: Decimal,
        upper: Decimal,
        contracts: u64,
    ) -> Result<StrategyPlan, StrategyError> {
        let instrument = self.registry.resolve(root)?;
        let rule = instrument.strike_rule();
        let lower = rule.normalize(lower).map_err(symbol::SymbolError::from)?;
        let middle = rule.normalize(middle).map_err(symbol::SymbolError::from)?;
        let upper = rule.normalize(upper).map_err(symbol::SymbolError::from)?;
        ensure_strictly_ascending(
            &[lower, middle, upper],
            "butterfly requires lower < middle < upper",
        )?;

        let lower_symbol = symbol::encode(instrument, expiration, right, lower)?;
        let middle_symbol = symbol::encode(instrument, expiration, right, middle)?;
        let upper_symbol = symbol::encode(instrument, expiration, right, upper)?;

        let lower_px = self.last_price(&lower_symbol).await?;
        let middle_px = self.last_price(&middle_symbol).await?;
        let upper_px = self.last_price(&upper_symbol).await?;

        let debit = lower_px - Decimal::TWO * middle_px + upper_px;
        let quantity = self.sized_contracts(debit.abs(), contracts).await?;

        let legs = vec![
            leg(instrument, expiration, right, lower, OrderSide::Buy, quantity, lower_px, lower_symbol),
            leg(instrument, expiration, right, middle, OrderSide::Sell, quantity.saturating_mul(2), middle_px, middle_symbol),
            leg(instrument, expiration, right, upper, OrderSide::Buy, quantity, upper_px, upper_symbol),
        ];

        let multiplier = Decimal::from(instrument.multiplier());
        let metrics = PayoffMetrics {
            max_profit: RiskBound::Limited((middle - lower - debit) * multiplier),
            max_loss: RiskBound::Limited(debit * multiplier),
            breakevens: vec![lower + debit, upper - debit],
        };

        Ok(self.assemble(
            StrategyKind::Butterfly(right),
            instrument,
            expiration,
            legs,
            debit,
            metrics,
            quantity,
        ))
    }

    /// Build a ratio spread: one long leg at the in-the-money strike,
    /// `ratio` short legs at the out-of-the-money strike.
    ///
    /// The call variant carries unbounded risk above the short strike;
    /// its max loss is reported as [`RiskBound::Unlimited`].
    pub async fn ratio_spread(
        &self,
        right: OptionRight,
        root: &str,
        expiration: &str,
        long_strike: Decimal,
        short_strike: Decimal,
        ratio: u64,
        contracts: u64,
    ) -> Result<StrategyPlan, StrategyError> {
        if ratio < 1 {
            return Err(StrategyError::InvalidRatio { ratio });
        }
        let instrument = self.registry.resolve(root)?;
        let rule = instrument.strike_rule();
        let long_strike = rule.normalize(long_strike).map_err(symbol::SymbolError::from)?;
        let short_strike = rule.normalize(short_strike).map_err(symbol::SymbolError::from)?;
        // The long leg must be the ITM one: below for calls, above for puts
        match right {
            OptionRight::Call => ensure_strictly_ascending(
                &[long_strike, short_strike],
                "call ratio spread requires long strike below short strike",
            )?,
            OptionRight::Put => ensure_strictly_ascending(
                &[short_strike, long_strike],
                "put ratio spread requires long strike above short strike",
            )?,
        }

        let long_symbol = symbol::encode(instrument, expiration, right, long_strike)?;
        let short_symbol = symbol::encode(instrument, expiration, right, short_strike)?;

        let long_px = self.last_price(&long_symbol).await?;
        let short_px = self.last_price(&short_symbol).await?;

        let credit = short_px * Decimal::from(ratio) - long_px;
        let quantity = self.sized_contracts(credit.abs(), contracts).await?;

        let legs = vec![
            leg(instrument, expiration, right, long_strike, OrderSide::Buy, quantity, long_px, long_symbol),
            leg(instrument, expiration, right, short_strike, OrderSide::Sell, quantity.saturating_mul(ratio), short_px, short_symbol),
        ];

        let multiplier = Decimal::from(instrument.multiplier());
        let max_loss = match right {
            OptionRight::Call => RiskBound::Unlimited,
            OptionRight::Put => RiskBound::Limited((long_strike - credit / multiplier) * multiplier),
        };
        let metrics = PayoffMetrics {
            max_profit: RiskBound::Limited(((long_strike - short_strike).abs() + credit) * multiplier),
            max_loss,
            breakevens: Vec::new(),
        };

        Ok(self.assemble(
            StrategyKind::RatioSpread(right),
            instrument,
            expiration,
            legs,
            -credit,
            metrics,
            quantity,
        ))
    }

    /// Build a straddle: long call and long put at one strike.
    pub async fn straddle(
        &self,
        root: &str,
        expiration: &str,
        strike: Decimal,
        contracts: u64,
    ) -> Result<StrategyPlan, StrategyError> {
        let instrument = self.registry.resolve(root)?;
        let strike = instrument
            .strike_rule()
            .normalize(strike)
            .map_err(symbol::SymbolError::from)?;
        self.volatility_play(StrategyKind::Straddle, instrument, expiration, strike, strike, contracts)
            .await
    }

    /// Build a strangle: long call at the higher strike, long put at the
    /// lower strike.
    pub async fn strangle(
        &self,
        root: &str,
        expiration: &str,
        strike_a: Decimal,
        strike_b: Decimal,
        contracts: u64,
    ) -> Result<StrategyPlan, StrategyError> {
        let instrument = self.registry.resolve(root)?;
        let rule = instrument.strike_rule();
        let strike_a = rule.normalize(strike_a).map_err(symbol::SymbolError::from)?;
        let strike_b = rule.normalize(strike_b).map_err(symbol::SymbolError::from)?;
        ensure_distinct(strike_a, strike_b, "strangle strikes must differ")?;
        let call_strike = strike_a.max(strike_b);
        let put_strike = strike_a.min(strike_b);
        self.volatility_play(StrategyKind::Strangle, instrument, expiration, call_strike, put_strike, contracts)
            .await
    }

    /// Shared tail of straddle/strangle construction.
    async fn volatility_play(
        &self,
        kind: StrategyKind,
        instrument: &Instrument,
        expiration: &str,
        call_strike: Decimal,
        put_strike: Decimal,
        contracts: u64,
    ) -> Result<StrategyPlan, StrategyError> {
        let call_symbol = symbol::encode(instrument, expiration, OptionRight::Call, call_strike)?;
        let put_symbol = symbol::encode(instrument, expiration, OptionRight::Put, put_strike)?;

        let call_px = self.last_price(&call_symbol).await?;
        let put_px = self.last_price(&put_symbol).await?;

        let premium = call_px + put_px;
        let quantity = self.sized_contracts(premium, contracts).await?;

        let legs = vec![
            leg(instrument, expiration, OptionRight::Call, call_strike, OrderSide::Buy, quantity, call_px, call_symbol),
            leg(instrument, expiration, OptionRight::Put, put_strike, OrderSide::Buy, quantity, put_px, put_symbol),
        ];

        let multiplier = Decimal::from(instrument.multiplier());
        let metrics = PayoffMetrics {
            max_profit: RiskBound::Unlimited,
            max_loss: RiskBound::Limited(premium * multiplier),
            breakevens: vec![call_strike + premium, put_strike - premium],
        };

        Ok(self.assemble(kind, instrument, expiration, legs, premium, metrics, quantity))
    }

    /// Fetch a quote and require its last price.
    async fn last_price(&self, wire: &str) -> Result<Decimal, StrategyError> {
        let quote = self.quotes.fetch(wire).await?;
        tracing::debug!(symbol = %wire, last = ?quote.last, "fetched leg quote");
        quote.last.ok_or_else(|| StrategyError::QuoteUnavailable {
            symbol: wire.to_string(),
        })
    }

    /// Read the balance and size the position, scaled by the caller's
    /// contracts factor.
    async fn sized_contracts(
        &self,
        per_unit_premium: Decimal,
        contracts: u64,
    ) -> Result<u64, StrategyError> {
        let balance = self
            .accounts
            .available_capital(&self.config.account)
            .await?;
        let base = risk::max_position_size(
            balance,
            self.config.risk.risk_fraction,
            per_unit_premium,
            self.config.risk.stop_loss_fraction,
        )?;
        Ok(base.saturating_mul(contracts))
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        &self,
        kind: StrategyKind,
        instrument: &Instrument,
        expiration: &str,
        legs: Vec<OptionLeg>,
        net_premium: Decimal,
        metrics: PayoffMetrics,
        contracts: u64,
    ) -> StrategyPlan {
        tracing::info!(
            strategy = %kind,
            root = instrument.root(),
            expiration,
            legs = legs.len(),
            contracts,
            %net_premium,
            "assembled strategy plan"
        );
        StrategyPlan {
            kind,
            root: instrument.root().to_string(),
            expiration: expiration.to_string(),
            legs,
            net_premium,
            metrics,
            contracts,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn leg(
    instrument: &Instrument,
    expiration: &str,
    right: OptionRight,
    strike: Decimal,
    side: OrderSide,
    quantity: u64,
    limit_price: Decimal,
    symbol: String,
) -> OptionLeg {
    OptionLeg {
        root: instrument.root().to_string(),
        expiration: expiration.to_string(),
        right,
        strike,
        side,
        quantity,
        limit_price,
        symbol,
    }
}
