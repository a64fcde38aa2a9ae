//! Sequential leg submission.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::ports::{OrderGateway, OrderTicket, OrderType, TimeInForce};
use crate::strategy::{OptionLeg, StrategyKind, StrategyPlan};

/// Default parameter set applied to every leg order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDefaults {
    /// Trading account.
    pub account: String,
    /// Exchange market id.
    pub market_id: String,
    /// Time in force.
    pub time_in_force: TimeInForce,
    /// Order type.
    pub order_type: OrderType,
}

impl OrderDefaults {
    /// Defaults derived from the engine configuration: limit orders,
    /// valid for the day, on the configured market and account.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            account: config.account.clone(),
            market_id: config.market_id.clone(),
            time_in_force: TimeInForce::Day,
            order_type: OrderType::Limit,
        }
    }
}

/// Per-leg overrides of the default parameter set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegOverrides {
    /// Override the time in force.
    pub time_in_force: Option<TimeInForce>,
    /// Override the account.
    pub account: Option<String>,
    /// Override the market id.
    pub market_id: Option<String>,
}

/// Outcome of one leg submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LegStatus {
    /// The exchange accepted the order.
    Accepted {
        /// Exchange-assigned order id.
        broker_order_id: String,
    },
    /// The exchange (or transport) rejected the order.
    Rejected {
        /// Failure description.
        reason: String,
    },
    /// Submission stopped before this leg was attempted.
    NotAttempted,
}

/// Per-leg submission record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegOutcome {
    /// Index of the leg within the plan.
    pub index: usize,
    /// Wire symbol submitted.
    pub symbol: String,
    /// Contracts submitted.
    pub quantity: u64,
    /// What happened.
    pub status: LegStatus,
}

/// Result of submitting a whole plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// The plan's strategy kind.
    pub kind: StrategyKind,
    /// One outcome per plan leg, in submission order.
    pub outcomes: Vec<LegOutcome>,
}

impl SubmissionResult {
    /// Whether every leg was accepted.
    #[must_use]
    pub fn all_accepted(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| matches!(o.status, LegStatus::Accepted { .. }))
    }

    /// Number of accepted legs.
    #[must_use]
    pub fn accepted_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, LegStatus::Accepted { .. }))
            .count()
    }

    /// The first rejected leg, if any.
    #[must_use]
    pub fn first_rejection(&self) -> Option<&LegOutcome> {
        self.outcomes
            .iter()
            .find(|o| matches!(o.status, LegStatus::Rejected { .. }))
    }
}

/// Submits plan legs in assembly order.
///
/// No automatic retry and no rollback: a rejection stops submission of
/// later legs (reported [`LegStatus::NotAttempted`]) but legs already
/// accepted stay live. Strategy payoff assumes all legs fill, so a
/// partial submission leaves open directional exposure; the caller must
/// inspect the [`SubmissionResult`] and compensate manually.
pub struct OrderSequencer<G>
where
    G: OrderGateway,
{
    gateway: Arc<G>,
    defaults: OrderDefaults,
}

impl<G> OrderSequencer<G>
where
    G: OrderGateway,
{
    /// Create a sequencer with the given default order parameters.
    pub const fn new(gateway: Arc<G>, defaults: OrderDefaults) -> Self {
        Self { gateway, defaults }
    }

    /// Submit every leg with the default parameter set.
    pub async fn submit(&self, plan: &StrategyPlan) -> SubmissionResult {
        self.submit_with(plan, &HashMap::new()).await
    }

    /// Submit every leg, applying per-leg overrides by leg index.
    pub async fn submit_with(
        &self,
        plan: &StrategyPlan,
        overrides: &HashMap<usize, LegOverrides>,
    ) -> SubmissionResult {
        let mut outcomes = Vec::with_capacity(plan.legs.len());
        let mut halted = false;

        for (index, leg) in plan.legs.iter().enumerate() {
            if halted {
                outcomes.push(LegOutcome {
                    index,
                    symbol: leg.symbol.clone(),
                    quantity: leg.quantity,
                    status: LegStatus::NotAttempted,
                });
                continue;
            }

            let ticket = self.ticket(leg, overrides.get(&index));
            let status = match self.gateway.submit(&ticket).await {
                Ok(ack) => {
                    tracing::info!(
                        strategy = %plan.kind,
                        leg = index,
                        symbol = %leg.symbol,
                        side = %leg.side,
                        quantity = leg.quantity,
                        broker_order_id = %ack.broker_order_id,
                        "leg accepted"
                    );
                    LegStatus::Accepted {
                        broker_order_id: ack.broker_order_id,
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        strategy = %plan.kind,
                        leg = index,
                        symbol = %leg.symbol,
                        error = %err,
                        "leg rejected, halting remaining legs"
                    );
                    halted = true;
                    LegStatus::Rejected {
                        reason: err.to_string(),
                    }
                }
            };

            outcomes.push(LegOutcome {
                index,
                symbol: leg.symbol.clone(),
                quantity: leg.quantity,
                status,
            });
        }

        SubmissionResult {
            kind: plan.kind,
            outcomes,
        }
    }

    fn ticket(&self, leg: &OptionLeg, overrides: Option<&LegOverrides>) -> OrderTicket {
        let overrides = overrides.cloned().unwrap_or_default();
        OrderTicket {
            client_order_id: Uuid::new_v4().to_string(),
            symbol: leg.symbol.clone(),
            side: leg.side,
            quantity: leg.quantity,
            price: leg.limit_price,
            order_type: self.defaults.order_type,
            time_in_force: overrides
                .time_in_force
                .unwrap_or(self.defaults.time_in_force),
            account: overrides.account.unwrap_or_else(|| self.defaults.account.clone()),
            market_id: overrides
                .market_id
                .unwrap_or_else(|| self.defaults.market_id.clone()),
            iceberg: false,
            cancel_previous: false,
        }
    }
}
