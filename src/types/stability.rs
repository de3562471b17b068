use super::decimal::Decimal;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// A depositor's position in the Stability Pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilityDeposit {
    /// LUSD deposited at the last deposit or withdrawal.
    pub initial_lusd: Decimal,
    /// Deposit remaining after absorbing liquidated debt.
    pub current_lusd: Decimal,
    /// Collateral gained from liquidations, not yet withdrawn.
    pub collateral_gain: Decimal,
    /// LQTY earned through the community issuance.
    pub lqty_reward: Decimal,
    /// Frontend the deposit was made through, if any.
    pub frontend_tag: Option<Address>,
}

impl StabilityDeposit {
    pub fn new(
        initial_lusd: Decimal,
        current_lusd: Decimal,
        collateral_gain: Decimal,
        lqty_reward: Decimal,
        frontend_tag: Address,
    ) -> Self {
        Self {
            initial_lusd,
            current_lusd,
            collateral_gain,
            lqty_reward,
            frontend_tag: (!frontend_tag.is_zero()).then_some(frontend_tag),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.initial_lusd.is_zero()
            && self.current_lusd.is_zero()
            && self.collateral_gain.is_zero()
            && self.lqty_reward.is_zero()
    }
}
