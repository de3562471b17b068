use super::decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An LQTY stake and the fee revenue it has accrued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LQTYStake {
    pub staked_lqty: Decimal,
    /// Share of redemption fees, paid in collateral.
    pub collateral_gain: Decimal,
    /// Share of borrowing fees, paid in LUSD.
    pub lusd_gain: Decimal,
}

impl LQTYStake {
    pub fn new(staked_lqty: Decimal, collateral_gain: Decimal, lusd_gain: Decimal) -> Self {
        Self {
            staked_lqty,
            collateral_gain,
            lusd_gain,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.staked_lqty.is_zero() && self.collateral_gain.is_zero() && self.lusd_gain.is_zero()
    }
}
