//! Trove value objects.
//!
//! A [`Trove`] is just a pair of amounts. Owner-scoped troves come in two shapes:
//! [`TroveWithPendingRedistribution`] carries the raw on-chain state together with
//! the redistribution snapshot taken at its last modification, while [`UserTrove`]
//! has the pending redistribution folded in.

use super::decimal::Decimal;
use alloy_primitives::Address;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collateral ratio below which a Trove can be liquidated in normal mode (110%).
pub const MINIMUM_COLLATERAL_RATIO: Decimal = Decimal::from_raw_u64(1_100_000_000_000_000_000);

/// Total collateral ratio below which the system enters recovery mode (150%).
pub const CRITICAL_COLLATERAL_RATIO: Decimal = Decimal::from_raw_u64(1_500_000_000_000_000_000);

/// Amount of LUSD set aside as gas compensation for every open Trove.
pub static LUSD_LIQUIDATION_RESERVE: Lazy<Decimal> = Lazy::new(|| Decimal::from(200u64));

/// Collateral and debt amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trove {
    pub collateral: Decimal,
    pub debt: Decimal,
}

impl Trove {
    pub fn new(collateral: Decimal, debt: Decimal) -> Self {
        Self { collateral, debt }
    }

    pub fn is_empty(&self) -> bool {
        self.collateral.is_zero() && self.debt.is_zero()
    }

    /// Component-wise addition, clamped at [`Decimal::MAX`].
    pub fn add(&self, other: &Trove) -> Trove {
        Trove::new(
            self.collateral.saturating_add(other.collateral),
            self.debt.saturating_add(other.debt),
        )
    }

    /// Component-wise subtraction, clamped at zero.
    pub fn subtract(&self, other: &Trove) -> Trove {
        Trove::new(
            self.collateral.saturating_sub(other.collateral),
            self.debt.saturating_sub(other.debt),
        )
    }

    /// Scales both amounts, clamped at [`Decimal::MAX`].
    pub fn multiply(&self, multiplier: Decimal) -> Trove {
        Trove::new(
            self.collateral.saturating_mul(multiplier),
            self.debt.saturating_mul(multiplier),
        )
    }

    /// Collateral value over debt at `price`. `None` stands for an infinite ratio (no debt).
    pub fn collateral_ratio(&self, price: Decimal) -> Option<Decimal> {
        if self.debt.is_zero() {
            return None;
        }
        let value = self.collateral.saturating_mul(price);
        Some(value.checked_div(self.debt).unwrap_or(Decimal::MAX))
    }

    pub fn collateral_ratio_is_below_minimum(&self, price: Decimal) -> bool {
        self.collateral_ratio(price)
            .map_or(false, |ratio| ratio < MINIMUM_COLLATERAL_RATIO)
    }

    pub fn collateral_ratio_is_below_critical(&self, price: Decimal) -> bool {
        self.collateral_ratio(price)
            .map_or(false, |ratio| ratio < CRITICAL_COLLATERAL_RATIO)
    }

    /// Debt excluding the liquidation reserve.
    pub fn net_debt(&self) -> Decimal {
        self.debt.saturating_sub(*LUSD_LIQUIDATION_RESERVE)
    }
}

impl fmt::Display for Trove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ collateral: {}, debt: {} }}", self.collateral, self.debt)
    }
}

/// Lifecycle state of an owner's Trove, as stored by the TroveManager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserTroveStatus {
    NonExistent,
    Open,
    ClosedByOwner,
    ClosedByLiquidation,
    ClosedByRedemption,
}

impl UserTroveStatus {
    /// Map the on-chain `Status` enum ordinal.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(UserTroveStatus::NonExistent),
            1 => Some(UserTroveStatus::Open),
            2 => Some(UserTroveStatus::ClosedByOwner),
            3 => Some(UserTroveStatus::ClosedByLiquidation),
            4 => Some(UserTroveStatus::ClosedByRedemption),
            _ => None,
        }
    }
}

/// A Trove as last written on-chain, before pending redistribution is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TroveWithPendingRedistribution {
    pub owner: Address,
    pub status: UserTroveStatus,
    pub trove: Trove,
    pub stake: Decimal,
    pub snapshot_of_total_redistributed: Trove,
}

impl TroveWithPendingRedistribution {
    pub fn new(
        owner: Address,
        status: UserTroveStatus,
        trove: Trove,
        stake: Decimal,
        snapshot_of_total_redistributed: Trove,
    ) -> Self {
        Self {
            owner,
            status,
            trove,
            stake,
            snapshot_of_total_redistributed,
        }
    }

    /// Zero-valued entry for an owner without an open Trove.
    pub fn empty(owner: Address, status: UserTroveStatus) -> Self {
        Self::new(owner, status, Trove::default(), Decimal::ZERO, Trove::default())
    }

    /// Fold in everything redistributed since the snapshot, proportionally to `stake`.
    pub fn apply_redistribution(&self, total_redistributed: &Trove) -> UserTrove {
        let trove = if self.stake.is_zero() {
            self.trove
        } else {
            let pending = total_redistributed
                .subtract(&self.snapshot_of_total_redistributed)
                .multiply(self.stake);
            self.trove.add(&pending)
        };

        UserTrove::new(self.owner, self.status, trove)
    }
}

/// A Trove with its pending redistribution already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTrove {
    pub owner: Address,
    pub status: UserTroveStatus,
    pub trove: Trove,
}

impl UserTrove {
    pub fn new(owner: Address, status: UserTroveStatus, trove: Trove) -> Self {
        Self {
            owner,
            status,
            trove,
        }
    }

    pub fn non_existent(owner: Address) -> Self {
        Self::new(owner, UserTroveStatus::NonExistent, Trove::default())
    }

    pub fn collateral(&self) -> Decimal {
        self.trove.collateral
    }

    pub fn debt(&self) -> Decimal {
        self.trove.debt
    }

    pub fn is_open(&self) -> bool {
        self.status == UserTroveStatus::Open
    }
}
