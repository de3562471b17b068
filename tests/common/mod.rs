//! Shared fixtures: a deployment with distinct addresses and a client over
//! an in-memory adapter.

#![allow(dead_code)]

use alloy_primitives::{Address, U256};
use liquity_read::{ContractAddresses, Decimal, Deployment, Liquity, MemoryReadAdapter, ReadAdapter};
use std::sync::Arc;

pub fn deployment() -> Deployment {
    Deployment::new(ContractAddresses {
        active_pool: Address::repeat_byte(0x01),
        coll_surplus_pool: Address::repeat_byte(0x02),
        community_issuance: Address::repeat_byte(0x03),
        default_pool: Address::repeat_byte(0x04),
        lqty_staking: Address::repeat_byte(0x05),
        lqty_token: Address::repeat_byte(0x06),
        lusd_token: Address::repeat_byte(0x07),
        multi_trove_getter: Address::repeat_byte(0x08),
        multicall: Address::repeat_byte(0x09),
        price_feed: Address::repeat_byte(0x0a),
        stability_pool: Address::repeat_byte(0x0b),
        trove_manager: Address::repeat_byte(0x0c),
        uni_token: Address::repeat_byte(0x0d),
        unipool: Address::repeat_byte(0x0e),
    })
    .with_chain_id(1)
}

/// Raw 18-decimal integer for a decimal literal, e.g. `wei("1.5")`.
pub fn wei(amount: &str) -> U256 {
    amount.parse::<Decimal>().unwrap().raw()
}

pub fn dec(amount: &str) -> Decimal {
    amount.parse().unwrap()
}

pub struct Fixture {
    pub adapter: Arc<MemoryReadAdapter>,
    pub liquity: Liquity,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_adapter(MemoryReadAdapter::new())
    }

    pub fn with_user(user: Address) -> Self {
        Self::with_adapter(MemoryReadAdapter::new().with_current_user(user))
    }

    fn with_adapter(adapter: MemoryReadAdapter) -> Self {
        let adapter = Arc::new(adapter);
        let liquity = Liquity::new(adapter.clone() as Arc<dyn ReadAdapter>, deployment());
        Self { adapter, liquity }
    }

    pub fn addresses(&self) -> ContractAddresses {
        self.liquity.deployment().addresses
    }

    /// `L_ETH` / `L_LUSDDebt` accumulators.
    pub fn set_total_redistributed(&self, collateral: &str, debt: &str) {
        let tm = self.addresses().trove_manager;
        self.adapter
            .respond_value(tm, "L_ETH", wei(collateral))
            .respond_value(tm, "L_LUSDDebt", wei(debt));
    }
}
