use crate::abi::{
    ICollSurplusPool, ICommunityIssuance, IERC20, ILQTYStaking, IMulticall, IPool, IPriceFeed,
    IStabilityPool, ITroveManager, IUnipool,
};
use crate::adapter::{function_name, read_contract, ReadAdapter, ReadError, ReadOptions};
use crate::deployment::{ContractAddresses, Deployment};
use crate::types::fees::{BETA, MINUTE_DECAY_FACTOR};
use crate::types::{
    Decimal, Fees, FrontendStatus, LQTYStake, StabilityDeposit, Trove,
    TroveWithPendingRedistribution, UserTrove, UserTroveStatus,
};
use crate::{Error, Result};
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use futures::try_join;
use std::sync::Arc;
use tracing::debug;

/// Read-only client for Liquity protocol state.
///
/// Every query takes an optional subject address (falling back to the current
/// user) and per-call [`ReadOptions`]. Independent reads of a query are issued
/// concurrently; any read failure fails the whole query with the adapter's error.
#[derive(Clone)]
pub struct Liquity {
    pub(crate) adapter: Arc<dyn ReadAdapter>,
    pub(crate) deployment: Deployment,
    pub(crate) current_user: Option<Address>,
}

pub(crate) fn decimal(raw: U256) -> Decimal {
    Decimal::from_raw(raw)
}

// Timestamps and counts never approach 2^64; clamp instead of failing.
pub(crate) fn to_u64(value: U256) -> u64 {
    if value > U256::from(u64::MAX) {
        u64::MAX
    } else {
        value.as_limbs()[0]
    }
}

impl Liquity {
    pub fn new(adapter: Arc<dyn ReadAdapter>, deployment: Deployment) -> Self {
        Self {
            adapter,
            deployment,
            current_user: None,
        }
    }

    pub fn builder() -> crate::client::builder::LiquityBuilder {
        crate::client::builder::LiquityBuilder::new()
    }

    /// Build a client from `LIQUITY_RPC_URL` and `LIQUITY_DEPLOYMENT_PATH`.
    pub async fn from_env() -> Result<Self> {
        crate::client::builder::LiquityBuilder::new().build().await
    }

    /// Override the adapter's notion of the current user.
    pub fn with_current_user(mut self, user: Address) -> Self {
        self.current_user = Some(user);
        self
    }

    pub fn adapter(&self) -> &Arc<dyn ReadAdapter> {
        &self.adapter
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    pub(crate) fn addresses(&self) -> &ContractAddresses {
        &self.deployment.addresses
    }

    /// Explicit address, else the configured user, else the adapter's.
    pub fn resolve_user(&self, address: Option<Address>) -> Result<Address> {
        address
            .or(self.current_user)
            .or_else(|| self.adapter.current_user())
            .ok_or(Error::NoCurrentUser)
    }

    pub(crate) async fn read<C>(
        &self,
        address: Address,
        call: C,
        options: &ReadOptions,
    ) -> Result<C::Return>
    where
        C: SolCall + Send,
    {
        read_contract(self.adapter.as_ref(), address, call, options).await
    }

    pub(crate) async fn block_timestamp(&self, options: &ReadOptions) -> Result<u64> {
        let ret = self
            .read(
                self.addresses().multicall,
                IMulticall::getCurrentBlockTimestampCall {},
                options,
            )
            .await?;
        Ok(to_u64(ret.timestamp))
    }

    async fn token_balance(
        &self,
        token: Address,
        address: Option<Address>,
        options: &ReadOptions,
    ) -> Result<Decimal> {
        let account = self.resolve_user(address)?;
        let ret = self
            .read(token, IERC20::balanceOfCall { account }, options)
            .await?;
        Ok(decimal(ret.balance))
    }

    /// Total collateral and debt per unit staked that has been liquidated
    /// through redistribution.
    ///
    /// Needed to resolve [`TroveWithPendingRedistribution`] instances.
    pub async fn total_redistributed(&self, options: &ReadOptions) -> Result<Trove> {
        let trove_manager = self.addresses().trove_manager;
        let (collateral, debt) = try_join!(
            self.read(trove_manager, ITroveManager::L_ETHCall {}, options),
            self.read(trove_manager, ITroveManager::L_LUSDDebtCall {}, options),
        )?;

        Ok(Trove::new(decimal(collateral.l_eth), decimal(debt.l_lusd_debt)))
    }

    /// A Trove in its state after the last direct modification.
    ///
    /// Closed or never-opened Troves come back zero-valued with their status.
    pub async fn trove_before_redistribution(
        &self,
        address: Option<Address>,
        options: &ReadOptions,
    ) -> Result<TroveWithPendingRedistribution> {
        let owner = self.resolve_user(address)?;
        let trove_manager = self.addresses().trove_manager;
        let (trove, snapshot) = try_join!(
            self.read(trove_manager, ITroveManager::TrovesCall { owner }, options),
            self.read(trove_manager, ITroveManager::rewardSnapshotsCall { owner }, options),
        )?;

        let status = UserTroveStatus::from_code(trove.status).ok_or_else(|| Error::Read {
            function: function_name::<ITroveManager::TrovesCall>(),
            address: trove_manager,
            source: ReadError::Decode(format!("unknown trove status {}", trove.status)),
        })?;

        if status != UserTroveStatus::Open {
            return Ok(TroveWithPendingRedistribution::empty(owner, status));
        }

        Ok(TroveWithPendingRedistribution::new(
            owner,
            status,
            Trove::new(decimal(trove.coll), decimal(trove.debt)),
            decimal(trove.stake),
            Trove::new(decimal(snapshot.eth), decimal(snapshot.lusd_debt)),
        ))
    }

    /// The current state of a Trove, pending redistribution included.
    pub async fn trove(
        &self,
        address: Option<Address>,
        options: &ReadOptions,
    ) -> Result<UserTrove> {
        let owner = self.resolve_user(address)?;
        let (trove, total_redistributed) = try_join!(
            self.trove_before_redistribution(Some(owner), options),
            self.total_redistributed(options),
        )?;

        debug!(%owner, status = ?trove.status, "resolved trove");
        Ok(trove.apply_redistribution(&total_redistributed))
    }

    /// Number of Troves that are currently open.
    pub async fn number_of_troves(&self, options: &ReadOptions) -> Result<u64> {
        let ret = self
            .read(
                self.addresses().trove_manager,
                ITroveManager::getTroveOwnersCountCall {},
                options,
            )
            .await?;
        Ok(to_u64(ret.count))
    }

    /// Current price of the collateral (ETH) in USD.
    pub async fn price(&self, options: &ReadOptions) -> Result<Decimal> {
        let ret = self
            .read(self.addresses().price_feed, IPriceFeed::fetchPriceCall {}, options)
            .await?;
        Ok(decimal(ret.price))
    }

    /// Total collateral and debt in the system: open Troves plus pending redistribution.
    pub async fn total(&self, options: &ReadOptions) -> Result<Trove> {
        let ContractAddresses {
            active_pool,
            default_pool,
            ..
        } = *self.addresses();
        let (active_eth, active_debt, default_eth, default_debt) = try_join!(
            self.read(active_pool, IPool::getETHCall {}, options),
            self.read(active_pool, IPool::getLUSDDebtCall {}, options),
            self.read(default_pool, IPool::getETHCall {}, options),
            self.read(default_pool, IPool::getLUSDDebtCall {}, options),
        )?;

        let active = Trove::new(decimal(active_eth.eth), decimal(active_debt.debt));
        let default = Trove::new(decimal(default_eth.eth), decimal(default_debt.debt));
        Ok(active.add(&default))
    }

    /// Current state of a Stability Deposit.
    pub async fn stability_deposit(
        &self,
        address: Option<Address>,
        options: &ReadOptions,
    ) -> Result<StabilityDeposit> {
        let depositor = self.resolve_user(address)?;
        let pool = self.addresses().stability_pool;
        let (deposit, current, collateral_gain, lqty_reward) = try_join!(
            self.read(pool, IStabilityPool::depositsCall { depositor }, options),
            self.read(
                pool,
                IStabilityPool::getCompoundedLUSDDepositCall { depositor },
                options
            ),
            self.read(pool, IStabilityPool::getDepositorETHGainCall { depositor }, options),
            self.read(pool, IStabilityPool::getDepositorLQTYGainCall { depositor }, options),
        )?;

        Ok(StabilityDeposit::new(
            decimal(deposit.initial_value),
            decimal(current.deposit),
            decimal(collateral_gain.gain),
            decimal(lqty_reward.gain),
            deposit.front_end_tag,
        ))
    }

    /// LQTY still to be issued to stability depositors.
    pub async fn remaining_stability_pool_lqty_reward(
        &self,
        options: &ReadOptions,
    ) -> Result<Decimal> {
        let issuance = self.addresses().community_issuance;
        let (cap, issued) = try_join!(
            self.read(issuance, ICommunityIssuance::LQTYSupplyCapCall {}, options),
            self.read(issuance, ICommunityIssuance::totalLQTYIssuedCall {}, options),
        )?;
        Ok(decimal(cap.cap).saturating_sub(decimal(issued.issued)))
    }

    /// Total LUSD currently deposited in the Stability Pool.
    pub async fn lusd_in_stability_pool(&self, options: &ReadOptions) -> Result<Decimal> {
        let ret = self
            .read(
                self.addresses().stability_pool,
                IStabilityPool::getTotalLUSDDepositsCall {},
                options,
            )
            .await?;
        Ok(decimal(ret.total))
    }

    pub async fn lusd_balance(
        &self,
        address: Option<Address>,
        options: &ReadOptions,
    ) -> Result<Decimal> {
        self.token_balance(self.addresses().lusd_token, address, options)
            .await
    }

    pub async fn lqty_balance(
        &self,
        address: Option<Address>,
        options: &ReadOptions,
    ) -> Result<Decimal> {
        self.token_balance(self.addresses().lqty_token, address, options)
            .await
    }

    /// Uniswap ETH/LUSD LP tokens held by an address.
    pub async fn uni_token_balance(
        &self,
        address: Option<Address>,
        options: &ReadOptions,
    ) -> Result<Decimal> {
        self.token_balance(self.addresses().uni_token, address, options)
            .await
    }

    /// The liquidity mining contract's allowance of a holder's LP tokens.
    pub async fn uni_token_allowance(
        &self,
        address: Option<Address>,
        options: &ReadOptions,
    ) -> Result<Decimal> {
        let owner = self.resolve_user(address)?;
        let ContractAddresses {
            uni_token, unipool, ..
        } = *self.addresses();
        let ret = self
            .read(
                uni_token,
                IERC20::allowanceCall {
                    owner,
                    spender: unipool,
                },
                options,
            )
            .await?;
        Ok(decimal(ret.remaining))
    }

    /// LQTY still to be paid out to liquidity miners before the reward period ends.
    pub async fn remaining_liquidity_mining_lqty_reward(
        &self,
        options: &ReadOptions,
    ) -> Result<Decimal> {
        let unipool = self.addresses().unipool;
        let (period_finish, reward_rate, now) = try_join!(
            self.read(unipool, IUnipool::periodFinishCall {}, options),
            self.read(unipool, IUnipool::rewardRateCall {}, options),
            self.block_timestamp(options),
        )?;

        let seconds_left = to_u64(period_finish.timestamp).saturating_sub(now);
        Ok(decimal(reward_rate.rate.saturating_mul(U256::from(seconds_left))))
    }

    /// LP tokens currently staked by an address in liquidity mining.
    pub async fn liquidity_mining_stake(
        &self,
        address: Option<Address>,
        options: &ReadOptions,
    ) -> Result<Decimal> {
        let account = self.resolve_user(address)?;
        let ret = self
            .read(self.addresses().unipool, IUnipool::balanceOfCall { account }, options)
            .await?;
        Ok(decimal(ret.balance))
    }

    pub async fn total_staked_uni_tokens(&self, options: &ReadOptions) -> Result<Decimal> {
        let ret = self
            .read(self.addresses().unipool, IUnipool::totalSupplyCall {}, options)
            .await?;
        Ok(decimal(ret.supply))
    }

    /// LQTY earned by an address through liquidity mining.
    pub async fn liquidity_mining_lqty_reward(
        &self,
        address: Option<Address>,
        options: &ReadOptions,
    ) -> Result<Decimal> {
        let account = self.resolve_user(address)?;
        let ret = self
            .read(self.addresses().unipool, IUnipool::earnedCall { account }, options)
            .await?;
        Ok(decimal(ret.reward))
    }

    /// Collateral left over from liquidations or redemptions, claimable by the owner.
    pub async fn collateral_surplus_balance(
        &self,
        address: Option<Address>,
        options: &ReadOptions,
    ) -> Result<Decimal> {
        let account = self.resolve_user(address)?;
        let ret = self
            .read(
                self.addresses().coll_surplus_pool,
                ICollSurplusPool::getCollateralCall { account },
                options,
            )
            .await?;
        Ok(decimal(ret.collateral))
    }

    /// A calculator for the current borrowing and redemption fees.
    pub async fn fees(&self, options: &ReadOptions) -> Result<Fees> {
        let trove_manager = self.addresses().trove_manager;
        let (base_rate, last_fee_operation, now, total, price) = try_join!(
            self.read(trove_manager, ITroveManager::baseRateCall {}, options),
            self.read(trove_manager, ITroveManager::lastFeeOperationTimeCall {}, options),
            self.block_timestamp(options),
            self.total(options),
            self.price(options),
        )?;

        let recovery_mode = total.collateral_ratio_is_below_critical(price);
        debug!(recovery_mode, block_timestamp = now, "fetched fee parameters");

        Ok(Fees::new(
            decimal(base_rate.rate),
            MINUTE_DECAY_FACTOR,
            BETA,
            to_u64(last_fee_operation.timestamp),
            now,
            recovery_mode,
        ))
    }

    /// Current state of an LQTY stake.
    pub async fn lqty_stake(
        &self,
        address: Option<Address>,
        options: &ReadOptions,
    ) -> Result<LQTYStake> {
        let staker = self.resolve_user(address)?;
        let staking = self.addresses().lqty_staking;
        let (stake, collateral_gain, lusd_gain) = try_join!(
            self.read(staking, ILQTYStaking::stakesCall { staker }, options),
            self.read(staking, ILQTYStaking::getPendingETHGainCall { user: staker }, options),
            self.read(staking, ILQTYStaking::getPendingLUSDGainCall { user: staker }, options),
        )?;

        Ok(LQTYStake::new(
            decimal(stake.stake),
            decimal(collateral_gain.gain),
            decimal(lusd_gain.gain),
        ))
    }

    pub async fn total_staked_lqty(&self, options: &ReadOptions) -> Result<Decimal> {
        let ret = self
            .read(
                self.addresses().lqty_staking,
                ILQTYStaking::totalLQTYStakedCall {},
                options,
            )
            .await?;
        Ok(decimal(ret.total))
    }

    /// Whether an address is a registered frontend, and its kickback rate.
    pub async fn frontend_status(
        &self,
        address: Option<Address>,
        options: &ReadOptions,
    ) -> Result<FrontendStatus> {
        let front_end = self.resolve_user(address)?;
        let ret = self
            .read(
                self.addresses().stability_pool,
                IStabilityPool::frontEndsCall { front_end },
                options,
            )
            .await?;

        Ok(if ret.registered {
            FrontendStatus::Registered {
                kickback_rate: decimal(ret.kickback_rate),
            }
        } else {
            FrontendStatus::Unregistered
        })
    }
}
