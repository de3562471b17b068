//! Compile-time ABI definitions for the view functions the read client calls.
//!
//! Only the read surface is declared. Output names are snake_case so the
//! generated `*Return` structs read naturally; they do not affect encoding.

use alloy_sol_types::sol;

sol! {
    #![sol(all_derives)]
    /// Trove bookkeeping, redistribution accumulators and the fee base rate.
    interface ITroveManager {
        function L_ETH() external view returns (uint256 l_eth);
        function L_LUSDDebt() external view returns (uint256 l_lusd_debt);
        function Troves(address owner) external view returns (
            uint256 debt,
            uint256 coll,
            uint256 stake,
            uint8 status,
            uint128 array_index
        );
        function rewardSnapshots(address owner)
            external view returns (uint256 eth, uint256 lusd_debt);
        function getTroveOwnersCount() external view returns (uint256 count);
        function baseRate() external view returns (uint256 rate);
        function lastFeeOperationTime() external view returns (uint256 timestamp);
    }
}

sol! {
    #![sol(all_derives)]
    /// Shared by the ActivePool (open Troves) and the DefaultPool (pending redistribution).
    interface IPool {
        function getETH() external view returns (uint256 eth);
        function getLUSDDebt() external view returns (uint256 debt);
    }
}

sol! {
    #![sol(all_derives)]
    interface IPriceFeed {
        function fetchPrice() external returns (uint256 price);
    }
}

sol! {
    #![sol(all_derives)]
    interface IStabilityPool {
        function deposits(address depositor)
            external view returns (uint256 initial_value, address front_end_tag);
        function getCompoundedLUSDDeposit(address depositor)
            external view returns (uint256 deposit);
        function getDepositorETHGain(address depositor) external view returns (uint256 gain);
        function getDepositorLQTYGain(address depositor) external view returns (uint256 gain);
        function getTotalLUSDDeposits() external view returns (uint256 total);
        function frontEnds(address front_end)
            external view returns (uint256 kickback_rate, bool registered);
    }
}

sol! {
    #![sol(all_derives)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256 balance);
        function allowance(address owner, address spender)
            external view returns (uint256 remaining);
    }
}

sol! {
    #![sol(all_derives)]
    /// Uniswap ETH/LUSD LP staking for liquidity mining rewards.
    interface IUnipool {
        function balanceOf(address account) external view returns (uint256 balance);
        function totalSupply() external view returns (uint256 supply);
        function earned(address account) external view returns (uint256 reward);
        function periodFinish() external view returns (uint256 timestamp);
        function rewardRate() external view returns (uint256 rate);
    }
}

sol! {
    #![sol(all_derives)]
    interface ICollSurplusPool {
        function getCollateral(address account) external view returns (uint256 collateral);
    }
}

sol! {
    #![sol(all_derives)]
    interface ICommunityIssuance {
        function LQTYSupplyCap() external view returns (uint256 cap);
        function totalLQTYIssued() external view returns (uint256 issued);
    }
}

sol! {
    #![sol(all_derives)]
    interface ILQTYStaking {
        function stakes(address staker) external view returns (uint256 stake);
        function getPendingETHGain(address user) external view returns (uint256 gain);
        function getPendingLUSDGain(address user) external view returns (uint256 gain);
        function totalLQTYStaked() external view returns (uint256 total);
    }
}

sol! {
    #![sol(all_derives)]
    interface IMultiTroveGetter {
        struct CombinedTroveData {
            address owner;
            uint256 debt;
            uint256 coll;
            uint256 stake;
            uint256 snapshot_eth;
            uint256 snapshot_lusd_debt;
        }

        /// Negative `start_idx` walks the list from the tail (lowest collateral ratio first).
        function getMultipleSortedTroves(int256 start_idx, uint256 count) external view returns (
            CombinedTroveData[] troves
        );
    }
}

sol! {
    #![sol(all_derives)]
    interface IMulticall {
        function getCurrentBlockTimestamp() external view returns (uint256 timestamp);
    }
}
