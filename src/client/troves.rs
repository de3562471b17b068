//! Paginated Trove listing.

use super::core::{decimal, Liquity};
use crate::abi::IMultiTroveGetter;
use crate::adapter::ReadOptions;
use crate::types::{
    SortedBy, Trove, TroveListing, TroveListingParams, TroveWithPendingRedistribution, UserTrove,
    UserTroveStatus,
};
use crate::Result;
use alloy_primitives::{I256, U256};
use futures::try_join;
use tracing::debug;

/// Start index understood by `getMultipleSortedTroves`: non-negative values count
/// from the head of the list (highest collateral ratio), negative ones from the tail.
pub(crate) fn start_index(params: &TroveListingParams) -> I256 {
    let offset = U256::from(params.starting_at);
    match params.sorted_by {
        SortedBy::DescendingCollateralRatio => I256::from_raw(offset),
        SortedBy::AscendingCollateralRatio => -I256::from_raw(offset + U256::from(1u64)),
    }
}

fn pending_from_combined(
    data: IMultiTroveGetter::CombinedTroveData,
) -> TroveWithPendingRedistribution {
    TroveWithPendingRedistribution::new(
        data.owner,
        UserTroveStatus::Open,
        Trove::new(decimal(data.coll), decimal(data.debt)),
        decimal(data.stake),
        Trove::new(decimal(data.snapshot_eth), decimal(data.snapshot_lusd_debt)),
    )
}

impl Liquity {
    /// A slice of the sorted Trove list.
    ///
    /// With `params.before_redistribution` set, entries carry their raw on-chain
    /// values; otherwise pending redistribution is folded into every entry. Both
    /// shapes list the same owners in the same order.
    pub async fn troves(
        &self,
        params: &TroveListingParams,
        options: &ReadOptions,
    ) -> Result<TroveListing> {
        if params.before_redistribution {
            self.troves_before_redistribution(params, options)
                .await
                .map(TroveListing::BeforeRedistribution)
        } else {
            self.troves_resolved(params, options)
                .await
                .map(TroveListing::Resolved)
        }
    }

    /// Listing without redistribution applied; a single contract read.
    pub async fn troves_before_redistribution(
        &self,
        params: &TroveListingParams,
        options: &ReadOptions,
    ) -> Result<Vec<TroveWithPendingRedistribution>> {
        let ret = self
            .read(
                self.addresses().multi_trove_getter,
                IMultiTroveGetter::getMultipleSortedTrovesCall {
                    start_idx: start_index(params),
                    count: U256::from(params.first),
                },
                options,
            )
            .await?;

        debug!(
            first = params.first,
            starting_at = params.starting_at,
            sorted_by = ?params.sorted_by,
            returned = ret.troves.len(),
            "listed troves"
        );
        Ok(ret.troves.into_iter().map(pending_from_combined).collect())
    }

    /// Listing with redistribution applied to every entry.
    pub async fn troves_resolved(
        &self,
        params: &TroveListingParams,
        options: &ReadOptions,
    ) -> Result<Vec<UserTrove>> {
        let (troves, total_redistributed) = try_join!(
            self.troves_before_redistribution(params, options),
            self.total_redistributed(options),
        )?;

        Ok(troves
            .iter()
            .map(|trove| trove.apply_redistribution(&total_redistributed))
            .collect())
    }
}
