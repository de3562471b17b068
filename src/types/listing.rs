use super::trove::{TroveWithPendingRedistribution, UserTrove};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Order in which the sorted Trove list is traversed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortedBy {
    #[default]
    AscendingCollateralRatio,
    DescendingCollateralRatio,
}

/// Describes which slice of the sorted Trove list to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TroveListingParams {
    /// Number of Troves to return.
    pub first: u64,
    pub sorted_by: SortedBy,
    /// Index of the first Trove in the chosen order.
    #[serde(default)]
    pub starting_at: u64,
    /// Return the raw on-chain state without folding in pending redistribution.
    #[serde(default)]
    pub before_redistribution: bool,
}

impl TroveListingParams {
    pub fn new(first: u64, sorted_by: SortedBy) -> Self {
        Self {
            first,
            sorted_by,
            starting_at: 0,
            before_redistribution: false,
        }
    }

    pub fn starting_at(mut self, index: u64) -> Self {
        self.starting_at = index;
        self
    }

    pub fn before_redistribution(mut self, enable: bool) -> Self {
        self.before_redistribution = enable;
        self
    }
}

/// Result of a Trove listing; the variant follows `before_redistribution`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "troves", rename_all = "camelCase")]
pub enum TroveListing {
    BeforeRedistribution(Vec<TroveWithPendingRedistribution>),
    Resolved(Vec<UserTrove>),
}

impl TroveListing {
    /// Owners in list order.
    pub fn owners(&self) -> Vec<Address> {
        match self {
            TroveListing::BeforeRedistribution(troves) => troves.iter().map(|t| t.owner).collect(),
            TroveListing::Resolved(troves) => troves.iter().map(|t| t.owner).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TroveListing::BeforeRedistribution(troves) => troves.len(),
            TroveListing::Resolved(troves) => troves.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_resolved(self) -> Option<Vec<UserTrove>> {
        match self {
            TroveListing::Resolved(troves) => Some(troves),
            TroveListing::BeforeRedistribution(_) => None,
        }
    }

    pub fn into_before_redistribution(self) -> Option<Vec<TroveWithPendingRedistribution>> {
        match self {
            TroveListing::BeforeRedistribution(troves) => Some(troves),
            TroveListing::Resolved(_) => None,
        }
    }
}
