//! Minimal prelude for application code.
//!
//! Goal: reduce import noise without hiding important concepts.

pub use crate::adapter::{BlockTag, ReadAdapter, ReadOptions};
pub use crate::client::{Liquity, LiquityBuilder};
pub use crate::deployment::Deployment;
pub use crate::types::{
    Decimal, Fees, FrontendStatus, LQTYStake, SortedBy, StabilityDeposit, Trove, TroveListing,
    TroveListingParams, UserTrove,
};
pub use alloy_primitives::Address;
