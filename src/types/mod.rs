//! # Types Module
//!
//! Domain value objects returned by the read client. Every amount is a
//! [`Decimal`]; every object is built fresh per query and never mutated
//! afterwards.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Decimal`] | 18-digit fixed-point number |
//! | [`Trove`] | Collateral and debt pair (system totals or a position) |
//! | [`TroveWithPendingRedistribution`] | Owner's Trove as last written on-chain |
//! | [`UserTrove`] | Owner's Trove with redistribution applied |
//! | [`StabilityDeposit`] | Stability Pool position |
//! | [`LQTYStake`] | LQTY stake and accrued gains |
//! | [`Fees`] | Borrowing / redemption fee calculator |
//! | [`FrontendStatus`] | Frontend registration and kickback rate |
//! | [`TroveListingParams`] | Slice descriptor for the sorted Trove list |
//!
//! ## Example
//!
//! ```rust
//! use liquity_read::types::{Decimal, Trove};
//!
//! let trove = Trove::new(Decimal::from(10u64), "12000".parse().unwrap());
//! let ratio = trove.collateral_ratio(Decimal::from(2000u64)).unwrap();
//! assert_eq!(format!("{:.4}", ratio), "1.6666");
//! ```

pub mod decimal;
pub mod fees;
pub mod frontend;
pub mod listing;
pub mod stability;
pub mod staking;
pub mod trove;

pub use decimal::{Decimal, DecimalParseError};
pub use fees::Fees;
pub use frontend::FrontendStatus;
pub use listing::{SortedBy, TroveListing, TroveListingParams};
pub use stability::StabilityDeposit;
pub use staking::LQTYStake;
pub use trove::{Trove, TroveWithPendingRedistribution, UserTrove, UserTroveStatus};
