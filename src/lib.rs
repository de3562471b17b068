//! # liquity-read
//!
//! Read-only client for the Liquity lending protocol: Troves, the Stability
//! Pool, LQTY staking, liquidity mining and fees.
//!
//! ## Overview
//!
//! [`Liquity`] exposes one async query per piece of protocol state. Each query
//! issues contract reads through an injected [`ReadAdapter`], concurrently where
//! the reads are independent, and shapes the raw `uint256` results into domain
//! value objects built on the 18-digit fixed-point [`Decimal`].
//!
//! - **Transport-agnostic**: any [`ReadAdapter`] works; JSON-RPC `eth_call` is the default
//! - **Typed ABI**: calls are encoded and decoded from compile-time `sol!` definitions
//! - **No hidden state**: no caching, no retries; every failure reaches the caller
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use liquity_read::{Liquity, ReadOptions};
//!
//! #[tokio::main]
//! async fn main() -> liquity_read::Result<()> {
//!     let liquity = Liquity::builder()
//!         .rpc_url("http://localhost:8545")
//!         .deployment_path("deployments/mainnet.json")
//!         .build()
//!         .await?;
//!
//!     let opts = ReadOptions::default();
//!     let owner = "0x0000000000000000000000000000000000000001".parse().unwrap();
//!     let trove = liquity.trove(Some(owner), &opts).await?;
//!     let price = liquity.price(&opts).await?;
//!     println!("{} at price {}", trove.trove, price);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | The [`Liquity`] facade and its builder |
//! | [`adapter`] | Read-adapter trait, typed reads, default and in-memory adapters |
//! | [`transport`] | JSON-RPC over HTTP |
//! | [`abi`] | Contract view-function definitions |
//! | [`deployment`] | Contract addresses |
//! | [`types`] | Domain value objects |

pub mod abi;
pub mod adapter;
pub mod client;
pub mod deployment;
pub mod prelude;
pub mod transport;
pub mod types;

pub use adapter::{BlockTag, MemoryReadAdapter, ReadAdapter, ReadError, ReadOptions, RpcReadAdapter};
pub use client::{Liquity, LiquityBuilder};
pub use deployment::{ContractAddresses, Deployment};
pub use types::{
    Decimal, Fees, FrontendStatus, LQTYStake, SortedBy, StabilityDeposit, Trove, TroveListing,
    TroveListingParams, TroveWithPendingRedistribution, UserTrove, UserTroveStatus,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
