//! Contract-read adapter seam.
//!
//! A [`ReadAdapter`] performs one address-scoped call and hands back the raw
//! ABI-encoded return data. Typed encoding and decoding happen on top of it in
//! [`read_contract`], so adapters stay object-safe and transport-agnostic.
//!
//! | Adapter | Description |
//! |---------|-------------|
//! | [`RpcReadAdapter`] | `eth_call` over JSON-RPC (the default) |
//! | [`MemoryReadAdapter`] | Canned responses, for fixtures and tests |

mod memory;
mod rpc;

pub use memory::MemoryReadAdapter;
pub use rpc::RpcReadAdapter;

use crate::{Error, Result};
use alloy_primitives::{Address, Bytes, B256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Block to evaluate a read against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockTag {
    #[default]
    Latest,
    Pending,
    Earliest,
    Safe,
    Finalized,
    Number(u64),
    Hash(B256),
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Latest => f.write_str("latest"),
            BlockTag::Pending => f.write_str("pending"),
            BlockTag::Earliest => f.write_str("earliest"),
            BlockTag::Safe => f.write_str("safe"),
            BlockTag::Finalized => f.write_str("finalized"),
            BlockTag::Number(n) => write!(f, "{:#x}", n),
            BlockTag::Hash(hash) => write!(f, "{}", hash),
        }
    }
}

/// Per-call read overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Block to read at; the adapter's default (latest) when unset.
    pub block: Option<BlockTag>,
    /// Caller address for the simulated call.
    pub from: Option<Address>,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_block(mut self, block: BlockTag) -> Self {
        self.block = Some(block);
        self
    }

    pub fn caller(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }
}

/// One contract read as seen by an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    pub address: Address,
    /// Solidity function name, e.g. `"L_ETH"`.
    pub function: &'static str,
    /// ABI-encoded selector and arguments.
    pub calldata: Bytes,
    pub options: ReadOptions,
}

/// Adapter-level failure of a single read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    /// The data source could not be reached or answered garbage.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The node answered with an error, e.g. an execution revert.
    #[error("RPC error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<Bytes>,
    },

    /// Return data does not match the expected ABI shape.
    #[error("failed to decode return data: {0}")]
    Decode(String),

    /// The adapter has nothing configured for this call.
    #[error("read unavailable: {0}")]
    Unavailable(String),
}

/// Capability to perform address-scoped, ABI-typed contract reads.
#[async_trait]
pub trait ReadAdapter: Send + Sync {
    /// Execute a read and return the raw ABI-encoded return data.
    async fn call(&self, request: ReadRequest) -> std::result::Result<Bytes, ReadError>;

    /// Identity used when a query omits its subject address.
    fn current_user(&self) -> Option<Address> {
        None
    }
}

/// Name part of a Solidity signature: `"balanceOf(address)"` -> `"balanceOf"`.
pub fn function_name<C: SolCall>() -> &'static str {
    let signature: &'static str = C::SIGNATURE;
    signature.split('(').next().unwrap_or(signature)
}

/// Encode `call`, run it through `adapter` against `address` and decode the return.
///
/// Failures are tagged with the function name and target address; the adapter
/// error itself is passed through untouched.
pub async fn read_contract<C>(
    adapter: &dyn ReadAdapter,
    address: Address,
    call: C,
    options: &ReadOptions,
) -> Result<C::Return>
where
    C: SolCall + Send,
{
    let function = function_name::<C>();
    let request = ReadRequest {
        address,
        function,
        calldata: Bytes::from(call.abi_encode()),
        options: *options,
    };

    tracing::debug!(
        function,
        %address,
        block = %options.block.unwrap_or_default(),
        "contract read"
    );

    let data = adapter.call(request).await.map_err(|source| Error::Read {
        function,
        address,
        source,
    })?;

    C::abi_decode_returns(&data, true).map_err(|e| Error::Read {
        function,
        address,
        source: ReadError::Decode(e.to_string()),
    })
}
