//! In-memory adapter serving canned return data.

use super::{function_name, ReadAdapter, ReadError, ReadRequest};
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{SolCall, SolValue};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

type Outcome = std::result::Result<Bytes, ReadError>;

#[derive(Default)]
struct State {
    // Exact calldata matches win over per-function responses.
    by_calldata: HashMap<(Address, Bytes), Outcome>,
    by_function: HashMap<(Address, String), Outcome>,
    calls: Vec<ReadRequest>,
}

/// Adapter answering reads from a table of canned responses.
///
/// Responses are registered per `(contract, function)` or, for calls whose
/// answer depends on the arguments, per exact call. Every issued read is
/// recorded. Reads with no registered response fail with
/// [`ReadError::Unavailable`].
#[derive(Default)]
pub struct MemoryReadAdapter {
    state: Mutex<State>,
    current_user: Option<Address>,
}

impl MemoryReadAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_current_user(mut self, user: Address) -> Self {
        self.current_user = Some(user);
        self
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Answer every `function` read on `address` with raw return data.
    pub fn respond(&self, address: Address, function: &str, data: impl Into<Bytes>) -> &Self {
        self.state()
            .by_function
            .insert((address, function.to_string()), Ok(data.into()));
        self
    }

    /// Answer every `function` read on `address` with the ABI encoding of `value`.
    ///
    /// Use a tuple for functions with several outputs.
    pub fn respond_value<V: SolValue>(&self, address: Address, function: &str, value: V) -> &Self {
        self.respond(address, function, value.abi_encode())
    }

    /// Answer exactly this call (function and arguments) on `address`.
    pub fn respond_call<C: SolCall, V: SolValue>(
        &self,
        address: Address,
        call: &C,
        value: V,
    ) -> &Self {
        self.state().by_calldata.insert(
            (address, Bytes::from(call.abi_encode())),
            Ok(Bytes::from(value.abi_encode())),
        );
        self
    }

    /// Fail every `function` read on `address` with `error`.
    pub fn fail(&self, address: Address, function: &str, error: ReadError) -> &Self {
        self.state()
            .by_function
            .insert((address, function.to_string()), Err(error));
        self
    }

    /// Fail exactly this call on `address` with `error`.
    pub fn fail_call<C: SolCall>(&self, address: Address, call: &C, error: ReadError) -> &Self {
        self.state()
            .by_calldata
            .insert((address, Bytes::from(call.abi_encode())), Err(error));
        self
    }

    /// Every read issued so far, in order of arrival.
    pub fn calls(&self) -> Vec<ReadRequest> {
        self.state().calls.clone()
    }

    /// Number of reads issued for the function of call type `C`.
    pub fn call_count<C: SolCall>(&self) -> usize {
        let function = function_name::<C>();
        self.state()
            .calls
            .iter()
            .filter(|call| call.function == function)
            .count()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }
}

#[async_trait]
impl ReadAdapter for MemoryReadAdapter {
    async fn call(&self, request: ReadRequest) -> Outcome {
        let mut state = self.state();
        let outcome = state
            .by_calldata
            .get(&(request.address, request.calldata.clone()))
            .or_else(|| {
                state
                    .by_function
                    .get(&(request.address, request.function.to_string()))
            })
            .cloned()
            .unwrap_or_else(|| {
                Err(ReadError::Unavailable(format!(
                    "no response registered for {} on {}",
                    request.function, request.address
                )))
            });
        state.calls.push(request);
        outcome
    }

    fn current_user(&self) -> Option<Address> {
        self.current_user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::IERC20;
    use crate::adapter::{read_contract, ReadOptions};
    use alloy_primitives::{address, U256};

    const TOKEN: Address = address!("1010101010101010101010101010101010101010");

    #[tokio::test]
    async fn test_exact_call_wins_over_function_response() {
        let alice = Address::repeat_byte(0xa1);
        let bob = Address::repeat_byte(0xb0);
        let adapter = MemoryReadAdapter::new();
        adapter
            .respond_value(TOKEN, "balanceOf", U256::from(1u64))
            .respond_call(TOKEN, &IERC20::balanceOfCall { account: bob }, U256::from(7u64));

        let opts = ReadOptions::default();
        let a = read_contract(&adapter, TOKEN, IERC20::balanceOfCall { account: alice }, &opts)
            .await
            .unwrap();
        let b = read_contract(&adapter, TOKEN, IERC20::balanceOfCall { account: bob }, &opts)
            .await
            .unwrap();

        assert_eq!(a.balance, U256::from(1u64));
        assert_eq!(b.balance, U256::from(7u64));
        assert_eq!(adapter.call_count::<IERC20::balanceOfCall>(), 2);
    }

    #[tokio::test]
    async fn test_missing_response_is_unavailable() {
        let adapter = MemoryReadAdapter::new();
        let err = read_contract(
            &adapter,
            TOKEN,
            IERC20::balanceOfCall {
                account: Address::ZERO,
            },
            &ReadOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err.read_error(), Some(ReadError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_malformed_return_is_decode_error() {
        let adapter = MemoryReadAdapter::new();
        adapter.respond(TOKEN, "balanceOf", vec![0x01, 0x02]);
        let err = read_contract(
            &adapter,
            TOKEN,
            IERC20::balanceOfCall {
                account: Address::ZERO,
            },
            &ReadOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err.read_error(), Some(ReadError::Decode(_))));
    }
}
