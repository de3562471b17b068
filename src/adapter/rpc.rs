use super::{BlockTag, ReadAdapter, ReadError, ReadRequest};
use crate::transport::{JsonRpcTransport, TransportError};
use crate::Result;
use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// Default adapter: executes reads with `eth_call` against a JSON-RPC node.
pub struct RpcReadAdapter {
    transport: Arc<JsonRpcTransport>,
    current_user: Option<Address>,
}

impl RpcReadAdapter {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let transport = JsonRpcTransport::new(rpc_url)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<JsonRpcTransport>) -> Self {
        Self {
            transport,
            current_user: None,
        }
    }

    /// Address used when a query does not name one.
    pub fn with_current_user(mut self, user: Address) -> Self {
        self.current_user = Some(user);
        self
    }

    pub fn transport(&self) -> &Arc<JsonRpcTransport> {
        &self.transport
    }

    fn block_param(block: Option<BlockTag>) -> Value {
        match block.unwrap_or_default() {
            // EIP-1898 object form; plain strings are read as block numbers or tags.
            BlockTag::Hash(hash) => json!({ "blockHash": hash }),
            tag => Value::String(tag.to_string()),
        }
    }
}

fn read_error(e: TransportError) -> ReadError {
    match e {
        TransportError::Rpc {
            code,
            message,
            data,
        } => ReadError::Rpc {
            code,
            message,
            data: data
                .as_ref()
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<Bytes>().ok()),
        },
        TransportError::InvalidResponse(msg) => ReadError::Decode(msg),
        other => ReadError::Transport(other.to_string()),
    }
}

#[async_trait]
impl ReadAdapter for RpcReadAdapter {
    async fn call(&self, request: ReadRequest) -> std::result::Result<Bytes, ReadError> {
        let mut tx = json!({
            "to": request.address,
            "data": request.calldata,
        });
        if let Some(from) = request.options.from {
            tx["from"] = json!(from);
        }

        let params = json!([tx, Self::block_param(request.options.block)]);
        self.transport
            .request::<_, Bytes>("eth_call", params)
            .await
            .map_err(read_error)
    }

    fn current_user(&self) -> Option<Address> {
        self.current_user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;

    #[test]
    fn test_block_param() {
        assert_eq!(RpcReadAdapter::block_param(None), json!("latest"));
        assert_eq!(
            RpcReadAdapter::block_param(Some(BlockTag::Number(16))),
            json!("0x10")
        );
        let hash = B256::repeat_byte(0xab);
        assert_eq!(
            RpcReadAdapter::block_param(Some(BlockTag::Hash(hash))),
            json!({ "blockHash": hash })
        );
    }

    #[test]
    fn test_revert_data_is_preserved() {
        let err = read_error(TransportError::Rpc {
            code: 3,
            message: "execution reverted".into(),
            data: Some(json!("0x08c379a0")),
        });
        assert_eq!(
            err,
            ReadError::Rpc {
                code: 3,
                message: "execution reverted".into(),
                data: Some(Bytes::from(vec![0x08, 0xc3, 0x79, 0xa0])),
            }
        );
    }

    #[test]
    fn test_transport_failure_maps_to_transport() {
        let err = read_error(TransportError::Status {
            status: 502,
            body: "bad gateway".into(),
        });
        assert!(matches!(err, ReadError::Transport(msg) if msg.contains("502")));
    }
}
