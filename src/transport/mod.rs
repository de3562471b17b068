//! Network transport for the default read adapter.

mod http;

pub use http::JsonRpcTransport;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON-RPC error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },

    #[error("Invalid JSON-RPC response: {0}")]
    InvalidResponse(String),

    #[error("Transport error: {0}")]
    Other(String),
}
