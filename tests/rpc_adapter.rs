//! The JSON-RPC adapter against a mock node.

mod common;

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolValue;
use common::{dec, deployment, wei};
use liquity_read::{BlockTag, Error, Liquity, ReadError, ReadOptions};
use mockito::{Matcher, Server};
use serde_json::json;

const OWNER: &str = "0x00000000000000000000000000000000000000a1";

fn encoded(value: impl SolValue) -> String {
    Bytes::from(value.abi_encode()).to_string()
}

async fn client(url: String) -> Liquity {
    Liquity::builder()
        .rpc_url(url)
        .deployment(deployment())
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_eth_call_result_is_decoded() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({ "jsonrpc": "2.0", "method": "eth_call" })),
            // LUSD token address and the requested block.
            Matcher::Regex("0707070707070707070707070707070707070707".into()),
            Matcher::Regex("\"0x10\"".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "jsonrpc": "2.0", "id": 1, "result": encoded(wei("1.5")) }).to_string())
        .create_async()
        .await;

    let liquity = client(server.url()).await;
    let owner: Address = OWNER.parse().unwrap();
    let balance = liquity
        .lusd_balance(Some(owner), &ReadOptions::new().at_block(BlockTag::Number(16)))
        .await
        .unwrap();

    assert_eq!(balance, dec("1.5"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_revert_keeps_code_and_data() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": 3, "message": "execution reverted", "data": "0xdeadbeef" }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let liquity = client(server.url()).await;
    let err = liquity.price(&ReadOptions::default()).await.unwrap_err();

    match err {
        Error::Read {
            function,
            address,
            source,
        } => {
            assert_eq!(function, "fetchPrice");
            assert_eq!(address, deployment().addresses.price_feed);
            assert_eq!(
                source,
                ReadError::Rpc {
                    code: 3,
                    message: "execution reverted".into(),
                    data: Some(Bytes::from(vec![0xde, 0xad, 0xbe, 0xef])),
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_http_failure_is_transport_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(500)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let liquity = client(server.url()).await;
    let err = liquity
        .number_of_troves(&ReadOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err.read_error(), Some(ReadError::Transport(_))));
}

#[tokio::test]
async fn test_malformed_result_is_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "jsonrpc": "2.0", "id": 1, "result": "0x1234" }).to_string())
        .create_async()
        .await;

    let liquity = client(server.url()).await;
    let err = liquity
        .total_staked_lqty(&ReadOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err.read_error(), Some(ReadError::Decode(_))));
}
