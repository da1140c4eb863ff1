//! Cursor-based pagination.

use kas_kit::*;
use serde_json::json;

use crate::mock::{MockTransport, kas};

#[tokio::test]
async fn test_cursor_round_trip() {
    let transport = MockTransport::new();
    transport
        .reply(json!({
            "items": [{ "tokenId": "0x1", "owner": "0xa" }],
            "cursor": "c1",
        }))
        .reply(json!({
            "items": [{ "tokenId": "0x2", "owner": "0xb" }],
            "cursor": "",
        }));
    let kip17 = kas(&transport).kip17().unwrap();

    let first = kip17.token_list("my-nft", None).unwrap().await.unwrap();
    assert_eq!(first.items[0].token_id, "0x1");
    let cursor = first.next_cursor().unwrap();
    assert_eq!(cursor, "c1");

    let options = QueryOptions::builder().cursor(cursor).build().unwrap();
    let second = kip17.token_list("my-nft", options).unwrap().await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].query("cursor"), None);
    assert_eq!(requests[1].query("cursor"), Some("c1"));
    assert_eq!(requests[1].query_params.len(), 1);
    assert!(second.is_last());
    assert_eq!(second.next_cursor(), None);
}

#[tokio::test]
async fn test_walk_every_page() {
    let transport = MockTransport::new();
    for (n, cursor) in [(1, "c1"), (2, "c2"), (3, "")] {
        transport.reply(json!({
            "items": [{ "address": format!("0x{n}"), "chainId": 1001 }],
            "cursor": cursor,
        }));
    }
    let wallet = kas(&transport).wallet().unwrap();

    let mut addresses = Vec::new();
    let mut options = QueryOptions::builder().size(1).build().unwrap();
    loop {
        let page = wallet.account_list(options).unwrap().await.unwrap();
        addresses.extend(page.items.iter().map(|account| account.address.clone()));
        let Some(cursor) = page.next_cursor() else {
            break;
        };
        options = QueryOptions::builder().size(1).cursor(cursor).build().unwrap();
    }

    assert_eq!(addresses, ["0x1", "0x2", "0x3"]);
    let cursors: Vec<Option<String>> = transport
        .requests()
        .iter()
        .map(|request| request.query("cursor").map(str::to_string))
        .collect();
    assert_eq!(
        cursors,
        [None, Some("c1".to_string()), Some("c2".to_string())]
    );
}

#[tokio::test]
async fn test_absent_cursor_is_last_page() {
    let transport = MockTransport::new();
    transport.reply(json!({ "items": [] }));

    let page = kas(&transport)
        .token_history()
        .unwrap()
        .nft_contract_list(None)
        .unwrap()
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert!(page.is_last());
}
