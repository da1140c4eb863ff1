//! Query option validation and whitelisting.

use kas_kit::*;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use crate::mock::{MockTransport, kas};

// =============================================================================
// Page size range
// =============================================================================

#[test]
fn test_size_bounds() {
    for size in [0, 1001, u32::MAX] {
        let err = QueryOptions::builder().size(size).build().unwrap_err();
        assert!(
            matches!(err, Error::InvalidOptionRange { ref key, .. } if key == "size"),
            "size {size}: {err:?}"
        );
    }
    for size in [MIN_PAGE_SIZE, 500, MAX_PAGE_SIZE] {
        assert_ok!(QueryOptions::builder().size(size).build());
    }
}

#[test]
fn test_size_bounds_from_json() {
    assert_err!(QueryOptions::from_value(json!({ "size": 0 })));
    assert_err!(QueryOptions::from_value(json!({ "size": 1001 })));
    assert_ok!(QueryOptions::from_value(json!({ "size": 1 })));
    assert_ok!(QueryOptions::from_value(json!({ "size": 1000 })));
}

#[test]
fn test_option_types_are_checked() {
    assert!(matches!(
        QueryOptions::from_value(json!({ "size": "ten" })),
        Err(Error::InvalidOptionType { .. })
    ));
    assert!(matches!(
        QueryOptions::from_value(json!({ "cursor": 5 })),
        Err(Error::InvalidOptionType { .. })
    ));
    assert!(matches!(
        QueryOptions::from_value(json!(["size"])),
        Err(Error::InvalidOptionType { .. })
    ));
}

#[test]
fn test_timestamp_order() {
    assert_err!(
        QueryOptions::builder()
            .from_timestamp(200)
            .to_timestamp(100)
            .build()
    );
    assert_ok!(
        QueryOptions::builder()
            .from_timestamp(100)
            .to_timestamp(100)
            .build()
    );
}

// =============================================================================
// Whitelists
// =============================================================================

#[test]
fn test_option_outside_whitelist_never_reaches_transport() {
    let transport = MockTransport::new();
    let kas = kas(&transport);

    let options = QueryOptions::builder()
        .kind([TransferKind::Ft])
        .build()
        .unwrap();
    let result = kas.kip17().unwrap().contract_list(options);

    match result {
        Err(Error::InvalidQueryOptions { allowed }) => assert_eq!(allowed, "[size, cursor]"),
        other => panic!("expected InvalidQueryOptions, got {other:?}"),
    }
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_dynamic_options_are_whitelisted_too() {
    let transport = MockTransport::new();
    let kas = kas(&transport);

    let result = kas.invoke_named(
        "kip17.contract_list",
        args![json!({ "size": 10, "fromTimestamp": 1 })],
    );
    assert!(matches!(result, Err(Error::InvalidQueryOptions { .. })));

    let result = kas.invoke_named("kip17.contract_list", args![json!({ "colour": "red" })]);
    assert!(matches!(result, Err(Error::InvalidQueryOptions { .. })));

    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_only_present_options_are_sent() {
    let transport = MockTransport::new();
    let wallet = kas(&transport).wallet().unwrap();

    let options = QueryOptions::builder()
        .size(10)
        .from_timestamp(1_600_000_000)
        .build()
        .unwrap();
    let _ = wallet.account_list(options).unwrap().await;

    let request = transport.last();
    assert_eq!(request.query_params.len(), 2);
    assert_eq!(request.query("size"), Some("10"));
    assert_eq!(request.query("from-timestamp"), Some("1600000000"));
    assert_eq!(request.query("cursor"), None);
}

#[test]
fn test_options_accept_both_key_spellings() {
    let camel = QueryOptions::from_value(json!({ "caFilter": "0xca", "toTimestamp": "5" })).unwrap();
    let wire = QueryOptions::from_value(json!({ "ca-filter": "0xca", "to-timestamp": 5 })).unwrap();
    assert_eq!(camel, wire);
    assert_eq!(camel.ca_filter(), Some("0xca"));
    assert_eq!(camel.to_timestamp(), Some(5));
}
