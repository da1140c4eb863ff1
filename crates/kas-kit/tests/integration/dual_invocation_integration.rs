//! Callbacks and futures on the same call.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kas_kit::*;
use serde_json::{Value, json};

use crate::mock::{MockTransport, kas};

/// A callback that stores what it saw.
fn capture() -> (Arc<Mutex<Option<(bool, Option<Value>)>>>, Arg) {
    let seen = Arc::new(Mutex::new(None));
    let sink = seen.clone();
    let callback = Arg::callback(move |err, data, _raw| {
        *sink.lock().unwrap() = Some((err.is_some(), data.cloned()));
    });
    (seen, callback)
}

// =============================================================================
// Argument shapes
// =============================================================================

#[tokio::test]
async fn test_contract_list_with_only_a_callback() {
    let transport = MockTransport::new();
    transport.reply(json!({ "items": [], "cursor": "" }));
    let kas = kas(&transport);

    let (seen, callback) = capture();
    let data = kas
        .invoke_named("kip17.contract_list", args![callback])
        .unwrap()
        .await
        .unwrap();

    assert_eq!(data, json!({ "items": [], "cursor": "" }));
    let (failed, observed) = seen.lock().unwrap().clone().expect("callback was not invoked");
    assert!(!failed);
    assert_eq!(observed, Some(data));
    assert!(transport.last().query_params.is_empty());
}

#[tokio::test]
async fn test_argument_shapes_resolve() {
    let transport = MockTransport::new();
    let kas = kas(&transport);
    let options = json!({ "size": 5 });

    // (required)
    let call = kas.invoke_named("kip17.token_list", args!["my-nft"]).unwrap();
    assert!(!call.has_callback());
    assert!(call.request().query_params.is_empty());

    // (required, {options})
    let call = kas
        .invoke_named("kip17.token_list", args!["my-nft", options.clone()])
        .unwrap();
    assert!(!call.has_callback());
    assert_eq!(call.request().query("size"), Some("5"));

    // (required, callback)
    let (_, callback) = capture();
    let call = kas
        .invoke_named("kip17.token_list", args!["my-nft", callback])
        .unwrap();
    assert!(call.has_callback());
    assert!(call.request().query_params.is_empty());

    // (required, {options}, callback)
    let (_, callback) = capture();
    let call = kas
        .invoke_named("kip17.token_list", args!["my-nft", options, callback])
        .unwrap();
    assert!(call.has_callback());
    assert_eq!(call.request().query("size"), Some("5"));

    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_bad_argument_shapes() {
    let transport = MockTransport::new();
    let kas = kas(&transport);

    // callback where a required argument belongs
    let (_, callback) = capture();
    assert!(matches!(
        kas.invoke_named("kip17.token_list", args![callback]),
        Err(Error::InvalidArgumentShape(_))
    ));

    // a string where the options object belongs
    assert!(matches!(
        kas.invoke_named("kip17.token_list", args!["my-nft", "size=5"]),
        Err(Error::InvalidArgumentShape(_))
    ));

    // arguments after the callback
    let (_, callback) = capture();
    assert!(matches!(
        kas.invoke_named("kip17.contract_list", args![callback, json!({ "size": 5 })]),
        Err(Error::InvalidArgumentShape(_))
    ));

    // too many arguments
    assert!(matches!(
        kas.invoke_named("kip17.contract", args!["a", "b"]),
        Err(Error::InvalidArgumentShape(_))
    ));

    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_polymorphic_fee_payer_slot() {
    let transport = MockTransport::new();
    let kas = kas(&transport);

    let call = kas
        .invoke_named("kip17.deploy", args!["Name", "SYM", "my-nft", "0xfee"])
        .unwrap();
    assert_eq!(
        call.request().body.as_ref().unwrap()["options"],
        json!({ "userFeePayer": { "address": "0xfee" } })
    );

    let call = kas
        .invoke_named(
            "kip17.deploy",
            args!["Name", "SYM", "my-nft", json!({ "enableGlobalFeePayer": true })],
        )
        .unwrap();
    assert_eq!(
        call.request().body.as_ref().unwrap()["options"],
        json!({ "enableGlobalFeePayer": true })
    );

    let (_, callback) = capture();
    let call = kas
        .invoke_named("kip17.deploy", args!["Name", "SYM", "my-nft", callback])
        .unwrap();
    assert!(call.has_callback());
    assert!(call.request().body.as_ref().unwrap().get("options").is_none());

    assert!(matches!(
        kas.invoke_named("kip17.deploy", args!["Name", "SYM", "my-nft", 7]),
        Err(Error::InvalidArgumentShape(_))
    ));
}

// =============================================================================
// Callback and future parity
// =============================================================================

#[tokio::test]
async fn test_callback_and_future_see_the_same_data() {
    let transport = MockTransport::new();
    transport.delay(Duration::from_millis(10));
    transport.reply(json!({ "status": "Submitted", "transactionHash": "0xabc" }));

    let (seen, callback) = capture();
    let Arg::Callback(callback) = callback else {
        unreachable!()
    };

    let result = kas(&transport)
        .kip17()
        .unwrap()
        .mint("alias-x", "0xabc", 1, "uri")
        .unwrap()
        .callback(callback)
        .await
        .unwrap();

    assert_eq!(transport.calls(), 1);
    assert_eq!(result.transaction_hash, "0xabc");
    let (failed, observed) = seen.lock().unwrap().clone().unwrap();
    assert!(!failed);
    assert_eq!(observed.unwrap()["transactionHash"], "0xabc");
}

#[tokio::test]
async fn test_callback_sees_transport_errors() {
    let transport = MockTransport::new();
    transport.fail(TransportError::network("connection reset", None, true));

    let (seen, callback) = capture();
    let result = kas(&transport)
        .invoke_named("wallet.account_count", args![callback])
        .unwrap()
        .await;

    assert!(matches!(result, Err(Error::Transport(_))));
    let (failed, observed) = seen.lock().unwrap().clone().unwrap();
    assert!(failed);
    assert_eq!(observed, None);
}

#[tokio::test]
async fn test_outcome_carries_raw_response() {
    let transport = MockTransport::new();
    transport.reply(json!({ "count": 3 }));

    let outcome = kas(&transport)
        .wallet()
        .unwrap()
        .account_count()
        .unwrap()
        .outcome()
        .await;

    assert!(outcome.is_ok());
    let raw = outcome.raw_response.as_ref().unwrap();
    assert_eq!(raw.status, 200);
    assert_eq!(raw.body, r#"{"count":3}"#);
}

#[tokio::test]
async fn test_timeout_discards_slow_call() {
    let transport = MockTransport::new();
    transport.delay(Duration::from_secs(5));
    let counter = Arc::new(AtomicUsize::new(0));
    let hits = counter.clone();

    let result = kas(&transport)
        .wallet()
        .unwrap()
        .account_count()
        .unwrap()
        .callback(move |_, _, _| {
            hits.fetch_add(1, Ordering::SeqCst);
        })
        .timeout(Duration::from_millis(20))
        .await;

    assert!(matches!(result, Err(Error::Timeout(_))));
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(transport.calls(), 1);
}

#[test]
fn test_call_is_lazy_until_awaited() {
    let transport = MockTransport::new();
    transport.reply(json!({ "count": 0 }));
    let call = kas(&transport).wallet().unwrap().account_count().unwrap();
    assert_eq!(transport.calls(), 0);

    let rt = tokio::runtime::Runtime::new().unwrap();
    let count = rt.block_on(call.into_future()).unwrap();
    assert_eq!(count.count, 0);
    assert_eq!(transport.calls(), 1);
}

#[test]
fn test_dropped_callback_call_is_never_sent() {
    let transport = MockTransport::new();
    transport.reply(json!({ "items": [], "cursor": "" }));
    let kas = kas(&transport);

    let (seen, callback) = capture();
    let call = kas
        .invoke_named("kip17.contract_list", args![callback])
        .unwrap();
    drop(call);

    assert_eq!(transport.calls(), 0);
    assert!(seen.lock().unwrap().is_none());
}

#[test]
fn test_spawned_callback_call_is_sent() {
    let transport = MockTransport::new();
    transport.reply(json!({ "items": [], "cursor": "" }));
    let kas = kas(&transport);

    let (seen, callback) = capture();
    let call = kas
        .invoke_named("kip17.contract_list", args![callback])
        .unwrap();

    let rt = tokio::runtime::Runtime::new().unwrap();
    let handle = rt.block_on(async { call.spawn() });
    rt.block_on(handle).unwrap().unwrap();

    assert_eq!(transport.calls(), 1);
    let (failed, _) = seen.lock().unwrap().clone().unwrap();
    assert!(!failed);
}

#[test]
fn test_spawned_call() {
    let transport = MockTransport::new();
    transport.reply(json!({ "count": 7 }));
    let call = kas(&transport).wallet().unwrap().account_count().unwrap();

    let count = tokio_test::block_on(async { call.spawn().await.unwrap().unwrap() });
    assert_eq!(count.count, 7);
}
