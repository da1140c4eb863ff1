//! Request descriptors produced by the resource clients.

use kas_kit::*;
use serde_json::json;

use crate::mock::{MockTransport, kas};

// =============================================================================
// Request building
// =============================================================================

#[tokio::test]
async fn test_mint_descriptor() {
    let transport = MockTransport::new();
    transport.reply(json!({ "status": "Submitted", "transactionHash": "0xhash" }));

    let result = kas(&transport)
        .kip17()
        .unwrap()
        .mint("alias-x", "0xabc", 1, "uri")
        .unwrap()
        .await
        .unwrap();
    assert_eq!(result.status, "Submitted");

    let request = transport.last();
    assert_eq!(request.service, Service::Kip17);
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.resolved_path(), "/contract/alias-x/token");
    assert_eq!(
        request.body,
        Some(json!({ "to": "0xabc", "uri": "uri", "id": "0x1" }))
    );
    assert!(request.query_params.is_empty());
    assert_eq!(request.auth_names, ["basic"]);
    assert_eq!(request.content_types, ["application/json"]);
}

#[test]
fn test_chain_id_header_on_every_request() {
    let transport = MockTransport::new();
    let kas = Kas::builder(Chain::Mainnet, "id", "secret")
        .production()
        .transport(transport.clone())
        .build();

    let calls = [
        kas.kip7().unwrap().contract("t").unwrap().request().clone(),
        kas.kip37().unwrap().contract("m").unwrap().request().clone(),
        kas.wallet().unwrap().account_count().unwrap().request().clone(),
        kas.token_history().unwrap().transfer_by_tx_hash("0xh").unwrap().request().clone(),
    ];
    for request in calls {
        assert_eq!(request.header(CHAIN_ID_HEADER), Some("8217"));
    }
}

#[test]
fn test_path_segments_are_checked() {
    let transport = MockTransport::new();
    let kip17 = kas(&transport).kip17().unwrap();

    for bad in ["", "a/b", "a?b", "a#b", "..", ".", "a%2Fb", "{token-id}"] {
        assert!(
            matches!(kip17.contract(bad), Err(Error::InvalidArgumentShape(_))),
            "{bad:?} should be rejected"
        );
    }
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_every_catalogued_endpoint_is_reachable_by_name() {
    let transport = MockTransport::new();
    let kas = kas(&transport);

    for endpoint in catalogue() {
        let result = kas.invoke_named(endpoint.name, args![]);
        let has_required = endpoint
            .params
            .iter()
            .any(|param| param.kind == ParamKind::Required);
        assert_eq!(result.is_err(), has_required, "{}", endpoint.name);
    }
    assert_eq!(transport.calls(), 0);
}

// =============================================================================
// Service initialization
// =============================================================================

#[test]
fn test_not_initialized() {
    let transport = MockTransport::new();
    let kas = Kas::builder(Chain::Testnet, "id", "secret")
        .wallet("https://wallet-api.klaytnapi.com/v2")
        .transport(transport.clone())
        .build();

    assert!(kas.wallet().is_ok());
    let err = kas.kip37().unwrap_err();
    assert!(matches!(err, Error::NotInitialized(Service::Kip37)));
    assert_eq!(
        err.to_string(),
        "kip37 API is not initialized. Configure its endpoint on KasBuilder first."
    );
    assert!(err.is_validation());
}

#[test]
fn test_resource_getters_match_client() {
    let transport = MockTransport::new();
    let kas = kas(&transport);
    let kip7 = kas.kip7().unwrap();

    assert_eq!(kip7.auth(), kas.auth());
    assert_eq!(kip7.access_key_id(), "access-key");
    assert_eq!(kip7.secret_access_key(), "secret-key");
    assert_eq!(kip7.chain_id(), 1001);
    assert_eq!(kip7.service(), Service::Kip7);
}

// =============================================================================
// Service errors
// =============================================================================

#[tokio::test]
async fn test_service_error_payload() {
    let transport = MockTransport::new();
    let payload = json!({ "code": 1104404, "message": "Token not found" });
    transport.reply(payload.clone()).reply(payload.clone());
    let kas = kas(&transport);

    let typed = kas.kip17().unwrap().token("my-nft", 9).unwrap().await;
    match typed {
        Err(err @ Error::Service { .. }) => {
            assert!(err.is_service_error());
            assert_eq!(err.service_code(), Some(1104404));
        }
        other => panic!("expected a service error, got {other:?}"),
    }

    let raw = kas
        .kip17()
        .unwrap()
        .token("my-nft", 9)
        .unwrap()
        .raw()
        .await
        .unwrap();
    assert_eq!(raw, payload);
}

#[tokio::test]
async fn test_non_2xx_service_error() {
    let transport = MockTransport::new();
    transport.fail(TransportError::Service {
        status_code: 400,
        code: 1100050,
        message: "incorrect request".to_string(),
    });

    let result = kas(&transport).wallet().unwrap().account("0xa").unwrap().await;
    match result {
        Err(Error::Transport(err)) => {
            assert_eq!(err.status_code(), Some(400));
            assert!(!err.is_retryable());
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
