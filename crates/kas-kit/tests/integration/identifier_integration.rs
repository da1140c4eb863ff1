//! Identifier normalization as seen through the public API.

use std::str::FromStr;

use alloy_primitives::U256;
use kas_kit::*;
use serde_json::json;

use crate::mock::{MockTransport, kas};

// =============================================================================
// Normalization properties
// =============================================================================

#[test]
fn test_normalize_is_idempotent() {
    let inputs: Vec<IdentifierValue> = vec![
        0u64.into(),
        1u64.into(),
        "255".into(),
        "0x00ff".into(),
        "0XABCDEF".into(),
        U256::MAX.into(),
        json!(42).into(),
        vec![0x01u8, 0x00].into(),
    ];

    for input in inputs {
        let once = normalize_id(input.clone()).unwrap();
        let twice = normalize_id(once).unwrap();
        assert_eq!(once, twice, "input {input:?}");

        let from_text = normalize_id(once.to_string()).unwrap();
        assert_eq!(once, from_text, "input {input:?}");
    }
}

#[test]
fn test_equivalent_forms_agree() {
    let expected = normalize_id(1).unwrap();
    assert_eq!(normalize_id("0x1").unwrap(), expected);
    assert_eq!(normalize_id("1").unwrap(), expected);
    assert_eq!(normalize_id(U256::from(1u64)).unwrap(), expected);
    assert_eq!(normalize_id(json!(1)).unwrap(), expected);
    assert_eq!(expected.to_string(), "0x1");
}

#[test]
fn test_rejected_inputs() {
    for bad in [
        IdentifierValue::from(-1),
        IdentifierValue::from("0x"),
        IdentifierValue::from("12abc"),
        IdentifierValue::from(1.5),
        IdentifierValue::from(json!(null)),
        IdentifierValue::from(json!({ "id": 1 })),
    ] {
        assert!(
            matches!(normalize_id(bad.clone()), Err(Error::InvalidIdentifierType(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_hex_id_parses_and_serializes() {
    let id = HexId::from_str("4096").unwrap();
    assert_eq!(id.to_string(), "0x1000");
    assert_eq!(serde_json::to_value(id).unwrap(), json!("0x1000"));

    let decoded: HexId = serde_json::from_value(json!("0x0001000")).unwrap();
    assert_eq!(decoded, id);
}

// =============================================================================
// Normalization on the wire
// =============================================================================

#[tokio::test]
async fn test_every_id_shape_reaches_the_wire_as_hex() {
    let transport = MockTransport::new();
    let kip17 = kas(&transport).kip17().unwrap();

    let _ = kip17.token("my-nft", 16u8).unwrap().await;
    let _ = kip17.token("my-nft", "16").unwrap().await;
    let _ = kip17.token("my-nft", "0x0010").unwrap().await;
    let _ = kip17.token("my-nft", U256::from(16u64)).unwrap().await;

    let paths: Vec<String> = transport
        .requests()
        .iter()
        .map(RequestDescriptor::resolved_path)
        .collect();
    assert_eq!(paths, vec!["/contract/my-nft/token/0x10"; 4]);
}

#[test]
fn test_invalid_id_never_reaches_transport() {
    let transport = MockTransport::new();
    let kip17 = kas(&transport).kip17().unwrap();

    let result = kip17.burn("my-nft", "0xowner", "not-a-number");
    assert!(matches!(result, Err(Error::InvalidIdentifierType(_))));
    assert_eq!(transport.calls(), 0);
}
