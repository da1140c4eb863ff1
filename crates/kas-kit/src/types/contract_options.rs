//! Fee-payer options for contracts deployed through KAS.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Fee-payer options nested under `options` when deploying or updating a
/// KIP-7, KIP-17 or KIP-37 contract.
///
/// # Example
///
/// ```
/// use kas_kit::ContractOptions;
///
/// let options = ContractOptions::new()
///     .enable_global_fee_payer(false)
///     .user_fee_payer("krn:1001:wallet:...:feepayer-pool:default", "0xfee");
/// assert_eq!(
///     options.to_value()["userFeePayer"]["address"],
///     "0xfee"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_global_fee_payer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_fee_payer: Option<UserFeePayer>,
}

/// A user-managed fee payer account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFeePayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub krn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ContractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let the global KAS fee payer pay for transactions on this contract.
    pub fn enable_global_fee_payer(mut self, enable: bool) -> Self {
        self.enable_global_fee_payer = Some(enable);
        self
    }

    /// Pay fees from a user fee payer account.
    pub fn user_fee_payer(mut self, krn: impl Into<String>, address: impl Into<String>) -> Self {
        self.user_fee_payer = Some(UserFeePayer {
            krn: Some(krn.into()),
            address: Some(address.into()),
        });
        self
    }

    /// Options with only a user fee-payer address.
    pub fn with_fee_payer_address(address: impl Into<String>) -> Self {
        Self {
            enable_global_fee_payer: None,
            user_fee_payer: Some(UserFeePayer {
                krn: None,
                address: Some(address.into()),
            }),
        }
    }

    /// The JSON object sent on the wire. Absent fields are omitted.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(enable) = self.enable_global_fee_payer {
            map.insert("enableGlobalFeePayer".to_string(), json!(enable));
        }
        if let Some(payer) = &self.user_fee_payer {
            let mut inner = Map::new();
            if let Some(krn) = &payer.krn {
                inner.insert("krn".to_string(), json!(krn));
            }
            if let Some(address) = &payer.address {
                inner.insert("address".to_string(), json!(address));
            }
            map.insert("userFeePayer".to_string(), Value::Object(inner));
        }
        Value::Object(map)
    }
}

impl From<ContractOptions> for Value {
    fn from(options: ContractOptions) -> Self {
        options.to_value()
    }
}
