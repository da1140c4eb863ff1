//! Response models returned by KAS services.
//!
//! Models are lenient: missing fields fall back to their defaults, and
//! unknown fields are ignored, so minor API additions never break decoding.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ContractOptions;

// =============================================================================
// Pagination
// =============================================================================

/// One page of a list endpoint.
///
/// An empty or absent cursor marks the last page.
///
/// # Example
///
/// ```
/// use kas_kit::Page;
///
/// let page: Page<u32> = serde_json::from_str(r#"{"items":[1,2],"cursor":"c1"}"#).unwrap();
/// assert_eq!(page.next_cursor(), Some("c1"));
///
/// let last: Page<u32> = serde_json::from_str(r#"{"items":[3],"cursor":""}"#).unwrap();
/// assert_eq!(last.next_cursor(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub cursor: String,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: String::new(),
        }
    }
}

impl<T> Page<T> {
    /// The cursor to request the next page with, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.cursor.is_empty() {
            None
        } else {
            Some(&self.cursor)
        }
    }

    /// Returns true if this is the last page.
    pub fn is_last(&self) -> bool {
        self.next_cursor().is_none()
    }
}

// =============================================================================
// Service errors
// =============================================================================

/// A `{ code, message }` payload returned in place of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceErrorPayload {
    pub code: i64,
    pub message: String,
}

impl ServiceErrorPayload {
    /// Detect an error-shaped payload: an object with exactly an integer
    /// `code` and a string `message`.
    pub fn detect(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if object.len() != 2 {
            return None;
        }
        Some(Self {
            code: object.get("code")?.as_i64()?,
            message: object.get("message")?.as_str()?.to_string(),
        })
    }
}

// =============================================================================
// Shared
// =============================================================================

/// Result of submitting a transaction through a token service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionResult {
    /// Usually `"Submitted"`.
    pub status: String,
    pub transaction_hash: String,
}

// =============================================================================
// KIP-17
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Kip17Contract {
    pub address: String,
    pub alias: String,
    pub name: String,
    pub symbol: String,
    pub options: Option<ContractOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Kip17Token {
    pub token_id: String,
    pub owner: String,
    pub previous_owner: String,
    pub token_uri: String,
    pub transaction_hash: String,
    pub created_at: u64,
    pub updated_at: u64,
}

/// One ownership change of a KIP-17 token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Kip17TransferRecord {
    pub from: String,
    pub to: String,
    pub timestamp: u64,
    pub transaction_hash: String,
}

// =============================================================================
// KIP-7
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Kip7Contract {
    pub address: String,
    pub alias: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: String,
    pub status: String,
    pub options: Option<ContractOptions>,
}

/// A balance or allowance, as a hex amount in the token's smallest unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Kip7Balance {
    pub balance: String,
    pub decimals: u8,
}

// =============================================================================
// KIP-37
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Kip37Contract {
    pub address: String,
    pub alias: String,
    pub status: String,
    pub uri: String,
    pub options: Option<ContractOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Kip37Token {
    pub token_id: String,
    pub token_address: String,
    pub balance: String,
    pub total_supply: String,
    pub token_uri: String,
    pub updated_at: u64,
}

// =============================================================================
// Wallet
// =============================================================================

/// A KAS-managed account or fee payer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Account {
    pub address: String,
    pub chain_id: u64,
    pub key_id: String,
    pub krn: String,
    pub public_key: String,
    pub created_at: u64,
    pub updated_at: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountCount {
    pub count: u64,
}

/// A transaction submitted (or only signed) through the wallet service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WalletTransaction {
    pub from: String,
    pub to: Option<String>,
    pub value: Option<String>,
    pub gas: u64,
    pub gas_price: String,
    pub nonce: u64,
    pub rlp: String,
    pub status: String,
    pub transaction_hash: String,
    pub type_int: u32,
    /// Type-specific fields (`input`, `feePayer`, `feeRatio`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// Token history
// =============================================================================

/// One entry of a transfer history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferHistoryItem {
    /// `klay`, `ft`, `nft` or `mt`.
    pub transfer_type: String,
    pub from: String,
    pub to: String,
    pub transaction_hash: String,
    pub timestamp: u64,
    /// Kind-specific fields (`value`, `tokenId`, `contract`, `transaction`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A token contract indexed by the token history service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenContract {
    pub address: String,
    pub name: String,
    pub symbol: String,
    /// Absent for NFT and MT contracts.
    pub decimals: Option<u8>,
    pub total_supply: String,
    pub status: String,
    /// `kip7`, `kip17`, `kip37`, `erc20`, `erc721` or `erc1155`.
    #[serde(rename = "type")]
    pub contract_type: String,
    pub created_at: u64,
    pub updated_at: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One NFT as indexed by the token history service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NftToken {
    pub owner: String,
    pub previous_owner: String,
    pub token_id: String,
    pub token_uri: String,
    pub transaction_hash: String,
    pub created_at: u64,
    pub updated_at: u64,
}

// =============================================================================
// Metadata
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetadataUpload {
    pub content_type: String,
    pub filename: String,
    pub uri: String,
}
