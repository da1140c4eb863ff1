//! Token identifiers and their canonical hex encoding.
//!
//! KAS accepts token ids, amounts and supplies as `0x`-prefixed hex strings.
//! Callers hold them in many shapes (a `u64` counter, a decimal string read
//! from a form, a `U256` from contract math, a hex string from a previous
//! response); [`normalize_id`] folds all of them into one [`HexId`].

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::Value;

use crate::error::Error;

/// A non-negative integer in canonical wire form: lowercase, `0x`-prefixed,
/// no leading zeros (`0x0` for zero).
///
/// # Example
///
/// ```
/// use kas_kit::HexId;
///
/// let id: HexId = "0x00FF".parse().unwrap();
/// assert_eq!(id.to_string(), "0xff");
/// assert_eq!(id, HexId::from(255u64));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HexId(U256);

impl HexId {
    /// The zero id, `0x0`.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Returns the numeric value.
    pub fn to_u256(&self) -> U256 {
        self.0
    }

    /// Returns true for `0x0`.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<u64> for HexId {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for HexId {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<HexId> for U256 {
    fn from(id: HexId) -> Self {
        id.0
    }
}

impl From<HexId> for Value {
    fn from(id: HexId) -> Self {
        Value::String(id.to_string())
    }
}

impl FromStr for HexId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_text(s)
    }
}

impl fmt::Display for HexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_zero() {
            return f.write_str("0x0");
        }
        let encoded = hex::encode(self.0.to_be_bytes_vec());
        write!(f, "0x{}", encoded.trim_start_matches('0'))
    }
}

impl Serialize for HexId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexId {
    /// Accepts any shape [`normalize_id`] accepts: hex or decimal strings
    /// and non-negative integers.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        normalize_id(value).map_err(de::Error::custom)
    }
}

// ============================================================================
// IdentifierValue
// ============================================================================

/// Any value a caller may pass where KAS expects a token id or amount.
///
/// Usually built implicitly through `impl Into<IdentifierValue>`; every
/// integer width, [`U256`], strings, big-endian bytes and dynamic JSON
/// convert into it. Whether the value is acceptable is decided by
/// [`normalize_id`], not by the conversion.
#[derive(Clone, Debug, PartialEq)]
pub enum IdentifierValue {
    /// An unsigned machine integer.
    Unsigned(u128),
    /// A signed machine integer; negative values are rejected.
    Signed(i128),
    /// An arbitrary-precision integer.
    Big(U256),
    /// A `0x`-prefixed hex string or a decimal digit string.
    Text(String),
    /// A big-endian unsigned integer of at most 32 bytes.
    Bytes(Vec<u8>),
    /// A dynamic JSON value of number or string shape.
    Json(Value),
}

macro_rules! impl_from_int {
    ($variant:ident, $wide:ty, $($t:ty),+) => {
        $(
            impl From<$t> for IdentifierValue {
                fn from(value: $t) -> Self {
                    IdentifierValue::$variant(value as $wide)
                }
            }
        )+
    };
}

impl_from_int!(Unsigned, u128, u8, u16, u32, u64, u128, usize);
impl_from_int!(Signed, i128, i8, i16, i32, i64, i128, isize);

impl From<U256> for IdentifierValue {
    fn from(value: U256) -> Self {
        IdentifierValue::Big(value)
    }
}

impl From<&U256> for IdentifierValue {
    fn from(value: &U256) -> Self {
        IdentifierValue::Big(*value)
    }
}

impl From<HexId> for IdentifierValue {
    fn from(value: HexId) -> Self {
        IdentifierValue::Big(value.0)
    }
}

impl From<&HexId> for IdentifierValue {
    fn from(value: &HexId) -> Self {
        IdentifierValue::Big(value.0)
    }
}

impl From<&str> for IdentifierValue {
    fn from(value: &str) -> Self {
        IdentifierValue::Text(value.to_string())
    }
}

impl From<String> for IdentifierValue {
    fn from(value: String) -> Self {
        IdentifierValue::Text(value)
    }
}

impl From<&String> for IdentifierValue {
    fn from(value: &String) -> Self {
        IdentifierValue::Text(value.clone())
    }
}

impl From<&[u8]> for IdentifierValue {
    fn from(value: &[u8]) -> Self {
        IdentifierValue::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for IdentifierValue {
    fn from(value: Vec<u8>) -> Self {
        IdentifierValue::Bytes(value)
    }
}

impl From<Value> for IdentifierValue {
    fn from(value: Value) -> Self {
        IdentifierValue::Json(value)
    }
}

impl From<&Value> for IdentifierValue {
    fn from(value: &Value) -> Self {
        IdentifierValue::Json(value.clone())
    }
}

impl From<f64> for IdentifierValue {
    fn from(value: f64) -> Self {
        IdentifierValue::Json(Value::from(value))
    }
}

impl From<bool> for IdentifierValue {
    fn from(value: bool) -> Self {
        IdentifierValue::Json(Value::Bool(value))
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Normalize one identifier into canonical hex.
///
/// Normalization is idempotent: feeding a [`HexId`] (or its string form)
/// back in returns the same id.
///
/// # Errors
///
/// [`Error::InvalidIdentifierType`] for negative numbers, floats, booleans,
/// null, objects, arrays, empty strings, strings that are neither hex nor
/// decimal, and values wider than 256 bits.
///
/// # Example
///
/// ```
/// use alloy_primitives::U256;
/// use kas_kit::normalize_id;
///
/// let a = normalize_id(1).unwrap();
/// let b = normalize_id("0x1").unwrap();
/// let c = normalize_id(U256::from(1)).unwrap();
/// assert!(a == b && b == c);
/// assert_eq!(normalize_id("4096").unwrap().to_string(), "0x1000");
/// ```
pub fn normalize_id(value: impl Into<IdentifierValue>) -> Result<HexId, Error> {
    match value.into() {
        IdentifierValue::Unsigned(n) => Ok(HexId(U256::from(n))),
        IdentifierValue::Signed(n) => u128::try_from(n)
            .map(|n| HexId(U256::from(n)))
            .map_err(|_| invalid(format!("negative number {n}"))),
        IdentifierValue::Big(n) => Ok(HexId(n)),
        IdentifierValue::Text(s) => parse_text(&s),
        IdentifierValue::Bytes(bytes) => {
            if bytes.is_empty() {
                return Err(invalid("empty byte string"));
            }
            U256::try_from_be_slice(&bytes)
                .map(HexId)
                .ok_or_else(|| invalid(format!("{} bytes exceed 256 bits", bytes.len())))
        }
        IdentifierValue::Json(value) => parse_json(&value),
    }
}

/// Normalize a list of identifiers element-wise, preserving order and length.
///
/// The first element that fails to normalize aborts the whole list.
pub fn normalize_ids<I, V>(values: I) -> Result<Vec<HexId>, Error>
where
    I: IntoIterator<Item = V>,
    V: Into<IdentifierValue>,
{
    values.into_iter().map(normalize_id).collect()
}

fn parse_text(s: &str) -> Result<HexId, Error> {
    if s.is_empty() {
        return Err(invalid("empty string"));
    }

    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid(format!("{s:?} is not a hex string")));
        }
        return U256::from_str_radix(digits, 16)
            .map(HexId)
            .map_err(|_| invalid(format!("{s:?} exceeds 256 bits")));
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return U256::from_str_radix(s, 10)
            .map(HexId)
            .map_err(|_| invalid(format!("{s:?} exceeds 256 bits")));
    }

    Err(invalid(format!("{s:?} is neither a hex nor a decimal string")))
}

fn parse_json(value: &Value) -> Result<HexId, Error> {
    match value {
        Value::String(s) => parse_text(s),
        Value::Number(n) => {
            if let Some(n) = n.as_u64() {
                Ok(HexId(U256::from(n)))
            } else if n.is_i64() {
                Err(invalid(format!("negative number {n}")))
            } else {
                Err(invalid(format!("non-integer number {n}")))
            }
        }
        Value::Null => Err(invalid("null")),
        Value::Bool(b) => Err(invalid(format!("boolean {b}"))),
        Value::Array(_) => Err(invalid("array")),
        Value::Object(_) => Err(invalid("object")),
    }
}

fn invalid(reason: impl Into<String>) -> Error {
    Error::InvalidIdentifierType(reason.into())
}
