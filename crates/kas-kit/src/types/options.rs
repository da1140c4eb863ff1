//! Query options for list and history endpoints.
//!
//! Options are type-checked when they are built. Whether a given endpoint
//! accepts them is a separate question answered by
//! [`QueryOptions::is_valid_options`], because different endpoints whitelist
//! different keys of the same option type.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::Error;

/// Smallest accepted page size.
pub const MIN_PAGE_SIZE: u32 = 1;
/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u32 = 1000;

// ============================================================================
// OptionKey
// ============================================================================

/// A recognized query option key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    Size,
    Cursor,
    FromTimestamp,
    ToTimestamp,
    Status,
    Kind,
    CaFilter,
    Range,
    Type,
}

impl OptionKey {
    /// Every key, in canonical order.
    pub const ALL: [OptionKey; 9] = [
        OptionKey::Size,
        OptionKey::Cursor,
        OptionKey::FromTimestamp,
        OptionKey::ToTimestamp,
        OptionKey::Status,
        OptionKey::Kind,
        OptionKey::CaFilter,
        OptionKey::Range,
        OptionKey::Type,
    ];

    /// The camelCase name used in option bags.
    pub fn name(&self) -> &'static str {
        match self {
            OptionKey::Size => "size",
            OptionKey::Cursor => "cursor",
            OptionKey::FromTimestamp => "fromTimestamp",
            OptionKey::ToTimestamp => "toTimestamp",
            OptionKey::Status => "status",
            OptionKey::Kind => "kind",
            OptionKey::CaFilter => "caFilter",
            OptionKey::Range => "range",
            OptionKey::Type => "type",
        }
    }

    /// The query parameter name sent on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            OptionKey::FromTimestamp => "from-timestamp",
            OptionKey::ToTimestamp => "to-timestamp",
            OptionKey::CaFilter => "ca-filter",
            other => other.name(),
        }
    }

    /// Parse either spelling (`fromTimestamp` or `from-timestamp`).
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == s || key.wire_name() == s)
    }

    fn expected(&self) -> &'static str {
        match self {
            OptionKey::Size | OptionKey::FromTimestamp | OptionKey::ToTimestamp => {
                "a non-negative integer"
            }
            OptionKey::Kind => "a string or an array of strings",
            _ => "a string",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render a whitelist as `[size, cursor]` for error messages.
pub(crate) fn describe_keys(keys: &[OptionKey]) -> String {
    let names: Vec<&str> = keys.iter().map(OptionKey::name).collect();
    format!("[{}]", names.join(", "))
}

// ============================================================================
// TransferKind
// ============================================================================

/// Kind of transfer tracked by the token history service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransferKind {
    /// Native KLAY transfers.
    Klay,
    /// Fungible tokens (KIP-7).
    Ft,
    /// Non-fungible tokens (KIP-17).
    Nft,
    /// Multi tokens (KIP-37).
    Mt,
}

impl TransferKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferKind::Klay => "klay",
            TransferKind::Ft => "ft",
            TransferKind::Nft => "nft",
            TransferKind::Mt => "mt",
        }
    }
}

impl FromStr for TransferKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "klay" => Ok(TransferKind::Klay),
            "ft" => Ok(TransferKind::Ft),
            "nft" => Ok(TransferKind::Nft),
            "mt" => Ok(TransferKind::Mt),
            other => Err(Error::InvalidOptionRange {
                key: OptionKey::Kind.name().to_string(),
                reason: format!("unknown transfer kind {other:?}, expected klay, ft, nft or mt"),
            }),
        }
    }
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// QueryOptions
// ============================================================================

/// Validated query options. Only explicitly set keys are present.
///
/// # Example
///
/// ```
/// use kas_kit::{OptionKey, QueryOptions};
///
/// let options = QueryOptions::builder().size(100).cursor("c1").build().unwrap();
/// assert_eq!(options.keys(), [OptionKey::Size, OptionKey::Cursor]);
/// assert!(options.is_valid_options(&[OptionKey::Size, OptionKey::Cursor]));
/// assert!(!options.is_valid_options(&[OptionKey::Size]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryOptions {
    size: Option<u32>,
    cursor: Option<String>,
    from_timestamp: Option<u64>,
    to_timestamp: Option<u64>,
    status: Option<String>,
    kind: Option<Vec<TransferKind>>,
    ca_filter: Option<String>,
    range: Option<String>,
    token_type: Option<String>,
}

impl QueryOptions {
    /// Start building a set of options.
    pub fn builder() -> QueryOptionsBuilder {
        QueryOptionsBuilder::default()
    }

    /// Build options from a dynamic JSON object.
    ///
    /// Keys may use camelCase or hyphenated spelling; `null` values are
    /// treated as absent.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidOptionType`] if the value is not an object or a key
    ///   holds the wrong type
    /// - [`Error::InvalidOptionRange`] if a value is out of range
    /// - [`Error::InvalidQueryOptions`] for unrecognized keys
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let Value::Object(map) = value else {
            return Err(Error::InvalidOptionType {
                key: "options".to_string(),
                expected: "an object",
            });
        };
        Self::from_map(map)
    }

    fn from_map(map: Map<String, Value>) -> Result<Self, Error> {
        let mut builder = Self::builder();
        let mut seen = BTreeSet::new();

        for (name, value) in map {
            // Both spellings of one key count as the same key.
            let Some(key) = OptionKey::parse(&name).filter(|key| seen.insert(*key)) else {
                return Err(Error::InvalidQueryOptions {
                    allowed: describe_keys(&OptionKey::ALL),
                });
            };
            if value.is_null() {
                continue;
            }

            let wrong_type = || Error::InvalidOptionType {
                key: key.name().to_string(),
                expected: key.expected(),
            };

            builder = match key {
                OptionKey::Size => {
                    let size = value.as_u64().ok_or_else(wrong_type)?;
                    builder.size(u32::try_from(size).unwrap_or(u32::MAX))
                }
                OptionKey::FromTimestamp => builder.from_timestamp(timestamp(&value, wrong_type)?),
                OptionKey::ToTimestamp => builder.to_timestamp(timestamp(&value, wrong_type)?),
                OptionKey::Kind => {
                    let kinds = match &value {
                        Value::String(s) => s
                            .split(',')
                            .map(|k| k.trim().parse())
                            .collect::<Result<Vec<TransferKind>, _>>()?,
                        Value::Array(items) => items
                            .iter()
                            .map(|item| item.as_str().ok_or_else(wrong_type)?.parse())
                            .collect::<Result<Vec<TransferKind>, _>>()?,
                        _ => return Err(wrong_type()),
                    };
                    builder.kind(kinds)
                }
                OptionKey::Cursor
                | OptionKey::Status
                | OptionKey::CaFilter
                | OptionKey::Range
                | OptionKey::Type => {
                    let text = value.as_str().ok_or_else(wrong_type)?.to_string();
                    match key {
                        OptionKey::Cursor => builder.cursor(text),
                        OptionKey::Status => builder.status(text),
                        OptionKey::CaFilter => builder.ca_filter(text),
                        OptionKey::Range => builder.range(text),
                        _ => builder.token_type(text),
                    }
                }
            };
        }

        builder.build()
    }

    /// The keys that are present, in canonical order.
    pub fn keys(&self) -> Vec<OptionKey> {
        OptionKey::ALL
            .into_iter()
            .filter(|key| self.has(*key))
            .collect()
    }

    /// Returns true if no key is present.
    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// Returns true if `key` is present.
    pub fn has(&self, key: OptionKey) -> bool {
        match key {
            OptionKey::Size => self.size.is_some(),
            OptionKey::Cursor => self.cursor.is_some(),
            OptionKey::FromTimestamp => self.from_timestamp.is_some(),
            OptionKey::ToTimestamp => self.to_timestamp.is_some(),
            OptionKey::Status => self.status.is_some(),
            OptionKey::Kind => self.kind.is_some(),
            OptionKey::CaFilter => self.ca_filter.is_some(),
            OptionKey::Range => self.range.is_some(),
            OptionKey::Type => self.token_type.is_some(),
        }
    }

    /// Returns false if any present key is outside `whitelist`.
    pub fn is_valid_options(&self, whitelist: &[OptionKey]) -> bool {
        self.keys().iter().all(|key| whitelist.contains(key))
    }

    /// Present options as `(wire name, value)` pairs. List values are joined
    /// with commas.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        self.keys()
            .into_iter()
            .filter_map(|key| {
                let value = match key {
                    OptionKey::Size => self.size.map(|s| s.to_string()),
                    OptionKey::Cursor => self.cursor.clone(),
                    OptionKey::FromTimestamp => self.from_timestamp.map(|t| t.to_string()),
                    OptionKey::ToTimestamp => self.to_timestamp.map(|t| t.to_string()),
                    OptionKey::Status => self.status.clone(),
                    OptionKey::Kind => self.kind.as_ref().map(|kinds| {
                        kinds
                            .iter()
                            .map(TransferKind::as_str)
                            .collect::<Vec<_>>()
                            .join(",")
                    }),
                    OptionKey::CaFilter => self.ca_filter.clone(),
                    OptionKey::Range => self.range.clone(),
                    OptionKey::Type => self.token_type.clone(),
                }?;
                Some((key.wire_name(), value))
            })
            .collect()
    }

    pub fn size(&self) -> Option<u32> {
        self.size
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn from_timestamp(&self) -> Option<u64> {
        self.from_timestamp
    }

    pub fn to_timestamp(&self) -> Option<u64> {
        self.to_timestamp
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn kind(&self) -> Option<&[TransferKind]> {
        self.kind.as_deref()
    }

    pub fn ca_filter(&self) -> Option<&str> {
        self.ca_filter.as_deref()
    }

    pub fn range(&self) -> Option<&str> {
        self.range.as_deref()
    }

    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }
}

impl TryFrom<Value> for QueryOptions {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

fn timestamp(value: &Value, wrong_type: impl Fn() -> Error) -> Result<u64, Error> {
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(wrong_type),
        Value::String(s) => s.parse().map_err(|_| wrong_type()),
        _ => Err(wrong_type()),
    }
}

// ============================================================================
// QueryOptionsBuilder
// ============================================================================

/// Builder for [`QueryOptions`]. Validation runs in [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct QueryOptionsBuilder {
    inner: QueryOptions,
}

impl QueryOptionsBuilder {
    /// Page size, between 1 and 1000.
    pub fn size(mut self, size: u32) -> Self {
        self.inner.size = Some(size);
        self
    }

    /// Cursor returned by the previous page.
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.inner.cursor = Some(cursor.into());
        self
    }

    /// Lower bound, in unix seconds.
    pub fn from_timestamp(mut self, timestamp: u64) -> Self {
        self.inner.from_timestamp = Some(timestamp);
        self
    }

    /// Upper bound, in unix seconds.
    pub fn to_timestamp(mut self, timestamp: u64) -> Self {
        self.inner.to_timestamp = Some(timestamp);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.inner.status = Some(status.into());
        self
    }

    pub fn kind(mut self, kinds: impl IntoIterator<Item = TransferKind>) -> Self {
        self.inner.kind = Some(kinds.into_iter().collect());
        self
    }

    /// Restrict results to one contract address.
    pub fn ca_filter(mut self, address: impl Into<String>) -> Self {
        self.inner.ca_filter = Some(address.into());
        self
    }

    pub fn range(mut self, range: impl Into<String>) -> Self {
        self.inner.range = Some(range.into());
        self
    }

    pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
        self.inner.token_type = Some(token_type.into());
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOptionRange`] if `size` is outside 1..=1000, `kind` is
    /// empty, or `fromTimestamp` is after `toTimestamp`.
    pub fn build(self) -> Result<QueryOptions, Error> {
        let options = self.inner;

        if let Some(size) = options.size {
            if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&size) {
                return Err(Error::InvalidOptionRange {
                    key: OptionKey::Size.name().to_string(),
                    reason: format!(
                        "must be between {MIN_PAGE_SIZE} and {MAX_PAGE_SIZE}, got {size}"
                    ),
                });
            }
        }

        if options.kind.as_ref().is_some_and(Vec::is_empty) {
            return Err(Error::InvalidOptionRange {
                key: OptionKey::Kind.name().to_string(),
                reason: "must name at least one transfer kind".to_string(),
            });
        }

        if let (Some(from), Some(to)) = (options.from_timestamp, options.to_timestamp) {
            if from > to {
                return Err(Error::InvalidOptionRange {
                    key: OptionKey::FromTimestamp.name().to_string(),
                    reason: format!("{from} is after toTimestamp {to}"),
                });
            }
        }

        Ok(options)
    }
}
