//! Chain identification for Klaytn.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The Klaytn chain a client talks to.
///
/// KAS routes every request by the `x-chain-id` header, so the chain is
/// fixed for the lifetime of a [`Kas`](crate::Kas) client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Chain {
    /// Cypress, the Klaytn mainnet (chain id 8217).
    Mainnet,
    /// Baobab, the Klaytn testnet (chain id 1001).
    #[default]
    Testnet,
    /// Any other chain id.
    Custom(u64),
}

impl Chain {
    /// Chain id of the Klaytn mainnet.
    pub const MAINNET_ID: u64 = 8217;
    /// Chain id of the Klaytn testnet.
    pub const TESTNET_ID: u64 = 1001;

    /// Returns the numeric chain id.
    pub fn id(&self) -> u64 {
        match self {
            Chain::Mainnet => Self::MAINNET_ID,
            Chain::Testnet => Self::TESTNET_ID,
            Chain::Custom(id) => *id,
        }
    }

    /// Returns true if this is mainnet.
    pub fn is_mainnet(&self) -> bool {
        self.id() == Self::MAINNET_ID
    }

    /// Returns true if this is testnet.
    pub fn is_testnet(&self) -> bool {
        self.id() == Self::TESTNET_ID
    }

    /// Returns the network name, or `"custom"` for unknown ids.
    pub fn as_str(&self) -> &'static str {
        match Chain::from(self.id()) {
            Chain::Mainnet => "mainnet",
            Chain::Testnet => "testnet",
            Chain::Custom(_) => "custom",
        }
    }
}

impl From<u64> for Chain {
    fn from(id: u64) -> Self {
        match id {
            Self::MAINNET_ID => Chain::Mainnet,
            Self::TESTNET_ID => Chain::Testnet,
            other => Chain::Custom(other),
        }
    }
}

impl From<Chain> for u64 {
    fn from(chain: Chain) -> Self {
        chain.id()
    }
}

impl FromStr for Chain {
    type Err = Error;

    /// Accepts a numeric chain id or one of `mainnet`, `cypress`, `testnet`,
    /// `baobab`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "cypress" => Ok(Chain::Mainnet),
            "testnet" | "baobab" => Ok(Chain::Testnet),
            other => other
                .parse::<u64>()
                .map(Chain::from)
                .map_err(|_| Error::Config(format!("invalid chain id: {s:?}"))),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
