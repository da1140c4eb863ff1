//! An ergonomic Rust client for the Klaytn API Service (KAS).
//!
//! **kas-kit** wraps the KAS REST services (wallet, KIP-7, KIP-17, KIP-37,
//! token history and metadata) behind one client with typed, awaitable
//! calls.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kas_kit::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), kas_kit::Error> {
//!     // Configure once
//!     let kas = Kas::builder(Chain::Testnet, "access-key-id", "secret-access-key")
//!         .production()
//!         .build();
//!
//!     // Mint an NFT; the token id may be any integer, decimal or hex string
//!     let kip17 = kas.kip17()?;
//!     let tx = kip17
//!         .mint("my-nft", "0x60498fEFBF1705A3Db8d7Bb5c80D5238956343e5", 1, "https://example.com/1.json")?
//!         .await?;
//!     println!("submitted {}", tx.transaction_hash);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Design Principles
//!
//! 1. **Single entry point**: Every service hangs off the [`Kas`] client
//! 2. **Validate before sending**: Argument, identifier and option errors are
//!    returned synchronously, before any request exists
//! 3. **One wire format for ids**: Token ids and amounts are always sent as
//!    canonical `0x` hex ([`HexId`])
//! 4. **Futures first, callbacks welcome**: Every call is awaitable and can
//!    also drive a callback ([`Call::callback`])
//!
//! # Core Types
//!
//! - [`HexId`] / [`normalize_id`] - Canonical token identifiers
//! - [`QueryOptions`] - Validated paging and filter options
//! - [`ContractOptions`] - Fee-payer options for contract deployment
//! - [`Page`] - One page of a list endpoint
//! - [`Call`] - A prepared call, awaitable or callback-driven
//!
//! # Pagination
//!
//! ```rust,no_run
//! use kas_kit::*;
//!
//! # async fn example(kas: Kas) -> Result<(), Error> {
//! let kip17 = kas.kip17()?;
//! let mut options = QueryOptions::builder().size(100).build()?;
//! loop {
//!     let page = kip17.token_list("my-nft", options)?.await?;
//!     for token in &page.items {
//!         println!("{} -> {}", token.token_id, token.owner);
//!     }
//!     let Some(cursor) = page.next_cursor() else { break };
//!     options = QueryOptions::builder().size(100).cursor(cursor).build()?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod resources;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{Error, TransportError};
pub use types::*;

// Re-export client types
pub use client::{
    Arg, ArgKind, ArgValue, CHAIN_ID_HEADER, Call, CallResult, Callback, Completion,
    ENV_ACCESS_KEY_ID, ENV_CHAIN_ID, ENV_SECRET_ACCESS_KEY, Encoding, Endpoint, Facade, Field,
    HttpTransport, Kas, KasBuilder, Literal, Param, ParamKind, RawResponse, ResolvedArgs,
    RetryConfig, Transport, build_request, resolve,
};

// Re-export resource clients
pub use resources::{
    ContractDeploy, ContractExecution, Kip7, Kip17, Kip37, Metadata, TokenHistory, ValueTransfer,
    Wallet, catalogue, find_endpoint,
};
