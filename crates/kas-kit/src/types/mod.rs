//! Core types for the Klaytn API Service.
//!
//! Identifiers, query options, request descriptors and the response models
//! shared by every resource client.

mod access;
mod chain;
mod contract_options;
mod identifier;
mod models;
mod options;
mod request;

pub use access::AccessOptions;
pub use chain::Chain;
pub use contract_options::{ContractOptions, UserFeePayer};
pub use identifier::{HexId, IdentifierValue, normalize_id, normalize_ids};
pub use models::{
    Account, AccountCount, Kip7Balance, Kip7Contract, Kip17Contract, Kip17Token,
    Kip17TransferRecord, Kip37Contract, Kip37Token, MetadataUpload, NftToken, Page,
    ServiceErrorPayload, TokenContract, TransactionResult, TransferHistoryItem, WalletTransaction,
};
pub(crate) use options::describe_keys;
pub use options::{
    MAX_PAGE_SIZE, MIN_PAGE_SIZE, OptionKey, QueryOptions, QueryOptionsBuilder, TransferKind,
};
pub use request::{HttpMethod, RequestDescriptor, Service};
