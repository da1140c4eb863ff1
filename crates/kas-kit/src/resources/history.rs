//! Token history API: KLAY and token transfers, and the token contracts
//! KAS indexes.

use serde_json::Value;

use crate::args;
use crate::client::{Arg, Call, Encoding, Endpoint, Facade, Field, Param};
use crate::error::Error;
use crate::types::{
    IdentifierValue, NftToken, OptionKey, Page, QueryOptions, Service, TokenContract,
    TransferHistoryItem,
};

const NFT_ADDRESS: Field = Field::new("nft-address", "nftAddress", Encoding::Text);
const TOKEN_ID: Field = Field::new("token-id", "tokenId", Encoding::Id);

const TRANSFER_OPTIONS: &[OptionKey] = &[
    OptionKey::Kind,
    OptionKey::Range,
    OptionKey::Size,
    OptionKey::Cursor,
    OptionKey::CaFilter,
];
const CONTRACT_OPTIONS: &[OptionKey] = &[
    OptionKey::Status,
    OptionKey::Type,
    OptionKey::Size,
    OptionKey::Cursor,
];
const PAGING: &[OptionKey] = &[OptionKey::Size, OptionKey::Cursor];

const BASE: Endpoint = Endpoint {
    service: Service::TokenHistory,
    ..Endpoint::BLANK
};

// ============================================================================
// Endpoints
// ============================================================================

pub const TRANSFER_HISTORY: Endpoint = Endpoint {
    name: "token_history.transfer_history",
    path: "/transfer",
    params: &[Param::required("presets"), Param::object("options")],
    query_fields: &[Field::named("presets", Encoding::List)],
    options: Some("options"),
    whitelist: TRANSFER_OPTIONS,
    ..BASE
};

pub const TRANSFER_BY_TX_HASH: Endpoint = Endpoint {
    name: "token_history.transfer_by_tx_hash",
    path: "/transfer/tx/{transaction-hash}",
    params: &[Param::required("transactionHash")],
    path_fields: &[Field::new("transaction-hash", "transactionHash", Encoding::Text)],
    ..BASE
};

pub const TRANSFER_BY_ACCOUNT: Endpoint = Endpoint {
    name: "token_history.transfer_by_account",
    path: "/transfer/account/{address}",
    params: &[Param::required("address"), Param::object("options")],
    path_fields: &[Field::named("address", Encoding::Text)],
    options: Some("options"),
    whitelist: TRANSFER_OPTIONS,
    ..BASE
};

pub const FT_CONTRACT_LIST: Endpoint = Endpoint {
    name: "token_history.ft_contract_list",
    path: "/contract/ft",
    params: &[Param::object("options")],
    options: Some("options"),
    whitelist: CONTRACT_OPTIONS,
    ..BASE
};

pub const NFT_CONTRACT_LIST: Endpoint = Endpoint {
    name: "token_history.nft_contract_list",
    path: "/contract/nft",
    ..FT_CONTRACT_LIST
};

pub const MT_CONTRACT_LIST: Endpoint = Endpoint {
    name: "token_history.mt_contract_list",
    path: "/contract/mt",
    ..FT_CONTRACT_LIST
};

pub const NFT_LIST: Endpoint = Endpoint {
    name: "token_history.nft_list",
    path: "/contract/nft/{nft-address}/token",
    params: &[Param::required("nftAddress"), Param::object("options")],
    path_fields: &[NFT_ADDRESS],
    options: Some("options"),
    whitelist: PAGING,
    ..BASE
};

pub const NFT_LIST_BY_OWNER: Endpoint = Endpoint {
    name: "token_history.nft_list_by_owner",
    path: "/contract/nft/{nft-address}/owner/{owner-address}",
    params: &[
        Param::required("nftAddress"),
        Param::required("ownerAddress"),
        Param::object("options"),
    ],
    path_fields: &[
        NFT_ADDRESS,
        Field::new("owner-address", "ownerAddress", Encoding::Text),
    ],
    options: Some("options"),
    whitelist: PAGING,
    ..BASE
};

pub const NFT: Endpoint = Endpoint {
    name: "token_history.nft",
    path: "/contract/nft/{nft-address}/token/{token-id}",
    params: &[Param::required("nftAddress"), Param::required("tokenId")],
    path_fields: &[NFT_ADDRESS, TOKEN_ID],
    ..BASE
};

pub const NFT_OWNERSHIP_HISTORY: Endpoint = Endpoint {
    name: "token_history.nft_ownership_history",
    path: "/contract/nft/{nft-address}/token/{token-id}/history",
    params: &[
        Param::required("nftAddress"),
        Param::required("tokenId"),
        Param::object("options"),
    ],
    path_fields: &[NFT_ADDRESS, TOKEN_ID],
    options: Some("options"),
    whitelist: PAGING,
    ..BASE
};

pub(crate) const ENDPOINTS: &[&Endpoint] = &[
    &TRANSFER_HISTORY,
    &TRANSFER_BY_TX_HASH,
    &TRANSFER_BY_ACCOUNT,
    &FT_CONTRACT_LIST,
    &NFT_CONTRACT_LIST,
    &MT_CONTRACT_LIST,
    &NFT_LIST,
    &NFT_LIST_BY_OWNER,
    &NFT,
    &NFT_OWNERSHIP_HISTORY,
];

// ============================================================================
// TokenHistory
// ============================================================================

/// Client for the token history API.
///
/// # Example
///
/// ```rust,no_run
/// use kas_kit::*;
///
/// # async fn example(kas: Kas) -> Result<(), Error> {
/// let history = kas.token_history()?;
///
/// let options = QueryOptions::builder()
///     .kind([TransferKind::Klay, TransferKind::Ft])
///     .size(100)
///     .build()?;
/// let mut page = history.transfer_history(["my-preset"], options.clone())?.await?;
///
/// while let Some(cursor) = page.next_cursor() {
///     let next = QueryOptions::builder().size(100).cursor(cursor).build()?;
///     page = history.transfer_history(["my-preset"], next)?.await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct TokenHistory {
    facade: Facade,
}

super::impl_resource!(TokenHistory, Service::TokenHistory);

impl TokenHistory {
    /// Transfers of the accounts in the given presets.
    pub fn transfer_history<I, S>(
        &self,
        presets: I,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<TransferHistoryItem>>, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let presets: Vec<Value> = presets
            .into_iter()
            .map(|preset| Value::String(preset.into()))
            .collect();
        self.facade.prepare(
            &TRANSFER_HISTORY,
            args![Value::Array(presets), options.into()],
        )
    }

    /// Every transfer made by one transaction.
    pub fn transfer_by_tx_hash(
        &self,
        transaction_hash: impl Into<String>,
    ) -> Result<Call<Page<TransferHistoryItem>>, Error> {
        self.facade
            .prepare(&TRANSFER_BY_TX_HASH, args![transaction_hash.into()])
    }

    pub fn transfer_by_account(
        &self,
        address: impl Into<String>,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<TransferHistoryItem>>, Error> {
        self.facade
            .prepare(&TRANSFER_BY_ACCOUNT, args![address.into(), options.into()])
    }

    pub fn ft_contract_list(
        &self,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<TokenContract>>, Error> {
        self.facade.prepare(&FT_CONTRACT_LIST, args![options.into()])
    }

    pub fn nft_contract_list(
        &self,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<TokenContract>>, Error> {
        self.facade.prepare(&NFT_CONTRACT_LIST, args![options.into()])
    }

    pub fn mt_contract_list(
        &self,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<TokenContract>>, Error> {
        self.facade.prepare(&MT_CONTRACT_LIST, args![options.into()])
    }

    pub fn nft_list(
        &self,
        nft_address: impl Into<String>,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<NftToken>>, Error> {
        self.facade
            .prepare(&NFT_LIST, args![nft_address.into(), options.into()])
    }

    pub fn nft_list_by_owner(
        &self,
        nft_address: impl Into<String>,
        owner_address: impl Into<String>,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<NftToken>>, Error> {
        self.facade.prepare(
            &NFT_LIST_BY_OWNER,
            args![nft_address.into(), owner_address.into(), options.into()],
        )
    }

    pub fn nft(
        &self,
        nft_address: impl Into<String>,
        token_id: impl Into<IdentifierValue>,
    ) -> Result<Call<NftToken>, Error> {
        self.facade
            .prepare(&NFT, args![nft_address.into(), Arg::id(token_id)])
    }

    /// Owners of one NFT over time, newest first.
    pub fn nft_ownership_history(
        &self,
        nft_address: impl Into<String>,
        token_id: impl Into<IdentifierValue>,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<TransferHistoryItem>>, Error> {
        self.facade.prepare(
            &NFT_OWNERSHIP_HISTORY,
            args![nft_address.into(), Arg::id(token_id), options.into()],
        )
    }
}
