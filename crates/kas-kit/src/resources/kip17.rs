//! KIP-17 (non-fungible token) API.

use crate::args;
use crate::client::{Arg, Call, Encoding, Endpoint, Facade, Field, Param};
use crate::error::Error;
use crate::types::{
    ContractOptions, HttpMethod, IdentifierValue, Kip17Contract, Kip17Token, Kip17TransferRecord,
    OptionKey, Page, QueryOptions, Service, TransactionResult,
};

const CONTRACT: Field = Field::new("contract-address-or-alias", "alias", Encoding::Text);
const TOKEN_ID: Field = Field::new("token-id", "tokenId", Encoding::Id);
const PAGING: &[OptionKey] = &[OptionKey::Size, OptionKey::Cursor];

const BASE: Endpoint = Endpoint {
    service: Service::Kip17,
    ..Endpoint::BLANK
};

// ============================================================================
// Endpoints
// ============================================================================

pub const DEPLOY: Endpoint = Endpoint {
    name: "kip17.deploy",
    method: HttpMethod::Post,
    path: "/contract",
    params: &[
        Param::required("name"),
        Param::required("symbol"),
        Param::required("alias"),
        Param::polymorphic("options"),
    ],
    body_fields: &[
        Field::named("name", Encoding::Text),
        Field::named("symbol", Encoding::Text),
        Field::named("alias", Encoding::Text),
        Field::named("options", Encoding::FeePayer),
    ],
    ..BASE
};

pub const CONTRACT_LIST: Endpoint = Endpoint {
    name: "kip17.contract_list",
    path: "/contract",
    params: &[Param::object("options")],
    options: Some("options"),
    whitelist: PAGING,
    ..BASE
};

pub const GET_CONTRACT: Endpoint = Endpoint {
    name: "kip17.contract",
    path: "/contract/{contract-address-or-alias}",
    params: &[Param::required("alias")],
    path_fields: &[CONTRACT],
    ..BASE
};

pub const UPDATE_CONTRACT_OPTIONS: Endpoint = Endpoint {
    name: "kip17.update_contract_options",
    method: HttpMethod::Put,
    path: "/contract/{contract-address-or-alias}",
    params: &[Param::required("alias"), Param::polymorphic("options")],
    path_fields: &[CONTRACT],
    body_fields: &[Field::named("options", Encoding::FeePayer)],
    ..BASE
};

pub const MINT: Endpoint = Endpoint {
    name: "kip17.mint",
    method: HttpMethod::Post,
    path: "/contract/{contract-address-or-alias}/token",
    params: &[
        Param::required("alias"),
        Param::required("to"),
        Param::required("tokenId"),
        Param::required("tokenUri"),
    ],
    path_fields: &[CONTRACT],
    body_fields: &[
        Field::named("to", Encoding::Text),
        Field::new("id", "tokenId", Encoding::Id),
        Field::new("uri", "tokenUri", Encoding::Text),
    ],
    ..BASE
};

pub const TOKEN_LIST: Endpoint = Endpoint {
    name: "kip17.token_list",
    path: "/contract/{contract-address-or-alias}/token",
    params: &[Param::required("alias"), Param::object("options")],
    path_fields: &[CONTRACT],
    options: Some("options"),
    whitelist: PAGING,
    ..BASE
};

pub const GET_TOKEN: Endpoint = Endpoint {
    name: "kip17.token",
    path: "/contract/{contract-address-or-alias}/token/{token-id}",
    params: &[Param::required("alias"), Param::required("tokenId")],
    path_fields: &[CONTRACT, TOKEN_ID],
    ..BASE
};

pub const TRANSFER: Endpoint = Endpoint {
    name: "kip17.transfer",
    method: HttpMethod::Put,
    path: "/contract/{contract-address-or-alias}/token/{token-id}",
    params: &[
        Param::required("alias"),
        Param::required("sender"),
        Param::required("owner"),
        Param::required("to"),
        Param::required("tokenId"),
    ],
    path_fields: &[CONTRACT, TOKEN_ID],
    body_fields: &[
        Field::named("sender", Encoding::Text),
        Field::named("owner", Encoding::Text),
        Field::named("to", Encoding::Text),
    ],
    ..BASE
};

pub const BURN: Endpoint = Endpoint {
    name: "kip17.burn",
    method: HttpMethod::Delete,
    path: "/contract/{contract-address-or-alias}/token/{token-id}",
    params: &[
        Param::required("alias"),
        Param::required("from"),
        Param::required("tokenId"),
    ],
    path_fields: &[CONTRACT, TOKEN_ID],
    body_fields: &[Field::named("from", Encoding::Text)],
    ..BASE
};

pub const APPROVE: Endpoint = Endpoint {
    name: "kip17.approve",
    method: HttpMethod::Post,
    path: "/contract/{contract-address-or-alias}/approve/{token-id}",
    params: &[
        Param::required("alias"),
        Param::required("from"),
        Param::required("to"),
        Param::required("tokenId"),
    ],
    path_fields: &[CONTRACT, TOKEN_ID],
    body_fields: &[
        Field::named("from", Encoding::Text),
        Field::named("to", Encoding::Text),
    ],
    ..BASE
};

pub const APPROVE_ALL: Endpoint = Endpoint {
    name: "kip17.approve_all",
    method: HttpMethod::Post,
    path: "/contract/{contract-address-or-alias}/approveall",
    params: &[
        Param::required("alias"),
        Param::required("from"),
        Param::required("to"),
        Param::required("approved"),
    ],
    path_fields: &[CONTRACT],
    body_fields: &[
        Field::named("from", Encoding::Text),
        Field::named("to", Encoding::Text),
        Field::named("approved", Encoding::Plain),
    ],
    ..BASE
};

pub const TOKEN_LIST_BY_OWNER: Endpoint = Endpoint {
    name: "kip17.token_list_by_owner",
    path: "/contract/{contract-address-or-alias}/owner/{owner-address}",
    params: &[
        Param::required("alias"),
        Param::required("owner"),
        Param::object("options"),
    ],
    path_fields: &[CONTRACT, Field::new("owner-address", "owner", Encoding::Text)],
    options: Some("options"),
    whitelist: PAGING,
    ..BASE
};

pub const TRANSFER_HISTORY: Endpoint = Endpoint {
    name: "kip17.transfer_history",
    path: "/contract/{contract-address-or-alias}/token/{token-id}/history",
    params: &[
        Param::required("alias"),
        Param::required("tokenId"),
        Param::object("options"),
    ],
    path_fields: &[CONTRACT, TOKEN_ID],
    options: Some("options"),
    whitelist: PAGING,
    ..BASE
};

pub(crate) const ENDPOINTS: &[&Endpoint] = &[
    &DEPLOY,
    &CONTRACT_LIST,
    &GET_CONTRACT,
    &UPDATE_CONTRACT_OPTIONS,
    &MINT,
    &TOKEN_LIST,
    &GET_TOKEN,
    &TRANSFER,
    &BURN,
    &APPROVE,
    &APPROVE_ALL,
    &TOKEN_LIST_BY_OWNER,
    &TRANSFER_HISTORY,
];

// ============================================================================
// Kip17
// ============================================================================

/// Client for the KIP-17 API.
///
/// Create via [`Kas::kip17()`](crate::Kas::kip17). Contracts are addressed
/// by address or by the alias chosen at deployment.
///
/// # Example
///
/// ```rust,no_run
/// use kas_kit::*;
///
/// # async fn example(kas: Kas) -> Result<(), Error> {
/// let kip17 = kas.kip17()?;
///
/// let result = kip17
///     .mint("my-nft", "0x60498fEFBF1705A3Db8d7Bb5c80D5238956343e5", 1, "https://example.com/1.json")?
///     .await?;
/// println!("submitted {}", result.transaction_hash);
///
/// let token = kip17.token("my-nft", "0x1")?.await?;
/// println!("owner: {}", token.owner);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Kip17 {
    facade: Facade,
}

super::impl_resource!(Kip17, Service::Kip17);

impl Kip17 {
    /// Deploy a KIP-17 contract.
    pub fn deploy(
        &self,
        name: impl Into<String>,
        symbol: impl Into<String>,
        alias: impl Into<String>,
        options: impl Into<Option<ContractOptions>>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(
            &DEPLOY,
            args![name.into(), symbol.into(), alias.into(), options.into()],
        )
    }

    /// List the contracts deployed by this account.
    pub fn contract_list(
        &self,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<Kip17Contract>>, Error> {
        self.facade.prepare(&CONTRACT_LIST, args![options.into()])
    }

    pub fn contract(&self, alias: impl Into<String>) -> Result<Call<Kip17Contract>, Error> {
        self.facade.prepare(&GET_CONTRACT, args![alias.into()])
    }

    /// Replace the fee-payer options of a contract.
    pub fn update_contract_options(
        &self,
        alias: impl Into<String>,
        options: ContractOptions,
    ) -> Result<Call<Kip17Contract>, Error> {
        self.facade
            .prepare(&UPDATE_CONTRACT_OPTIONS, args![alias.into(), options])
    }

    /// Mint token `token_id` to `to`.
    pub fn mint(
        &self,
        alias: impl Into<String>,
        to: impl Into<String>,
        token_id: impl Into<IdentifierValue>,
        token_uri: impl Into<String>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(
            &MINT,
            args![alias.into(), to.into(), Arg::id(token_id), token_uri.into()],
        )
    }

    pub fn token_list(
        &self,
        alias: impl Into<String>,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<Kip17Token>>, Error> {
        self.facade
            .prepare(&TOKEN_LIST, args![alias.into(), options.into()])
    }

    pub fn token(
        &self,
        alias: impl Into<String>,
        token_id: impl Into<IdentifierValue>,
    ) -> Result<Call<Kip17Token>, Error> {
        self.facade
            .prepare(&GET_TOKEN, args![alias.into(), Arg::id(token_id)])
    }

    /// Transfer a token owned by `owner`; `sender` is the owner or an
    /// approved operator.
    pub fn transfer(
        &self,
        alias: impl Into<String>,
        sender: impl Into<String>,
        owner: impl Into<String>,
        to: impl Into<String>,
        token_id: impl Into<IdentifierValue>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(
            &TRANSFER,
            args![
                alias.into(),
                sender.into(),
                owner.into(),
                to.into(),
                Arg::id(token_id)
            ],
        )
    }

    pub fn burn(
        &self,
        alias: impl Into<String>,
        from: impl Into<String>,
        token_id: impl Into<IdentifierValue>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(
            &BURN,
            args![alias.into(), from.into(), Arg::id(token_id)],
        )
    }

    /// Approve `to` to transfer one token.
    pub fn approve(
        &self,
        alias: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        token_id: impl Into<IdentifierValue>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(
            &APPROVE,
            args![alias.into(), from.into(), to.into(), Arg::id(token_id)],
        )
    }

    /// Grant or revoke operator rights over every token of `from`.
    pub fn approve_all(
        &self,
        alias: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        approved: bool,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(
            &APPROVE_ALL,
            args![alias.into(), from.into(), to.into(), approved],
        )
    }

    pub fn token_list_by_owner(
        &self,
        alias: impl Into<String>,
        owner: impl Into<String>,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<Kip17Token>>, Error> {
        self.facade.prepare(
            &TOKEN_LIST_BY_OWNER,
            args![alias.into(), owner.into(), options.into()],
        )
    }

    /// Ownership changes of one token, newest first.
    pub fn transfer_history(
        &self,
        alias: impl Into<String>,
        token_id: impl Into<IdentifierValue>,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<Kip17TransferRecord>>, Error> {
        self.facade.prepare(
            &TRANSFER_HISTORY,
            args![alias.into(), Arg::id(token_id), options.into()],
        )
    }
}
