//! KIP-37 (multi token) API.

use crate::args;
use crate::client::{Arg, Call, Encoding, Endpoint, Facade, Field, Param};
use crate::error::Error;
use crate::types::{
    ContractOptions, HttpMethod, IdentifierValue, Kip37Contract, Kip37Token, OptionKey, Page,
    QueryOptions, Service, TransactionResult,
};

const CONTRACT: Field = Field::new("contract-address-or-alias", "alias", Encoding::Text);
const IDS: Field = Field::named("ids", Encoding::IdList);
const AMOUNTS: Field = Field::named("amounts", Encoding::IdList);

const BASE: Endpoint = Endpoint {
    service: Service::Kip37,
    ..Endpoint::BLANK
};

// ============================================================================
// Endpoints
// ============================================================================

pub const DEPLOY: Endpoint = Endpoint {
    name: "kip37.deploy",
    method: HttpMethod::Post,
    path: "/contract",
    params: &[
        Param::required("alias"),
        Param::required("uri"),
        Param::polymorphic("options"),
    ],
    body_fields: &[
        Field::named("alias", Encoding::Text),
        Field::named("uri", Encoding::Text),
        Field::named("options", Encoding::FeePayer),
    ],
    ..BASE
};

pub const CONTRACT_LIST: Endpoint = Endpoint {
    name: "kip37.contract_list",
    path: "/contract",
    params: &[Param::object("options")],
    options: Some("options"),
    whitelist: &[OptionKey::Size, OptionKey::Cursor, OptionKey::Status],
    ..BASE
};

pub const GET_CONTRACT: Endpoint = Endpoint {
    name: "kip37.contract",
    path: "/contract/{contract-address-or-alias}",
    params: &[Param::required("alias")],
    path_fields: &[CONTRACT],
    ..BASE
};

pub const MINT: Endpoint = Endpoint {
    name: "kip37.mint",
    method: HttpMethod::Post,
    path: "/contract/{contract-address-or-alias}/mint",
    params: &[
        Param::required("alias"),
        Param::required("to"),
        Param::required("ids"),
        Param::required("amounts"),
        Param::optional("sender"),
    ],
    path_fields: &[CONTRACT],
    body_fields: &[
        Field::named("to", Encoding::Text),
        IDS,
        AMOUNTS,
        Field::named("sender", Encoding::Text),
    ],
    ..BASE
};

pub const TRANSFER: Endpoint = Endpoint {
    name: "kip37.transfer",
    method: HttpMethod::Post,
    path: "/contract/{contract-address-or-alias}/token/transfer",
    params: &[
        Param::required("alias"),
        Param::required("sender"),
        Param::required("owner"),
        Param::required("to"),
        Param::required("ids"),
        Param::required("amounts"),
    ],
    path_fields: &[CONTRACT],
    body_fields: &[
        Field::named("sender", Encoding::Text),
        Field::named("owner", Encoding::Text),
        Field::named("to", Encoding::Text),
        IDS,
        AMOUNTS,
    ],
    ..BASE
};

pub const BURN: Endpoint = Endpoint {
    name: "kip37.burn",
    method: HttpMethod::Delete,
    path: "/contract/{contract-address-or-alias}/token",
    params: &[
        Param::required("alias"),
        Param::required("from"),
        Param::required("ids"),
        Param::required("amounts"),
    ],
    path_fields: &[CONTRACT],
    body_fields: &[Field::named("from", Encoding::Text), IDS, AMOUNTS],
    ..BASE
};

pub const TOKEN_LIST_BY_OWNER: Endpoint = Endpoint {
    name: "kip37.token_list_by_owner",
    path: "/contract/{contract-address-or-alias}/owner/{owner-address}/token",
    params: &[
        Param::required("alias"),
        Param::required("owner"),
        Param::object("options"),
    ],
    path_fields: &[CONTRACT, Field::new("owner-address", "owner", Encoding::Text)],
    options: Some("options"),
    whitelist: &[OptionKey::Size, OptionKey::Cursor],
    ..BASE
};

pub const PAUSE: Endpoint = Endpoint {
    name: "kip37.pause",
    method: HttpMethod::Post,
    path: "/contract/{contract-address-or-alias}/pause",
    params: &[Param::required("alias"), Param::optional("sender")],
    path_fields: &[CONTRACT],
    body_fields: &[Field::named("sender", Encoding::Text)],
    ..BASE
};

pub(crate) const ENDPOINTS: &[&Endpoint] = &[
    &DEPLOY,
    &CONTRACT_LIST,
    &GET_CONTRACT,
    &MINT,
    &TRANSFER,
    &BURN,
    &TOKEN_LIST_BY_OWNER,
    &PAUSE,
];

// ============================================================================
// Kip37
// ============================================================================

/// Client for the KIP-37 API.
///
/// Batch operations take parallel `ids` and `amounts` lists, which must have
/// the same length.
///
/// # Example
///
/// ```rust,no_run
/// use kas_kit::*;
///
/// # async fn example(kas: Kas) -> Result<(), Error> {
/// let kip37 = kas.kip37()?;
/// kip37
///     .mint("my-items", "0x60498fEFBF1705A3Db8d7Bb5c80D5238956343e5", [1u64, 2], [10u64, 20], None)?
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Kip37 {
    facade: Facade,
}

super::impl_resource!(Kip37, Service::Kip37);

impl Kip37 {
    pub fn deploy(
        &self,
        alias: impl Into<String>,
        uri: impl Into<String>,
        options: impl Into<Option<ContractOptions>>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade
            .prepare(&DEPLOY, args![alias.into(), uri.into(), options.into()])
    }

    pub fn contract_list(
        &self,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<Kip37Contract>>, Error> {
        self.facade.prepare(&CONTRACT_LIST, args![options.into()])
    }

    pub fn contract(&self, alias: impl Into<String>) -> Result<Call<Kip37Contract>, Error> {
        self.facade.prepare(&GET_CONTRACT, args![alias.into()])
    }

    /// Mint `amounts[i]` of token `ids[i]` to `to`.
    pub fn mint<I, A>(
        &self,
        alias: impl Into<String>,
        to: impl Into<String>,
        ids: I,
        amounts: A,
        sender: Option<String>,
    ) -> Result<Call<TransactionResult>, Error>
    where
        I: IntoIterator,
        I::Item: Into<IdentifierValue>,
        A: IntoIterator,
        A::Item: Into<IdentifierValue>,
    {
        self.facade.prepare(
            &MINT,
            args![
                alias.into(),
                to.into(),
                Arg::ids(ids),
                Arg::ids(amounts),
                sender
            ],
        )
    }

    pub fn transfer<I, A>(
        &self,
        alias: impl Into<String>,
        sender: impl Into<String>,
        owner: impl Into<String>,
        to: impl Into<String>,
        ids: I,
        amounts: A,
    ) -> Result<Call<TransactionResult>, Error>
    where
        I: IntoIterator,
        I::Item: Into<IdentifierValue>,
        A: IntoIterator,
        A::Item: Into<IdentifierValue>,
    {
        self.facade.prepare(
            &TRANSFER,
            args![
                alias.into(),
                sender.into(),
                owner.into(),
                to.into(),
                Arg::ids(ids),
                Arg::ids(amounts)
            ],
        )
    }

    pub fn burn<I, A>(
        &self,
        alias: impl Into<String>,
        from: impl Into<String>,
        ids: I,
        amounts: A,
    ) -> Result<Call<TransactionResult>, Error>
    where
        I: IntoIterator,
        I::Item: Into<IdentifierValue>,
        A: IntoIterator,
        A::Item: Into<IdentifierValue>,
    {
        self.facade.prepare(
            &BURN,
            args![alias.into(), from.into(), Arg::ids(ids), Arg::ids(amounts)],
        )
    }

    pub fn token_list_by_owner(
        &self,
        alias: impl Into<String>,
        owner: impl Into<String>,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<Kip37Token>>, Error> {
        self.facade.prepare(
            &TOKEN_LIST_BY_OWNER,
            args![alias.into(), owner.into(), options.into()],
        )
    }

    pub fn pause(
        &self,
        alias: impl Into<String>,
        sender: Option<String>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(&PAUSE, args![alias.into(), sender])
    }
}
