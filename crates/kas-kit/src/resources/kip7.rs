//! KIP-7 (fungible token) API.
//!
//! Amounts and supplies are identifiers on the wire: pass any integer,
//! decimal or hex string, or [`U256`](alloy_primitives::U256).

use crate::args;
use crate::client::{Arg, Call, Encoding, Endpoint, Facade, Field, Param};
use crate::error::Error;
use crate::types::{
    ContractOptions, HttpMethod, IdentifierValue, Kip7Balance, Kip7Contract, OptionKey, Page,
    QueryOptions, Service, TransactionResult,
};

const CONTRACT: Field = Field::new("contract-address-or-alias", "alias", Encoding::Text);
const OWNER: Field = Field::new("owner", "owner", Encoding::Text);
const AMOUNT: Field = Field::named("amount", Encoding::Id);

const BASE: Endpoint = Endpoint {
    service: Service::Kip7,
    method: HttpMethod::Post,
    ..Endpoint::BLANK
};

// ============================================================================
// Endpoints
// ============================================================================

pub const DEPLOY: Endpoint = Endpoint {
    name: "kip7.deploy",
    path: "/contract",
    params: &[
        Param::required("name"),
        Param::required("symbol"),
        Param::required("decimals"),
        Param::required("initialSupply"),
        Param::required("alias"),
        Param::polymorphic("options"),
    ],
    body_fields: &[
        Field::named("alias", Encoding::Text),
        Field::named("name", Encoding::Text),
        Field::named("symbol", Encoding::Text),
        Field::named("decimals", Encoding::Plain),
        Field::named("initialSupply", Encoding::Id),
        Field::named("options", Encoding::FeePayer),
    ],
    ..BASE
};

pub const CONTRACT_LIST: Endpoint = Endpoint {
    name: "kip7.contract_list",
    method: HttpMethod::Get,
    path: "/contract",
    params: &[Param::object("options")],
    options: Some("options"),
    whitelist: &[OptionKey::Size, OptionKey::Cursor, OptionKey::Status],
    ..BASE
};

pub const GET_CONTRACT: Endpoint = Endpoint {
    name: "kip7.contract",
    method: HttpMethod::Get,
    path: "/contract/{contract-address-or-alias}",
    params: &[Param::required("alias")],
    path_fields: &[CONTRACT],
    ..BASE
};

pub const UPDATE_CONTRACT_OPTIONS: Endpoint = Endpoint {
    name: "kip7.update_contract_options",
    method: HttpMethod::Put,
    path: "/contract/{contract-address-or-alias}",
    params: &[Param::required("alias"), Param::polymorphic("options")],
    path_fields: &[CONTRACT],
    body_fields: &[Field::named("options", Encoding::FeePayer)],
    ..BASE
};

pub const BALANCE: Endpoint = Endpoint {
    name: "kip7.balance",
    method: HttpMethod::Get,
    path: "/contract/{contract-address-or-alias}/account/{owner}/balance",
    params: &[Param::required("alias"), Param::required("owner")],
    path_fields: &[CONTRACT, OWNER],
    ..BASE
};

pub const ALLOWANCE: Endpoint = Endpoint {
    name: "kip7.allowance",
    method: HttpMethod::Get,
    path: "/contract/{contract-address-or-alias}/account/{owner}/allowance/{spender}",
    params: &[
        Param::required("alias"),
        Param::required("owner"),
        Param::required("spender"),
    ],
    path_fields: &[CONTRACT, OWNER, Field::named("spender", Encoding::Text)],
    ..BASE
};

pub const TRANSFER: Endpoint = Endpoint {
    name: "kip7.transfer",
    path: "/contract/{contract-address-or-alias}/transfer",
    params: &[
        Param::required("alias"),
        Param::required("from"),
        Param::required("to"),
        Param::required("amount"),
    ],
    path_fields: &[CONTRACT],
    body_fields: &[
        Field::named("from", Encoding::Text),
        Field::named("to", Encoding::Text),
        AMOUNT,
    ],
    ..BASE
};

pub const TRANSFER_FROM: Endpoint = Endpoint {
    name: "kip7.transfer_from",
    path: "/contract/{contract-address-or-alias}/transfer-from",
    params: &[
        Param::required("alias"),
        Param::required("spender"),
        Param::required("owner"),
        Param::required("to"),
        Param::required("amount"),
    ],
    path_fields: &[CONTRACT],
    body_fields: &[
        Field::named("spender", Encoding::Text),
        Field::named("owner", Encoding::Text),
        Field::named("to", Encoding::Text),
        AMOUNT,
    ],
    ..BASE
};

pub const APPROVE: Endpoint = Endpoint {
    name: "kip7.approve",
    path: "/contract/{contract-address-or-alias}/approve",
    params: &[
        Param::required("alias"),
        Param::required("owner"),
        Param::required("spender"),
        Param::required("amount"),
    ],
    path_fields: &[CONTRACT],
    body_fields: &[
        Field::named("owner", Encoding::Text),
        Field::named("spender", Encoding::Text),
        AMOUNT,
    ],
    ..BASE
};

pub const MINT: Endpoint = Endpoint {
    name: "kip7.mint",
    path: "/contract/{contract-address-or-alias}/mint",
    params: &[
        Param::required("alias"),
        Param::required("to"),
        Param::required("amount"),
        Param::optional("minter"),
    ],
    path_fields: &[CONTRACT],
    body_fields: &[
        Field::named("to", Encoding::Text),
        AMOUNT,
        Field::named("minter", Encoding::Text),
    ],
    ..BASE
};

pub const BURN: Endpoint = Endpoint {
    name: "kip7.burn",
    path: "/contract/{contract-address-or-alias}/burn",
    params: &[
        Param::required("alias"),
        Param::required("from"),
        Param::required("amount"),
    ],
    path_fields: &[CONTRACT],
    body_fields: &[Field::named("from", Encoding::Text), AMOUNT],
    ..BASE
};

pub const BURN_FROM: Endpoint = Endpoint {
    name: "kip7.burn_from",
    path: "/contract/{contract-address-or-alias}/burn-from",
    params: &[
        Param::required("alias"),
        Param::required("spender"),
        Param::required("owner"),
        Param::required("amount"),
    ],
    path_fields: &[CONTRACT],
    body_fields: &[
        Field::named("spender", Encoding::Text),
        Field::named("owner", Encoding::Text),
        AMOUNT,
    ],
    ..BASE
};

pub const PAUSE: Endpoint = Endpoint {
    name: "kip7.pause",
    path: "/contract/{contract-address-or-alias}/pause",
    params: &[Param::required("alias"), Param::optional("pauser")],
    path_fields: &[CONTRACT],
    body_fields: &[Field::named("pauser", Encoding::Text)],
    ..BASE
};

pub const UNPAUSE: Endpoint = Endpoint {
    name: "kip7.unpause",
    path: "/contract/{contract-address-or-alias}/unpause",
    ..PAUSE
};

pub(crate) const ENDPOINTS: &[&Endpoint] = &[
    &DEPLOY,
    &CONTRACT_LIST,
    &GET_CONTRACT,
    &UPDATE_CONTRACT_OPTIONS,
    &BALANCE,
    &ALLOWANCE,
    &TRANSFER,
    &TRANSFER_FROM,
    &APPROVE,
    &MINT,
    &BURN,
    &BURN_FROM,
    &PAUSE,
    &UNPAUSE,
];

// ============================================================================
// Kip7
// ============================================================================

/// Client for the KIP-7 API.
///
/// # Example
///
/// ```rust,no_run
/// use kas_kit::*;
///
/// # async fn example(kas: Kas) -> Result<(), Error> {
/// let kip7 = kas.kip7()?;
///
/// let balance = kip7.balance("my-token", "0x60498fEFBF1705A3Db8d7Bb5c80D5238956343e5")?.await?;
/// println!("balance: {} ({} decimals)", balance.balance, balance.decimals);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Kip7 {
    facade: Facade,
}

super::impl_resource!(Kip7, Service::Kip7);

impl Kip7 {
    /// Deploy a KIP-7 contract.
    pub fn deploy(
        &self,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        initial_supply: impl Into<IdentifierValue>,
        alias: impl Into<String>,
        options: impl Into<Option<ContractOptions>>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(
            &DEPLOY,
            args![
                name.into(),
                symbol.into(),
                decimals,
                Arg::id(initial_supply),
                alias.into(),
                options.into()
            ],
        )
    }

    pub fn contract_list(
        &self,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<Kip7Contract>>, Error> {
        self.facade.prepare(&CONTRACT_LIST, args![options.into()])
    }

    pub fn contract(&self, alias: impl Into<String>) -> Result<Call<Kip7Contract>, Error> {
        self.facade.prepare(&GET_CONTRACT, args![alias.into()])
    }

    pub fn update_contract_options(
        &self,
        alias: impl Into<String>,
        options: ContractOptions,
    ) -> Result<Call<Kip7Contract>, Error> {
        self.facade
            .prepare(&UPDATE_CONTRACT_OPTIONS, args![alias.into(), options])
    }

    pub fn balance(
        &self,
        alias: impl Into<String>,
        owner: impl Into<String>,
    ) -> Result<Call<Kip7Balance>, Error> {
        self.facade
            .prepare(&BALANCE, args![alias.into(), owner.into()])
    }

    /// How much `spender` may still transfer on behalf of `owner`.
    pub fn allowance(
        &self,
        alias: impl Into<String>,
        owner: impl Into<String>,
        spender: impl Into<String>,
    ) -> Result<Call<Kip7Balance>, Error> {
        self.facade.prepare(
            &ALLOWANCE,
            args![alias.into(), owner.into(), spender.into()],
        )
    }

    pub fn transfer(
        &self,
        alias: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        amount: impl Into<IdentifierValue>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(
            &TRANSFER,
            args![alias.into(), from.into(), to.into(), Arg::id(amount)],
        )
    }

    /// Transfer from `owner` using the allowance granted to `spender`.
    pub fn transfer_from(
        &self,
        alias: impl Into<String>,
        spender: impl Into<String>,
        owner: impl Into<String>,
        to: impl Into<String>,
        amount: impl Into<IdentifierValue>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(
            &TRANSFER_FROM,
            args![
                alias.into(),
                spender.into(),
                owner.into(),
                to.into(),
                Arg::id(amount)
            ],
        )
    }

    pub fn approve(
        &self,
        alias: impl Into<String>,
        owner: impl Into<String>,
        spender: impl Into<String>,
        amount: impl Into<IdentifierValue>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(
            &APPROVE,
            args![alias.into(), owner.into(), spender.into(), Arg::id(amount)],
        )
    }

    /// Mint `amount` to `to`. The deployer mints when `minter` is `None`.
    pub fn mint(
        &self,
        alias: impl Into<String>,
        to: impl Into<String>,
        amount: impl Into<IdentifierValue>,
        minter: Option<String>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(
            &MINT,
            args![alias.into(), to.into(), Arg::id(amount), minter],
        )
    }

    pub fn burn(
        &self,
        alias: impl Into<String>,
        from: impl Into<String>,
        amount: impl Into<IdentifierValue>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(
            &BURN,
            args![alias.into(), from.into(), Arg::id(amount)],
        )
    }

    pub fn burn_from(
        &self,
        alias: impl Into<String>,
        spender: impl Into<String>,
        owner: impl Into<String>,
        amount: impl Into<IdentifierValue>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(
            &BURN_FROM,
            args![alias.into(), spender.into(), owner.into(), Arg::id(amount)],
        )
    }

    /// Pause the contract. The deployer pauses when `pauser` is `None`.
    pub fn pause(
        &self,
        alias: impl Into<String>,
        pauser: Option<String>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(&PAUSE, args![alias.into(), pauser])
    }

    pub fn unpause(
        &self,
        alias: impl Into<String>,
        pauser: Option<String>,
    ) -> Result<Call<TransactionResult>, Error> {
        self.facade.prepare(&UNPAUSE, args![alias.into(), pauser])
    }
}
