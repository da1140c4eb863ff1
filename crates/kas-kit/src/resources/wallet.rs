//! Wallet API: KAS-managed accounts, transactions signed by KAS, multisig
//! and fee payer accounts.

use serde_json::Value;

use crate::client::{Arg, Call, Encoding, Endpoint, Facade, Field, Literal, Param};
use crate::error::Error;
use crate::types::{
    Account, AccountCount, HttpMethod, IdentifierValue, OptionKey, Page, QueryOptions, Service,
    WalletTransaction,
};
use crate::args;

const ADDRESS: Field = Field::new("address", "address", Encoding::Text);
const TIMED_PAGING: &[OptionKey] = &[
    OptionKey::Size,
    OptionKey::Cursor,
    OptionKey::FromTimestamp,
    OptionKey::ToTimestamp,
];

const BASE: Endpoint = Endpoint {
    service: Service::Wallet,
    ..Endpoint::BLANK
};

const SUBMIT: Param = Param::optional_or("submit", Literal::Bool(true));
const ZERO_VALUE: Param = Param::optional_or("value", Literal::Str("0x0"));

const TX_BODY: &[Field] = &[
    Field::named("from", Encoding::Text),
    Field::named("to", Encoding::Text),
    Field::named("value", Encoding::Id),
    Field::named("input", Encoding::Text),
    Field::named("memo", Encoding::Text),
    Field::named("nonce", Encoding::Plain),
    Field::named("gasLimit", Encoding::Plain),
    Field::named("submit", Encoding::Plain),
];

const FD_TX_BODY: &[Field] = &[
    Field::named("from", Encoding::Text),
    Field::named("to", Encoding::Text),
    Field::named("value", Encoding::Id),
    Field::named("input", Encoding::Text),
    Field::named("memo", Encoding::Text),
    Field::named("nonce", Encoding::Plain),
    Field::named("gasLimit", Encoding::Plain),
    Field::named("submit", Encoding::Plain),
    Field::named("feeRatio", Encoding::Plain),
];

// ============================================================================
// Endpoints: accounts
// ============================================================================

pub const CREATE_ACCOUNT: Endpoint = Endpoint {
    name: "wallet.create_account",
    method: HttpMethod::Post,
    path: "/account",
    ..BASE
};

pub const ACCOUNT_LIST: Endpoint = Endpoint {
    name: "wallet.account_list",
    path: "/account",
    params: &[Param::object("options")],
    options: Some("options"),
    whitelist: TIMED_PAGING,
    ..BASE
};

pub const GET_ACCOUNT: Endpoint = Endpoint {
    name: "wallet.account",
    path: "/account/{address}",
    params: &[Param::required("address")],
    path_fields: &[ADDRESS],
    ..BASE
};

pub const DELETE_ACCOUNT: Endpoint = Endpoint {
    name: "wallet.delete_account",
    method: HttpMethod::Delete,
    ..GET_ACCOUNT
};

pub const ENABLE_ACCOUNT: Endpoint = Endpoint {
    name: "wallet.enable_account",
    method: HttpMethod::Put,
    path: "/account/{address}/enable",
    ..GET_ACCOUNT
};

pub const DISABLE_ACCOUNT: Endpoint = Endpoint {
    name: "wallet.disable_account",
    method: HttpMethod::Put,
    path: "/account/{address}/disable",
    ..GET_ACCOUNT
};

pub const ACCOUNT_COUNT: Endpoint = Endpoint {
    name: "wallet.account_count",
    path: "/stat/count",
    ..BASE
};

// ============================================================================
// Endpoints: transactions
// ============================================================================

pub const VALUE_TRANSFER: Endpoint = Endpoint {
    name: "wallet.value_transfer",
    method: HttpMethod::Post,
    path: "/tx/value",
    params: &[
        Param::required("from"),
        Param::required("to"),
        Param::required("value"),
        Param::optional("input"),
        Param::optional("memo"),
        Param::optional("nonce"),
        Param::optional("gasLimit"),
        SUBMIT,
    ],
    body_fields: TX_BODY,
    ..BASE
};

pub const FD_VALUE_TRANSFER: Endpoint = Endpoint {
    name: "wallet.fd_value_transfer",
    path: "/tx/fd/value",
    params: &[
        Param::required("from"),
        Param::required("to"),
        Param::required("value"),
        Param::optional("input"),
        Param::optional("memo"),
        Param::optional("nonce"),
        Param::optional("gasLimit"),
        SUBMIT,
        Param::optional("feeRatio"),
    ],
    body_fields: FD_TX_BODY,
    ..VALUE_TRANSFER
};

pub const CONTRACT_DEPLOY: Endpoint = Endpoint {
    name: "wallet.contract_deploy",
    method: HttpMethod::Post,
    path: "/tx/contract/deploy",
    params: &[
        Param::required("from"),
        Param::optional("to"),
        ZERO_VALUE,
        Param::required("input"),
        Param::optional("memo"),
        Param::optional("nonce"),
        Param::optional("gasLimit"),
        SUBMIT,
    ],
    body_fields: TX_BODY,
    ..BASE
};

pub const FD_CONTRACT_DEPLOY: Endpoint = Endpoint {
    name: "wallet.fd_contract_deploy",
    path: "/tx/fd/contract/deploy",
    params: &[
        Param::required("from"),
        Param::optional("to"),
        ZERO_VALUE,
        Param::required("input"),
        Param::optional("memo"),
        Param::optional("nonce"),
        Param::optional("gasLimit"),
        SUBMIT,
        Param::optional("feeRatio"),
    ],
    body_fields: FD_TX_BODY,
    ..CONTRACT_DEPLOY
};

pub const CONTRACT_EXECUTION: Endpoint = Endpoint {
    name: "wallet.contract_execution",
    method: HttpMethod::Post,
    path: "/tx/contract/execute",
    params: &[
        Param::required("from"),
        Param::required("to"),
        ZERO_VALUE,
        Param::required("input"),
        Param::optional("memo"),
        Param::optional("nonce"),
        Param::optional("gasLimit"),
        SUBMIT,
    ],
    body_fields: TX_BODY,
    ..BASE
};

pub const FD_CONTRACT_EXECUTION: Endpoint = Endpoint {
    name: "wallet.fd_contract_execution",
    path: "/tx/fd/contract/execute",
    params: &[
        Param::required("from"),
        Param::required("to"),
        ZERO_VALUE,
        Param::required("input"),
        Param::optional("memo"),
        Param::optional("nonce"),
        Param::optional("gasLimit"),
        SUBMIT,
        Param::optional("feeRatio"),
    ],
    body_fields: FD_TX_BODY,
    ..CONTRACT_EXECUTION
};

pub const TRANSACTION_RECEIPT: Endpoint = Endpoint {
    name: "wallet.transaction_receipt",
    path: "/tx/{transaction-hash}",
    params: &[Param::required("transactionHash")],
    path_fields: &[Field::new("transaction-hash", "transactionHash", Encoding::Text)],
    ..BASE
};

pub const MULTISIG_TRANSACTION_LIST: Endpoint = Endpoint {
    name: "wallet.multisig_transaction_list",
    path: "/multisig/account/{address}/tx",
    params: &[Param::required("address"), Param::object("options")],
    path_fields: &[ADDRESS],
    options: Some("options"),
    whitelist: TIMED_PAGING,
    ..BASE
};

pub const SIGN_MULTISIG_TRANSACTION: Endpoint = Endpoint {
    name: "wallet.sign_multisig_transaction",
    method: HttpMethod::Post,
    path: "/multisig/account/{address}/tx/{transaction-id}/sign",
    params: &[Param::required("address"), Param::required("transactionId")],
    path_fields: &[
        ADDRESS,
        Field::new("transaction-id", "transactionId", Encoding::Text),
    ],
    ..BASE
};

// ============================================================================
// Endpoints: fee payers
// ============================================================================

pub const CREATE_FEE_PAYER: Endpoint = Endpoint {
    name: "wallet.create_fee_payer",
    method: HttpMethod::Post,
    path: "/feepayer",
    params: &[Param::optional("withoutAccountUpdate")],
    body_fields: &[Field::named("withoutAccountUpdate", Encoding::Plain)],
    ..BASE
};

pub const FEE_PAYER_LIST: Endpoint = Endpoint {
    name: "wallet.fee_payer_list",
    path: "/feepayer",
    params: &[Param::object("options")],
    options: Some("options"),
    whitelist: TIMED_PAGING,
    ..BASE
};

pub const GET_FEE_PAYER: Endpoint = Endpoint {
    name: "wallet.fee_payer",
    path: "/feepayer/{address}",
    params: &[Param::required("address")],
    path_fields: &[ADDRESS],
    ..BASE
};

pub const DELETE_FEE_PAYER: Endpoint = Endpoint {
    name: "wallet.delete_fee_payer",
    method: HttpMethod::Delete,
    ..GET_FEE_PAYER
};

pub(crate) const ENDPOINTS: &[&Endpoint] = &[
    &CREATE_ACCOUNT,
    &ACCOUNT_LIST,
    &GET_ACCOUNT,
    &DELETE_ACCOUNT,
    &ENABLE_ACCOUNT,
    &DISABLE_ACCOUNT,
    &ACCOUNT_COUNT,
    &VALUE_TRANSFER,
    &FD_VALUE_TRANSFER,
    &CONTRACT_DEPLOY,
    &FD_CONTRACT_DEPLOY,
    &CONTRACT_EXECUTION,
    &FD_CONTRACT_EXECUTION,
    &TRANSACTION_RECEIPT,
    &MULTISIG_TRANSACTION_LIST,
    &SIGN_MULTISIG_TRANSACTION,
    &CREATE_FEE_PAYER,
    &FEE_PAYER_LIST,
    &GET_FEE_PAYER,
    &DELETE_FEE_PAYER,
];

// ============================================================================
// Transaction requests
// ============================================================================

/// Fields shared by every transaction request.
#[derive(Clone, Debug, Default)]
struct TxFields {
    from: String,
    to: Option<String>,
    value: Option<IdentifierValue>,
    input: Option<String>,
    memo: Option<String>,
    nonce: Option<u64>,
    gas_limit: Option<u64>,
    submit: Option<bool>,
}

impl TxFields {
    fn into_args(self, fee_ratio: Option<Option<u8>>) -> Vec<Arg> {
        let mut list = args![
            self.from,
            self.to,
            self.value.map(Arg::id),
            self.input,
            self.memo,
            self.nonce,
            self.gas_limit,
            self.submit
        ];
        if let Some(ratio) = fee_ratio {
            list.push(ratio.into());
        }
        list
    }
}

macro_rules! tx_setters {
    ($name:ident) => {
        impl $name {
            /// Nonce to sign with; KAS picks the next one when unset.
            pub fn nonce(mut self, nonce: u64) -> Self {
                self.0.nonce = Some(nonce);
                self
            }

            pub fn gas_limit(mut self, gas_limit: u64) -> Self {
                self.0.gas_limit = Some(gas_limit);
                self
            }

            /// Sign only, without submitting to the network. Defaults to
            /// submitting.
            pub fn submit(mut self, submit: bool) -> Self {
                self.0.submit = Some(submit);
                self
            }
        }
    };
}

/// A KLAY transfer from a KAS-managed account.
///
/// # Example
///
/// ```
/// use kas_kit::ValueTransfer;
///
/// let tx = ValueTransfer::new("0xfrom", "0xto", 1_000_000_000_000_000_000u128)
///     .memo("rent")
///     .gas_limit(25_000);
/// ```
#[derive(Clone, Debug)]
pub struct ValueTransfer(TxFields);

impl ValueTransfer {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        value: impl Into<IdentifierValue>,
    ) -> Self {
        Self(TxFields {
            from: from.into(),
            to: Some(to.into()),
            value: Some(value.into()),
            ..TxFields::default()
        })
    }

    /// Attach data to the transfer.
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.0.memo = Some(memo.into());
        self
    }
}

tx_setters!(ValueTransfer);

/// A smart contract deployment from a KAS-managed account.
#[derive(Clone, Debug)]
pub struct ContractDeploy(TxFields);

impl ContractDeploy {
    /// `input` is the hex-encoded bytecode plus constructor arguments.
    pub fn new(from: impl Into<String>, input: impl Into<String>) -> Self {
        Self(TxFields {
            from: from.into(),
            input: Some(input.into()),
            ..TxFields::default()
        })
    }

    /// KLAY sent to a payable constructor.
    pub fn value(mut self, value: impl Into<IdentifierValue>) -> Self {
        self.0.value = Some(value.into());
        self
    }
}

tx_setters!(ContractDeploy);

/// A smart contract call from a KAS-managed account.
#[derive(Clone, Debug)]
pub struct ContractExecution(TxFields);

impl ContractExecution {
    /// `input` is the hex-encoded call data.
    pub fn new(from: impl Into<String>, to: impl Into<String>, input: impl Into<String>) -> Self {
        Self(TxFields {
            from: from.into(),
            to: Some(to.into()),
            input: Some(input.into()),
            ..TxFields::default()
        })
    }

    pub fn value(mut self, value: impl Into<IdentifierValue>) -> Self {
        self.0.value = Some(value.into());
        self
    }
}

tx_setters!(ContractExecution);

// ============================================================================
// Wallet
// ============================================================================

/// Client for the wallet API.
///
/// # Example
///
/// ```rust,no_run
/// use kas_kit::*;
///
/// # async fn example(kas: Kas) -> Result<(), Error> {
/// let wallet = kas.wallet()?;
///
/// let account = wallet.create_account()?.await?;
/// let tx = ValueTransfer::new(&account.address, "0x60498fEFBF1705A3Db8d7Bb5c80D5238956343e5", 1);
/// let sent = wallet.fee_delegated_value_transfer(tx, None)?.await?;
/// println!("tx: {}", sent.transaction_hash);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Wallet {
    facade: Facade,
}

super::impl_resource!(Wallet, Service::Wallet);

impl Wallet {
    // ------------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------------

    /// Create a new account whose key is held by KAS.
    pub fn create_account(&self) -> Result<Call<Account>, Error> {
        self.facade.prepare(&CREATE_ACCOUNT, args![])
    }

    pub fn account_list(
        &self,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<Account>>, Error> {
        self.facade.prepare(&ACCOUNT_LIST, args![options.into()])
    }

    pub fn account(&self, address: impl Into<String>) -> Result<Call<Account>, Error> {
        self.facade.prepare(&GET_ACCOUNT, args![address.into()])
    }

    pub fn delete_account(&self, address: impl Into<String>) -> Result<Call<Value>, Error> {
        self.facade.prepare(&DELETE_ACCOUNT, args![address.into()])
    }

    pub fn enable_account(&self, address: impl Into<String>) -> Result<Call<Account>, Error> {
        self.facade.prepare(&ENABLE_ACCOUNT, args![address.into()])
    }

    pub fn disable_account(&self, address: impl Into<String>) -> Result<Call<Account>, Error> {
        self.facade.prepare(&DISABLE_ACCOUNT, args![address.into()])
    }

    pub fn account_count(&self) -> Result<Call<AccountCount>, Error> {
        self.facade.prepare(&ACCOUNT_COUNT, args![])
    }

    // ------------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------------

    pub fn value_transfer(&self, tx: ValueTransfer) -> Result<Call<WalletTransaction>, Error> {
        self.facade.prepare(&VALUE_TRANSFER, tx.0.into_args(None))
    }

    /// A value transfer whose fee is paid by the KAS fee payer, fully
    /// (`fee_ratio` of `None`) or in part.
    pub fn fee_delegated_value_transfer(
        &self,
        tx: ValueTransfer,
        fee_ratio: Option<u8>,
    ) -> Result<Call<WalletTransaction>, Error> {
        self.facade
            .prepare(&FD_VALUE_TRANSFER, tx.0.into_args(Some(fee_ratio)))
    }

    pub fn contract_deploy(&self, tx: ContractDeploy) -> Result<Call<WalletTransaction>, Error> {
        self.facade.prepare(&CONTRACT_DEPLOY, tx.0.into_args(None))
    }

    pub fn fee_delegated_contract_deploy(
        &self,
        tx: ContractDeploy,
        fee_ratio: Option<u8>,
    ) -> Result<Call<WalletTransaction>, Error> {
        self.facade
            .prepare(&FD_CONTRACT_DEPLOY, tx.0.into_args(Some(fee_ratio)))
    }

    pub fn contract_execution(
        &self,
        tx: ContractExecution,
    ) -> Result<Call<WalletTransaction>, Error> {
        self.facade
            .prepare(&CONTRACT_EXECUTION, tx.0.into_args(None))
    }

    pub fn fee_delegated_contract_execution(
        &self,
        tx: ContractExecution,
        fee_ratio: Option<u8>,
    ) -> Result<Call<WalletTransaction>, Error> {
        self.facade
            .prepare(&FD_CONTRACT_EXECUTION, tx.0.into_args(Some(fee_ratio)))
    }

    /// The receipt of a transaction, as reported by the node.
    pub fn transaction_receipt(
        &self,
        transaction_hash: impl Into<String>,
    ) -> Result<Call<Value>, Error> {
        self.facade
            .prepare(&TRANSACTION_RECEIPT, args![transaction_hash.into()])
    }

    // ------------------------------------------------------------------------
    // Multisig
    // ------------------------------------------------------------------------

    /// Multisig transactions waiting for a signature from `address`.
    pub fn multisig_transaction_list(
        &self,
        address: impl Into<String>,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<Value>>, Error> {
        self.facade.prepare(
            &MULTISIG_TRANSACTION_LIST,
            args![address.into(), options.into()],
        )
    }

    pub fn sign_multisig_transaction(
        &self,
        address: impl Into<String>,
        transaction_id: impl Into<String>,
    ) -> Result<Call<Value>, Error> {
        self.facade.prepare(
            &SIGN_MULTISIG_TRANSACTION,
            args![address.into(), transaction_id.into()],
        )
    }

    // ------------------------------------------------------------------------
    // Fee payers
    // ------------------------------------------------------------------------

    /// Create a fee payer account. With `without_account_update` the
    /// account keeps its default key instead of a role-based one.
    pub fn create_fee_payer(
        &self,
        without_account_update: Option<bool>,
    ) -> Result<Call<Account>, Error> {
        self.facade
            .prepare(&CREATE_FEE_PAYER, args![without_account_update])
    }

    pub fn fee_payer_list(
        &self,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Call<Page<Account>>, Error> {
        self.facade.prepare(&FEE_PAYER_LIST, args![options.into()])
    }

    pub fn fee_payer(&self, address: impl Into<String>) -> Result<Call<Account>, Error> {
        self.facade.prepare(&GET_FEE_PAYER, args![address.into()])
    }

    pub fn delete_fee_payer(&self, address: impl Into<String>) -> Result<Call<Value>, Error> {
        self.facade.prepare(&DELETE_FEE_PAYER, args![address.into()])
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::client::testing::Recorder;
    use crate::types::{AccessOptions, Chain};

    fn wallet() -> (Wallet, Arc<Recorder>) {
        let recorder = Recorder::new();
        let facade = Facade::new(
            AccessOptions::new(Chain::Testnet, "id", "secret"),
            recorder.clone(),
        );
        (Wallet::new(facade), recorder)
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    #[tokio::test]
    async fn test_create_account_has_no_body() {
        let (wallet, recorder) = wallet();
        recorder.reply(json!({ "address": "0xnew", "chainId": 1001, "krn": "krn:1001:wallet" }));

        let account = wallet.create_account().unwrap().await.unwrap();
        assert_eq!(account.address, "0xnew");

        let request = recorder.last();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.resolved_path(), "/account");
        assert!(request.body.is_none());
    }

    #[test]
    fn test_account_paths() {
        let (wallet, _) = wallet();
        let cases = [
            (wallet.enable_account("0xa").unwrap().request().clone(), HttpMethod::Put, "/account/0xa/enable"),
            (wallet.disable_account("0xa").unwrap().request().clone(), HttpMethod::Put, "/account/0xa/disable"),
            (wallet.delete_account("0xa").unwrap().request().clone(), HttpMethod::Delete, "/account/0xa"),
            (wallet.account_count().unwrap().request().clone(), HttpMethod::Get, "/stat/count"),
        ];
        for (request, method, path) in cases {
            assert_eq!(request.method, method);
            assert_eq!(request.resolved_path(), path);
        }
    }

    #[test]
    fn test_account_list_timestamps() {
        let (wallet, _) = wallet();
        let options = QueryOptions::builder()
            .from_timestamp(100)
            .to_timestamp(200)
            .build()
            .unwrap();
        let call = wallet.account_list(options).unwrap();
        assert_eq!(call.request().query("from-timestamp"), Some("100"));
        assert_eq!(call.request().query("to-timestamp"), Some("200"));
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    #[test]
    fn test_value_transfer_body() {
        let (wallet, _) = wallet();
        let tx = ValueTransfer::new("0xf", "0xt", 255).memo("hi").nonce(3);
        let call = wallet.value_transfer(tx).unwrap();
        assert_eq!(call.request().resolved_path(), "/tx/value");
        assert_eq!(
            call.request().body,
            Some(json!({
                "from": "0xf",
                "to": "0xt",
                "value": "0xff",
                "memo": "hi",
                "nonce": 3,
                "submit": true,
            }))
        );
    }

    #[test]
    fn test_fee_delegated_transfer_adds_ratio() {
        let (wallet, _) = wallet();
        let tx = ValueTransfer::new("0xf", "0xt", 1).submit(false);
        let call = wallet.fee_delegated_value_transfer(tx, Some(30)).unwrap();
        let request = call.request();
        assert_eq!(request.resolved_path(), "/tx/fd/value");
        let body = request.body.as_ref().unwrap();
        assert_eq!(body["feeRatio"], 30);
        assert_eq!(body["submit"], false);

        let tx = ValueTransfer::new("0xf", "0xt", 1);
        let call = wallet.fee_delegated_value_transfer(tx, None).unwrap();
        assert!(call.request().body.as_ref().unwrap().get("feeRatio").is_none());
    }

    #[test]
    fn test_contract_deploy_defaults_value() {
        let (wallet, _) = wallet();
        let call = wallet
            .contract_deploy(ContractDeploy::new("0xf", "0x6080").gas_limit(1_000_000))
            .unwrap();
        assert_eq!(
            call.request().body,
            Some(json!({
                "from": "0xf",
                "value": "0x0",
                "input": "0x6080",
                "gasLimit": 1_000_000,
                "submit": true,
            }))
        );
    }

    #[test]
    fn test_contract_execution_paths() {
        let (wallet, _) = wallet();
        let tx = ContractExecution::new("0xf", "0xc", "0xa9059cbb").value("10");
        let call = wallet.contract_execution(tx.clone()).unwrap();
        assert_eq!(call.request().resolved_path(), "/tx/contract/execute");
        assert_eq!(call.request().body.as_ref().unwrap()["value"], "0xa");

        let call = wallet.fee_delegated_contract_execution(tx, None).unwrap();
        assert_eq!(call.request().resolved_path(), "/tx/fd/contract/execute");
    }

    #[test]
    fn test_multisig_paths() {
        let (wallet, _) = wallet();
        let call = wallet.sign_multisig_transaction("0xa", "0xtxid").unwrap();
        assert_eq!(call.request().method, HttpMethod::Post);
        assert_eq!(
            call.request().resolved_path(),
            "/multisig/account/0xa/tx/0xtxid/sign"
        );
    }

    // ========================================================================
    // Fee payers
    // ========================================================================

    #[test]
    fn test_create_fee_payer() {
        let (wallet, _) = wallet();
        let call = wallet.create_fee_payer(None).unwrap();
        assert_eq!(call.request().body, Some(json!({})));

        let call = wallet.create_fee_payer(Some(true)).unwrap();
        assert_eq!(
            call.request().body,
            Some(json!({ "withoutAccountUpdate": true }))
        );
    }
}
