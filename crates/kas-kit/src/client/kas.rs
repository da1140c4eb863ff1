//! Main Kas client.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::args::Arg;
use super::call::Call;
use super::endpoint::Endpoint;
use super::facade::Facade;
use super::transport::{HttpTransport, RetryConfig, Transport};
use crate::error::Error;
use crate::resources::{Kip7, Kip17, Kip37, Metadata, TokenHistory, Wallet, find_endpoint};
use crate::types::{AccessOptions, Chain, Service};

/// Environment variable holding the chain id (`8217`, `1001`, `mainnet`, ...).
pub const ENV_CHAIN_ID: &str = "KAS_CHAIN_ID";
/// Environment variable holding the access key id.
pub const ENV_ACCESS_KEY_ID: &str = "KAS_ACCESS_KEY_ID";
/// Environment variable holding the secret access key.
pub const ENV_SECRET_ACCESS_KEY: &str = "KAS_SECRET_ACCESS_KEY";

/// The main client for the Klaytn API Service.
///
/// `Kas` is the single entry point for every KAS service. Each service is
/// reached through an accessor ([`kip17()`](Self::kip17),
/// [`wallet()`](Self::wallet), ...) that fails with
/// [`Error::NotInitialized`] unless the service was configured on the
/// builder.
///
/// # Example
///
/// ```rust,no_run
/// use kas_kit::*;
///
/// #[tokio::main]
/// async fn main() -> Result<(), kas_kit::Error> {
///     let kas = Kas::builder(Chain::Testnet, "access-key-id", "secret-access-key")
///         .production()
///         .build();
///
///     let contracts = kas.kip17()?.contract_list(None)?.await?;
///     for contract in contracts.items {
///         println!("{} ({})", contract.alias, contract.address);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Kas {
    facade: Facade,
    services: BTreeSet<Service>,
}

impl Kas {
    /// Create a builder for a chain and a KAS credential pair.
    pub fn builder(
        chain: impl Into<Chain>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> KasBuilder {
        KasBuilder::new(AccessOptions::new(chain, access_key_id, secret_access_key))
    }

    /// Create a client for every service from environment variables.
    ///
    /// Reads the following environment variables, which must all be set:
    /// - `KAS_CHAIN_ID`: `8217`, `1001`, `mainnet`, `testnet` or any chain id.
    /// - `KAS_ACCESS_KEY_ID`: the access key id.
    /// - `KAS_SECRET_ACCESS_KEY`: the secret access key.
    ///
    /// Every service is configured with its production endpoint.
    ///
    /// ```bash
    /// export KAS_CHAIN_ID=1001
    /// export KAS_ACCESS_KEY_ID=KASK...
    /// export KAS_SECRET_ACCESS_KEY=...
    /// ```
    ///
    /// ```rust,no_run
    /// # use kas_kit::*;
    /// # async fn example() -> Result<(), kas_kit::Error> {
    /// let kas = Kas::from_env()?;
    /// let count = kas.wallet()?.account_count()?.await?;
    /// println!("{} accounts", count.count);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a variable is missing or the chain id
    /// does not parse.
    pub fn from_env() -> Result<Kas, Error> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Kas, Error> {
        let chain = lookup(ENV_CHAIN_ID);
        let access_key_id = lookup(ENV_ACCESS_KEY_ID);
        let secret_access_key = lookup(ENV_SECRET_ACCESS_KEY);

        match (chain, access_key_id, secret_access_key) {
            (Some(chain), Some(access_key_id), Some(secret_access_key)) => {
                let chain: Chain = chain.parse()?;
                Ok(Kas::builder(chain, access_key_id, secret_access_key)
                    .production()
                    .build())
            }
            (chain, access_key_id, secret_access_key) => {
                let missing: Vec<&str> = [
                    (ENV_CHAIN_ID, chain.is_none()),
                    (ENV_ACCESS_KEY_ID, access_key_id.is_none()),
                    (ENV_SECRET_ACCESS_KEY, secret_access_key.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();
                Err(Error::Config(format!(
                    "{} must be set together; missing {}",
                    [ENV_CHAIN_ID, ENV_ACCESS_KEY_ID, ENV_SECRET_ACCESS_KEY].join(", "),
                    missing.join(", ")
                )))
            }
        }
    }

    /// The `Authorization` header value sent with every request.
    pub fn auth(&self) -> &str {
        self.facade.access().auth()
    }

    pub fn access_key_id(&self) -> &str {
        self.facade.access().access_key_id()
    }

    pub fn secret_access_key(&self) -> &str {
        self.facade.access().secret_access_key()
    }

    pub fn chain_id(&self) -> u64 {
        self.facade.access().chain_id()
    }

    pub fn access(&self) -> &AccessOptions {
        self.facade.access()
    }

    /// The transport every call is submitted to.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        self.facade.transport()
    }

    /// Returns true if `service` was configured on the builder.
    pub fn is_initialized(&self, service: Service) -> bool {
        self.services.contains(&service)
    }

    fn facade_for(&self, service: Service) -> Result<Facade, Error> {
        if self.is_initialized(service) {
            Ok(self.facade.clone())
        } else {
            Err(Error::NotInitialized(service))
        }
    }

    // ========================================================================
    // Services
    // ========================================================================

    pub fn wallet(&self) -> Result<Wallet, Error> {
        self.facade_for(Service::Wallet).map(Wallet::new)
    }

    pub fn kip7(&self) -> Result<Kip7, Error> {
        self.facade_for(Service::Kip7).map(Kip7::new)
    }

    pub fn kip17(&self) -> Result<Kip17, Error> {
        self.facade_for(Service::Kip17).map(Kip17::new)
    }

    pub fn kip37(&self) -> Result<Kip37, Error> {
        self.facade_for(Service::Kip37).map(Kip37::new)
    }

    pub fn token_history(&self) -> Result<TokenHistory, Error> {
        self.facade_for(Service::TokenHistory).map(TokenHistory::new)
    }

    pub fn metadata(&self) -> Result<Metadata, Error> {
        self.facade_for(Service::Metadata).map(Metadata::new)
    }

    // ========================================================================
    // Dynamic invocation
    // ========================================================================

    /// Call an endpoint with a variadic argument list.
    ///
    /// Arguments follow the endpoint's declared parameters; a callback may
    /// appear at any optional position and ends the list. The call resolves
    /// with the payload exactly as delivered, including `{ code, message }`
    /// service error payloads.
    ///
    /// The returned [`Call`] is lazy, including when the only argument is a
    /// callback: nothing is sent and the callback never runs unless the call
    /// is awaited, [`spawn`](Call::spawn)ed or driven through
    /// [`outcome`](Call::outcome). Dropping it discards the request. Use
    /// `spawn` for fire-and-forget callback code.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kas_kit::*;
    ///
    /// # async fn example(kas: Kas) -> Result<(), Error> {
    /// let data = kas
    ///     .invoke(
    ///         &kas_kit::resources::kip17::CONTRACT_LIST,
    ///         args![Arg::callback(|err, data, _| println!("{err:?} {data:?}"))],
    ///     )?
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn invoke(&self, endpoint: &Endpoint, args: Vec<Arg>) -> Result<Call<Value>, Error> {
        let facade = self.facade_for(endpoint.service)?;
        debug!(endpoint = endpoint.name, args = args.len(), "invoking endpoint");
        facade.prepare::<Value>(endpoint, args).map(Call::raw)
    }

    /// Like [`invoke`](Self::invoke), looking the endpoint up by name
    /// (e.g. `"kip17.mint"`).
    pub fn invoke_named(&self, name: &str, args: Vec<Arg>) -> Result<Call<Value>, Error> {
        let endpoint = find_endpoint(name).ok_or_else(|| Error::UnknownEndpoint(name.to_string()))?;
        self.invoke(endpoint, args)
    }
}

// ============================================================================
// KasBuilder
// ============================================================================

/// Builder for creating a [`Kas`] client.
///
/// Only the services given an endpoint are available on the built client.
///
/// # Example
///
/// ```rust,no_run
/// use kas_kit::*;
///
/// let kas = Kas::builder(Chain::Mainnet, "access-key-id", "secret-access-key")
///     .kip17("https://kip17-api.klaytnapi.com/v1")
///     .wallet("https://wallet-api.klaytnapi.com/v2")
///     .retry_config(RetryConfig { max_retries: 5, ..Default::default() })
///     .build();
///
/// assert!(kas.kip17().is_ok());
/// assert!(kas.kip7().is_err());
/// ```
pub struct KasBuilder {
    access: AccessOptions,
    endpoints: BTreeMap<Service, String>,
    transport: Option<Arc<dyn Transport>>,
    retry_config: RetryConfig,
}

impl KasBuilder {
    fn new(access: AccessOptions) -> Self {
        Self {
            access,
            endpoints: BTreeMap::new(),
            transport: None,
            retry_config: RetryConfig::default(),
        }
    }

    /// Set the base URL of one service.
    pub fn endpoint(mut self, service: Service, base_url: impl Into<String>) -> Self {
        self.endpoints.insert(service, base_url.into());
        self
    }

    pub fn wallet(self, base_url: impl Into<String>) -> Self {
        self.endpoint(Service::Wallet, base_url)
    }

    pub fn kip7(self, base_url: impl Into<String>) -> Self {
        self.endpoint(Service::Kip7, base_url)
    }

    pub fn kip17(self, base_url: impl Into<String>) -> Self {
        self.endpoint(Service::Kip17, base_url)
    }

    pub fn kip37(self, base_url: impl Into<String>) -> Self {
        self.endpoint(Service::Kip37, base_url)
    }

    pub fn token_history(self, base_url: impl Into<String>) -> Self {
        self.endpoint(Service::TokenHistory, base_url)
    }

    pub fn metadata(self, base_url: impl Into<String>) -> Self {
        self.endpoint(Service::Metadata, base_url)
    }

    /// Configure every service with its public production endpoint.
    pub fn production(mut self) -> Self {
        for service in Service::ALL {
            self.endpoints
                .insert(service, service.production_url().to_string());
        }
        self
    }

    /// Submit calls through a custom transport instead of HTTP.
    ///
    /// Endpoints still decide which services are available.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the retry configuration of the HTTP transport.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the client.
    pub fn build(self) -> Kas {
        let services: BTreeSet<Service> = self.endpoints.keys().copied().collect();
        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let http = self.endpoints.into_iter().fold(
                    HttpTransport::with_retry_config(self.access.auth(), self.retry_config),
                    |http, (service, url)| http.endpoint(service, url),
                );
                Arc::new(http) as Arc<dyn Transport>
            }
        };
        Kas {
            facade: Facade::new(self.access, transport),
            services,
        }
    }
}

impl From<KasBuilder> for Kas {
    fn from(builder: KasBuilder) -> Self {
        builder.build()
    }
}
