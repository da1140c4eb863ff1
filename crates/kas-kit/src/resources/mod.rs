//! Typed clients for each KAS service.
//!
//! - [`Kip7`] - Fungible token contracts
//! - [`Kip17`] - Non-fungible token contracts
//! - [`Kip37`] - Multi-token contracts
//! - [`TokenHistory`] - Transfer and token history queries
//! - [`Wallet`] - Managed accounts, transactions and fee payers
//! - [`Metadata`] - Token metadata storage
//!
//! Every operation is also described by an [`Endpoint`] constant in its
//! module; [`find_endpoint`] looks one up by name for
//! [`Kas::invoke_named`](crate::Kas::invoke_named).

use crate::client::Endpoint;

/// Getters shared by every resource client.
macro_rules! impl_resource {
    ($name:ident, $service:expr) => {
        impl $name {
            pub(crate) fn new(facade: $crate::client::Facade) -> Self {
                Self { facade }
            }

            /// The service this client talks to.
            pub fn service(&self) -> $crate::types::Service {
                $service
            }

            /// The `Authorization` header value.
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
        }
    };
}

pub(crate) use impl_resource;

pub mod history;
pub mod kip17;
pub mod kip37;
pub mod kip7;
pub mod metadata;
pub mod wallet;

pub use history::TokenHistory;
pub use kip17::Kip17;
pub use kip37::Kip37;
pub use kip7::Kip7;
pub use metadata::Metadata;
pub use wallet::{ContractDeploy, ContractExecution, ValueTransfer, Wallet};

/// Every endpoint known to this crate.
pub fn catalogue() -> impl Iterator<Item = &'static Endpoint> {
    [
        kip7::ENDPOINTS,
        kip17::ENDPOINTS,
        kip37::ENDPOINTS,
        history::ENDPOINTS,
        wallet::ENDPOINTS,
        metadata::ENDPOINTS,
    ]
    .into_iter()
    .flatten()
    .copied()
}

/// Look up an endpoint by its name, e.g. `"kip17.mint"`.
pub fn find_endpoint(name: &str) -> Option<&'static Endpoint> {
    catalogue().find(|endpoint| endpoint.name == name)
}
