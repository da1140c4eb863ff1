//! Credentials and chain selection shared by every resource client.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::Chain;

/// Immutable access options owned by one [`Kas`](crate::Kas) client.
///
/// The `Authorization` header value is derived once, at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessOptions {
    chain: Chain,
    access_key_id: String,
    secret_access_key: String,
    auth: String,
}

impl AccessOptions {
    /// Create access options for a chain and a KAS credential pair.
    pub fn new(
        chain: impl Into<Chain>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        let access_key_id = access_key_id.into();
        let secret_access_key = secret_access_key.into();
        let auth = format!(
            "Basic {}",
            STANDARD.encode(format!("{access_key_id}:{secret_access_key}"))
        );
        Self {
            chain: chain.into(),
            access_key_id,
            secret_access_key,
            auth,
        }
    }

    /// The chain every request is routed to.
    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// The numeric chain id, as sent in the `x-chain-id` header.
    pub fn chain_id(&self) -> u64 {
        self.chain.id()
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    /// The HTTP basic-auth header value.
    pub fn auth(&self) -> &str {
        &self.auth
    }
}

impl fmt::Debug for AccessOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessOptions")
            .field("chain", &self.chain)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}
