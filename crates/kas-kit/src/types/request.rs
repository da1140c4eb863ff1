//! Transport-neutral request descriptors.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// A KAS service. Each one lives on its own host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Service {
    Wallet,
    Kip7,
    Kip17,
    Kip37,
    TokenHistory,
    Metadata,
}

impl Service {
    pub const ALL: [Service; 6] = [
        Service::Wallet,
        Service::Kip7,
        Service::Kip17,
        Service::Kip37,
        Service::TokenHistory,
        Service::Metadata,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Wallet => "wallet",
            Service::Kip7 => "kip7",
            Service::Kip17 => "kip17",
            Service::Kip37 => "kip37",
            Service::TokenHistory => "token-history",
            Service::Metadata => "metadata",
        }
    }

    /// The public production base URL, including the API version.
    pub fn production_url(&self) -> &'static str {
        match self {
            Service::Wallet => "https://wallet-api.klaytnapi.com/v2",
            Service::Kip7 => "https://kip7-api.klaytnapi.com/v1",
            Service::Kip17 => "https://kip17-api.klaytnapi.com/v1",
            Service::Kip37 => "https://kip37-api.klaytnapi.com/v1",
            Service::TokenHistory => "https://th-api.klaytnapi.com/v2",
            Service::Metadata => "https://metadata-api.klaytnapi.com/v1",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP method of an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a transport needs to put one request on the wire.
///
/// Built fresh for every call and never mutated after it is submitted.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    pub service: Service,
    pub method: HttpMethod,
    /// Path relative to the service base URL, with `{name}` placeholders.
    pub path_template: &'static str,
    pub path_params: BTreeMap<&'static str, String>,
    pub query_params: BTreeMap<String, String>,
    pub header_params: BTreeMap<String, String>,
    pub body: Option<Value>,
    pub auth_names: Vec<&'static str>,
    pub content_types: Vec<&'static str>,
    pub accepts: Vec<&'static str>,
}

impl RequestDescriptor {
    /// A descriptor with no parameters, basic auth and JSON in both directions.
    pub fn new(service: Service, method: HttpMethod, path_template: &'static str) -> Self {
        Self {
            service,
            method,
            path_template,
            path_params: BTreeMap::new(),
            query_params: BTreeMap::new(),
            header_params: BTreeMap::new(),
            body: None,
            auth_names: vec!["basic"],
            content_types: vec!["application/json"],
            accepts: vec!["application/json"],
        }
    }

    /// The path with every `{name}` placeholder substituted.
    ///
    /// Substitution is a single pass over the template; substituted values
    /// are never rescanned. Placeholders without a value are left as is.
    pub fn resolved_path(&self) -> String {
        let mut path = String::with_capacity(self.path_template.len());
        let mut rest = self.path_template;
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|i| open + i) else {
                break;
            };
            path.push_str(&rest[..open]);
            let name = &rest[open + 1..close];
            match self.path_params.get(name) {
                Some(value) => path.push_str(value),
                None => path.push_str(&rest[open..=close]),
            }
            rest = &rest[close + 1..];
        }
        path.push_str(rest);
        path
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_params.get(name).map(String::as_str)
    }
}
