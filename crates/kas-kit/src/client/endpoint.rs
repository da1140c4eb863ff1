//! Declarative endpoint definitions and request building.
//!
//! Every KAS operation is an [`Endpoint`] constant: its parameters, where
//! each parameter goes on the wire, and which query options it accepts.
//! [`build_request`] turns resolved arguments into a [`RequestDescriptor`]
//! for one endpoint without performing any I/O.

use serde_json::{Map, Value};

use super::args::{ArgValue, Param, ResolvedArgs};
use crate::error::Error;
use crate::types::{
    AccessOptions, ContractOptions, HttpMethod, IdentifierValue, OptionKey, QueryOptions,
    RequestDescriptor, Service, describe_keys, normalize_id, normalize_ids,
};

/// Header carrying the chain id on every request.
pub const CHAIN_ID_HEADER: &str = "x-chain-id";

/// How a parameter value is encoded on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// JSON values pass through; identifiers become canonical hex.
    Plain,
    /// A string (numbers are rendered as decimal).
    Text,
    /// One identifier, normalized to canonical hex.
    Id,
    /// A list of identifiers, normalized element-wise.
    IdList,
    /// A list of strings; a single string is a one-element list. Joined with
    /// commas in query strings.
    List,
    /// A JSON object.
    Object,
    /// Contract fee-payer options: a string is a user fee-payer address, an
    /// object is a full options bag.
    FeePayer,
}

/// Where one parameter lands in the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// Path placeholder, query parameter or body key.
    pub key: &'static str,
    /// Name of the [`Param`] supplying the value.
    pub param: &'static str,
    pub encoding: Encoding,
}

impl Field {
    pub const fn new(key: &'static str, param: &'static str, encoding: Encoding) -> Self {
        Self {
            key,
            param,
            encoding,
        }
    }

    /// A field whose key is also its parameter name.
    pub const fn named(key: &'static str, encoding: Encoding) -> Self {
        Self::new(key, key, encoding)
    }
}

/// A declarative description of one KAS operation.
#[derive(Clone, Copy, Debug)]
pub struct Endpoint {
    /// Unique name, e.g. `kip17.mint`.
    pub name: &'static str,
    pub service: Service,
    pub method: HttpMethod,
    /// Path template relative to the service base URL.
    pub path: &'static str,
    /// Declared parameters, in call order.
    pub params: &'static [Param],
    pub path_fields: &'static [Field],
    pub query_fields: &'static [Field],
    pub body_fields: &'static [Field],
    /// Name of the parameter holding [`QueryOptions`], if any.
    pub options: Option<&'static str>,
    /// Option keys this endpoint accepts.
    pub whitelist: &'static [OptionKey],
}

impl Endpoint {
    /// Base for struct-update syntax in endpoint constants.
    pub const BLANK: Endpoint = Endpoint {
        name: "",
        service: Service::Wallet,
        method: HttpMethod::Get,
        path: "",
        params: &[],
        path_fields: &[],
        query_fields: &[],
        body_fields: &[],
        options: None,
        whitelist: &[],
    };

    fn param_index(&self, name: &str) -> Result<usize, Error> {
        self.params
            .iter()
            .position(|param| param.name == name)
            .ok_or_else(|| {
                Error::Config(format!("endpoint {} has no parameter `{name}`", self.name))
            })
    }
}

/// Build the request descriptor for one call.
///
/// Path segments are checked and identifiers normalized; options are checked
/// against the endpoint's whitelist; the `x-chain-id` header is always set.
pub fn build_request(
    endpoint: &Endpoint,
    resolved: &ResolvedArgs,
    access: &AccessOptions,
) -> Result<RequestDescriptor, Error> {
    let mut request = RequestDescriptor::new(endpoint.service, endpoint.method, endpoint.path);

    for field in endpoint.path_fields {
        let value = resolved
            .get(endpoint.param_index(field.param)?)
            .ok_or_else(|| Error::shape(format!("missing path parameter `{}`", field.param)))?;
        let segment = encode_text(value, field)?;
        if !is_path_segment(&segment) {
            return Err(Error::shape(format!(
                "`{}` is not a valid path segment: {segment:?}",
                field.param
            )));
        }
        request.path_params.insert(field.key, segment);
    }

    if let Some(name) = endpoint.options {
        if let Some(value) = resolved.get(endpoint.param_index(name)?) {
            let options = match value {
                ArgValue::Options(options) => options.clone(),
                ArgValue::Json(value @ Value::Object(_)) => QueryOptions::from_value(value.clone())?,
                _ => return Err(Error::shape(format!("`{name}` must be query options"))),
            };
            if !options.is_valid_options(endpoint.whitelist) {
                return Err(Error::InvalidQueryOptions {
                    allowed: describe_keys(endpoint.whitelist),
                });
            }
            for (key, value) in options.query_params() {
                request.query_params.insert(key.to_string(), value);
            }
        }
    }

    for field in endpoint.query_fields {
        if let Some(value) = resolved.get(endpoint.param_index(field.param)?) {
            let rendered = match field.encoding {
                Encoding::List | Encoding::IdList => match encode_json(value, field)? {
                    Value::Array(items) => items
                        .iter()
                        .map(|item| item.as_str().map(str::to_string).unwrap_or_else(|| item.to_string()))
                        .collect::<Vec<_>>()
                        .join(","),
                    other => other.to_string(),
                },
                _ => encode_text(value, field)?,
            };
            request.query_params.insert(field.key.to_string(), rendered);
        }
    }

    if !endpoint.body_fields.is_empty() {
        let mut body = Map::new();
        let mut list_len: Option<(&str, usize)> = None;

        for field in endpoint.body_fields {
            let Some(value) = resolved.get(endpoint.param_index(field.param)?) else {
                continue;
            };
            let encoded = encode_json(value, field)?;

            if field.encoding == Encoding::IdList {
                let len = encoded.as_array().map_or(0, Vec::len);
                match list_len {
                    Some((first, expected)) if expected != len => {
                        return Err(Error::shape(format!(
                            "`{first}` and `{}` must have the same length ({expected} != {len})",
                            field.param
                        )));
                    }
                    None => list_len = Some((field.param, len)),
                    _ => {}
                }
            }

            body.insert(field.key.to_string(), encoded);
        }

        request.body = Some(Value::Object(body));
    }

    request
        .header_params
        .insert(CHAIN_ID_HEADER.to_string(), access.chain_id().to_string());

    Ok(request)
}

/// A value that stays one literal segment once joined into a URL.
fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%' | '{' | '}') || c.is_whitespace() || c.is_control())
}

fn identifier(value: &ArgValue, field: &Field) -> Result<IdentifierValue, Error> {
    match value {
        ArgValue::Id(id) => Ok(id.clone()),
        ArgValue::Json(json) => Ok(IdentifierValue::Json(json.clone())),
        _ => Err(Error::shape(format!("`{}` must be an identifier", field.param))),
    }
}

fn encode_text(value: &ArgValue, field: &Field) -> Result<String, Error> {
    if field.encoding == Encoding::Id {
        return Ok(normalize_id(identifier(value, field)?)?.to_string());
    }
    match value {
        ArgValue::Json(Value::String(s)) => Ok(s.clone()),
        ArgValue::Json(Value::Number(n)) => Ok(n.to_string()),
        ArgValue::Json(Value::Bool(b)) => Ok(b.to_string()),
        ArgValue::Id(id) => Ok(normalize_id(id.clone())?.to_string()),
        _ => Err(Error::shape(format!("`{}` must be a string", field.param))),
    }
}

fn encode_json(value: &ArgValue, field: &Field) -> Result<Value, Error> {
    match field.encoding {
        Encoding::Plain => match value {
            ArgValue::Json(json) => Ok(json.clone()),
            ArgValue::Id(id) => Ok(normalize_id(id.clone())?.into()),
            ArgValue::Ids(ids) => Ok(hex_array(ids.clone())?),
            ArgValue::Options(_) => Err(Error::shape(format!(
                "`{}` cannot be query options",
                field.param
            ))),
        },
        Encoding::Text => encode_text(value, field).map(Value::String),
        Encoding::Id => Ok(normalize_id(identifier(value, field)?)?.into()),
        Encoding::IdList => match value {
            ArgValue::Ids(ids) => hex_array(ids.clone()),
            ArgValue::Json(Value::Array(items)) => hex_array(items.iter().cloned().map(IdentifierValue::Json)),
            _ => Err(Error::shape(format!("`{}` must be a list of identifiers", field.param))),
        },
        Encoding::List => match value {
            ArgValue::Json(Value::String(s)) => Ok(Value::Array(vec![Value::String(s.clone())])),
            ArgValue::Json(Value::Array(items)) if items.iter().all(Value::is_string) => {
                Ok(Value::Array(items.clone()))
            }
            _ => Err(Error::shape(format!("`{}` must be a list of strings", field.param))),
        },
        Encoding::Object => match value {
            ArgValue::Json(object @ Value::Object(_)) => Ok(object.clone()),
            _ => Err(Error::shape(format!("`{}` must be an object", field.param))),
        },
        Encoding::FeePayer => match value {
            ArgValue::Json(Value::String(address)) => {
                Ok(ContractOptions::with_fee_payer_address(address.clone()).to_value())
            }
            ArgValue::Json(object @ Value::Object(_)) => Ok(object.clone()),
            _ => Err(Error::shape(format!(
                "`{}` must be a fee payer address or contract options",
                field.param
            ))),
        },
    }
}

fn hex_array(ids: impl IntoIterator<Item = IdentifierValue>) -> Result<Value, Error> {
    Ok(Value::Array(
        normalize_ids(ids)?.into_iter().map(Value::from).collect(),
    ))
}
