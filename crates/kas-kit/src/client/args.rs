//! Variadic argument resolution.
//!
//! The dynamic entry point ([`Kas::invoke`](crate::Kas::invoke)) accepts an
//! argument list in several shapes: optional parameters may be left out, an
//! options object may or may not be present, and a callback may close the
//! list at any optional position. [`resolve`] turns such a list into one
//! value per declared [`Param`] plus an optional callback, or rejects it.

use std::fmt;

use alloy_primitives::U256;
use serde_json::Value;

use super::transport::RawResponse;
use crate::error::Error;
use crate::types::{ContractOptions, HexId, IdentifierValue, QueryOptions};

/// A legacy completion callback: `(error, data, raw_response)`.
pub type Callback = Box<dyn FnOnce(Option<&Error>, Option<&Value>, Option<&RawResponse>) + Send>;

// ============================================================================
// Arguments
// ============================================================================

/// A non-callback argument.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgValue {
    /// Any JSON value: strings, numbers, booleans, objects, arrays.
    Json(Value),
    /// An identifier to be normalized.
    Id(IdentifierValue),
    /// A list of identifiers to be normalized element-wise.
    Ids(Vec<IdentifierValue>),
    /// Already validated query options.
    Options(QueryOptions),
}

/// The shape of an argument, as seen by the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgKind {
    Callback,
    Null,
    String,
    Object,
    Other,
}

impl ArgValue {
    pub fn kind(&self) -> ArgKind {
        match self {
            ArgValue::Json(Value::Null) => ArgKind::Null,
            ArgValue::Json(Value::String(_)) => ArgKind::String,
            ArgValue::Json(Value::Object(_)) | ArgValue::Options(_) => ArgKind::Object,
            _ => ArgKind::Other,
        }
    }
}

/// One element of a variadic argument list.
pub enum Arg {
    Value(ArgValue),
    Callback(Callback),
}

impl Arg {
    /// Wrap a closure as a callback argument.
    pub fn callback(
        f: impl FnOnce(Option<&Error>, Option<&Value>, Option<&RawResponse>) + Send + 'static,
    ) -> Self {
        Arg::Callback(Box::new(f))
    }

    /// An identifier argument.
    pub fn id(value: impl Into<IdentifierValue>) -> Self {
        Arg::Value(ArgValue::Id(value.into()))
    }

    /// A list of identifiers.
    pub fn ids<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<IdentifierValue>,
    {
        Arg::Value(ArgValue::Ids(values.into_iter().map(Into::into).collect()))
    }

    /// An explicitly omitted argument.
    pub fn null() -> Self {
        Arg::Value(ArgValue::Json(Value::Null))
    }

    pub fn kind(&self) -> ArgKind {
        match self {
            Arg::Callback(_) => ArgKind::Callback,
            Arg::Value(value) => value.kind(),
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(value) => value.fmt(f),
            Arg::Callback(_) => f.write_str("<callback>"),
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(ArgValue::Json(value))
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Value(ArgValue::Json(Value::String(value.to_string())))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Value(ArgValue::Json(Value::String(value)))
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Value(ArgValue::Json(Value::Bool(value)))
    }
}

macro_rules! impl_arg_from_number {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Arg {
                fn from(value: $t) -> Self {
                    Arg::Value(ArgValue::Json(Value::from(value)))
                }
            }
        )+
    };
}

impl_arg_from_number!(u8, u16, u32, u64, i8, i16, i32, i64, f64);

impl From<U256> for Arg {
    fn from(value: U256) -> Self {
        Arg::id(value)
    }
}

impl From<HexId> for Arg {
    fn from(value: HexId) -> Self {
        Arg::id(value)
    }
}

impl From<IdentifierValue> for Arg {
    fn from(value: IdentifierValue) -> Self {
        Arg::Value(ArgValue::Id(value))
    }
}

impl From<QueryOptions> for Arg {
    fn from(value: QueryOptions) -> Self {
        Arg::Value(ArgValue::Options(value))
    }
}

impl From<ContractOptions> for Arg {
    fn from(value: ContractOptions) -> Self {
        Arg::Value(ArgValue::Json(value.to_value()))
    }
}

impl From<Callback> for Arg {
    fn from(value: Callback) -> Self {
        Arg::Callback(value)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Arg::null, Into::into)
    }
}

/// Build a `Vec<Arg>` from heterogeneous values.
///
/// ```
/// use kas_kit::{Arg, args};
///
/// let list = args!["my-alias", 7, Arg::callback(|_, _, _| {})];
/// assert_eq!(list.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::Arg>::new() };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}

// ============================================================================
// Parameter specs
// ============================================================================

/// How a declared parameter may be filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// Must be present and non-null; a callback here is an error.
    Required,
    /// Positional and optional; a callback here ends the argument list.
    Optional,
    /// An object (options bag) that may be skipped entirely.
    OptionalObject,
    /// A string or an object, each handled differently by the endpoint.
    Polymorphic,
}

/// A const-friendly default value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Str(&'static str),
}

impl Literal {
    pub fn to_value(&self) -> Value {
        match self {
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(n) => Value::from(*n),
            Literal::Str(s) => Value::String((*s).to_string()),
        }
    }
}

/// One declared parameter of an endpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: Option<Literal>,
}

impl Param {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Required,
            default: None,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Optional,
            default: None,
        }
    }

    /// An optional parameter that falls back to `default` when omitted.
    pub const fn optional_or(name: &'static str, default: Literal) -> Self {
        Self {
            name,
            kind: ParamKind::Optional,
            default: Some(default),
        }
    }

    pub const fn object(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::OptionalObject,
            default: None,
        }
    }

    pub const fn polymorphic(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Polymorphic,
            default: None,
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// One value slot per declared parameter, plus the callback if one was given.
pub struct ResolvedArgs {
    pub values: Vec<Option<ArgValue>>,
    pub callback: Option<Callback>,
}

impl ResolvedArgs {
    /// Take the value of the parameter at `index`.
    pub fn take(&mut self, index: usize) -> Option<ArgValue> {
        self.values.get_mut(index).and_then(Option::take)
    }

    pub fn get(&self, index: usize) -> Option<&ArgValue> {
        self.values.get(index).and_then(Option::as_ref)
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl fmt::Debug for ResolvedArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedArgs")
            .field("values", &self.values)
            .field("callback", &self.callback.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

/// Resolve a variadic argument list against declared parameters.
///
/// Arguments are matched left to right. `null` stands for an omitted
/// optional argument. A callback at an optional slot becomes the callback
/// and must be the last argument; every later parameter is left unset (or
/// defaulted). After all parameters are matched, one trailing callback is
/// accepted.
///
/// # Errors
///
/// [`Error::InvalidArgumentShape`] for a missing required argument, a
/// callback at a required slot, a non-object at an object slot, a value that
/// is neither string nor object at a polymorphic slot, arguments after a
/// callback, and extra arguments.
pub fn resolve(args: Vec<Arg>, params: &[Param]) -> Result<ResolvedArgs, Error> {
    let mut values: Vec<Option<ArgValue>> = params.iter().map(|_| None).collect();
    let mut callback = None;
    let mut args = args.into_iter();

    for (index, param) in params.iter().enumerate() {
        let Some(arg) = args.next() else {
            break;
        };

        let value = match arg {
            Arg::Callback(cb) => {
                if param.kind == ParamKind::Required {
                    return Err(Error::shape(format!(
                        "a callback was given where `{}` is required",
                        param.name
                    )));
                }
                callback = Some(cb);
                break;
            }
            Arg::Value(value) => value,
        };

        let kind = value.kind();
        if kind == ArgKind::Null {
            continue;
        }

        match param.kind {
            ParamKind::Required | ParamKind::Optional => {}
            ParamKind::OptionalObject => {
                if kind != ArgKind::Object {
                    return Err(Error::shape(format!("`{}` must be an object", param.name)));
                }
            }
            ParamKind::Polymorphic => {
                if kind != ArgKind::String && kind != ArgKind::Object {
                    return Err(Error::shape(format!(
                        "`{}` must be a string, an object or a callback",
                        param.name
                    )));
                }
            }
        }
        values[index] = Some(value);
    }

    match args.next() {
        None => {}
        Some(Arg::Callback(cb)) if callback.is_none() => callback = Some(cb),
        Some(_) if callback.is_some() => {
            return Err(Error::shape("arguments given after the callback"));
        }
        Some(_) => {
            return Err(Error::shape(format!(
                "too many arguments: expected at most {} and a callback",
                params.len()
            )));
        }
    }
    if args.next().is_some() {
        return Err(Error::shape(format!(
            "too many arguments: expected at most {} and a callback",
            params.len()
        )));
    }

    for (param, value) in params.iter().zip(values.iter_mut()) {
        if value.is_none() {
            if param.kind == ParamKind::Required {
                return Err(Error::shape(format!("missing required argument `{}`", param.name)));
            }
            if let Some(default) = param.default {
                *value = Some(ArgValue::Json(default.to_value()));
            }
        }
    }

    Ok(ResolvedArgs { values, callback })
}
