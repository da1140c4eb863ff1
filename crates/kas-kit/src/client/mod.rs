//! Client infrastructure for the Klaytn API Service.
//!
//! - [`Kas`] - The main client, the single entry point for all services
//! - [`KasBuilder`] - Fluent builder for credentials, endpoints and transport
//! - [`Transport`] - The request capability; [`HttpTransport`] is the default
//! - [`Call`] - An awaitable call that can also drive a legacy callback
//!
//! # Request Pipeline
//!
//! Every operation runs the same stages, in order:
//!
//! | Stage | Item |
//! |-------|------|
//! | Argument resolution | [`resolve`] against an endpoint's [`Param`] list |
//! | Identifier normalization | [`normalize_id`](crate::normalize_id) |
//! | Option whitelist check | [`QueryOptions::is_valid_options`](crate::QueryOptions::is_valid_options) |
//! | Request building | [`build_request`] |
//! | Submission | [`Call`] over a [`Transport`] |
//!
//! The first four stages are synchronous; their errors are returned before a
//! [`Call`] exists.

mod args;
mod call;
mod endpoint;
mod facade;
mod kas;
mod transport;

pub use args::{Arg, ArgKind, ArgValue, Callback, Literal, Param, ParamKind, ResolvedArgs, resolve};
pub use call::{Call, CallResult};
pub use endpoint::{CHAIN_ID_HEADER, Encoding, Endpoint, Field, build_request};
pub use facade::Facade;
pub use kas::{ENV_ACCESS_KEY_ID, ENV_CHAIN_ID, ENV_SECRET_ACCESS_KEY, Kas, KasBuilder};
pub use transport::{Completion, HttpTransport, RawResponse, RetryConfig, Transport};
