//! Integration tests for kas-kit.
//!
//! Every test runs against an in-process [`mock::MockTransport`]; no network
//! access is needed.
//!
//! Run with: `cargo test --test integration`

mod mock;

mod dual_invocation_integration;
mod identifier_integration;
mod options_integration;
mod pagination_integration;
mod resource_integration;
