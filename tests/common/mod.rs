//! Common test utilities for integration tests.
//!
//! - `logger`: Structured test logging infrastructure
//! - `gateway`: wiremock stand-in for the vehicle API gateway

pub mod gateway;
pub mod logger;
