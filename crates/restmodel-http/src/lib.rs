//! Blocking HTTP transport for RestModel Rust.
//!
//! Provides the transport seam (`Transport`, `Request`, `RawResponse`),
//! the reqwest-backed blocking implementation, and explicit client
//! configuration including the common-parameters hook.

pub mod config;
pub mod http;
pub mod transport;

pub use config::{ClientConfig, ClientConfigBuilder, Params, ParamsHook};
pub use http::HttpTransport;
pub use transport::{Method, RawResponse, Request, Transport};
