//! # Function gRPC
//!
//! gRPC server for the external-name composition function.
//!
//! Handles:
//! - The `FunctionRunnerService` implementation wrapping a `namer-core` function
//! - Server configuration resolved at startup (address, mutual TLS, reflection)
//! - gRPC-specific concerns (TLS identity loading, request tracing, tonic integration)
//!
//! Uses `function-proto` for the generated wire types.

#![warn(rust_2018_idioms)]

pub use config::{load_tls_config, ServerConfig, TlsMode};
pub use error::{ServerError, ServerResult};
pub use server::serve;
pub use service::{pb, FunctionService};

pub mod config;
pub mod error;
pub mod server;
pub mod service;
