//! # Namer Core
//!
//! Core logic for the external-name composition function.
//!
//! This crate contains pure request/response transformations:
//! - Conversion between protobuf `Struct` values and JSON objects
//! - Unstructured accessors for resource names and annotations
//! - Reading desired composed resources from a request and writing them to a response
//! - The [`Namer`] function itself
//!
//! **No API concerns**: gRPC serving, TLS and process configuration belong in `function-grpc`.

pub mod constants;
pub mod error;
pub mod namer;
pub mod request;
pub mod resource;
pub mod response;
pub mod structs;

// Use the shared function-proto crate for generated protobuf types.
pub use function_proto::pb;

pub use error::{FunctionError, RequestError, StructError};
pub use namer::{add_external_names, CompositionFunction, Namer};
pub use resource::{DesiredComposed, Unstructured};
