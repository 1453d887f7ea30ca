//! # Function Proto
//!
//! Wire contract between the composition pipeline and a function.
//!
//! Contains:
//! - Protobuf-generated types (`pb` module) for `apiextensions.fn.proto.v1beta1`
//! - The encoded file descriptor set used for gRPC reflection
//!
//! Used by `namer-core` for request/response handling and by `function-grpc` for serving.

// Re-export the generated protobuf module. The generated code will be placed
// into OUT_DIR at build time by the build script.
pub mod pb {
    tonic::include_proto!("apiextensions.r#fn.proto.v1beta1");
}

pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("proto_descriptor");
