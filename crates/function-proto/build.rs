//! Build script for the `function-proto` crate.
//!
//! ## Purpose
//! Generates Rust protobuf types from `run_function.proto` and emits a file-descriptor set.
//!
//! ## Intended use
//! Only the server side of `FunctionRunnerService` is generated; the pipeline is the client.
//! The descriptor set is used for gRPC reflection.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let proto_include_root = manifest_dir.join("proto");
    let proto_file = proto_include_root.join("apiextensions/fn/proto/v1beta1/run_function.proto");

    println!("cargo:rerun-if-changed={}", proto_file.display());
    tonic_build::configure()
        .build_server(true)
        .build_client(false)
        .file_descriptor_set_path(
            std::path::Path::new(&std::env::var("OUT_DIR")?).join("proto_descriptor.bin"),
        )
        .compile_protos(std::slice::from_ref(&proto_file), &[proto_include_root])?;

    Ok(())
}
