fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile the vendored intake service proto
    let proto_file = "proto/intake.proto";

    // Tell cargo to recompile if the proto file changes
    println!("cargo:rerun-if-changed={}", proto_file);

    tonic_build::configure()
        .build_server(false) // We only need the client
        .compile_protos(&[proto_file], &["proto"])?;

    Ok(())
}
