fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile the proto file for the scoring client. If `protoc` is not
    // installed, fall back to the vendored pre-generated bindings, which
    // were produced from the same proto file with tonic-build.
    if tonic_build::compile_protos("../../proto/scoring.proto").is_err() {
        println!("cargo:rerun-if-changed=src/generated/scoring.rs");
        let out = std::path::PathBuf::from(std::env::var("OUT_DIR")?).join("scoring.rs");
        std::fs::copy("src/generated/scoring.rs", out)?;
    }
    Ok(())
}
