//! @ai:module:intent Capture compiler version and cargo profile for the build description
//! @ai:module:layer infrastructure

use std::process::Command;

fn main() {
    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    println!("cargo:rustc-env=TESTREPORT_RUSTC_VERSION={}", version);

    let profile = std::env::var("PROFILE").unwrap_or_default();
    println!("cargo:rustc-env=TESTREPORT_PROFILE={}", profile);

    let debug_info = std::env::var("DEBUG").unwrap_or_default();
    println!("cargo:rustc-env=TESTREPORT_DEBUG_INFO={}", debug_info);

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RUSTC");
}
