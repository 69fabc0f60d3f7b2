// File: crates/pixlroll-core/build.rs
// Summary: Links the extra Windows system libraries Skia's font manager needs.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Build scripts run on the host; ask Cargo about the target instead of cfg!().
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // Registry access used by the DirectWrite font manager.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
