//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `libris_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!(
        "libris_core schema_version={}",
        libris_core::db::migrations::latest_version()
    );
    println!("libris_core version={}", libris_core::core_version());
}
