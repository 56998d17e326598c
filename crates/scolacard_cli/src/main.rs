//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `scolacard_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe validating core crate wiring independently from the
    // UI/FFI runtime setup.
    println!("scolacard_core ping={}", scolacard_core::ping());
    println!("scolacard_core version={}", scolacard_core::core_version());
}
