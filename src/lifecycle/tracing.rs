//! # Logging
//!
//! Structured logs through `tracing`. The level comes from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run
//! # request payloads and session transitions
//! RUST_LOG=atelier=debug,atelier_framework=debug cargo run
//! ```
//!
//! Clients open a span per call (`get_with_fallback{id=7}`), so a save shows
//! up as the session span wrapping the transport request:
//!
//! ```text
//! INFO submit{product_id=7}: Saving section=materials
//! DEBUG submit{product_id=7}: Sending method=PATCH path="/api/products/7"
//! INFO submit{product_id=7}: Saved section=materials
//! ```

/// Installs a compact formatter filtered by `RUST_LOG`. Call once.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
