//! Utility types shared across the crate.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - [`build_stamp`] - Version string stamped into written documents

mod error;

pub use error::*;

/// Crate version plus build time, e.g. `scene-scrub 0.1.0 (built 2026-10-19T10:02:11Z)`.
pub fn build_stamp() -> String {
    let built = option_env!("SCENE_SCRUB_BUILD_STAMP").unwrap_or("unknown");
    format!("scene-scrub {} (built {})", env!("CARGO_PKG_VERSION"), built)
}
