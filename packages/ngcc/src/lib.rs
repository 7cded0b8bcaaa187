#![deny(clippy::all)]

/**
 * Angular ngcc - Rust Implementation
 *
 * Upgrades compiled Angular packages (ESM2015 / ESM5) by replacing their
 * decorator metadata with static definitions.
 */
pub mod analysis;
pub mod config;
pub mod definitions;
pub mod error;
pub mod host;
pub mod import_manager;
pub mod logging;
pub mod parsing;
pub mod rendering;
pub mod source_file;
pub mod sourcemaps;
pub mod transform;
pub mod util;

#[cfg(test)]
mod testing;

pub use config::{FormatOption, NgccConfig};
pub use error::{NgccError, RenderError};
pub use rendering::{FileInfo, RenderResult};
pub use transform::transform_file;

/// ngcc version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
