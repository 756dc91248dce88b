// Kiln - bundler configuration presets
// Assembles base/development/production records for an external bundler

pub mod cli;
pub mod core;
pub mod plugins;
pub mod utils;

pub use crate::core::{BundlerConfig, ConfigAssembler, Mode, Overlay, Preset, ProjectPaths};
pub use crate::utils::{KilnError, Result};
