//! JSON configuration for the command-line tools.
pub mod perception;

pub use perception::{load_config, OutputConfig, RuntimeConfig};
