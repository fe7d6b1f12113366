//! Configuration for engine runs
//!
//! Programs come from two-line source files, run settings from optional YAML
//! files, and both are folded into a [`Seed`] that initializes one engine.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;


use crate::errors::ConfigError;
use std::path::Path;

/// Load run settings from a YAML file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<RunSettings, ConfigError> {
    ConfigLoader::from_file(path)
}

/// Load and parse a program file
pub fn load_program<P: AsRef<Path>>(path: P) -> Result<Program, ConfigError> {
    ProgramLoader::load(path)
}
