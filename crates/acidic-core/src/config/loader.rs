//! Loaders for program files and YAML run settings

use crate::config::types::*;
use crate::errors::ConfigError;
use std::fs;
use std::path::Path;

/// Loads [`RunSettings`] from YAML.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<RunSettings, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        log::debug!("Loaded settings file {}", path.display());
        Self::from_str(&content)
    }

    /// Load settings from a YAML string
    pub fn from_str(content: &str) -> Result<RunSettings, ConfigError> {
        // An empty document deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(RunSettings::default());
        }

        let settings: RunSettings = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Settings(format!("Failed to parse YAML settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Loads program source files.
pub struct ProgramLoader;

impl ProgramLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Program, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let source = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let program = Program::parse(&source)?;
        log::debug!(
            "Loaded program {} (storage {} symbols, command {} symbols)",
            path.display(),
            program.storage.chars().count(),
            program.command.chars().count()
        );
        Ok(program)
    }
}
