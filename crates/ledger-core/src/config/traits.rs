//! Core configuration traits

use crate::LedgerError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Core trait for ledger configuration types
pub trait ConfigSource: Clone + Default + Send + Sync + 'static {
    /// Error type for configuration operations
    type Error: Into<LedgerError> + From<LedgerError>;

    /// Get default configuration values
    fn defaults() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> Result<Self, Self::Error>;

    /// Merge with process environment variables
    fn merge_with_env(&mut self) -> Result<(), Self::Error> {
        self.merge_with_vars(std::env::vars())
    }

    /// Merge with an explicit set of `(name, value)` variables
    fn merge_with_vars<I>(&mut self, vars: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = (String, String)>;

    /// Merge with another configuration
    fn merge_with(&mut self, other: &Self) -> Result<(), Self::Error>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), Self::Error>;

    /// Load, merge the environment, and validate in one step
    fn load(path: &Path) -> Result<Self, Self::Error> {
        let mut config = Self::load_from_file(path)?;
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }
}

/// Read and deserialize a `.toml` or `.json` file.
///
/// A missing file is reported as [`LedgerError::NotFound`] and a file that
/// does not parse as [`LedgerError::Serialization`].
pub fn read_config_file<T: DeserializeOwned>(path: &Path) -> Result<T, LedgerError> {
    let content = std::fs::read_to_string(path)?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(toml::from_str(&content)?),
        Some("json") => Ok(serde_json::from_str(&content)?),
        _ => Err(LedgerError::invalid("Unsupported file format")),
    }
}
