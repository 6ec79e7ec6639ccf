//! Ledger configuration
//!
//! Configuration is deliberately small: the engine is pure and only needs to
//! know how account addresses are spelled on the network it runs against.
//! Values come from a `.toml` or `.json` file, then `LEDGER_*` environment
//! variables, and are validated before use.

pub mod traits;
pub mod validation;

pub use traits::{read_config_file, ConfigSource};
pub use validation::{ConfigValidator, FieldFormat, ValidationError, ValidationResult};

use crate::address::Bech32Codec;
use crate::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Environment variable selecting the network.
pub const ENV_NETWORK: &str = "LEDGER_NETWORK";
/// Environment variable overriding the account address prefix.
pub const ENV_ADDRESS_PREFIX: &str = "LEDGER_ADDRESS_PREFIX";

/// Network the ledger runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network
    #[default]
    Mainnet,
    /// Test network
    Testnet,
}

impl Network {
    /// Default account address prefix on this network.
    pub fn default_address_prefix(self) -> &'static str {
        match self {
            Network::Mainnet => "pb",
            Network::Testnet => "tp",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(LedgerError::invalid(format!("unknown network: {other}"))),
        }
    }
}

/// Ledger configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Network, which picks the default address prefix
    #[serde(default)]
    pub network: Network,
    /// Explicit account address prefix, overriding the network default
    #[serde(default)]
    pub address_prefix: Option<String>,
}

impl LedgerConfig {
    /// Configuration for a network with its default prefix.
    pub fn for_network(network: Network) -> Self {
        Self {
            network,
            address_prefix: None,
        }
    }

    /// Prefix actually in effect.
    pub fn effective_address_prefix(&self) -> &str {
        self.address_prefix
            .as_deref()
            .unwrap_or_else(|| self.network.default_address_prefix())
    }

    /// Address codec for the configured prefix.
    pub fn address_codec(&self) -> Bech32Codec {
        Bech32Codec::new(self.effective_address_prefix())
    }
}

impl ConfigSource for LedgerConfig {
    type Error = LedgerError;

    fn load_from_file(path: &Path) -> Result<Self, Self::Error> {
        let config: LedgerConfig = read_config_file(path)?;
        tracing::debug!(
            path = %path.display(),
            network = %config.network,
            "loaded ledger configuration"
        );
        Ok(config)
    }

    fn merge_with_vars<I>(&mut self, vars: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                ENV_NETWORK => self.network = value.parse()?,
                ENV_ADDRESS_PREFIX => self.address_prefix = Some(value),
                _ => {}
            }
        }
        Ok(())
    }

    fn merge_with(&mut self, other: &Self) -> Result<(), Self::Error> {
        // Merge non-default values from other config
        if other.network != Network::default() {
            self.network = other.network;
        }
        if other.address_prefix.is_some() {
            self.address_prefix = other.address_prefix.clone();
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), Self::Error> {
        let mut validator = ConfigValidator::new();
        if let Some(prefix) = &self.address_prefix {
            validator.format("address_prefix", prefix, FieldFormat::Bech32Prefix);
        }
        validator.result().map_err(Into::into)
    }
}
