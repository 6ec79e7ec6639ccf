//! Content-addressed identifiers for scopes and specifications
//!
//! A metadata address is a one byte kind tag followed by the sixteen bytes of
//! a UUID. Its text form is bech32 with a per-kind prefix (`scope1...`,
//! `scopespec1...`). An empty address stands in for "unset" on records that
//! arrive before validation.

use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Length of a well-formed metadata address: kind byte plus UUID.
pub const METADATA_ADDRESS_LEN: usize = 17;

/// Kind tag stored in the first byte of a metadata address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetadataAddressKind {
    /// A scope record
    Scope,
    /// A contract specification
    ContractSpecification,
    /// A scope specification
    ScopeSpecification,
}

impl MetadataAddressKind {
    /// Key prefix byte for this kind.
    pub fn prefix_byte(self) -> u8 {
        match self {
            Self::Scope => 0x00,
            Self::ContractSpecification => 0x03,
            Self::ScopeSpecification => 0x04,
        }
    }

    /// Bech32 human readable part for this kind.
    pub fn hrp(self) -> &'static str {
        match self {
            Self::Scope => "scope",
            Self::ContractSpecification => "contractspec",
            Self::ScopeSpecification => "scopespec",
        }
    }

    /// Look up a kind by its prefix byte.
    pub fn from_prefix_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Scope),
            0x03 => Some(Self::ContractSpecification),
            0x04 => Some(Self::ScopeSpecification),
            _ => None,
        }
    }

    /// Look up a kind by its bech32 prefix.
    pub fn from_hrp(hrp: &str) -> Option<Self> {
        match hrp {
            "scope" => Some(Self::Scope),
            "contractspec" => Some(Self::ContractSpecification),
            "scopespec" => Some(Self::ScopeSpecification),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataAddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hrp())
    }
}

/// Errors from metadata address validation and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataAddressError {
    /// No bytes at all
    #[error("address is empty")]
    Empty,

    /// First byte is not a known kind
    #[error("invalid metadata address type: {0}")]
    UnknownKind(u8),

    /// Wrong number of bytes
    #[error("incorrect address length (expected: 17, actual: {0})")]
    IncorrectLength(usize),

    /// Address is well formed but of the wrong kind for its use
    #[error("expected a {expected} address, found {found}")]
    WrongKind {
        /// Kind required by the caller
        expected: MetadataAddressKind,
        /// Kind actually present
        found: MetadataAddressKind,
    },

    /// Text did not decode as bech32
    #[error("decoding bech32 failed: {0}")]
    Decode(bech32::Error),

    /// Text prefix is not a metadata prefix
    #[error("unknown metadata address prefix: {0}")]
    UnknownPrefix(String),

    /// Text prefix does not agree with the kind byte
    #[error("metadata address prefix {hrp} does not match type byte {kind}")]
    PrefixMismatch {
        /// Prefix found on the text
        hrp: String,
        /// Kind encoded in the bytes
        kind: MetadataAddressKind,
    },
}

/// Identifier of a scope, scope specification or contract specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MetadataAddress(Vec<u8>);

impl MetadataAddress {
    fn with_kind(kind: MetadataAddressKind, uuid: Uuid) -> Self {
        let mut bytes = Vec::with_capacity(METADATA_ADDRESS_LEN);
        bytes.push(kind.prefix_byte());
        bytes.extend_from_slice(uuid.as_bytes());
        Self(bytes)
    }

    /// Scope address for a scope UUID.
    pub fn scope(uuid: Uuid) -> Self {
        Self::with_kind(MetadataAddressKind::Scope, uuid)
    }

    /// Scope specification address for a specification UUID.
    pub fn scope_specification(uuid: Uuid) -> Self {
        Self::with_kind(MetadataAddressKind::ScopeSpecification, uuid)
    }

    /// Contract specification address for a specification UUID.
    pub fn contract_specification(uuid: Uuid) -> Self {
        Self::with_kind(MetadataAddressKind::ContractSpecification, uuid)
    }

    /// The unset address.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Wrap raw bytes without validation.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether this is the unset address.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Kind encoded in the first byte, if recognised.
    pub fn kind(&self) -> Option<MetadataAddressKind> {
        self.0
            .first()
            .and_then(|b| MetadataAddressKind::from_prefix_byte(*b))
    }

    /// UUID portion of a well-formed address.
    pub fn uuid(&self) -> Option<Uuid> {
        if self.0.len() != METADATA_ADDRESS_LEN {
            return None;
        }
        Uuid::from_slice(&self.0[1..]).ok()
    }

    /// Whether this is a well-formed scope address.
    pub fn is_scope_address(&self) -> bool {
        self.validate().is_ok() && self.kind() == Some(MetadataAddressKind::Scope)
    }

    /// Whether this is a well-formed scope specification address.
    pub fn is_scope_specification_address(&self) -> bool {
        self.validate().is_ok() && self.kind() == Some(MetadataAddressKind::ScopeSpecification)
    }

    /// Check structure: non-empty, known kind byte, correct length.
    pub fn validate(&self) -> Result<(), MetadataAddressError> {
        let first = *self.0.first().ok_or(MetadataAddressError::Empty)?;
        if MetadataAddressKind::from_prefix_byte(first).is_none() {
            return Err(MetadataAddressError::UnknownKind(first));
        }
        if self.0.len() != METADATA_ADDRESS_LEN {
            return Err(MetadataAddressError::IncorrectLength(self.0.len()));
        }
        Ok(())
    }

    /// Check structure and require a specific kind.
    pub fn validate_kind(&self, expected: MetadataAddressKind) -> Result<(), MetadataAddressError> {
        self.validate()?;
        match self.kind() {
            Some(found) if found != expected => {
                Err(MetadataAddressError::WrongKind { expected, found })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for MetadataAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        let encoded = self
            .kind()
            .and_then(|kind| bech32::encode(kind.hrp(), self.0.to_base32(), Variant::Bech32).ok());
        match encoded {
            Some(text) => f.write_str(&text),
            None => f.write_str(&hex::encode(&self.0)),
        }
    }
}

impl FromStr for MetadataAddress {
    type Err = MetadataAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(MetadataAddressError::Empty);
        }
        let (hrp, data, _) = bech32::decode(s).map_err(MetadataAddressError::Decode)?;
        let hrp_kind = MetadataAddressKind::from_hrp(&hrp)
            .ok_or_else(|| MetadataAddressError::UnknownPrefix(hrp.clone()))?;
        let bytes = Vec::<u8>::from_base32(&data).map_err(MetadataAddressError::Decode)?;
        let address = Self(bytes);
        address.validate()?;
        if address.kind() != Some(hrp_kind) {
            return Err(MetadataAddressError::PrefixMismatch {
                hrp,
                kind: address.kind().unwrap_or(hrp_kind),
            });
        }
        Ok(address)
    }
}
