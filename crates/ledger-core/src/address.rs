//! Account addresses and the codec that turns their text form into bytes
//!
//! Addresses travel through the engine as bech32 text. Validators decode each
//! externally supplied address through an [`AddressCodec`] before trusting it;
//! the codec is a seam so hosts with a different text encoding can plug in
//! their own.

use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest address payload accepted, in bytes.
pub const MAX_ADDRESS_LEN: usize = 255;

/// Errors raised while decoding or encoding an account address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The address text was empty.
    #[error("empty address string is not allowed")]
    Empty,

    /// The text is not valid bech32.
    #[error("decoding bech32 failed: {0}")]
    Decode(bech32::Error),

    /// The text is bech32m rather than bech32.
    #[error("decoding bech32 failed: unsupported variant, expected bech32")]
    UnsupportedVariant,

    /// The human readable part does not match the configured prefix.
    #[error("invalid Bech32 prefix; expected {expected}, got {got}")]
    WrongPrefix {
        /// Prefix the codec was configured with
        expected: String,
        /// Prefix found on the address
        got: String,
    },

    /// The decoded payload has an unusable length.
    #[error("address length must be between 1 and 255 bytes, got {0}")]
    InvalidLength(usize),

    /// Encoding the payload failed.
    #[error("encoding bech32 failed: {0}")]
    Encode(bech32::Error),
}

/// Decoded account address bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountAddress(Vec<u8>);

impl AccountAddress {
    /// Wrap raw address bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Converts between address text and address bytes.
pub trait AddressCodec: Send + Sync {
    /// Decode address text, failing if it is not a well-formed address.
    fn decode(&self, text: &str) -> Result<AccountAddress, AddressError>;

    /// Encode address bytes to text.
    fn encode(&self, address: &AccountAddress) -> Result<String, AddressError>;

    /// Check that address text decodes.
    fn validate(&self, text: &str) -> Result<(), AddressError> {
        self.decode(text).map(|_| ())
    }

    /// Canonical spelling of `text`: decoded and re-encoded. Text that does
    /// not decode is returned unchanged.
    fn canonicalize(&self, text: &str) -> String {
        self.decode(text)
            .and_then(|address| self.encode(&address))
            .unwrap_or_else(|_| text.to_string())
    }

    /// Whether two address texts name the same account.
    ///
    /// Decodable text is compared by address bytes, so `pb1...` and its
    /// uppercase spelling are the same account. Anything else is compared
    /// verbatim.
    fn same_address(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        match (self.decode(a), self.decode(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// Bech32 codec bound to a single human readable prefix (e.g. `pb`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bech32Codec {
    prefix: String,
}

impl Bech32Codec {
    /// Create a codec for the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The prefix this codec encodes with and requires on decode.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl AddressCodec for Bech32Codec {
    fn decode(&self, text: &str) -> Result<AccountAddress, AddressError> {
        if text.trim().is_empty() {
            return Err(AddressError::Empty);
        }

        let (hrp, data, variant) = bech32::decode(text).map_err(AddressError::Decode)?;
        if variant != Variant::Bech32 {
            return Err(AddressError::UnsupportedVariant);
        }
        if hrp != self.prefix {
            return Err(AddressError::WrongPrefix {
                expected: self.prefix.clone(),
                got: hrp,
            });
        }

        let bytes = Vec::<u8>::from_base32(&data).map_err(AddressError::Decode)?;
        if bytes.is_empty() || bytes.len() > MAX_ADDRESS_LEN {
            return Err(AddressError::InvalidLength(bytes.len()));
        }

        Ok(AccountAddress(bytes))
    }

    fn encode(&self, address: &AccountAddress) -> Result<String, AddressError> {
        if address.is_empty() || address.len() > MAX_ADDRESS_LEN {
            return Err(AddressError::InvalidLength(address.len()));
        }
        bech32::encode(&self.prefix, address.0.to_base32(), Variant::Bech32)
            .map_err(AddressError::Encode)
    }
}
