//! Marker error types

use ledger_core::{AddressError, UnknownPermission};
use thiserror::Error;

/// Errors from marker registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    /// Denomination fails the naming rule.
    #[error("invalid denom: {denom}")]
    InvalidDenom {
        /// The rejected denomination
        denom: String,
    },

    /// A marker with this denomination is already registered.
    #[error("marker for denom {denom} already exists")]
    AlreadyExists {
        /// The duplicated denomination
        denom: String,
    },

    /// No marker is registered at the address.
    #[error("marker {address} not found")]
    NotFound {
        /// Address looked up
        address: String,
    },

    /// Grantee address does not decode.
    #[error("invalid grant address {address}: {cause}")]
    InvalidGrantAddress {
        /// Offending address text
        address: String,
        /// Decode failure
        cause: AddressError,
    },

    /// Grant carries no permissions.
    #[error("no permissions provided for {address}")]
    EmptyGrant {
        /// Grantee address
        address: String,
    },

    /// Permission name could not be parsed.
    #[error(transparent)]
    UnknownPermission(#[from] UnknownPermission),

    /// Address encoding failed.
    #[error("marker address encoding failed: {0}")]
    Encoding(AddressError),
}

impl MarkerError {
    /// Create a not-found error for an address.
    pub fn not_found(address: impl Into<String>) -> Self {
        Self::NotFound {
            address: address.into(),
        }
    }

    /// Create an invalid denom error.
    pub fn invalid_denom(denom: impl Into<String>) -> Self {
        Self::InvalidDenom {
            denom: denom.into(),
        }
    }
}
