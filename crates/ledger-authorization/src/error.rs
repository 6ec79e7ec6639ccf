//! Authorization error types
//!
//! Every rejection is an ordinary validation outcome carrying the offending
//! address, party, role or marker. Messages are stable and user facing;
//! callers that only care about the class of failure use [`AuthError::kind`].

use ledger_core::party::{format_parties, format_roles};
use ledger_core::{AddressError, MetadataAddress, MetadataAddressKind, Party, PartyRole, ScopeError};
use thiserror::Error;

/// Result alias for authorization checks.
pub type AuthResult<T = ()> = Result<T, AuthError>;

/// Broad class of an authorization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    /// Identifier mismatch or an unresolvable reference
    Identity,
    /// Empty list, undecodable address, invalid role or missing field
    Structural,
    /// A required signer is absent
    Consent,
    /// No signer holds the delegated marker permission
    Authority,
}

/// Reasons a scope mutation is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Update attempted to change the scope id.
    #[error("cannot update scope identifier. expected {expected}, got {got}")]
    IdentifierMismatch {
        /// Id of the stored scope
        expected: MetadataAddress,
        /// Id on the proposal
        got: MetadataAddress,
    },

    /// Scope id or specification id left empty.
    #[error("{}", missing_address_message(.kind))]
    MissingAddress {
        /// Which identifier is missing
        kind: MetadataAddressKind,
    },

    /// Specification id does not resolve.
    #[error("scope specification {id} not found")]
    SpecificationNotFound {
        /// Id looked up
        id: MetadataAddress,
    },

    /// Operation targets a scope that does not exist.
    #[error("scope {scope_id} not found")]
    ScopeNotFound {
        /// Id looked up
        scope_id: MetadataAddress,
    },

    /// Basic scope validation failed.
    #[error(transparent)]
    Scope(ScopeError),

    /// An existing owner did not sign.
    #[error("missing signature from existing owner {address}; required for update")]
    MissingOwnerSignature {
        /// Owner address
        address: String,
    },

    /// Parties whose signatures were required are absent.
    #[error("missing signature from {}", format_parties(.parties))]
    MissingSignatures {
        /// Missing parties with their roles
        parties: Vec<Party>,
    },

    /// Add or delete called with no addresses.
    #[error("data access list cannot be empty")]
    EmptyDataAccessList,

    /// Data access address does not decode.
    #[error("failed to decode data access address {address} : {cause}")]
    AddressDecode {
        /// Offending address text
        address: String,
        /// Decode failure
        cause: AddressError,
    },

    /// Address already on the data access list.
    #[error("address already exists for data access {address}")]
    DuplicateDataAccess {
        /// Repeated address
        address: String,
    },

    /// Address to delete is not on the data access list.
    #[error("address does not exist in scope data access: {address}")]
    AddressNotInDataAccess {
        /// Absent address
        address: String,
    },

    /// Proposed owner address does not decode.
    #[error("invalid scope owners: invalid party address [{address}]: {cause}")]
    InvalidPartyAddress {
        /// Offending address text
        address: String,
        /// Decode failure
        cause: AddressError,
    },

    /// Proposed owner has the unspecified role.
    #[error("invalid scope owners: invalid party type for party {address}")]
    InvalidPartyType {
        /// Offending address text
        address: String,
    },

    /// Proposed owner list is empty.
    #[error("invalid scope owners: at least one party is required")]
    NoOwnersSpecified,

    /// Proposed owners do not cover the specification's roles.
    #[error("missing party type required by spec: {}", format_roles(.missing))]
    MissingRequiredRoles {
        /// Uncovered roles, sorted
        missing: Vec<PartyRole>,
    },

    /// No signer may withdraw from the marker holding value ownership.
    #[error("missing signature for {marker} with authority to withdraw/remove existing value owner")]
    NoWithdrawAuthority {
        /// Marker address
        marker: String,
    },

    /// No signer may deposit into the marker receiving value ownership.
    #[error("no signatures present with authority to add scope to marker {marker}")]
    NoDepositAuthority {
        /// Marker address
        marker: String,
    },
}

fn missing_address_message(kind: &MetadataAddressKind) -> &'static str {
    match kind {
        MetadataAddressKind::ScopeSpecification => "invalid specification id: address is empty",
        MetadataAddressKind::ContractSpecification => {
            "invalid contract specification id: address is empty"
        }
        MetadataAddressKind::Scope => "address is empty",
    }
}

impl AuthError {
    /// Class of this failure.
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::IdentifierMismatch { .. }
            | AuthError::SpecificationNotFound { .. }
            | AuthError::ScopeNotFound { .. } => AuthErrorKind::Identity,
            AuthError::MissingAddress { .. }
            | AuthError::Scope(_)
            | AuthError::EmptyDataAccessList
            | AuthError::AddressDecode { .. }
            | AuthError::DuplicateDataAccess { .. }
            | AuthError::AddressNotInDataAccess { .. }
            | AuthError::InvalidPartyAddress { .. }
            | AuthError::InvalidPartyType { .. }
            | AuthError::NoOwnersSpecified
            | AuthError::MissingRequiredRoles { .. } => AuthErrorKind::Structural,
            AuthError::MissingOwnerSignature { .. } | AuthError::MissingSignatures { .. } => {
                AuthErrorKind::Consent
            }
            AuthError::NoWithdrawAuthority { .. } | AuthError::NoDepositAuthority { .. } => {
                AuthErrorKind::Authority
            }
        }
    }

    /// Create an owner signature error.
    pub fn missing_owner_signature(address: impl Into<String>) -> Self {
        Self::MissingOwnerSignature {
            address: address.into(),
        }
    }

    /// Create a missing-signatures error for the given parties.
    pub fn missing_signatures(parties: Vec<Party>) -> Self {
        Self::MissingSignatures { parties }
    }
}

impl From<ScopeError> for AuthError {
    fn from(err: ScopeError) -> Self {
        match err {
            ScopeError::InvalidPartyAddress { address, cause } => {
                AuthError::InvalidPartyAddress { address, cause }
            }
            ScopeError::InvalidPartyType { address } => AuthError::InvalidPartyType { address },
            ScopeError::NoOwners => AuthError::NoOwnersSpecified,
            ScopeError::InvalidDataAccess { address, cause } => {
                AuthError::AddressDecode { address, cause }
            }
            ScopeError::DuplicateDataAccess { address } => {
                AuthError::DuplicateDataAccess { address }
            }
            other => AuthError::Scope(other),
        }
    }
}
