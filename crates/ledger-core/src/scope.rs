//! Scope records
//!
//! A scope is an ownership-bearing record referencing off-chain data. It names
//! the specification it conforms to, its owning parties, a set of addresses
//! with data access, and optionally a value owner holding custody of any value
//! associated with the scope.

use crate::address::{AddressCodec, AddressError};
use crate::metadata_address::{MetadataAddress, MetadataAddressError, MetadataAddressKind};
use crate::party::Party;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Basic (stateless) scope validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// Scope id missing or malformed
    #[error("{0}")]
    InvalidScopeId(MetadataAddressError),

    /// Specification id malformed
    #[error("invalid specification id: {0}")]
    InvalidSpecificationId(MetadataAddressError),

    /// Owner list empty
    #[error("invalid scope owners: at least one party is required")]
    NoOwners,

    /// Owner address does not decode
    #[error("invalid scope owners: invalid party address [{address}]: {cause}")]
    InvalidPartyAddress {
        /// Offending address text
        address: String,
        /// Decode failure
        cause: AddressError,
    },

    /// Owner has the unspecified role
    #[error("invalid scope owners: invalid party type for party {address}")]
    InvalidPartyType {
        /// Offending address text
        address: String,
    },

    /// Same address listed twice as owner
    #[error("invalid scope owners: duplicate owner address {address}")]
    DuplicateOwner {
        /// Repeated address
        address: String,
    },

    /// Data access address does not decode
    #[error("failed to decode data access address {address} : {cause}")]
    InvalidDataAccess {
        /// Offending address text
        address: String,
        /// Decode failure
        cause: AddressError,
    },

    /// Same address listed twice for data access
    #[error("address already exists for data access {address}")]
    DuplicateDataAccess {
        /// Repeated address
        address: String,
    },

    /// Value owner address does not decode
    #[error("invalid value owner address {address}: {cause}")]
    InvalidValueOwner {
        /// Offending address text
        address: String,
        /// Decode failure
        cause: AddressError,
    },
}

/// Check a party list: every address decodes, no unspecified roles, at least
/// one party, no account listed twice under any spelling. Checks run in that
/// order.
pub fn validate_parties(parties: &[Party], codec: &dyn AddressCodec) -> Result<(), ScopeError> {
    for party in parties {
        codec
            .validate(&party.address)
            .map_err(|cause| ScopeError::InvalidPartyAddress {
                address: party.address.clone(),
                cause,
            })?;
        if !party.role.is_specified() {
            return Err(ScopeError::InvalidPartyType {
                address: party.address.clone(),
            });
        }
    }

    if parties.is_empty() {
        return Err(ScopeError::NoOwners);
    }

    let mut seen = BTreeSet::new();
    for party in parties {
        if !seen.insert(codec.canonicalize(&party.address)) {
            return Err(ScopeError::DuplicateOwner {
                address: party.address.clone(),
            });
        }
    }
    Ok(())
}

/// Ownership-bearing record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    /// Content-addressed identifier; immutable once created
    pub scope_id: MetadataAddress,
    /// Specification this scope conforms to
    pub specification_id: MetadataAddress,
    /// Owning parties, unique by address
    pub owners: Vec<Party>,
    /// Addresses with data access; set semantics
    #[serde(default)]
    pub data_access: Vec<String>,
    /// Custodial owner of any value tied to the scope
    #[serde(default)]
    pub value_owner: Option<String>,
}

impl Scope {
    /// Create a scope.
    pub fn new(
        scope_id: MetadataAddress,
        specification_id: MetadataAddress,
        owners: Vec<Party>,
        data_access: Vec<String>,
        value_owner: Option<String>,
    ) -> Self {
        Self {
            scope_id,
            specification_id,
            owners,
            data_access,
            value_owner,
        }
    }

    /// Value owner, treating an empty string as unset.
    pub fn value_owner(&self) -> Option<&str> {
        self.value_owner.as_deref().filter(|v| !v.is_empty())
    }

    /// Owner addresses in list order.
    pub fn owner_addresses(&self) -> impl Iterator<Item = &str> {
        self.owners.iter().map(|p| p.address.as_str())
    }

    /// Whether the account at `address` is on the data access list.
    pub fn has_data_access(&self, address: &str, codec: &dyn AddressCodec) -> bool {
        self.data_access
            .iter()
            .any(|existing| codec.same_address(existing, address))
    }

    /// Stateless validation of the record's own fields.
    ///
    /// The specification id is optional here; whether it must be present and
    /// resolvable is decided by the authorization layer.
    pub fn validate_basic(&self, codec: &dyn AddressCodec) -> Result<(), ScopeError> {
        self.scope_id
            .validate_kind(MetadataAddressKind::Scope)
            .map_err(ScopeError::InvalidScopeId)?;

        if !self.specification_id.is_empty() {
            self.specification_id
                .validate_kind(MetadataAddressKind::ScopeSpecification)
                .map_err(ScopeError::InvalidSpecificationId)?;
        }

        validate_parties(&self.owners, codec)?;

        let mut seen = BTreeSet::new();
        for address in &self.data_access {
            codec
                .validate(address)
                .map_err(|cause| ScopeError::InvalidDataAccess {
                    address: address.clone(),
                    cause,
                })?;
            if !seen.insert(codec.canonicalize(address)) {
                return Err(ScopeError::DuplicateDataAccess {
                    address: address.clone(),
                });
            }
        }

        if let Some(value_owner) = self.value_owner() {
            codec
                .validate(value_owner)
                .map_err(|cause| ScopeError::InvalidValueOwner {
                    address: value_owner.to_string(),
                    cause,
                })?;
        }

        Ok(())
    }

    /// Canonical form used for no-op detection: owners sorted by
    /// `(address, role)`, data access sorted and de-duplicated, empty value
    /// owner folded to `None`.
    pub fn normalized(&self) -> Scope {
        let mut owners = self.owners.clone();
        owners.sort();
        let data_access: BTreeSet<String> = self.data_access.iter().cloned().collect();
        Scope {
            scope_id: self.scope_id.clone(),
            specification_id: self.specification_id.clone(),
            owners,
            data_access: data_access.into_iter().collect(),
            value_owner: self.value_owner().map(str::to_string),
        }
    }

    /// Content equality ignoring list order.
    pub fn is_equivalent(&self, other: &Scope) -> bool {
        self.normalized() == other.normalized()
    }

    /// Append accounts not already present to the data access list, in
    /// canonical spelling.
    pub fn add_data_access<S: AsRef<str>>(&mut self, addresses: &[S], codec: &dyn AddressCodec) {
        for address in addresses {
            let address = address.as_ref();
            if !self.has_data_access(address, codec) {
                self.data_access.push(codec.canonicalize(address));
            }
        }
    }

    /// Remove accounts from the data access list.
    pub fn remove_data_access<S: AsRef<str>>(&mut self, addresses: &[S], codec: &dyn AddressCodec) {
        self.data_access.retain(|existing| {
            !addresses
                .iter()
                .any(|a| codec.same_address(a.as_ref(), existing))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{AccountAddress, Bech32Codec};
    use crate::party::PartyRole;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    fn codec() -> Bech32Codec {
        Bech32Codec::new("pb")
    }

    fn addr(seed: u8) -> String {
        codec()
            .encode(&AccountAddress::from_bytes([seed; 20]))
            .unwrap()
    }

    fn scope() -> Scope {
        Scope::new(
            MetadataAddress::scope(Uuid::new_v4()),
            MetadataAddress::scope_specification(Uuid::new_v4()),
            vec![Party::owner(addr(1))],
            vec![addr(2)],
            Some(addr(1)),
        )
    }

    #[test]
    fn test_valid_scope_passes() {
        assert!(scope().validate_basic(&codec()).is_ok());
    }

    #[test]
    fn test_empty_scope_reports_missing_id() {
        let err = Scope::default().validate_basic(&codec()).unwrap_err();
        assert_eq!(err.to_string(), "address is empty");
    }

    #[test]
    fn test_owner_checks() {
        let mut s = scope();
        s.owners = vec![];
        assert_matches!(s.validate_basic(&codec()), Err(ScopeError::NoOwners));

        s.owners = vec![Party::new(addr(1), PartyRole::Unspecified)];
        assert_matches!(
            s.validate_basic(&codec()),
            Err(ScopeError::InvalidPartyType { .. })
        );

        s.owners = vec![Party::owner(addr(1)), Party::new(addr(1), PartyRole::Custodian)];
        assert_matches!(
            s.validate_basic(&codec()),
            Err(ScopeError::DuplicateOwner { .. })
        );

        s.owners = vec![Party::owner("shoulderror")];
        assert_matches!(
            s.validate_basic(&codec()),
            Err(ScopeError::InvalidPartyAddress { address, .. }) if address == "shoulderror"
        );
    }

    #[test]
    fn test_data_access_and_value_owner_checks() {
        let mut s = scope();
        s.data_access = vec![addr(2), addr(2)];
        assert_matches!(
            s.validate_basic(&codec()),
            Err(ScopeError::DuplicateDataAccess { .. })
        );

        s.data_access = vec![];
        s.value_owner = Some("nope".to_string());
        assert_matches!(
            s.validate_basic(&codec()),
            Err(ScopeError::InvalidValueOwner { .. })
        );

        s.value_owner = Some(String::new());
        assert!(s.validate_basic(&codec()).is_ok());
    }

    #[test]
    fn test_equivalence_ignores_order() {
        let a = Scope {
            owners: vec![Party::owner(addr(1)), Party::owner(addr(3))],
            data_access: vec![addr(2), addr(4)],
            ..scope()
        };
        let mut b = a.clone();
        b.owners.reverse();
        b.data_access.reverse();
        assert_ne!(a, b);
        assert!(a.is_equivalent(&b));

        b.value_owner = None;
        assert!(!a.is_equivalent(&b));
    }

    #[test]
    fn test_data_access_mutation() {
        let mut s = scope();
        s.add_data_access(&[addr(2), addr(5), addr(5).to_uppercase()], &codec());
        assert_eq!(s.data_access, vec![addr(2), addr(5)]);
        s.remove_data_access(&[addr(2).to_uppercase()], &codec());
        assert_eq!(s.data_access, vec![addr(5)]);
    }

    #[test]
    fn test_duplicates_detected_across_spellings() {
        let mut s = scope();
        s.data_access = vec![addr(2), addr(2).to_uppercase()];
        assert_matches!(
            s.validate_basic(&codec()),
            Err(ScopeError::DuplicateDataAccess { address }) if address == addr(2).to_uppercase()
        );

        s.data_access = vec![];
        s.owners = vec![Party::owner(addr(1)), Party::new(addr(1).to_uppercase(), PartyRole::Servicer)];
        assert_matches!(
            s.validate_basic(&codec()),
            Err(ScopeError::DuplicateOwner { .. })
        );
        assert!(!s.has_data_access(&addr(9), &codec()));
    }
}
