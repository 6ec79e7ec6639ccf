//! Scope specifications and the read-only store that resolves them
//!
//! Specifications are created by a separate flow; the authorization engine
//! only looks them up to check existence and to learn which party roles a
//! scope's owners must cover.

use crate::address::{AddressCodec, AddressError};
use crate::metadata_address::{MetadataAddress, MetadataAddressError, MetadataAddressKind};
use crate::party::PartyRole;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Scope specification validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecificationError {
    /// Id missing or not a scope specification address
    #[error("invalid scope specification id: {0}")]
    InvalidId(MetadataAddressError),

    /// No owner addresses listed
    #[error("the scope specification must have at least one owner")]
    NoOwners,

    /// Owner address does not decode
    #[error("invalid owner address [{address}] on scope specification: {cause}")]
    InvalidOwnerAddress {
        /// Offending address text
        address: String,
        /// Decode failure
        cause: AddressError,
    },

    /// No party roles listed
    #[error("the scope specification must have at least one party involved")]
    NoPartiesInvolved,

    /// Unspecified listed as a required role
    #[error("parties involved cannot include PARTY_TYPE_UNSPECIFIED")]
    UnspecifiedParty,

    /// Contract spec id missing or malformed
    #[error("invalid contract specification id at index {index}: {cause}")]
    InvalidContractSpecId {
        /// Position in the list
        index: usize,
        /// Structural failure
        cause: MetadataAddressError,
    },
}

/// Policy object declaring which roles a scope's owners must cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSpecification {
    /// Scope specification address
    pub specification_id: MetadataAddress,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Addresses that administer the specification
    pub owner_addresses: Vec<String>,
    /// Roles a conforming scope's owners must include
    pub parties_involved: Vec<PartyRole>,
    /// Contract specifications usable within conforming scopes
    #[serde(default)]
    pub contract_spec_ids: Vec<MetadataAddress>,
}

impl ScopeSpecification {
    /// Create a specification.
    pub fn new(
        specification_id: MetadataAddress,
        description: Option<String>,
        owner_addresses: Vec<String>,
        parties_involved: Vec<PartyRole>,
        contract_spec_ids: Vec<MetadataAddress>,
    ) -> Self {
        Self {
            specification_id,
            description,
            owner_addresses,
            parties_involved,
            contract_spec_ids,
        }
    }

    /// Roles a conforming scope must cover.
    pub fn required_roles(&self) -> BTreeSet<PartyRole> {
        self.parties_involved.iter().copied().collect()
    }

    /// Stateless validation of the specification's own fields.
    pub fn validate_basic(&self, codec: &dyn AddressCodec) -> Result<(), SpecificationError> {
        self.specification_id
            .validate_kind(MetadataAddressKind::ScopeSpecification)
            .map_err(SpecificationError::InvalidId)?;

        if self.owner_addresses.is_empty() {
            return Err(SpecificationError::NoOwners);
        }
        for address in &self.owner_addresses {
            codec
                .validate(address)
                .map_err(|cause| SpecificationError::InvalidOwnerAddress {
                    address: address.clone(),
                    cause,
                })?;
        }

        if self.parties_involved.is_empty() {
            return Err(SpecificationError::NoPartiesInvolved);
        }
        if self.parties_involved.contains(&PartyRole::Unspecified) {
            return Err(SpecificationError::UnspecifiedParty);
        }

        for (index, id) in self.contract_spec_ids.iter().enumerate() {
            id.validate_kind(MetadataAddressKind::ContractSpecification)
                .map_err(|cause| SpecificationError::InvalidContractSpecId { index, cause })?;
        }

        Ok(())
    }
}

/// Read-only lookup of scope specifications.
pub trait SpecificationStore: Send + Sync {
    /// Fetch a specification by id.
    fn get_specification(&self, id: &MetadataAddress) -> Option<ScopeSpecification>;
}

impl<T: SpecificationStore + ?Sized> SpecificationStore for &T {
    fn get_specification(&self, id: &MetadataAddress) -> Option<ScopeSpecification> {
        (**self).get_specification(id)
    }
}

/// In-memory specification store.
#[derive(Debug, Clone, Default)]
pub struct SpecificationRegistry {
    specifications: BTreeMap<MetadataAddress, ScopeSpecification>,
}

impl SpecificationRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a specification, returning the previous one.
    pub fn insert(&mut self, specification: ScopeSpecification) -> Option<ScopeSpecification> {
        tracing::trace!(id = %specification.specification_id, "storing scope specification");
        self.specifications
            .insert(specification.specification_id.clone(), specification)
    }

    /// Remove a specification.
    pub fn remove(&mut self, id: &MetadataAddress) -> Option<ScopeSpecification> {
        self.specifications.remove(id)
    }

    /// Number of stored specifications.
    pub fn len(&self) -> usize {
        self.specifications.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.specifications.is_empty()
    }
}

impl SpecificationStore for SpecificationRegistry {
    fn get_specification(&self, id: &MetadataAddress) -> Option<ScopeSpecification> {
        self.specifications.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{AccountAddress, Bech32Codec};
    use uuid::Uuid;

    fn codec() -> Bech32Codec {
        Bech32Codec::new("pb")
    }

    fn spec() -> ScopeSpecification {
        let owner = codec()
            .encode(&AccountAddress::from_bytes([9u8; 20]))
            .unwrap();
        ScopeSpecification::new(
            MetadataAddress::scope_specification(Uuid::new_v4()),
            None,
            vec![owner],
            vec![PartyRole::Owner],
            vec![MetadataAddress::contract_specification(Uuid::new_v4())],
        )
    }

    #[test]
    fn test_valid_specification() {
        assert!(spec().validate_basic(&codec()).is_ok());
        assert_eq!(spec().required_roles(), BTreeSet::from([PartyRole::Owner]));
    }

    #[test]
    fn test_specification_checks() {
        let mut s = spec();
        s.parties_involved = vec![PartyRole::Unspecified];
        assert_eq!(
            s.validate_basic(&codec()),
            Err(SpecificationError::UnspecifiedParty)
        );

        let mut s = spec();
        s.owner_addresses.clear();
        assert_eq!(s.validate_basic(&codec()), Err(SpecificationError::NoOwners));

        let mut s = spec();
        s.contract_spec_ids = vec![MetadataAddress::scope(Uuid::new_v4())];
        assert!(matches!(
            s.validate_basic(&codec()),
            Err(SpecificationError::InvalidContractSpecId { index: 0, .. })
        ));

        let mut s = spec();
        s.specification_id = MetadataAddress::empty();
        assert_eq!(
            s.validate_basic(&codec()).unwrap_err().to_string(),
            "invalid scope specification id: address is empty"
        );
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = SpecificationRegistry::new();
        let s = spec();
        assert!(registry.get_specification(&s.specification_id).is_none());
        registry.insert(s.clone());
        assert_eq!(registry.get_specification(&s.specification_id), Some(s.clone()));
        registry.remove(&s.specification_id);
        assert!(registry.is_empty());
    }
}
