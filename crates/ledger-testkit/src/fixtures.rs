//! Scope fixtures and a bundled in-memory ledger

use crate::accounts::{test_codec, TestUsers};
use ledger_core::{
    Bech32Codec, MetadataAddress, Party, PartyRole, Scope, ScopeSpecification, SignerSet,
    SpecificationRegistry,
};
use ledger_marker::{AccessGrant, MarkerRegistry};
use uuid::Uuid;

/// One `Owner` party per address.
pub fn owner_party_list<S: AsRef<str>>(addresses: &[S]) -> Vec<Party> {
    addresses
        .iter()
        .map(|address| Party::owner(address.as_ref()))
        .collect()
}

/// Signer set from a list of addresses.
pub fn signers<S: AsRef<str>>(addresses: &[S]) -> SignerSet {
    addresses.iter().map(|a| a.as_ref().to_string()).collect()
}

/// Fresh random scope id.
pub fn new_scope_id() -> MetadataAddress {
    MetadataAddress::scope(Uuid::new_v4())
}

/// Fresh random scope specification id.
pub fn new_specification_id() -> MetadataAddress {
    MetadataAddress::scope_specification(Uuid::new_v4())
}

/// Builder for test scopes.
#[derive(Debug, Clone)]
pub struct ScopeBuilder {
    scope: Scope,
}

impl ScopeBuilder {
    /// Scope with the given ids and nothing else.
    pub fn new(scope_id: MetadataAddress, specification_id: MetadataAddress) -> Self {
        Self {
            scope: Scope::new(scope_id, specification_id, Vec::new(), Vec::new(), None),
        }
    }

    /// Add an owner with the `Owner` role.
    pub fn owner(self, address: impl Into<String>) -> Self {
        self.party(address, PartyRole::Owner)
    }

    /// Add an owner with the given role.
    pub fn party(mut self, address: impl Into<String>, role: PartyRole) -> Self {
        self.scope.owners.push(Party::new(address, role));
        self
    }

    /// Replace the owner list.
    pub fn owners(mut self, owners: Vec<Party>) -> Self {
        self.scope.owners = owners;
        self
    }

    /// Add a data access address.
    pub fn data_access(mut self, address: impl Into<String>) -> Self {
        self.scope.data_access.push(address.into());
        self
    }

    /// Set the value owner.
    pub fn value_owner(mut self, address: impl Into<String>) -> Self {
        self.scope.value_owner = Some(address.into());
        self
    }

    /// Finish.
    pub fn build(self) -> Scope {
        self.scope
    }
}

/// Specifications, markers and users for engine tests.
///
/// Starts with one specification requiring the `Owner` role, owned by
/// `user1`.
#[derive(Debug, Clone)]
pub struct TestLedger {
    /// Named users
    pub users: TestUsers,
    /// Id of the default specification
    pub specification_id: MetadataAddress,
    /// Specification store
    pub specifications: SpecificationRegistry,
    /// Marker registry
    pub markers: MarkerRegistry,
}

impl Default for TestLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLedger {
    /// Ledger with the default specification and no markers.
    pub fn new() -> Self {
        let users = TestUsers::default();
        let specification_id = new_specification_id();
        let mut specifications = SpecificationRegistry::new();
        specifications.insert(ScopeSpecification::new(
            specification_id.clone(),
            None,
            vec![users.user1.clone()],
            vec![PartyRole::Owner],
            Vec::new(),
        ));
        Self {
            users,
            specification_id,
            specifications,
            markers: MarkerRegistry::new(test_codec()),
        }
    }

    /// Codec for test addresses.
    pub fn codec(&self) -> Bech32Codec {
        test_codec()
    }

    /// Register another specification requiring `roles`.
    pub fn add_specification(&mut self, roles: Vec<PartyRole>) -> MetadataAddress {
        let id = new_specification_id();
        self.specifications.insert(ScopeSpecification::new(
            id.clone(),
            None,
            vec![self.users.user1.clone()],
            roles,
            Vec::new(),
        ));
        id
    }

    /// Register a marker and its grants, e.g. `&[(user1, "deposit,withdraw")]`.
    /// Returns the marker address.
    pub fn add_marker<S: AsRef<str>>(&mut self, denom: &str, grants: &[(S, &str)]) -> String {
        let marker = self.markers.add_marker(denom).unwrap();
        for (grantee, names) in grants {
            self.markers
                .grant_access(&marker, AccessGrant::from_names(grantee.as_ref(), names).unwrap())
                .unwrap();
        }
        marker
    }

    /// Scope builder using the default specification.
    pub fn scope(&self, scope_id: &MetadataAddress) -> ScopeBuilder {
        ScopeBuilder::new(scope_id.clone(), self.specification_id.clone())
    }
}
