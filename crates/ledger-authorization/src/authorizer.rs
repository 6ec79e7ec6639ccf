//! Scope update authorization
//!
//! [`ScopeAuthorizer`] ties the individual validators to the read-only
//! collaborators they need: the specification store, the marker permission
//! oracle and the address codec. Every check is pure; the first failure in
//! the documented order is returned.

use crate::consent::{require_all_signed, require_owner_addresses_signed};
use crate::data_access::DataAccessValidator;
use crate::error::{AuthError, AuthResult};
use crate::owners::OwnerSetValidator;
use crate::value_owner::ValueOwnerValidator;
use ledger_core::{
    AddressCodec, MetadataAddressKind, PermissionOracle, Scope, ScopeSpecification, SignerSet,
    SpecificationStore,
};
use tracing::{debug, trace};

/// Authorizes scope mutations against stored state and signers.
#[derive(Debug, Clone)]
pub struct ScopeAuthorizer<S, P, C> {
    specifications: S,
    permissions: P,
    pub(crate) codec: C,
}

impl<S, P, C> ScopeAuthorizer<S, P, C>
where
    S: SpecificationStore,
    P: PermissionOracle,
    C: AddressCodec,
{
    /// Create an authorizer over the given collaborators.
    pub fn new(specifications: S, permissions: P, codec: C) -> Self {
        Self {
            specifications,
            permissions,
            codec,
        }
    }

    /// Address codec in use.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Validate writing `proposed` over `existing` (`None` when creating).
    ///
    /// Creation only runs structural validation. An update checks, in order:
    /// the id is unchanged, `proposed` is structurally valid, then, unless
    /// `proposed` is equivalent to `existing`, every existing owner signed
    /// and the value owner change is authorized.
    pub fn validate_update(
        &self,
        existing: Option<&Scope>,
        proposed: &Scope,
        signers: &SignerSet,
    ) -> AuthResult {
        let result = self.check_update(existing, proposed, signers);
        match &result {
            Ok(()) => trace!(scope_id = %proposed.scope_id, "scope write authorized"),
            Err(err) => debug!(
                scope_id = %proposed.scope_id,
                creating = existing.is_none(),
                error = %err,
                "rejected scope write"
            ),
        }
        result
    }

    fn check_update(
        &self,
        existing: Option<&Scope>,
        proposed: &Scope,
        signers: &SignerSet,
    ) -> AuthResult {
        let Some(existing) = existing else {
            return self.validate_structure(proposed).map(|_| ());
        };

        if existing.scope_id != proposed.scope_id {
            return Err(AuthError::IdentifierMismatch {
                expected: existing.scope_id.clone(),
                got: proposed.scope_id.clone(),
            });
        }

        self.validate_structure(proposed)?;

        if existing.is_equivalent(proposed) {
            debug!(scope_id = %proposed.scope_id, "scope unchanged, skipping signer checks");
            return Ok(());
        }

        require_owner_addresses_signed(&existing.owners, signers, &self.codec)?;

        ValueOwnerValidator::validate_transfer(
            existing.value_owner(),
            proposed.value_owner(),
            signers,
            &self.permissions,
            &self.codec,
        )
    }

    /// Structural validation shared by creation and update.
    ///
    /// The scope id must be present and the scope must pass basic
    /// validation. The specification id must be present and resolve, and the
    /// owners must cover its required roles. Returns the specification.
    pub fn validate_structure(&self, scope: &Scope) -> AuthResult<ScopeSpecification> {
        if scope.scope_id.is_empty() {
            return Err(AuthError::MissingAddress {
                kind: MetadataAddressKind::Scope,
            });
        }
        scope.validate_basic(&self.codec)?;

        let specification = self.resolve_specification(scope)?;
        OwnerSetValidator::validate_role_coverage(&scope.owners, &specification.required_roles())?;
        Ok(specification)
    }

    /// Validate deleting `existing` outright.
    ///
    /// Every owner must sign, then value ownership must be released as for a
    /// transfer to no value owner.
    pub fn validate_remove(&self, existing: &Scope, signers: &SignerSet) -> AuthResult {
        let result = require_all_signed(&existing.owners, signers, &self.codec).and_then(|()| {
            match existing.value_owner() {
                Some(value_owner) => ValueOwnerValidator::validate_removal(
                    value_owner,
                    signers,
                    &self.permissions,
                    &self.codec,
                ),
                None => Ok(()),
            }
        });
        if let Err(err) = &result {
            debug!(scope_id = %existing.scope_id, error = %err, "rejected scope removal");
        }
        result
    }

    /// Validate adding `addresses` to the data access list of `existing`.
    pub fn validate_add_data_access<A: AsRef<str>>(
        &self,
        addresses: &[A],
        existing: &Scope,
        signers: &SignerSet,
    ) -> AuthResult {
        DataAccessValidator::validate_add(addresses, existing, signers, &self.codec)
    }

    /// Validate removing `addresses` from the data access list of `existing`.
    pub fn validate_delete_data_access<A: AsRef<str>>(
        &self,
        addresses: &[A],
        existing: &Scope,
        signers: &SignerSet,
    ) -> AuthResult {
        DataAccessValidator::validate_delete(addresses, existing, signers, &self.codec)
    }

    /// Validate replacing the owners of `existing` with those of `proposed`.
    ///
    /// Required roles come from the proposed scope's specification.
    pub fn validate_update_owners(
        &self,
        existing: &Scope,
        proposed: &Scope,
        signers: &SignerSet,
    ) -> AuthResult {
        if existing.scope_id != proposed.scope_id {
            return Err(AuthError::IdentifierMismatch {
                expected: existing.scope_id.clone(),
                got: proposed.scope_id.clone(),
            });
        }
        let specification = self.resolve_specification(proposed)?;
        OwnerSetValidator::validate(
            &existing.owners,
            &proposed.owners,
            signers,
            &specification.required_roles(),
            &self.codec,
        )
    }

    fn resolve_specification(&self, scope: &Scope) -> AuthResult<ScopeSpecification> {
        if scope.specification_id.is_empty() {
            return Err(AuthError::MissingAddress {
                kind: MetadataAddressKind::ScopeSpecification,
            });
        }
        self.specifications
            .get_specification(&scope.specification_id)
            .ok_or_else(|| AuthError::SpecificationNotFound {
                id: scope.specification_id.clone(),
            })
    }
}
