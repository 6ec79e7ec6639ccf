//! Scope operations and their dispatch to validators

use crate::authorizer::ScopeAuthorizer;
use crate::error::{AuthError, AuthResult};
use ledger_core::{
    AddressCodec, MetadataAddress, Party, PermissionOracle, Scope, SignerSet, SpecificationStore,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A requested mutation of a single scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScopeOperation {
    /// Create or replace a scope
    Write {
        /// Full proposed record
        scope: Scope,
    },
    /// Delete a scope
    Delete {
        /// Target scope
        scope_id: MetadataAddress,
    },
    /// Add addresses to the data access list
    AddDataAccess {
        /// Target scope
        scope_id: MetadataAddress,
        /// Addresses to add
        addresses: Vec<String>,
    },
    /// Remove addresses from the data access list
    DeleteDataAccess {
        /// Target scope
        scope_id: MetadataAddress,
        /// Addresses to remove
        addresses: Vec<String>,
    },
    /// Replace the owner list
    UpdateOwners {
        /// Target scope
        scope_id: MetadataAddress,
        /// New owners
        owners: Vec<Party>,
    },
}

impl ScopeOperation {
    /// Scope targeted by the operation.
    pub fn scope_id(&self) -> &MetadataAddress {
        match self {
            ScopeOperation::Write { scope } => &scope.scope_id,
            ScopeOperation::Delete { scope_id }
            | ScopeOperation::AddDataAccess { scope_id, .. }
            | ScopeOperation::DeleteDataAccess { scope_id, .. }
            | ScopeOperation::UpdateOwners { scope_id, .. } => scope_id,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ScopeOperation::Write { .. } => "write",
            ScopeOperation::Delete { .. } => "delete",
            ScopeOperation::AddDataAccess { .. } => "add_data_access",
            ScopeOperation::DeleteDataAccess { .. } => "delete_data_access",
            ScopeOperation::UpdateOwners { .. } => "update_owners",
        }
    }
}

/// Record state after an authorized operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeTransition {
    /// Store this record
    Upsert(Scope),
    /// Delete the record with this id
    Remove(MetadataAddress),
}

impl<S, P, C> ScopeAuthorizer<S, P, C>
where
    S: SpecificationStore,
    P: PermissionOracle,
    C: AddressCodec,
{
    /// Authorize `operation` against the stored scope and return the state to
    /// persist. Nothing is written here; the caller applies the transition.
    pub fn authorize(
        &self,
        existing: Option<&Scope>,
        operation: ScopeOperation,
        signers: &SignerSet,
    ) -> AuthResult<ScopeTransition> {
        let name = operation.name();
        let scope_id = operation.scope_id().clone();
        let result = self.dispatch(existing, operation, signers);
        match &result {
            Ok(_) => trace!(operation = name, scope_id = %scope_id, "operation authorized"),
            Err(err) => debug!(
                operation = name,
                scope_id = %scope_id,
                kind = ?err.kind(),
                error = %err,
                "operation rejected"
            ),
        }
        result
    }

    fn dispatch(
        &self,
        existing: Option<&Scope>,
        operation: ScopeOperation,
        signers: &SignerSet,
    ) -> AuthResult<ScopeTransition> {
        match operation {
            ScopeOperation::Write { scope } => {
                self.validate_update(existing, &scope, signers)?;
                Ok(ScopeTransition::Upsert(scope))
            }
            ScopeOperation::Delete { scope_id } => {
                let existing = target(existing, &scope_id)?;
                self.validate_remove(existing, signers)?;
                Ok(ScopeTransition::Remove(scope_id))
            }
            ScopeOperation::AddDataAccess {
                scope_id,
                addresses,
            } => {
                let existing = target(existing, &scope_id)?;
                self.validate_add_data_access(&addresses, existing, signers)?;
                let mut updated = existing.clone();
                updated.add_data_access(&addresses, &self.codec);
                Ok(ScopeTransition::Upsert(updated))
            }
            ScopeOperation::DeleteDataAccess {
                scope_id,
                addresses,
            } => {
                let existing = target(existing, &scope_id)?;
                self.validate_delete_data_access(&addresses, existing, signers)?;
                let mut updated = existing.clone();
                updated.remove_data_access(&addresses, &self.codec);
                Ok(ScopeTransition::Upsert(updated))
            }
            ScopeOperation::UpdateOwners { scope_id, owners } => {
                let existing = target(existing, &scope_id)?;
                let proposed = Scope {
                    owners,
                    ..existing.clone()
                };
                self.validate_update_owners(existing, &proposed, signers)?;
                Ok(ScopeTransition::Upsert(proposed))
            }
        }
    }
}

/// The stored scope an operation applies to; it must exist and carry the
/// operation's id.
fn target<'a>(existing: Option<&'a Scope>, scope_id: &MetadataAddress) -> AuthResult<&'a Scope> {
    let existing = existing.ok_or_else(|| AuthError::ScopeNotFound {
        scope_id: scope_id.clone(),
    })?;
    if &existing.scope_id != scope_id {
        return Err(AuthError::IdentifierMismatch {
            expected: existing.scope_id.clone(),
            got: scope_id.clone(),
        });
    }
    Ok(existing)
}
