//! Owner list mutation rules

use crate::error::{AuthError, AuthResult};
use ledger_core::party::missing_roles;
use ledger_core::scope::validate_parties;
use ledger_core::{AddressCodec, Party, PartyRole, SignerSet};
use std::collections::BTreeSet;
use tracing::debug;

/// Validates replacement of a scope's owner list.
pub struct OwnerSetValidator;

impl OwnerSetValidator {
    /// Validate replacing `existing` owners with `proposed`.
    ///
    /// Checks run in order: each proposed address decodes and has a role,
    /// the list is non-empty with unique addresses, the roles cover
    /// `required_roles`, and every existing party that was removed or whose
    /// role changed has signed. Newly added parties need no signature.
    pub fn validate(
        existing: &[Party],
        proposed: &[Party],
        signers: &SignerSet,
        required_roles: &BTreeSet<PartyRole>,
        codec: &dyn AddressCodec,
    ) -> AuthResult {
        Self::check(existing, proposed, signers, required_roles, codec).map_err(|err| {
            debug!(
                existing = existing.len(),
                proposed = proposed.len(),
                error = %err,
                "rejected owner update"
            );
            err
        })
    }

    /// Fail when `proposed` does not cover every role in `required_roles`.
    pub fn validate_role_coverage(
        proposed: &[Party],
        required_roles: &BTreeSet<PartyRole>,
    ) -> AuthResult {
        let missing = missing_roles(proposed, required_roles);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AuthError::MissingRequiredRoles { missing })
        }
    }

    /// Existing parties whose account does not appear in `proposed` with
    /// the same role.
    pub fn departing_parties<'a>(
        existing: &'a [Party],
        proposed: &[Party],
        codec: &dyn AddressCodec,
    ) -> Vec<&'a Party> {
        existing
            .iter()
            .filter(|party| {
                !proposed.iter().any(|kept| {
                    kept.role == party.role && codec.same_address(&kept.address, &party.address)
                })
            })
            .collect()
    }

    fn check(
        existing: &[Party],
        proposed: &[Party],
        signers: &SignerSet,
        required_roles: &BTreeSet<PartyRole>,
        codec: &dyn AddressCodec,
    ) -> AuthResult {
        validate_parties(proposed, codec)?;
        Self::validate_role_coverage(proposed, required_roles)?;

        match Self::departing_parties(existing, proposed, codec)
            .into_iter()
            .find(|party| !signers.contains_address(&party.address, codec))
        {
            Some(party) => Err(AuthError::missing_signatures(vec![party.clone()])),
            None => Ok(()),
        }
    }
}
