//! Value owner custody transfer rules
//!
//! A marker cannot sign, so moving value ownership off a marker needs a
//! signer holding `withdraw` on it and moving it onto a marker needs a signer
//! holding `deposit`. A plain value owner must sign for its own removal;
//! a plain address can be assigned without its signature.
//!
//! Addresses are put in canonical spelling before any marker or grant lookup,
//! so respelling a marker address does not make it look like a plain account.

use crate::error::{AuthError, AuthResult};
use ledger_core::{AddressCodec, MarkerPermission, PermissionOracle, SignerSet};
use tracing::{debug, trace};

/// Validates value owner changes against signers and marker grants.
pub struct ValueOwnerValidator;

impl ValueOwnerValidator {
    /// Validate a change from `existing` to `proposed` value owner.
    ///
    /// Empty strings count as unset, and two spellings of one account are no
    /// change. When both legs fail, the removal leg is reported.
    pub fn validate_transfer(
        existing: Option<&str>,
        proposed: Option<&str>,
        signers: &SignerSet,
        oracle: &dyn PermissionOracle,
        codec: &dyn AddressCodec,
    ) -> AuthResult {
        let existing = existing.filter(|v| !v.is_empty());
        let proposed = proposed.filter(|v| !v.is_empty());
        let unchanged = match (existing, proposed) {
            (Some(current), Some(incoming)) => codec.same_address(current, incoming),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return Ok(());
        }

        if let Some(current) = existing {
            Self::validate_removal(current, signers, oracle, codec)?;
        }

        if let Some(incoming) = proposed {
            Self::validate_assignment(incoming, signers, oracle, codec)?;
        }

        Ok(())
    }

    /// Validate giving up value ownership held by `current`.
    pub fn validate_removal(
        current: &str,
        signers: &SignerSet,
        oracle: &dyn PermissionOracle,
        codec: &dyn AddressCodec,
    ) -> AuthResult {
        let canonical = codec.canonicalize(current);
        if oracle.is_marker_address(&canonical) {
            if !Self::any_signer_holds(signers, &canonical, MarkerPermission::Withdraw, oracle, codec)
            {
                debug!(marker = current, "no signer holds withdraw on value owner marker");
                return Err(AuthError::NoWithdrawAuthority {
                    marker: current.to_string(),
                });
            }
        } else if !signers.contains_address(current, codec) {
            debug!(value_owner = current, "value owner did not sign its removal");
            return Err(AuthError::missing_owner_signature(current));
        }
        trace!(value_owner = current, "value owner removal authorized");
        Ok(())
    }

    /// Validate assigning value ownership to `incoming`.
    pub fn validate_assignment(
        incoming: &str,
        signers: &SignerSet,
        oracle: &dyn PermissionOracle,
        codec: &dyn AddressCodec,
    ) -> AuthResult {
        let canonical = codec.canonicalize(incoming);
        if oracle.is_marker_address(&canonical)
            && !Self::any_signer_holds(signers, &canonical, MarkerPermission::Deposit, oracle, codec)
        {
            debug!(marker = incoming, "no signer holds deposit on incoming marker");
            return Err(AuthError::NoDepositAuthority {
                marker: incoming.to_string(),
            });
        }
        Ok(())
    }

    fn any_signer_holds(
        signers: &SignerSet,
        marker: &str,
        permission: MarkerPermission,
        oracle: &dyn PermissionOracle,
        codec: &dyn AddressCodec,
    ) -> bool {
        signers
            .iter()
            .any(|signer| oracle.has_permission(&codec.canonicalize(signer), marker, permission))
    }
}
