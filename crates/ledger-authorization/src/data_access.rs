//! Data access list mutation rules
//!
//! Adding or removing data access addresses needs the consent of every
//! existing owner. Argument addresses are checked one at a time, so the first
//! offending address is the one reported. Membership is by account, not by
//! spelling.

use crate::consent::require_all_signed;
use crate::error::{AuthError, AuthResult};
use ledger_core::{AddressCodec, Scope, SignerSet};
use tracing::debug;

/// Validates data access list mutations on an existing scope.
pub struct DataAccessValidator;

impl DataAccessValidator {
    /// Validate adding `addresses` to the data access list of `existing`.
    pub fn validate_add<S: AsRef<str>>(
        addresses: &[S],
        existing: &Scope,
        signers: &SignerSet,
        codec: &dyn AddressCodec,
    ) -> AuthResult {
        Self::check_addresses(addresses, codec, |address| {
            if existing.has_data_access(address, codec) {
                return Err(AuthError::DuplicateDataAccess {
                    address: address.to_string(),
                });
            }
            Ok(())
        })
        .and_then(|()| require_all_signed(&existing.owners, signers, codec))
        .map_err(|err| {
            debug!(scope_id = %existing.scope_id, error = %err, "rejected data access addition");
            err
        })
    }

    /// Validate removing `addresses` from the data access list of `existing`.
    pub fn validate_delete<S: AsRef<str>>(
        addresses: &[S],
        existing: &Scope,
        signers: &SignerSet,
        codec: &dyn AddressCodec,
    ) -> AuthResult {
        Self::check_addresses(addresses, codec, |address| {
            if !existing.has_data_access(address, codec) {
                return Err(AuthError::AddressNotInDataAccess {
                    address: address.to_string(),
                });
            }
            Ok(())
        })
        .and_then(|()| require_all_signed(&existing.owners, signers, codec))
        .map_err(|err| {
            debug!(scope_id = %existing.scope_id, error = %err, "rejected data access removal");
            err
        })
    }

    fn check_addresses<S, F>(addresses: &[S], codec: &dyn AddressCodec, mut membership: F) -> AuthResult
    where
        S: AsRef<str>,
        F: FnMut(&str) -> AuthResult,
    {
        if addresses.is_empty() {
            return Err(AuthError::EmptyDataAccessList);
        }
        for address in addresses {
            let address = address.as_ref();
            codec
                .validate(address)
                .map_err(|cause| AuthError::AddressDecode {
                    address: address.to_string(),
                    cause,
                })?;
            membership(address)?;
        }
        Ok(())
    }
}
