//! Marker addresses
//!
//! A marker's account address is derived from its denomination alone, so any
//! party can compute it without consulting the registry.

use crate::MarkerError;
use ledger_core::{AccountAddress, AddressCodec};
use sha2::{Digest, Sha256};

/// Length of a marker account address in bytes.
pub const MARKER_ADDRESS_LEN: usize = 20;

const MIN_DENOM_LEN: usize = 3;
const MAX_DENOM_LEN: usize = 128;

/// Check a denomination: 3-128 characters, a leading ASCII letter, then ASCII
/// letters, digits, `/`, `-` or `.`.
pub fn validate_denom(denom: &str) -> Result<(), MarkerError> {
    let mut chars = denom.chars();
    let leading_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let valid = leading_letter
        && (MIN_DENOM_LEN..=MAX_DENOM_LEN).contains(&denom.len())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(MarkerError::invalid_denom(denom))
    }
}

/// Raw bytes of the marker account for `denom`: the first 20 bytes of
/// `sha256("marker/" + denom)`.
pub fn marker_account_address(denom: &str) -> Result<AccountAddress, MarkerError> {
    validate_denom(denom)?;
    let digest = Sha256::digest(format!("marker/{denom}").as_bytes());
    Ok(AccountAddress::from_bytes(&digest[..MARKER_ADDRESS_LEN]))
}

/// Text address of the marker account for `denom`.
pub fn marker_address(denom: &str, codec: &dyn AddressCodec) -> Result<String, MarkerError> {
    let address = marker_account_address(denom)?;
    codec.encode(&address).map_err(MarkerError::Encoding)
}
