//! Signer consent checks shared by the validators

use crate::error::{AuthError, AuthResult};
use ledger_core::{AddressCodec, Party, SignerSet};

/// Parties whose account is absent from `signers`, in list order.
pub fn unsigned_parties<'a>(
    parties: impl IntoIterator<Item = &'a Party>,
    signers: &SignerSet,
    codec: &dyn AddressCodec,
) -> Vec<Party> {
    parties
        .into_iter()
        .filter(|party| !signers.contains_address(&party.address, codec))
        .cloned()
        .collect()
}

/// Every party must have signed; all missing parties are reported together.
pub fn require_all_signed(
    parties: &[Party],
    signers: &SignerSet,
    codec: &dyn AddressCodec,
) -> AuthResult {
    let missing = unsigned_parties(parties, signers, codec);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AuthError::missing_signatures(missing))
    }
}

/// Every owner address must have signed; the first missing one is reported.
pub fn require_owner_addresses_signed(
    owners: &[Party],
    signers: &SignerSet,
    codec: &dyn AddressCodec,
) -> AuthResult {
    match owners
        .iter()
        .find(|owner| !signers.contains_address(&owner.address, codec))
    {
        Some(owner) => Err(AuthError::missing_owner_signature(owner.address.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::{AccountAddress, Bech32Codec, PartyRole};

    fn codec() -> Bech32Codec {
        Bech32Codec::new("pb")
    }

    #[test]
    fn test_all_missing_reported() {
        let owners = vec![
            Party::owner("a"),
            Party::new("b", PartyRole::Servicer),
            Party::owner("c"),
        ];
        let signers: SignerSet = ["b"].into_iter().collect();
        assert_eq!(
            require_all_signed(&owners, &signers, &codec()),
            Err(AuthError::missing_signatures(vec![
                Party::owner("a"),
                Party::owner("c")
            ]))
        );
        assert_eq!(
            require_owner_addresses_signed(&owners, &signers, &codec()),
            Err(AuthError::missing_owner_signature("a"))
        );
    }

    #[test]
    fn test_all_signed() {
        let owners = vec![Party::owner("a")];
        let signers: SignerSet = ["a", "z"].into_iter().collect();
        assert!(require_all_signed(&owners, &signers, &codec()).is_ok());
        assert!(require_owner_addresses_signed(&owners, &signers, &codec()).is_ok());
        assert!(require_all_signed(&[], &SignerSet::new(), &codec()).is_ok());
    }

    #[test]
    fn test_uppercase_signer_counts_for_owner() {
        let owner = codec()
            .encode(&AccountAddress::from_bytes([4u8; 20]))
            .unwrap();
        let owners = vec![Party::owner(owner.clone())];
        let signers: SignerSet = [owner.to_uppercase()].into_iter().collect();
        assert!(require_all_signed(&owners, &signers, &codec()).is_ok());
        assert!(require_owner_addresses_signed(&owners, &signers, &codec()).is_ok());
    }
}
