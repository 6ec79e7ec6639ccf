//! Addresses whose signatures on the enclosing transaction were verified
//! upstream. The engine never checks signatures itself.

use crate::address::AddressCodec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ordered set of verified signer addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerSet(BTreeSet<String>);

impl SignerSet {
    /// Empty signer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `address` signed.
    pub fn contains(&self, address: &str) -> bool {
        self.0.contains(address)
    }

    /// Whether the account at `address` signed, under any spelling the
    /// codec accepts.
    pub fn contains_address(&self, address: &str, codec: &dyn AddressCodec) -> bool {
        self.contains(address) || self.iter().any(|signer| codec.same_address(signer, address))
    }

    /// Add a signer.
    pub fn insert(&mut self, address: impl Into<String>) -> bool {
        self.0.insert(address.into())
    }

    /// Signers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of signers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nobody signed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every signer here is also in `other`.
    pub fn is_subset(&self, other: &SignerSet) -> bool {
        self.0.is_subset(&other.0)
    }
}

impl<S: Into<String>> FromIterator<S> for SignerSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for SignerSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a SignerSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{AccountAddress, Bech32Codec};

    #[test]
    fn test_collects_and_dedups() {
        let signers: SignerSet = ["b", "a", "b"].into_iter().collect();
        assert_eq!(signers.len(), 2);
        assert_eq!(signers.iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(signers.contains("a"));
        assert!(!signers.contains("c"));
    }

    #[test]
    fn test_contains_address_by_account() {
        let codec = Bech32Codec::new("pb");
        let signer = codec
            .encode(&AccountAddress::from_bytes([5u8; 20]))
            .unwrap();
        let signers: SignerSet = [signer.to_uppercase()].into_iter().collect();

        assert!(!signers.contains(&signer));
        assert!(signers.contains_address(&signer, &codec));
        assert!(!signers.contains_address("pb1other", &codec));
    }

    #[test]
    fn test_subset() {
        let small: SignerSet = ["a"].into_iter().collect();
        let large: SignerSet = ["a", "b"].into_iter().collect();
        assert!(small.is_subset(&large));
        assert!(!large.is_subset(&small));
        assert!(SignerSet::new().is_subset(&small));
    }
}
