//! Deterministic test accounts

use ledger_core::{AccountAddress, AddressCodec, Bech32Codec};
use sha2::{Digest, Sha256};

/// Account prefix used throughout the tests.
pub const TEST_PREFIX: &str = "pb";

/// Codec for [`TEST_PREFIX`].
pub fn test_codec() -> Bech32Codec {
    Bech32Codec::new(TEST_PREFIX)
}

/// Account address derived from `seed`; the same seed always gives the same
/// address.
pub fn account_address(seed: u64) -> String {
    let digest = Sha256::digest(format!("account-{seed}").as_bytes());
    test_codec()
        .encode(&AccountAddress::from_bytes(&digest[..20]))
        .unwrap()
}

/// Three distinct test users.
#[derive(Debug, Clone)]
pub struct TestUsers {
    /// First user
    pub user1: String,
    /// Second user
    pub user2: String,
    /// Third user
    pub user3: String,
}

impl Default for TestUsers {
    fn default() -> Self {
        Self {
            user1: account_address(1),
            user2: account_address(2),
            user3: account_address(3),
        }
    }
}
