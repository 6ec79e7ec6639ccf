//! Property test strategies for ledger types
//!
//! Addresses are drawn from a small seed space so generated scopes share
//! owners and signers often enough to exercise the interesting paths.

use crate::accounts::account_address;
use ledger_core::{MetadataAddress, Party, PartyRole, Scope, SignerSet};
use proptest::prelude::*;
use uuid::Uuid;

// Re-export proptest for convenience
pub use proptest;

/// Size of the account seed space.
pub const ACCOUNT_SEEDS: u64 = 12;

/// Strategy for a deterministic account address.
pub fn arb_account_address() -> impl Strategy<Value = String> {
    (0..ACCOUNT_SEEDS).prop_map(account_address)
}

/// Strategy for any role other than `Unspecified`.
pub fn arb_specified_role() -> impl Strategy<Value = PartyRole> {
    prop::sample::select(
        PartyRole::ALL
            .into_iter()
            .filter(|role| role.is_specified())
            .collect::<Vec<_>>(),
    )
}

/// Strategy for a scope id.
pub fn arb_scope_id() -> impl Strategy<Value = MetadataAddress> {
    any::<u128>().prop_map(|bits| MetadataAddress::scope(Uuid::from_u128(bits)))
}

/// Strategy for 1..=`max` owners with unique addresses and specified roles.
/// The first owner always holds `Owner`.
pub fn arb_owner_list(max: usize) -> impl Strategy<Value = Vec<Party>> {
    prop::collection::btree_set(0..ACCOUNT_SEEDS, 1..=max.max(1)).prop_flat_map(|seeds| {
        let count = seeds.len();
        prop::collection::vec(arb_specified_role(), count).prop_map(move |mut roles| {
            roles[0] = PartyRole::Owner;
            seeds
                .iter()
                .zip(roles)
                .map(|(seed, role)| Party::new(account_address(*seed), role))
                .collect()
        })
    })
}

/// Strategy for a data access list without duplicates.
pub fn arb_data_access(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(0..ACCOUNT_SEEDS, 0..=max)
        .prop_map(|seeds| seeds.into_iter().map(account_address).collect())
}

/// Strategy for a plain (non-marker) value owner, possibly unset.
pub fn arb_plain_value_owner() -> impl Strategy<Value = Option<String>> {
    prop::option::of(arb_account_address())
}

/// Strategy for a structurally valid scope under `specification_id` whose
/// owners include the `Owner` role.
pub fn arb_scope(specification_id: MetadataAddress) -> impl Strategy<Value = Scope> {
    (
        arb_scope_id(),
        arb_owner_list(4),
        arb_data_access(4),
        arb_plain_value_owner(),
    )
        .prop_map(move |(scope_id, owners, data_access, value_owner)| {
            Scope::new(
                scope_id,
                specification_id.clone(),
                owners,
                data_access,
                value_owner,
            )
        })
}

/// Strategy for an arbitrary signer set drawn from the account seed space.
pub fn arb_signer_set() -> impl Strategy<Value = SignerSet> {
    prop::collection::btree_set(0..ACCOUNT_SEEDS, 0..=ACCOUNT_SEEDS as usize)
        .prop_map(|seeds| seeds.into_iter().map(account_address).collect())
}
