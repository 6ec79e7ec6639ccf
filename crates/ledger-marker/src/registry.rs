//! In-memory marker registry
//!
//! Holds marker accounts keyed by decoded account address and answers the
//! permission queries the scope authorization engine makes through
//! [`PermissionOracle`]. Lookups decode their input, so any spelling the codec
//! accepts finds the same marker, and grants are stored under the canonical
//! grantee spelling.

use crate::account::{AccessGrant, MarkerAccount};
use crate::address::marker_account_address;
use crate::MarkerError;
use ledger_core::{AccountAddress, AddressCodec, Bech32Codec, MarkerPermission, PermissionOracle};
use std::collections::BTreeMap;
use tracing::debug;

/// Marker accounts keyed by account address bytes.
#[derive(Debug, Clone)]
pub struct MarkerRegistry<C: AddressCodec = Bech32Codec> {
    codec: C,
    markers: BTreeMap<AccountAddress, MarkerAccount>,
}

impl<C: AddressCodec> MarkerRegistry<C> {
    /// Empty registry encoding addresses with `codec`.
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            markers: BTreeMap::new(),
        }
    }

    /// Codec used for marker and grantee addresses.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Register a marker for `denom`, returning its address.
    pub fn add_marker(&mut self, denom: &str) -> Result<String, MarkerError> {
        let key = marker_account_address(denom)?;
        if self.markers.contains_key(&key) {
            return Err(MarkerError::AlreadyExists {
                denom: denom.to_string(),
            });
        }
        let account = MarkerAccount::new(denom, &self.codec)?;
        let address = account.address.clone();
        debug!(denom, address = %address, "registered marker");
        self.markers.insert(key, account);
        Ok(address)
    }

    /// Grant permissions on the marker at `marker`. Permissions are added to
    /// any the grantee already holds.
    pub fn grant_access(&mut self, marker: &str, mut grant: AccessGrant) -> Result<(), MarkerError> {
        grant.validate(&self.codec)?;
        grant.address = self.codec.canonicalize(&grant.address);
        let account = self.account_mut(marker)?;
        debug!(
            marker,
            grantee = %grant.address,
            permissions = %grant.permissions,
            "granting marker access"
        );
        account.grant(grant);
        Ok(())
    }

    /// Remove all access `grantee` holds on the marker at `marker`. Returns
    /// whether anything was removed.
    pub fn revoke_access(&mut self, marker: &str, grantee: &str) -> Result<bool, MarkerError> {
        let grantee = self.codec.canonicalize(grantee);
        let account = self.account_mut(marker)?;
        let removed = account.revoke(&grantee);
        debug!(marker, grantee = %grantee, removed, "revoked marker access");
        Ok(removed)
    }

    /// Marker at `address`.
    pub fn get_marker(&self, address: &str) -> Option<&MarkerAccount> {
        let key = self.codec.decode(address).ok()?;
        self.markers.get(&key)
    }

    /// Marker controlling `denom`.
    pub fn get_marker_by_denom(&self, denom: &str) -> Option<&MarkerAccount> {
        let key = marker_account_address(denom).ok()?;
        self.markers.get(&key)
    }

    /// All markers in address byte order.
    pub fn markers(&self) -> impl Iterator<Item = &MarkerAccount> {
        self.markers.values()
    }

    /// Number of registered markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether no markers are registered.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    fn account_mut(&mut self, marker: &str) -> Result<&mut MarkerAccount, MarkerError> {
        let key = self
            .codec
            .decode(marker)
            .map_err(|_| MarkerError::not_found(marker))?;
        self.markers
            .get_mut(&key)
            .ok_or_else(|| MarkerError::not_found(marker))
    }
}

impl Default for MarkerRegistry<Bech32Codec> {
    fn default() -> Self {
        Self::new(Bech32Codec::new("pb"))
    }
}

impl<C: AddressCodec> PermissionOracle for MarkerRegistry<C> {
    fn is_marker_address(&self, address: &str) -> bool {
        self.get_marker(address).is_some()
    }

    fn has_permission(&self, grantee: &str, marker: &str, permission: MarkerPermission) -> bool {
        self.get_marker(marker).is_some_and(|account| {
            account.has_access(&self.codec.canonicalize(grantee), permission)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use ledger_core::AccountAddress;

    fn addr(seed: u8) -> String {
        Bech32Codec::new("pb")
            .encode(&AccountAddress::from_bytes([seed; 20]))
            .unwrap()
    }

    #[test]
    fn test_add_and_lookup() {
        let mut registry: MarkerRegistry = MarkerRegistry::default();
        let address = registry.add_marker("testcoin").unwrap();

        assert!(registry.is_marker_address(&address));
        assert!(!registry.is_marker_address(&addr(1)));
        assert_eq!(
            registry.get_marker_by_denom("testcoin").map(|m| m.address.as_str()),
            Some(address.as_str())
        );
        assert_eq!(registry.get_marker(&address).unwrap().denom, "testcoin");
        assert!(registry.get_marker_by_denom("othercoin").is_none());
        assert!(registry.get_marker_by_denom("x").is_none());
    }

    #[test]
    fn test_duplicate_marker_rejected() {
        let mut registry: MarkerRegistry = MarkerRegistry::default();
        registry.add_marker("testcoin").unwrap();
        assert_matches!(
            registry.add_marker("testcoin"),
            Err(MarkerError::AlreadyExists { .. })
        );
        assert_matches!(registry.add_marker("1bad"), Err(MarkerError::InvalidDenom { .. }));
    }

    #[test]
    fn test_oracle_answers_grants() {
        let mut registry: MarkerRegistry = MarkerRegistry::default();
        let marker = registry.add_marker("testcoin").unwrap();
        registry
            .grant_access(&marker, AccessGrant::from_names(addr(1), "deposit").unwrap())
            .unwrap();
        registry
            .grant_access(&marker, AccessGrant::from_names(addr(1), "withdraw").unwrap())
            .unwrap();

        assert!(registry.has_permission(&addr(1), &marker, MarkerPermission::Deposit));
        assert!(registry.has_permission(&addr(1), &marker, MarkerPermission::Withdraw));
        assert!(!registry.has_permission(&addr(2), &marker, MarkerPermission::Deposit));
        assert!(!registry.has_permission(&addr(1), &addr(3), MarkerPermission::Deposit));

        assert!(registry.revoke_access(&marker, &addr(1)).unwrap());
        assert!(!registry.has_permission(&addr(1), &marker, MarkerPermission::Deposit));
    }

    #[test]
    fn test_grant_on_unknown_marker() {
        let mut registry: MarkerRegistry = MarkerRegistry::default();
        let grant = AccessGrant::from_names(addr(1), "deposit").unwrap();
        assert_matches!(
            registry.grant_access(&addr(9), grant),
            Err(MarkerError::NotFound { .. })
        );
        assert_matches!(
            registry.revoke_access(&addr(9), &addr(1)),
            Err(MarkerError::NotFound { .. })
        );
    }

    #[test]
    fn test_lookups_ignore_address_case() {
        let mut registry: MarkerRegistry = MarkerRegistry::default();
        let marker = registry.add_marker("testcoin").unwrap();
        let upper_marker = marker.to_uppercase();

        assert!(registry.is_marker_address(&upper_marker));
        assert_eq!(
            registry.get_marker(&upper_marker).map(|m| m.denom.as_str()),
            Some("testcoin")
        );

        registry
            .grant_access(
                &upper_marker,
                AccessGrant::from_names(addr(1).to_uppercase(), "deposit").unwrap(),
            )
            .unwrap();
        assert_eq!(
            registry.get_marker(&marker).unwrap().access_control[0].address,
            addr(1)
        );
        assert!(registry.has_permission(&addr(1), &marker, MarkerPermission::Deposit));
        assert!(registry.has_permission(
            &addr(1).to_uppercase(),
            &upper_marker,
            MarkerPermission::Deposit
        ));

        assert!(registry.revoke_access(&marker, &addr(1).to_uppercase()).unwrap());
        assert!(!registry.has_permission(&addr(1), &marker, MarkerPermission::Deposit));
    }
}
