//! Marker accounts and their access grants

use crate::address::marker_address;
use crate::MarkerError;
use ledger_core::{AccessList, AddressCodec, MarkerPermission};
use serde::{Deserialize, Serialize};

/// Permissions granted to one address on a marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Grantee address
    pub address: String,
    /// Permissions held
    pub permissions: AccessList,
}

impl AccessGrant {
    /// Create a grant.
    pub fn new(address: impl Into<String>, permissions: AccessList) -> Self {
        Self {
            address: address.into(),
            permissions,
        }
    }

    /// Create a grant from comma separated permission names, e.g.
    /// `"deposit,withdraw"`.
    pub fn from_names(address: impl Into<String>, names: &str) -> Result<Self, MarkerError> {
        Ok(Self::new(address, AccessList::from_names(names)?))
    }

    /// Whether the grant includes `permission`.
    pub fn has(&self, permission: MarkerPermission) -> bool {
        self.permissions.has(permission)
    }

    /// The grantee must decode and at least one permission must be held.
    pub fn validate(&self, codec: &dyn AddressCodec) -> Result<(), MarkerError> {
        codec
            .validate(&self.address)
            .map_err(|cause| MarkerError::InvalidGrantAddress {
                address: self.address.clone(),
                cause,
            })?;
        if self.permissions.is_empty() {
            return Err(MarkerError::EmptyGrant {
                address: self.address.clone(),
            });
        }
        Ok(())
    }
}

/// Account controlling a denomination, with per-address permission grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerAccount {
    /// Account address derived from the denomination
    pub address: String,
    /// Denomination controlled by the marker
    pub denom: String,
    /// Grants, at most one per address
    #[serde(default)]
    pub access_control: Vec<AccessGrant>,
}

impl MarkerAccount {
    /// Create a marker for `denom` with no grants.
    pub fn new(denom: impl Into<String>, codec: &dyn AddressCodec) -> Result<Self, MarkerError> {
        let denom = denom.into();
        let address = marker_address(&denom, codec)?;
        Ok(Self {
            address,
            denom,
            access_control: Vec::new(),
        })
    }

    /// Add a grant, merging with an existing grant for the same address.
    pub fn grant(&mut self, grant: AccessGrant) {
        match self
            .access_control
            .iter_mut()
            .find(|existing| existing.address == grant.address)
        {
            Some(existing) => existing.permissions.extend(&grant.permissions),
            None => self.access_control.push(grant),
        }
    }

    /// Remove every permission held by `address`. Returns whether a grant
    /// was removed.
    pub fn revoke(&mut self, address: &str) -> bool {
        let before = self.access_control.len();
        self.access_control.retain(|grant| grant.address != address);
        before != self.access_control.len()
    }

    /// Grant held by `address`, if any.
    pub fn grant_for(&self, address: &str) -> Option<&AccessGrant> {
        self.access_control.iter().find(|g| g.address == address)
    }

    /// Whether `address` holds `permission`.
    pub fn has_access(&self, address: &str, permission: MarkerPermission) -> bool {
        self.grant_for(address)
            .is_some_and(|grant| grant.has(permission))
    }

    /// Addresses holding `permission`, in grant order.
    pub fn addresses_with(&self, permission: MarkerPermission) -> Vec<&str> {
        self.access_control
            .iter()
            .filter(|g| g.has(permission))
            .map(|g| g.address.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use ledger_core::{AccountAddress, Bech32Codec};

    fn codec() -> Bech32Codec {
        Bech32Codec::new("pb")
    }

    fn addr(seed: u8) -> String {
        codec()
            .encode(&AccountAddress::from_bytes([seed; 20]))
            .unwrap()
    }

    #[test]
    fn test_grants_accumulate() {
        let mut marker = MarkerAccount::new("testcoin", &codec()).unwrap();
        marker.grant(AccessGrant::from_names(addr(1), "deposit").unwrap());
        marker.grant(AccessGrant::from_names(addr(1), "withdraw").unwrap());

        assert_eq!(marker.access_control.len(), 1);
        assert!(marker.has_access(&addr(1), MarkerPermission::Deposit));
        assert!(marker.has_access(&addr(1), MarkerPermission::Withdraw));
        assert!(!marker.has_access(&addr(2), MarkerPermission::Deposit));
        assert_eq!(marker.addresses_with(MarkerPermission::Withdraw), vec![addr(1)]);
    }

    #[test]
    fn test_revoke_removes_everything() {
        let mut marker = MarkerAccount::new("testcoin", &codec()).unwrap();
        marker.grant(AccessGrant::from_names(addr(1), "deposit,withdraw,admin").unwrap());
        assert!(marker.revoke(&addr(1)));
        assert!(!marker.revoke(&addr(1)));
        assert!(marker.grant_for(&addr(1)).is_none());
    }

    #[test]
    fn test_grant_validation() {
        let grant = AccessGrant::new(addr(1), AccessList::new());
        assert_matches!(grant.validate(&codec()), Err(MarkerError::EmptyGrant { .. }));

        let grant = AccessGrant::from_names("bogus", "mint").unwrap();
        assert_matches!(
            grant.validate(&codec()),
            Err(MarkerError::InvalidGrantAddress { .. })
        );

        assert_matches!(
            AccessGrant::from_names(addr(1), "mint,fly"),
            Err(MarkerError::UnknownPermission(_))
        );
    }
}
