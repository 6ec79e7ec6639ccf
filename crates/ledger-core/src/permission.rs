//! Marker permissions and the read-only oracle the authorization engine
//! consults for them.
//!
//! The engine only needs two questions answered about marker custody: is an
//! address a marker, and does a grantee hold a given permission on it. Both
//! live behind [`PermissionOracle`] so scope validation never depends on the
//! marker account model itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Permission that can be granted to an address on a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerPermission {
    /// Mint new supply
    Mint,
    /// Burn supply held by the marker
    Burn,
    /// Place value into marker custody
    Deposit,
    /// Take value out of marker custody
    Withdraw,
    /// Delete the marker
    Delete,
    /// Administer grants
    Admin,
    /// Move restricted coin between accounts
    Transfer,
}

impl MarkerPermission {
    /// Every grantable permission.
    pub const ALL: [MarkerPermission; 7] = [
        MarkerPermission::Mint,
        MarkerPermission::Burn,
        MarkerPermission::Deposit,
        MarkerPermission::Withdraw,
        MarkerPermission::Delete,
        MarkerPermission::Admin,
        MarkerPermission::Transfer,
    ];

    /// Lowercase name used in grant lists.
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerPermission::Mint => "mint",
            MarkerPermission::Burn => "burn",
            MarkerPermission::Deposit => "deposit",
            MarkerPermission::Withdraw => "withdraw",
            MarkerPermission::Delete => "delete",
            MarkerPermission::Admin => "admin",
            MarkerPermission::Transfer => "transfer",
        }
    }
}

impl fmt::Display for MarkerPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission name outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid marker permission: {0}")]
pub struct UnknownPermission(pub String);

impl FromStr for MarkerPermission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.strip_prefix("access_").unwrap_or(name.as_str());
        MarkerPermission::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| UnknownPermission(s.trim().to_string()))
    }
}

/// Set of permissions held by one grantee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessList(BTreeSet<MarkerPermission>);

impl AccessList {
    /// Empty access list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma separated list such as `"deposit,withdraw"`.
    ///
    /// Blank entries are skipped; any unknown name fails the whole list.
    pub fn from_names(names: &str) -> Result<Self, UnknownPermission> {
        names
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(MarkerPermission::from_str)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Whether `permission` is held.
    pub fn has(&self, permission: MarkerPermission) -> bool {
        self.0.contains(&permission)
    }

    /// Add every permission in `other`.
    pub fn extend(&mut self, other: &AccessList) {
        self.0.extend(other.0.iter().copied());
    }

    /// Add a single permission.
    pub fn insert(&mut self, permission: MarkerPermission) -> bool {
        self.0.insert(permission)
    }

    /// Whether no permission is held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Held permissions in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = MarkerPermission> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<MarkerPermission> for AccessList {
    fn from_iter<I: IntoIterator<Item = MarkerPermission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for AccessList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|p| p.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

/// Read-only view of marker identity and permission grants.
pub trait PermissionOracle: Send + Sync {
    /// Whether `address` identifies a marker account.
    fn is_marker_address(&self, address: &str) -> bool;

    /// Whether `grantee` holds `permission` on the marker at `marker`.
    ///
    /// Returns false when `marker` is not a marker.
    fn has_permission(&self, grantee: &str, marker: &str, permission: MarkerPermission) -> bool;
}

impl<T: PermissionOracle + ?Sized> PermissionOracle for &T {
    fn is_marker_address(&self, address: &str) -> bool {
        (**self).is_marker_address(address)
    }

    fn has_permission(&self, grantee: &str, marker: &str, permission: MarkerPermission) -> bool {
        (**self).has_permission(grantee, marker, permission)
    }
}

/// Oracle for hosts without markers: nothing is a marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMarkers;

impl PermissionOracle for NoMarkers {
    fn is_marker_address(&self, _address: &str) -> bool {
        false
    }

    fn has_permission(&self, _grantee: &str, _marker: &str, _permission: MarkerPermission) -> bool {
        false
    }
}
