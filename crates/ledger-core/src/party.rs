//! Parties and the closed set of roles they can hold on a scope

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role a party plays on a scope.
///
/// Ordering follows the wire enumeration and is what "sorted" means wherever
/// sets of roles are reported.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyRole {
    /// No role; never valid on a stored party
    #[default]
    Unspecified,
    /// Originator of the underlying asset
    Originator,
    /// Servicer of the underlying asset
    Servicer,
    /// Investor in the underlying asset
    Investor,
    /// Custodian of the underlying asset
    Custodian,
    /// Owner of the scope
    Owner,
    /// Affiliate of another party
    Affiliate,
    /// Omnibus account holder
    Omnibus,
    /// Network-level provenance party
    Provenance,
}

impl PartyRole {
    /// Every role, including `Unspecified`.
    pub const ALL: [PartyRole; 9] = [
        PartyRole::Unspecified,
        PartyRole::Originator,
        PartyRole::Servicer,
        PartyRole::Investor,
        PartyRole::Custodian,
        PartyRole::Owner,
        PartyRole::Affiliate,
        PartyRole::Omnibus,
        PartyRole::Provenance,
    ];

    /// Short name, e.g. `OWNER`.
    pub fn short_name(self) -> &'static str {
        match self {
            PartyRole::Unspecified => "UNSPECIFIED",
            PartyRole::Originator => "ORIGINATOR",
            PartyRole::Servicer => "SERVICER",
            PartyRole::Investor => "INVESTOR",
            PartyRole::Custodian => "CUSTODIAN",
            PartyRole::Owner => "OWNER",
            PartyRole::Affiliate => "AFFILIATE",
            PartyRole::Omnibus => "OMNIBUS",
            PartyRole::Provenance => "PROVENANCE",
        }
    }

    /// Wire name, e.g. `PARTY_TYPE_OWNER`.
    pub fn wire_name(self) -> String {
        format!("PARTY_TYPE_{}", self.short_name())
    }

    /// Whether this role may appear on a stored party.
    pub fn is_specified(self) -> bool {
        self != PartyRole::Unspecified
    }
}

impl fmt::Display for PartyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PARTY_TYPE_{}", self.short_name())
    }
}

/// Unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown party type: {0}")]
pub struct UnknownPartyRole(pub String);

impl FromStr for PartyRole {
    type Err = UnknownPartyRole;

    /// Accepts short or wire names in any case (`owner`, `PARTY_TYPE_OWNER`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let short = upper.strip_prefix("PARTY_TYPE_").unwrap_or(upper.as_str());
        PartyRole::ALL
            .into_iter()
            .find(|role| role.short_name() == short)
            .ok_or_else(|| UnknownPartyRole(s.to_string()))
    }
}

/// An `(address, role)` pair recorded on a scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Party {
    /// Account address text
    pub address: String,
    /// Role held by the address
    pub role: PartyRole,
}

impl Party {
    /// Create a party.
    pub fn new(address: impl Into<String>, role: PartyRole) -> Self {
        Self {
            address: address.into(),
            role,
        }
    }

    /// Create a party with the `Owner` role.
    pub fn owner(address: impl Into<String>) -> Self {
        Self::new(address, PartyRole::Owner)
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.address, self.role)
    }
}

/// Set of roles present across a list of parties.
pub fn roles_of(parties: &[Party]) -> BTreeSet<PartyRole> {
    parties.iter().map(|p| p.role).collect()
}

/// Required roles not covered by `parties`, in sorted order.
pub fn missing_roles(parties: &[Party], required: &BTreeSet<PartyRole>) -> Vec<PartyRole> {
    let present = roles_of(parties);
    required.difference(&present).copied().collect()
}

/// Render parties as `[addr (ROLE), addr (ROLE)]`.
pub fn format_parties(parties: &[Party]) -> String {
    let rendered: Vec<String> = parties.iter().map(ToString::to_string).collect();
    format!("[{}]", rendered.join(", "))
}

/// Render roles by short name as `[OWNER, CUSTODIAN]`.
pub fn format_roles(roles: &[PartyRole]) -> String {
    let rendered: Vec<&str> = roles.iter().map(|r| r.short_name()).collect();
    format!("[{}]", rendered.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names() {
        assert_eq!(PartyRole::Owner.short_name(), "OWNER");
        assert_eq!(PartyRole::Owner.to_string(), "PARTY_TYPE_OWNER");
        assert_eq!(PartyRole::Custodian.wire_name(), "PARTY_TYPE_CUSTODIAN");
        assert!(!PartyRole::Unspecified.is_specified());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("owner".parse::<PartyRole>().unwrap(), PartyRole::Owner);
        assert_eq!(
            "PARTY_TYPE_AFFILIATE".parse::<PartyRole>().unwrap(),
            PartyRole::Affiliate
        );
        assert!("landlord".parse::<PartyRole>().is_err());
    }

    #[test]
    fn test_missing_roles_sorted() {
        let parties = vec![Party::new("a", PartyRole::Custodian)];
        let required: BTreeSet<_> = [PartyRole::Owner, PartyRole::Originator].into();
        assert_eq!(
            missing_roles(&parties, &required),
            vec![PartyRole::Originator, PartyRole::Owner]
        );
        assert_eq!(
            format_roles(&missing_roles(&parties, &required)),
            "[ORIGINATOR, OWNER]"
        );
    }

    #[test]
    fn test_party_rendering() {
        let parties = vec![Party::owner("pb1a"), Party::new("pb1b", PartyRole::Servicer)];
        assert_eq!(
            format_parties(&parties),
            "[pb1a (PARTY_TYPE_OWNER), pb1b (PARTY_TYPE_SERVICER)]"
        );
    }
}
