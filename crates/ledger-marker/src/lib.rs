//! Ledger Marker - Marker Custody Accounts
//!
//! Markers are accounts that control a denomination. Addresses holding
//! `withdraw` or `deposit` on a marker may move scope value ownership away
//! from or onto it. This crate provides:
//!
//! - `marker_address`: deterministic marker address derivation from a denom
//! - `MarkerAccount`, `AccessGrant`: a marker and its per-address grants
//! - `MarkerRegistry`: in-memory registry implementing `PermissionOracle`
//!
//! # Example
//!
//! ```ignore
//! use ledger_marker::{AccessGrant, MarkerRegistry};
//!
//! let mut registry = MarkerRegistry::default();
//! let marker = registry.add_marker("testcoin")?;
//! registry.grant_access(&marker, AccessGrant::from_names(&admin, "deposit,withdraw")?)?;
//! ```

#![forbid(unsafe_code)]

pub mod account;
pub mod address;
pub mod error;
pub mod registry;

pub use account::{AccessGrant, MarkerAccount};
pub use address::{marker_account_address, marker_address, validate_denom, MARKER_ADDRESS_LEN};
pub use error::MarkerError;
pub use registry::MarkerRegistry;
