//! Ledger Core - Scope Ownership Foundation
//!
//! This crate provides the value types shared by the scope authorization
//! engine and its hosts. Everything here is pure data plus stateless
//! validation; no module performs I/O other than configuration loading.
//!
//! # Contents
//!
//! ## Identifiers
//! - `AccountAddress`, `AddressCodec`, `Bech32Codec`: account address decoding
//! - `MetadataAddress`: typed identifiers for scopes and specifications
//!
//! ## Records
//! - `Party`, `PartyRole`: owners and the roles they hold
//! - `Scope`: the ownership-bearing record and its basic validation
//! - `ScopeSpecification`, `SpecificationStore`: required-role policy lookup
//!
//! ## Authorization Inputs
//! - `SignerSet`: addresses that signed the current transaction
//! - `MarkerPermission`, `AccessList`, `PermissionOracle`: marker grant queries
//!
//! ## Ambient
//! - `LedgerError`: configuration and loading errors
//! - `config`: network and address prefix configuration

#![forbid(unsafe_code)]

/// Account addresses and their codec
pub mod address;

/// Unified error handling
pub mod errors;

/// Scope and specification identifiers
pub mod metadata_address;

/// Parties and party roles
pub mod party;

/// Marker permissions and the permission oracle seam
pub mod permission;

/// Scope records
pub mod scope;

/// Transaction signer sets
pub mod signers;

/// Scope specifications and their store
pub mod specification;

/// Configuration loading and validation
pub mod config;

pub use address::{AccountAddress, AddressCodec, AddressError, Bech32Codec};
pub use config::{ConfigSource, LedgerConfig, Network};
pub use errors::{LedgerError, Result};
pub use metadata_address::{MetadataAddress, MetadataAddressError, MetadataAddressKind};
pub use party::{Party, PartyRole, UnknownPartyRole};
pub use permission::{AccessList, MarkerPermission, NoMarkers, PermissionOracle, UnknownPermission};
pub use scope::{Scope, ScopeError};
pub use signers::SignerSet;
pub use specification::{
    ScopeSpecification, SpecificationError, SpecificationRegistry, SpecificationStore,
};
