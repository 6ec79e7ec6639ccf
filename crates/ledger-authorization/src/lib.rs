//! Ledger Authorization - Scope Update Authorization Engine
//!
//! Decides whether a proposed change to a scope is permitted, given the
//! stored record, the proposal and the set of addresses that signed the
//! transaction. The engine is pure: collaborators are read-only traits from
//! `ledger-core` and nothing is persisted here.
//!
//! # Validators
//!
//! - `ScopeAuthorizer`: full-record writes, removals, and the entry point for
//!   `ScopeOperation` dispatch
//! - `DataAccessValidator`: data access list additions and removals
//! - `OwnerSetValidator`: owner list replacement and role coverage
//! - `ValueOwnerValidator`: value owner custody transfers, including marker
//!   `withdraw`/`deposit` grants
//!
//! # Errors
//!
//! Every rejection is an `AuthError` with a stable message. `AuthError::kind`
//! groups failures into identity, structural, consent and authority classes.
//!
//! # Example
//!
//! ```ignore
//! use ledger_authorization::{ScopeAuthorizer, ScopeOperation, ScopeTransition};
//!
//! let authorizer = ScopeAuthorizer::new(&specifications, &markers, config.address_codec());
//! match authorizer.authorize(stored.as_ref(), operation, &signers)? {
//!     ScopeTransition::Upsert(scope) => store.put(scope),
//!     ScopeTransition::Remove(scope_id) => store.delete(&scope_id),
//! }
//! ```

#![forbid(unsafe_code)]

pub mod authorizer;
pub mod consent;
pub mod data_access;
pub mod error;
pub mod operation;
pub mod owners;
pub mod value_owner;

pub use authorizer::ScopeAuthorizer;
pub use data_access::DataAccessValidator;
pub use error::{AuthError, AuthErrorKind, AuthResult};
pub use operation::{ScopeOperation, ScopeTransition};
pub use owners::OwnerSetValidator;
pub use value_owner::ValueOwnerValidator;
