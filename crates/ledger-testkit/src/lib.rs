//! Ledger Testing Infrastructure
//!
//! Common fixtures for the ledger crates: deterministic accounts, scope
//! builders, a bundled in-memory ledger with a specification store and a
//! marker registry, proptest strategies, and tracing setup.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! ledger-testkit = { path = "../ledger-testkit" }
//! ```
//!
//! ```rust,ignore
//! use ledger_testkit::*;
//!
//! #[test]
//! fn my_test() {
//!     init_test_tracing();
//!     let ledger = TestLedger::new();
//!     let scope = ledger.scope(&new_scope_id()).owner(&ledger.users.user1).build();
//! }
//! ```

pub mod accounts;
pub mod fixtures;
pub mod logging;
pub mod strategies;

pub use accounts::*;
pub use fixtures::*;
pub use logging::init_test_tracing;
