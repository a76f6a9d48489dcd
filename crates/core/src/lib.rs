//! Core ledger state machines for RecLedger.
//!
//! This crate contains the authoritative state machine for a renewable
//! energy certificate economy with ZERO storage or transport dependencies.
//! Callers pass the host-asserted identity and block height explicitly.
//!
//! # Modules
//!
//! - `certificate` - Certificate issuance and account balances
//! - `generation` - Producer registration and generation events
//! - `marketplace` - Listings and purchases
//! - `contract` - Call-contract dispatch boundary
//! - `ledger` - Composite ledger routing calls to one component

pub mod certificate;
pub mod contract;
pub mod generation;
pub mod ledger;
pub mod marketplace;

pub use contract::{CallContext, CallResult, Contract};
pub use ledger::{Ledger, LedgerSnapshot};
