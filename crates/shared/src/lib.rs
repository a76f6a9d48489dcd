//! Shared identifiers, errors, and configuration for RecLedger.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for accounts, certificates, producers, events, and listings
//! - Per-entity id sequences
//! - Pagination types for list queries
//! - The ledger error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{LedgerError, LedgerResult};
