//! Certificate Ledger.
//!
//! Owns certificate records and per-account balances:
//! - Issuance, restricted to the ledger administrator
//! - Balance transfer between accounts
//! - Read-only balance, certificate, and supply lookups

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::CertificateLedger;
pub use types::Certificate;
