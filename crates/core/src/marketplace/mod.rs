//! Marketplace.
//!
//! Sell orders for certificate quantities at a seller-set price. The listed
//! quantity is the unit being sold; settling price and moving balances are
//! left to whoever composes this with the certificate ledger.

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::Marketplace;
pub use types::{Listing, Purchase};
