//! The composite ledger the host talks to.
//!
//! Holds one instance of each component and routes a call to exactly one of
//! them by name. Components never call each other; callers composing
//! generation, issuance, and trading sequence those calls themselves.

use recledger_shared::LedgerError;
use recledger_shared::types::AccountId;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::certificate::CertificateLedger;
use crate::contract::{CallContext, CallResult, Contract};
use crate::generation::GenerationRegistry;
use crate::marketplace::Marketplace;

/// Names of the components reachable through `Ledger::call`.
pub const CONTRACT_NAMES: [&str; 3] = ["certificate", "generation", "marketplace"];

/// All ledger state.
#[derive(Debug, Clone)]
pub struct Ledger {
    certificates: CertificateLedger,
    generation: GenerationRegistry,
    marketplace: Marketplace,
}

/// Borrowed, serializable view of the whole ledger.
#[derive(Debug, Serialize)]
pub struct LedgerSnapshot<'a> {
    /// Certificate records and balances.
    pub certificate: &'a CertificateLedger,
    /// Producers and generation events.
    pub generation: &'a GenerationRegistry,
    /// Listings.
    pub marketplace: &'a Marketplace,
}

impl Ledger {
    /// Creates an empty ledger with `administrator` as the issuing identity.
    #[must_use]
    pub fn new(administrator: AccountId) -> Self {
        Self {
            certificates: CertificateLedger::new(administrator),
            generation: GenerationRegistry::new(),
            marketplace: Marketplace::new(),
        }
    }

    /// Apply one call to the component named `contract`.
    ///
    /// An unknown component is reported the same way as an unknown method.
    pub fn call(
        &mut self,
        contract: &str,
        method: &str,
        args: &[Value],
        ctx: &CallContext,
    ) -> CallResult {
        if let Some(component) = self.contract_mut(contract) {
            component.call(ctx, method, args)
        } else {
            let err = LedgerError::MethodNotFound(format!("{contract}.{method}"));
            warn!(contract, method, error = err.error_code(), "unknown contract");
            CallResult::failure(&err)
        }
    }

    /// Look up a component by name.
    pub fn contract_mut(&mut self, name: &str) -> Option<&mut dyn Contract> {
        match name {
            "certificate" => Some(&mut self.certificates),
            "generation" => Some(&mut self.generation),
            "marketplace" => Some(&mut self.marketplace),
            _ => None,
        }
    }

    /// The certificate ledger.
    #[must_use]
    pub fn certificates(&self) -> &CertificateLedger {
        &self.certificates
    }

    /// The generation registry.
    #[must_use]
    pub fn generation(&self) -> &GenerationRegistry {
        &self.generation
    }

    /// The marketplace.
    #[must_use]
    pub fn marketplace(&self) -> &Marketplace {
        &self.marketplace
    }

    /// Serializable view of every component's state.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot<'_> {
        LedgerSnapshot {
            certificate: &self.certificates,
            generation: &self.generation,
            marketplace: &self.marketplace,
        }
    }
}
