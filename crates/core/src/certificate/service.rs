//! Certificate ledger state machine.
//!
//! Issuance is the only operation that creates supply. Transfers move
//! balance between accounts and never change the total.

use std::collections::BTreeMap;

use recledger_shared::types::{AccountId, CertificateId, Sequence};
use recledger_shared::{LedgerError, LedgerResult};
use serde::Serialize;

use super::types::Certificate;

/// Certificate records and account balances.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CertificateLedger {
    administrator: AccountId,
    certificate_sequence: Sequence,
    certificates: BTreeMap<CertificateId, Certificate>,
    balances: BTreeMap<AccountId, u64>,
    total_supply: u64,
}

impl CertificateLedger {
    /// Creates an empty ledger whose issuance is gated to `administrator`.
    #[must_use]
    pub fn new(administrator: AccountId) -> Self {
        Self {
            administrator,
            certificate_sequence: Sequence::new(),
            certificates: BTreeMap::new(),
            balances: BTreeMap::new(),
            total_supply: 0,
        }
    }

    /// The identity allowed to issue certificates.
    #[must_use]
    pub fn administrator(&self) -> &AccountId {
        &self.administrator
    }

    /// Issue a new certificate and credit `producer` with `amount` units.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `caller` is not the administrator
    /// - `InvalidAmount` if `amount` is zero or would overflow total supply
    /// - `Internal` if certificate ids are exhausted
    pub fn issue_certificate(
        &mut self,
        caller: &AccountId,
        producer: AccountId,
        amount: u64,
    ) -> LedgerResult<CertificateId> {
        if *caller != self.administrator {
            return Err(LedgerError::Unauthorized(
                "only the administrator can issue certificates".to_string(),
            ));
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount(
                "certificate amount must be positive".to_string(),
            ));
        }

        let new_supply = self.total_supply.checked_add(amount).ok_or_else(|| {
            LedgerError::InvalidAmount("issuance would overflow total supply".to_string())
        })?;
        // Total supply bounds every individual balance.
        let new_balance = self.balance(&producer) + amount;

        let id = self
            .certificate_sequence
            .advance()
            .map(CertificateId::new)
            .ok_or_else(|| LedgerError::Internal("certificate ids exhausted".to_string()))?;

        self.certificates
            .insert(id, Certificate::issued(id, producer.clone(), amount));
        self.balances.insert(producer, new_balance);
        self.total_supply = new_supply;

        Ok(id)
    }

    /// Move `amount` units from `sender` to `recipient`.
    ///
    /// A self-transfer passes the same balance check and leaves the balance
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is zero
    /// - `InsufficientBalance` if `sender` holds less than `amount`
    pub fn transfer(
        &mut self,
        sender: &AccountId,
        recipient: AccountId,
        amount: u64,
    ) -> LedgerResult<()> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount(
                "transfer amount must be positive".to_string(),
            ));
        }

        let available = self.balance(sender);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                available,
                requested: amount,
            })?;

        if *sender == recipient {
            return Ok(());
        }

        // Cannot overflow: sender and recipient together hold at most total supply.
        let credited = self.balance(&recipient) + amount;
        self.balances.insert(sender.clone(), remaining);
        self.balances.insert(recipient, credited);

        Ok(())
    }

    /// Balance of `account`; 0 for accounts never credited.
    #[must_use]
    pub fn balance(&self, account: &AccountId) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Look up a certificate by id.
    #[must_use]
    pub fn certificate(&self, id: CertificateId) -> Option<&Certificate> {
        self.certificates.get(&id)
    }

    /// Sum of every issued amount.
    #[must_use]
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Last issued certificate id value (0 when none).
    #[must_use]
    pub fn certificate_count(&self) -> u64 {
        self.certificate_sequence.last()
    }

    /// Every account that has ever been credited, with its balance.
    pub fn balances(&self) -> impl Iterator<Item = (&AccountId, u64)> {
        self.balances.iter().map(|(account, balance)| (account, *balance))
    }
}
