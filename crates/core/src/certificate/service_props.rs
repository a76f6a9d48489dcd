//! Property-based tests for CertificateLedger.
//!
//! - Balance conservation under transfers
//! - Non-negative balances (no underflow, failed transfers change nothing)
//! - Administrator-only issuance

use proptest::prelude::*;
use recledger_shared::types::{AccountId, CertificateId};

use super::service::CertificateLedger;

const ADMIN: &str = "CONTRACT_OWNER";

/// Strategy to generate one of a small pool of accounts, so transfers collide.
fn account() -> impl Strategy<Value = AccountId> {
    prop_oneof![
        Just(AccountId::new("producer1")),
        Just(AccountId::new("producer2")),
        Just(AccountId::new("user1")),
        Just(AccountId::new("user2")),
        Just(AccountId::new("user3")),
    ]
}

/// Strategy to generate a transfer: (sender, recipient, amount).
fn transfer() -> impl Strategy<Value = (AccountId, AccountId, u64)> {
    (account(), account(), 0u64..2_000)
}

/// Ledger seeded with one issuance per producer.
fn seeded(first: u64, second: u64) -> CertificateLedger {
    let admin = AccountId::new(ADMIN);
    let mut ledger = CertificateLedger::new(admin.clone());
    ledger
        .issue_certificate(&admin, "producer1".into(), first)
        .unwrap();
    ledger
        .issue_certificate(&admin, "producer2".into(), second)
        .unwrap();
    ledger
}

fn sum_of_balances(ledger: &CertificateLedger) -> u64 {
    ledger.balances().map(|(_, balance)| balance).sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any sequence of transfers, successful or not, keeps the sum of all
    /// balances equal to total supply.
    #[test]
    fn prop_transfers_conserve_supply(
        first in 1u64..5_000,
        second in 1u64..5_000,
        transfers in prop::collection::vec(transfer(), 0..40),
    ) {
        let mut ledger = seeded(first, second);
        let supply = ledger.total_supply();
        prop_assert_eq!(supply, first + second);

        for (sender, recipient, amount) in transfers {
            let _ = ledger.transfer(&sender, recipient, amount);
            prop_assert_eq!(sum_of_balances(&ledger), supply);
            prop_assert_eq!(ledger.total_supply(), supply);
        }
    }

    /// A failed transfer leaves both balances untouched; a successful one
    /// moves exactly `amount`.
    #[test]
    fn prop_transfer_is_all_or_nothing(
        first in 1u64..5_000,
        (sender, recipient, amount) in transfer(),
    ) {
        let mut ledger = seeded(first, first);
        let sender_before = ledger.balance(&sender);
        let recipient_before = ledger.balance(&recipient);

        match ledger.transfer(&sender, recipient.clone(), amount) {
            Ok(()) if sender == recipient => {
                prop_assert_eq!(ledger.balance(&sender), sender_before);
            }
            Ok(()) => {
                prop_assert_eq!(ledger.balance(&sender), sender_before - amount);
                prop_assert_eq!(ledger.balance(&recipient), recipient_before + amount);
            }
            Err(_) => {
                prop_assert!(amount == 0 || amount > sender_before);
                prop_assert_eq!(ledger.balance(&sender), sender_before);
                prop_assert_eq!(ledger.balance(&recipient), recipient_before);
            }
        }
    }

    /// Issuance from anyone but the administrator fails and consumes no id.
    #[test]
    fn prop_non_admin_cannot_issue(
        caller in "[a-z]{1,12}",
        amount in 1u64..1_000_000,
    ) {
        prop_assume!(caller != ADMIN);
        let admin = AccountId::new(ADMIN);
        let mut ledger = CertificateLedger::new(admin.clone());

        let result = ledger.issue_certificate(&AccountId::new(caller), "producer1".into(), amount);
        prop_assert!(result.is_err());
        prop_assert_eq!(ledger.certificate_count(), 0);
        prop_assert_eq!(ledger.total_supply(), 0);

        let id = ledger.issue_certificate(&admin, "producer1".into(), amount).unwrap();
        prop_assert_eq!(id, CertificateId::new(1));
    }

    /// Certificate ids are dense and strictly increasing across successful
    /// issuances, regardless of interleaved failures.
    #[test]
    fn prop_certificate_ids_strictly_increase(
        attempts in prop::collection::vec((any::<bool>(), 0u64..100), 1..30),
    ) {
        let admin = AccountId::new(ADMIN);
        let mut ledger = CertificateLedger::new(admin.clone());
        let mut expected = 0u64;

        for (authorized, amount) in attempts {
            let caller = if authorized { admin.clone() } else { AccountId::new("intruder") };
            if let Ok(id) = ledger.issue_certificate(&caller, "producer1".into(), amount) {
                expected += 1;
                prop_assert_eq!(id, CertificateId::new(expected));
            } else {
                prop_assert_eq!(ledger.certificate_count(), expected);
            }
        }
    }
}
