//! Property-based tests for GenerationRegistry.

use proptest::prelude::*;
use recledger_shared::types::{AccountId, GenerationEventId, PageRequest, ProducerId};

use super::service::GenerationRegistry;

/// Strategy to generate a reporting caller from a small pool.
fn caller() -> impl Strategy<Value = AccountId> {
    prop_oneof![
        Just(AccountId::new("producer1")),
        Just(AccountId::new("producer2")),
        Just(AccountId::new("auditor")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Total generation equals the sum of the amounts of the events recorded
    /// for that producer, and only the owner can move it.
    #[test]
    fn prop_total_matches_owner_events(
        reports in prop::collection::vec((caller(), 0u64..10_000), 0..40),
    ) {
        let mut registry = GenerationRegistry::new();
        let owner = AccountId::new("producer1");
        let id = registry.register_producer(&owner, "solar".to_string()).unwrap();

        let mut expected_total = 0u64;
        let mut expected_events = 0u64;
        for (height, (reporter, amount)) in (1u64..).zip(reports) {
            let result = registry.record_generation(&reporter, id, amount, height);
            if reporter == owner && amount > 0 {
                let event_id = result.unwrap();
                expected_total += amount;
                expected_events += 1;
                prop_assert_eq!(event_id, GenerationEventId::new(expected_events));
                prop_assert_eq!(registry.generation_event(event_id).unwrap().timestamp, height);
            } else {
                prop_assert!(result.is_err());
            }
            prop_assert_eq!(registry.total_generation(id).unwrap(), expected_total);
            prop_assert_eq!(registry.event_count(), expected_events);
        }

        let events = registry.producer_events(id, PageRequest { page: 1, per_page: 100 });
        let summed: u64 = events.data.iter().map(|event| event.amount).sum();
        prop_assert_eq!(summed, expected_total);
    }

    /// Recording against an unregistered producer id never creates an event.
    #[test]
    fn prop_unknown_producer_rejected(raw_id in 2u64..1_000, amount in 1u64..1_000) {
        let mut registry = GenerationRegistry::new();
        let owner = AccountId::new("producer1");
        registry.register_producer(&owner, "wind".to_string()).unwrap();

        let result = registry.record_generation(&owner, ProducerId::new(raw_id), amount, 1);
        prop_assert_eq!(result.unwrap_err().error_code(), "UNAUTHORIZED");
        prop_assert_eq!(registry.event_count(), 0);
        prop_assert!(registry.total_generation(ProducerId::new(raw_id)).is_err());
    }
}
