//! Property-based tests for Marketplace.
//!
//! - Listing quantity only ever decreases by exactly what was bought
//! - A listing is active iff it was neither cancelled nor sold out
//! - Failed creations never consume a listing id

use proptest::prelude::*;
use recledger_shared::types::{AccountId, ListingId};

use super::service::Marketplace;

#[derive(Debug, Clone)]
enum Action {
    Buy(u64),
    Cancel(AccountId),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0u64..400).prop_map(Action::Buy),
        1 => prop_oneof![
            Just(AccountId::new("seller1")),
            Just(AccountId::new("seller2")),
        ]
        .prop_map(Action::Cancel),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Replays random buys and cancellations against one listing and checks
    /// the lifecycle against a simple model.
    #[test]
    fn prop_listing_lifecycle(
        initial in 1i64..1_000,
        actions in prop::collection::vec(action(), 0..30),
    ) {
        let mut market = Marketplace::new();
        let seller = AccountId::new("seller1");
        let id = market.create_listing(&seller, initial, 7).unwrap();

        let mut remaining = u64::try_from(initial).unwrap();
        let mut cancelled = false;

        for action in actions {
            match action {
                Action::Buy(amount) => {
                    let fillable = !cancelled && remaining > 0 && amount > 0 && amount <= remaining;
                    let result = market.buy_rec(&"buyer".into(), id, amount);
                    prop_assert_eq!(result.is_ok(), fillable);
                    if fillable {
                        remaining -= amount;
                    }
                }
                Action::Cancel(caller) => {
                    let allowed = !cancelled && remaining > 0 && caller == seller;
                    let result = market.cancel_listing(&caller, id);
                    prop_assert_eq!(result.is_ok(), allowed);
                    if allowed {
                        cancelled = true;
                    }
                }
            }

            let listing = market.listing(id).unwrap();
            prop_assert_eq!(listing.amount, remaining);
            prop_assert_eq!(listing.active, !cancelled && remaining > 0);
            prop_assert_eq!(listing.price_per_unit, 7);
        }
    }

    /// Listing ids stay dense across interleaved invalid creations.
    #[test]
    fn prop_listing_ids_skip_failures(amounts in prop::collection::vec(-50i64..50, 1..40)) {
        let mut market = Marketplace::new();
        let mut expected = 0u64;

        for amount in amounts {
            match market.create_listing(&"seller1".into(), amount, 1) {
                Ok(id) => {
                    prop_assert!(amount > 0);
                    expected += 1;
                    prop_assert_eq!(id, ListingId::new(expected));
                }
                Err(err) => {
                    prop_assert!(amount <= 0);
                    prop_assert_eq!(err.error_code(), "INVALID_AMOUNT");
                }
            }
            prop_assert_eq!(market.listing_count(), expected);
        }
    }
}
