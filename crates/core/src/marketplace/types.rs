//! Marketplace domain types.

use recledger_shared::types::{AccountId, ListingId};
use serde::{Deserialize, Serialize};

/// A sell order.
///
/// Lifecycle: created active; leaves the active state exactly once, either
/// by cancellation or by selling out. Never reactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Listing {
    /// Sequential listing id.
    pub id: ListingId,
    /// Listing account. Fixed at creation.
    pub seller: AccountId,
    /// Remaining sellable quantity.
    pub amount: u64,
    /// Seller-set price per unit, unchecked. Never changes.
    pub price_per_unit: i64,
    /// True while the listing can be bought from or cancelled.
    pub active: bool,
}

impl Listing {
    /// Returns true if `amount` units can be bought right now.
    #[must_use]
    pub fn can_fill(&self, amount: u64) -> bool {
        self.active && amount > 0 && amount <= self.amount
    }

    /// Removes `amount` from the remaining quantity, deactivating at zero.
    ///
    /// Callers check `can_fill` first.
    pub(crate) fn fill(&mut self, amount: u64) {
        self.amount = self.amount.saturating_sub(amount);
        if self.amount == 0 {
            self.active = false;
        }
    }
}

/// Receipt for a successful `buy-rec`.
///
/// Carries what an outer settlement layer needs; the marketplace itself
/// moves no balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Purchase {
    /// Listing bought from.
    pub listing_id: ListingId,
    /// Seller of the listing.
    pub seller: AccountId,
    /// Buying account.
    pub buyer: AccountId,
    /// Units bought.
    pub amount: u64,
    /// Price per unit at the time of purchase.
    pub price_per_unit: i64,
    /// `amount * price_per_unit`, widened so it cannot overflow.
    pub total_price: i128,
    /// Quantity left on the listing after this purchase.
    pub remaining: u64,
}
