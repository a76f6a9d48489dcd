//! Marketplace state machine.

use std::collections::BTreeMap;

use recledger_shared::types::{AccountId, ListingId, PageRequest, PageResponse, Sequence};
use recledger_shared::{LedgerError, LedgerResult};
use serde::Serialize;

use super::types::{Listing, Purchase};

/// Message for the collapsed cause of `cancel_listing`.
const NOT_SELLER_OR_MISSING: &str = "not authorized or listing not found";

/// Message for every `buy_rec` rejection.
const UNFILLABLE: &str = "invalid listing or insufficient amount";

/// Listings keyed by id.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Marketplace {
    listing_sequence: Sequence,
    listings: BTreeMap<ListingId, Listing>,
}

impl Marketplace {
    /// Creates an empty marketplace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a listing for `amount` units at `price_per_unit`.
    ///
    /// The amount is signed so non-positive input can be rejected rather
    /// than being unrepresentable. It is not checked against the seller's
    /// certificate balance. The price is taken as given, negative included.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `Internal` if listing ids are exhausted
    pub fn create_listing(
        &mut self,
        seller: &AccountId,
        amount: i64,
        price_per_unit: i64,
    ) -> LedgerResult<ListingId> {
        let amount = u64::try_from(amount)
            .ok()
            .filter(|amount| *amount > 0)
            .ok_or_else(|| {
                LedgerError::InvalidAmount("listing amount must be positive".to_string())
            })?;

        let id = self
            .listing_sequence
            .advance()
            .map(ListingId::new)
            .ok_or_else(|| LedgerError::Internal("listing ids exhausted".to_string()))?;

        self.listings.insert(
            id,
            Listing {
                id,
                seller: seller.clone(),
                amount,
                price_per_unit,
                active: true,
            },
        );

        Ok(id)
    }

    /// Deactivate a listing.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if the listing does not exist, `caller` is not the
    /// seller, or it is already inactive. The three are indistinguishable.
    pub fn cancel_listing(&mut self, caller: &AccountId, id: ListingId) -> LedgerResult<()> {
        let listing = self
            .listings
            .get_mut(&id)
            .filter(|listing| listing.active && listing.seller == *caller)
            .ok_or_else(|| LedgerError::Unauthorized(NOT_SELLER_OR_MISSING.to_string()))?;

        listing.active = false;
        Ok(())
    }

    /// Buy `amount` units from a listing.
    ///
    /// A purchase that takes the last unit deactivates the listing.
    ///
    /// # Errors
    ///
    /// `InvalidPurchase` if the listing does not exist, is inactive, or holds
    /// fewer than `amount` units, or if `amount` is zero.
    pub fn buy_rec(
        &mut self,
        buyer: &AccountId,
        id: ListingId,
        amount: u64,
    ) -> LedgerResult<Purchase> {
        let listing = self
            .listings
            .get_mut(&id)
            .filter(|listing| listing.can_fill(amount))
            .ok_or_else(|| LedgerError::InvalidPurchase(UNFILLABLE.to_string()))?;

        listing.fill(amount);

        Ok(Purchase {
            listing_id: id,
            seller: listing.seller.clone(),
            buyer: buyer.clone(),
            amount,
            price_per_unit: listing.price_per_unit,
            total_price: i128::from(amount) * i128::from(listing.price_per_unit),
            remaining: listing.amount,
        })
    }

    /// Look up a listing by id.
    #[must_use]
    pub fn listing(&self, id: ListingId) -> Option<&Listing> {
        self.listings.get(&id)
    }

    /// Active listings, oldest first.
    #[must_use]
    pub fn active_listings(&self, page: PageRequest) -> PageResponse<Listing> {
        page.paginate(
            self.listings
                .values()
                .filter(|listing| listing.active)
                .cloned(),
        )
    }

    /// Number of listings created so far.
    #[must_use]
    pub fn listing_count(&self) -> u64 {
        self.listing_sequence.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn market_with_listing() -> (Marketplace, ListingId) {
        let mut market = Marketplace::new();
        let id = market.create_listing(&"seller1".into(), 1000, 10).unwrap();
        (market, id)
    }

    #[test]
    fn test_create_listing() {
        let (market, id) = market_with_listing();
        assert_eq!(id, ListingId::new(1));

        let listing = market.listing(id).unwrap();
        assert_eq!(listing.seller, AccountId::new("seller1"));
        assert_eq!(listing.amount, 1000);
        assert_eq!(listing.price_per_unit, 10);
        assert!(listing.active);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MIN)]
    fn test_create_listing_invalid_amount(#[case] amount: i64) {
        let mut market = Marketplace::new();
        let err = market
            .create_listing(&"seller1".into(), amount, 10)
            .unwrap_err();

        assert_eq!(err.error_code(), "INVALID_AMOUNT");
        assert_eq!(market.listing_count(), 0);

        let id = market.create_listing(&"seller1".into(), 5, 10).unwrap();
        assert_eq!(id, ListingId::new(1));
    }

    #[test]
    fn test_cancel_listing() {
        let (mut market, id) = market_with_listing();
        market.cancel_listing(&"seller1".into(), id).unwrap();
        assert!(!market.listing(id).unwrap().active);
    }

    #[test]
    fn test_cancel_by_non_seller() {
        let (mut market, id) = market_with_listing();
        let err = market.cancel_listing(&"seller2".into(), id).unwrap_err();

        assert_eq!(err.error_code(), "UNAUTHORIZED");
        assert!(market.listing(id).unwrap().active);
    }

    #[test]
    fn test_cancel_twice_fails_the_same_way() {
        let (mut market, id) = market_with_listing();
        market.cancel_listing(&"seller1".into(), id).unwrap();

        let repeat = market.cancel_listing(&"seller1".into(), id).unwrap_err();
        let foreign = market
            .cancel_listing(&"seller2".into(), ListingId::new(1))
            .unwrap_err();
        let missing = market
            .cancel_listing(&"seller1".into(), ListingId::new(42))
            .unwrap_err();

        assert_eq!(repeat, foreign);
        assert_eq!(repeat, missing);
    }

    #[test]
    fn test_buy_rec() {
        let (mut market, id) = market_with_listing();
        let purchase = market.buy_rec(&"buyer1".into(), id, 500).unwrap();

        assert_eq!(purchase.amount, 500);
        assert_eq!(purchase.total_price, 5000);
        assert_eq!(purchase.remaining, 500);
        assert_eq!(purchase.seller, AccountId::new("seller1"));
        assert_eq!(purchase.buyer, AccountId::new("buyer1"));

        let listing = market.listing(id).unwrap();
        assert_eq!(listing.amount, 500);
        assert!(listing.active);
    }

    #[test]
    fn test_buy_more_than_available() {
        let (mut market, id) = market_with_listing();
        let err = market.buy_rec(&"buyer1".into(), id, 1500).unwrap_err();

        assert_eq!(err.error_code(), "INVALID_PURCHASE");
        assert_eq!(market.listing(id).unwrap().amount, 1000);
    }

    #[test]
    fn test_buy_out_deactivates() {
        let (mut market, id) = market_with_listing();
        market.buy_rec(&"buyer1".into(), id, 600).unwrap();
        let last = market.buy_rec(&"buyer2".into(), id, 400).unwrap();
        assert_eq!(last.remaining, 0);

        let listing = market.listing(id).unwrap();
        assert_eq!(listing.amount, 0);
        assert!(!listing.active);

        let err = market.buy_rec(&"buyer1".into(), id, 1).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PURCHASE");
    }

    #[rstest]
    #[case::missing(ListingId::new(9), 1)]
    #[case::zero(ListingId::new(1), 0)]
    fn test_buy_rejected(#[case] id: ListingId, #[case] amount: u64) {
        let (mut market, _) = market_with_listing();
        let err = market.buy_rec(&"buyer1".into(), id, amount).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PURCHASE");
    }

    #[test]
    fn test_buy_from_cancelled() {
        let (mut market, id) = market_with_listing();
        market.cancel_listing(&"seller1".into(), id).unwrap();
        let err = market.buy_rec(&"buyer1".into(), id, 1).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PURCHASE");
    }

    #[test]
    fn test_sold_out_listing_cannot_be_cancelled() {
        let (mut market, id) = market_with_listing();
        market.buy_rec(&"buyer1".into(), id, 1000).unwrap();
        let err = market.cancel_listing(&"seller1".into(), id).unwrap_err();
        assert_eq!(err.error_code(), "UNAUTHORIZED");
    }

    #[test]
    fn test_total_price_does_not_overflow() {
        let mut market = Marketplace::new();
        let id = market
            .create_listing(&"seller1".into(), i64::MAX, i64::MIN)
            .unwrap();
        let purchase = market
            .buy_rec(&"buyer1".into(), id, u64::try_from(i64::MAX).unwrap())
            .unwrap();
        assert_eq!(
            purchase.total_price,
            i128::from(i64::MAX) * i128::from(i64::MIN)
        );
    }

    #[test]
    fn test_active_listings() {
        let mut market = Marketplace::new();
        for amount in 1..=4 {
            market.create_listing(&"seller1".into(), amount, 1).unwrap();
        }
        market.cancel_listing(&"seller1".into(), ListingId::new(2)).unwrap();
        market.buy_rec(&"buyer1".into(), ListingId::new(3), 3).unwrap();

        let page = market.active_listings(PageRequest::default());
        let ids: Vec<ListingId> = page.data.iter().map(|listing| listing.id).collect();
        assert_eq!(ids, vec![ListingId::new(1), ListingId::new(4)]);
        assert_eq!(page.meta.total, 2);
    }

    #[rstest]
    #[case(-5)]
    #[case(0)]
    #[case(i64::MIN)]
    fn test_create_listing_keeps_any_price(#[case] price: i64) {
        let mut market = Marketplace::new();
        let id = market.create_listing(&"seller1".into(), 10, price).unwrap();
        assert_eq!(market.listing(id).unwrap().price_per_unit, price);

        let purchase = market.buy_rec(&"buyer1".into(), id, 4).unwrap();
        assert_eq!(purchase.total_price, 4 * i128::from(price));
    }

    #[test]
    fn test_exhausted_ids_are_internal() {
        let mut market = Marketplace::new();
        market.listing_sequence = serde_json::from_value(serde_json::json!(u64::MAX)).unwrap();

        let err = market.create_listing(&"seller1".into(), 5, 10).unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert_eq!(market.active_listings(PageRequest::default()).meta.total, 0);
    }
}
