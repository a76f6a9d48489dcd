//! Marketplace call contract.

use recledger_shared::types::{ListingId, PageRequest};
use recledger_shared::{LedgerError, LedgerResult};
use serde_json::Value;
use tracing::info;

use super::{Args, CallContext, Contract, encode, lookup};
use crate::marketplace::Marketplace;

/// Methods exposed by the marketplace.
pub const MARKETPLACE_METHODS: &[&str] = &[
    "create-listing",
    "cancel-listing",
    "buy-rec",
    "get-listing",
    "get-active-listings",
];

impl Contract for Marketplace {
    fn name(&self) -> &'static str {
        "marketplace"
    }

    fn methods(&self) -> &'static [&'static str] {
        MARKETPLACE_METHODS
    }

    fn execute(
        &mut self,
        ctx: &CallContext,
        method: &str,
        args: Args<'_>,
    ) -> LedgerResult<Option<Value>> {
        match method {
            "create-listing" => {
                args.expect_len(2)?;
                let amount: i64 = args.get(0)?;
                let price_per_unit: i64 = args.get(1)?;
                let id = self.create_listing(&ctx.sender, amount, price_per_unit)?;
                info!(
                    listing_id = %id,
                    seller = %ctx.sender,
                    amount,
                    price_per_unit,
                    "listing created"
                );
                encode(&id).map(Some)
            }
            "cancel-listing" => {
                args.expect_len(1)?;
                let id: ListingId = args.get(0)?;
                self.cancel_listing(&ctx.sender, id)?;
                info!(listing_id = %id, "listing cancelled");
                Ok(None)
            }
            "buy-rec" => {
                args.expect_len(2)?;
                let id: ListingId = args.get(0)?;
                let amount: u64 = args.get(1)?;
                let purchase = self.buy_rec(&ctx.sender, id, amount)?;
                info!(
                    listing_id = %id,
                    buyer = %ctx.sender,
                    amount,
                    remaining = purchase.remaining,
                    "listing filled"
                );
                encode(&purchase).map(Some)
            }
            "get-listing" => {
                args.expect_len(1)?;
                let id: ListingId = args.get(0)?;
                lookup(self.listing(id))
            }
            "get-active-listings" => {
                args.expect_between(0, 1)?;
                let page: PageRequest = args.get_or_default(0)?;
                encode(&self.active_listings(page)).map(Some)
            }
            other => Err(LedgerError::MethodNotFound(format!("marketplace.{other}"))),
        }
    }
}
