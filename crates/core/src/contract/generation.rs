//! Generation Registry call contract.

use recledger_shared::types::{GenerationEventId, PageRequest, ProducerId};
use recledger_shared::{LedgerError, LedgerResult};
use serde_json::Value;
use tracing::info;

use super::{Args, CallContext, Contract, encode, lookup};
use crate::generation::GenerationRegistry;

/// Methods exposed by the generation registry.
pub const GENERATION_METHODS: &[&str] = &[
    "register-producer",
    "record-generation",
    "get-producer",
    "get-generation-event",
    "get-total-generation",
    "get-producer-events",
];

impl Contract for GenerationRegistry {
    fn name(&self) -> &'static str {
        "generation"
    }

    fn methods(&self) -> &'static [&'static str] {
        GENERATION_METHODS
    }

    fn execute(
        &mut self,
        ctx: &CallContext,
        method: &str,
        args: Args<'_>,
    ) -> LedgerResult<Option<Value>> {
        match method {
            "register-producer" => {
                args.expect_len(1)?;
                let energy_type: String = args.get(0)?;
                let id = self.register_producer(&ctx.sender, energy_type)?;
                info!(producer_id = %id, owner = %ctx.sender, "producer registered");
                encode(&id).map(Some)
            }
            "record-generation" => {
                args.expect_len(2)?;
                let producer_id: ProducerId = args.get(0)?;
                let amount: u64 = args.get(1)?;
                let id =
                    self.record_generation(&ctx.sender, producer_id, amount, ctx.block_height)?;
                info!(
                    event_id = %id,
                    producer_id = %producer_id,
                    amount,
                    timestamp = ctx.block_height,
                    "generation recorded"
                );
                encode(&id).map(Some)
            }
            "get-producer" => {
                args.expect_len(1)?;
                let id: ProducerId = args.get(0)?;
                lookup(self.producer(id))
            }
            "get-generation-event" => {
                args.expect_len(1)?;
                let id: GenerationEventId = args.get(0)?;
                lookup(self.generation_event(id))
            }
            "get-total-generation" => {
                args.expect_len(1)?;
                let id: ProducerId = args.get(0)?;
                encode(&self.total_generation(id)?).map(Some)
            }
            "get-producer-events" => {
                args.expect_between(1, 2)?;
                let id: ProducerId = args.get(0)?;
                let page: PageRequest = args.get_or_default(1)?;
                encode(&self.producer_events(id, page)).map(Some)
            }
            other => Err(LedgerError::MethodNotFound(format!("generation.{other}"))),
        }
    }
}
