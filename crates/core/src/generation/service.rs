//! Generation registry state machine.

use std::collections::BTreeMap;

use recledger_shared::types::{
    AccountId, BlockHeight, GenerationEventId, PageRequest, PageResponse, ProducerId, Sequence,
};
use recledger_shared::{LedgerError, LedgerResult};
use serde::Serialize;

use super::types::{GenerationEvent, Producer};

/// Message for the collapsed "missing or not yours" cause of `record_generation`.
const NOT_OWNER_OR_MISSING: &str = "not authorized or producer not found";

/// Producers and their generation events.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GenerationRegistry {
    producer_sequence: Sequence,
    event_sequence: Sequence,
    producers: BTreeMap<ProducerId, Producer>,
    events: BTreeMap<GenerationEventId, GenerationEvent>,
    #[serde(skip)]
    events_by_producer: BTreeMap<ProducerId, Vec<GenerationEventId>>,
}

impl GenerationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new producer owned by `caller`.
    ///
    /// Open to any caller.
    ///
    /// # Errors
    ///
    /// `Internal` if the producer id space is exhausted.
    pub fn register_producer(
        &mut self,
        caller: &AccountId,
        energy_type: String,
    ) -> LedgerResult<ProducerId> {
        let id = self
            .producer_sequence
            .advance()
            .map(ProducerId::new)
            .ok_or_else(|| LedgerError::Internal("producer ids exhausted".to_string()))?;

        self.producers.insert(
            id,
            Producer {
                id,
                owner: caller.clone(),
                energy_type,
                total_generation: 0,
            },
        );

        Ok(id)
    }

    /// Record `amount` units generated by `producer_id` at host height `timestamp`.
    ///
    /// A missing producer and a producer owned by someone else are reported
    /// identically, so non-owners learn nothing about which ids exist.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the producer does not exist or `caller` is not its owner
    /// - `InvalidAmount` if `amount` is zero or would overflow the running total
    /// - `Internal` if event ids are exhausted
    pub fn record_generation(
        &mut self,
        caller: &AccountId,
        producer_id: ProducerId,
        amount: u64,
        timestamp: BlockHeight,
    ) -> LedgerResult<GenerationEventId> {
        let producer = self
            .producers
            .get(&producer_id)
            .filter(|producer| producer.owner == *caller)
            .ok_or_else(|| LedgerError::Unauthorized(NOT_OWNER_OR_MISSING.to_string()))?;

        if amount == 0 {
            return Err(LedgerError::InvalidAmount(
                "generation amount must be positive".to_string(),
            ));
        }
        let new_total = producer.total_generation.checked_add(amount).ok_or_else(|| {
            LedgerError::InvalidAmount("generation total would overflow".to_string())
        })?;

        let id = self
            .event_sequence
            .advance()
            .map(GenerationEventId::new)
            .ok_or_else(|| LedgerError::Internal("event ids exhausted".to_string()))?;

        self.events.insert(
            id,
            GenerationEvent {
                id,
                producer_id,
                amount,
                timestamp,
            },
        );
        self.events_by_producer
            .entry(producer_id)
            .or_default()
            .push(id);
        if let Some(producer) = self.producers.get_mut(&producer_id) {
            producer.total_generation = new_total;
        }

        Ok(id)
    }

    /// Look up a producer by id.
    #[must_use]
    pub fn producer(&self, id: ProducerId) -> Option<&Producer> {
        self.producers.get(&id)
    }

    /// Look up a generation event by id.
    #[must_use]
    pub fn generation_event(&self, id: GenerationEventId) -> Option<&GenerationEvent> {
        self.events.get(&id)
    }

    /// Running generation total of a producer.
    ///
    /// Unlike the lookups, an unknown producer is an error here.
    ///
    /// # Errors
    ///
    /// `NotFound` if no producer has this id.
    pub fn total_generation(&self, id: ProducerId) -> LedgerResult<u64> {
        self.producers
            .get(&id)
            .map(|producer| producer.total_generation)
            .ok_or_else(|| LedgerError::NotFound(format!("producer {id}")))
    }

    /// Events recorded for one producer, oldest first.
    ///
    /// An unknown producer yields an empty page.
    #[must_use]
    pub fn producer_events(
        &self,
        id: ProducerId,
        page: PageRequest,
    ) -> PageResponse<GenerationEvent> {
        let ids = self
            .events_by_producer
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        page.paginate(
            ids.iter()
                .filter_map(|event_id| self.events.get(event_id))
                .cloned(),
        )
    }

    /// Number of producers registered so far.
    #[must_use]
    pub fn producer_count(&self) -> u64 {
        self.producer_sequence.last()
    }

    /// Number of generation events recorded so far.
    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.event_sequence.last()
    }
}
