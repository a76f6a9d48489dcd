//! Generation registry domain types.

use recledger_shared::types::{AccountId, BlockHeight, GenerationEventId, ProducerId};
use serde::{Deserialize, Serialize};

/// A registered generation source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Producer {
    /// Sequential producer id.
    pub id: ProducerId,
    /// Registering account. Fixed at creation.
    pub owner: AccountId,
    /// Free-form category, e.g. "solar".
    pub energy_type: String,
    /// Running sum of every recorded generation amount.
    pub total_generation: u64,
}

/// Immutable audit record of one reported output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GenerationEvent {
    /// Sequential event id.
    pub id: GenerationEventId,
    /// Producer the output was reported for.
    pub producer_id: ProducerId,
    /// Units generated (always positive).
    pub amount: u64,
    /// Host block height at the time of recording.
    pub timestamp: BlockHeight,
}
