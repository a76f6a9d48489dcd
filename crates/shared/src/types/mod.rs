//! Common types used across the ledger.

pub mod id;
pub mod pagination;
pub mod sequence;

pub use id::*;
pub use pagination::{PageMeta, PageRequest, PageResponse};
pub use sequence::Sequence;

/// Host-supplied block/sequence counter, used verbatim as a timestamp.
pub type BlockHeight = u64;
