//! Call context and call result types.

use recledger_shared::types::{AccountId, BlockHeight};
use recledger_shared::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Host-asserted inputs that accompany every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Caller identity, already authenticated by the host.
    pub sender: AccountId,
    /// Host block height at which the call executes.
    pub block_height: BlockHeight,
}

impl CallContext {
    /// Creates a context for `sender` at `block_height`.
    #[must_use]
    pub fn new(sender: impl Into<AccountId>, block_height: BlockHeight) -> Self {
        Self {
            sender: sender.into(),
            block_height,
        }
    }
}

/// Structured outcome of one call.
///
/// `value` is omitted for successful calls with no payload and is `null` for
/// lookups that found nothing. `error` carries the machine tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallResult {
    /// Whether the call was applied.
    pub success: bool,
    /// Payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Error tag on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable failure detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CallResult {
    /// Successful call carrying `value`.
    #[must_use]
    pub fn ok(value: Value) -> Self {
        Self {
            success: true,
            value: Some(value),
            error: None,
            message: None,
        }
    }

    /// Successful call with no payload.
    #[must_use]
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            value: None,
            error: None,
            message: None,
        }
    }

    /// Failed call.
    #[must_use]
    pub fn failure(err: &LedgerError) -> Self {
        Self {
            success: false,
            value: None,
            error: Some(err.error_code().to_string()),
            message: Some(err.to_string()),
        }
    }

    /// The error tag, if the call failed.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl From<LedgerResult<Option<Value>>> for CallResult {
    fn from(result: LedgerResult<Option<Value>>) -> Self {
        match result {
            Ok(Some(value)) => Self::ok(value),
            Ok(None) => Self::ok_empty(),
            Err(err) => Self::failure(&err),
        }
    }
}
