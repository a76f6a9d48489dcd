//! Call-script replay.
//!
//! A script is JSON lines, one call per line:
//!
//! ```text
//! {"contract":"generation","method":"register-producer","args":["solar"],"sender":"producer1"}
//! {"contract":"generation","method":"record-generation","args":[1,1000],"sender":"producer1","height":40}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Each applied line
//! produces one JSON result line on the output.

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};

use anyhow::{Context, anyhow};
use recledger_core::{CallContext, CallResult, Ledger};
use recledger_shared::types::{AccountId, BlockHeight};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Error tag for lines the host refuses before they reach the ledger.
pub const INVALID_HEIGHT: &str = "INVALID_HEIGHT";

/// One call in a script.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptLine {
    /// Component to call.
    pub contract: String,
    /// Method on that component.
    pub method: String,
    /// Ordered arguments.
    #[serde(default)]
    pub args: Vec<Value>,
    /// Asserted caller identity.
    pub sender: AccountId,
    /// Explicit block height; otherwise the clock advances by its step.
    #[serde(default)]
    pub height: Option<BlockHeight>,
}

/// One output line.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayOutput<'a> {
    /// 1-based script line number.
    pub line: usize,
    /// Component called.
    pub contract: &'a str,
    /// Method called.
    pub method: &'a str,
    /// Height the call executed at, if it reached the ledger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<BlockHeight>,
    /// Call outcome.
    #[serde(flatten)]
    pub result: CallResult,
}

/// Counts of what a replay did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Calls that succeeded.
    pub applied: usize,
    /// Calls that failed, including host-rejected lines.
    pub rejected: usize,
}

/// Monotonic, non-decreasing block height source.
#[derive(Debug, Clone)]
pub struct BlockClock {
    start: BlockHeight,
    step: BlockHeight,
    last: Option<BlockHeight>,
}

impl BlockClock {
    /// First implicit tick yields `start`; later ones add `step`.
    #[must_use]
    pub fn new(start: BlockHeight, step: BlockHeight) -> Self {
        Self {
            start,
            step,
            last: None,
        }
    }

    /// Height for the next call.
    ///
    /// An explicit height may repeat the last one but never go below it.
    ///
    /// # Errors
    ///
    /// Returns a description if the height would go backwards or overflow.
    pub fn tick(&mut self, explicit: Option<BlockHeight>) -> Result<BlockHeight, String> {
        let height = match (explicit, self.last) {
            (Some(height), Some(last)) if height < last => {
                return Err(format!("height {height} is below current height {last}"));
            }
            (Some(height), _) => height,
            (None, Some(last)) => last
                .checked_add(self.step)
                .ok_or_else(|| "block height overflow".to_string())?,
            (None, None) => self.start,
        };
        self.last = Some(height);
        Ok(height)
    }
}

/// Ledger shared with the host under a mutex, one call at a time.
pub type SharedLedger = Arc<Mutex<Ledger>>;

/// Replays scripts against a shared ledger.
pub struct Replay {
    ledger: SharedLedger,
    clock: BlockClock,
}

impl Replay {
    /// Creates a replay driving `ledger` with `clock`.
    #[must_use]
    pub fn new(ledger: SharedLedger, clock: BlockClock) -> Self {
        Self { ledger, clock }
    }

    /// Reads every line of `input`, applies it, and writes one result line
    /// per call to `output`.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, unparseable script lines, or a poisoned lock.
    /// Rejected calls are not errors; they are reported in the output.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> anyhow::Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();

        for (index, line) in input.lines().enumerate() {
            let number = index + 1;
            let line = line.with_context(|| format!("failed to read script line {number}"))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let call: ScriptLine = serde_json::from_str(trimmed)
                .with_context(|| format!("invalid script line {number}"))?;

            let (height, result) = match self.clock.tick(call.height) {
                Ok(height) => (Some(height), self.apply(&call, height)?),
                Err(reason) => {
                    warn!(line = number, %reason, "script line rejected by host");
                    (
                        None,
                        CallResult {
                            success: false,
                            value: None,
                            error: Some(INVALID_HEIGHT.to_string()),
                            message: Some(reason),
                        },
                    )
                }
            };

            if result.success {
                summary.applied += 1;
            } else {
                summary.rejected += 1;
            }

            let record = ReplayOutput {
                line: number,
                contract: &call.contract,
                method: &call.method,
                height,
                result,
            };
            serde_json::to_writer(&mut output, &record)
                .with_context(|| format!("failed to write result for line {number}"))?;
            writeln!(output)?;
        }

        output.flush()?;
        info!(
            applied = summary.applied,
            rejected = summary.rejected,
            "replay finished"
        );
        Ok(summary)
    }

    fn apply(&self, call: &ScriptLine, height: BlockHeight) -> anyhow::Result<CallResult> {
        let ctx = CallContext {
            sender: call.sender.clone(),
            block_height: height,
        };
        let mut ledger = self
            .ledger
            .lock()
            .map_err(|_| anyhow!("ledger lock poisoned"))?;
        Ok(ledger.call(&call.contract, &call.method, &call.args, &ctx))
    }
}
