//! Call-contract dispatch boundary.
//!
//! Each component is exposed to the host as a `Contract`: a method name, an
//! ordered list of JSON arguments, and a `CallContext` go in; a `CallResult`
//! comes out. Unknown methods fail with `MethodNotFound`.

pub mod args;
pub mod call;

mod certificate;
mod generation;
mod marketplace;

use recledger_shared::{LedgerError, LedgerResult};
use serde_json::Value;
use tracing::{debug, warn};

pub use args::Args;
pub use call::{CallContext, CallResult};
pub use certificate::CERTIFICATE_METHODS;
pub use generation::GENERATION_METHODS;
pub use marketplace::MARKETPLACE_METHODS;

/// A component callable through the dispatch boundary.
pub trait Contract {
    /// Name the host uses to address this component.
    fn name(&self) -> &'static str;

    /// Every method name `execute` accepts.
    fn methods(&self) -> &'static [&'static str];

    /// Apply one method. Must validate completely before mutating state.
    ///
    /// Returns `Ok(None)` for successful calls without a payload.
    fn execute(
        &mut self,
        ctx: &CallContext,
        method: &str,
        args: Args<'_>,
    ) -> LedgerResult<Option<Value>>;

    /// Apply one method and wrap the outcome for the host.
    fn call(&mut self, ctx: &CallContext, method: &str, args: &[Value]) -> CallResult {
        let contract = self.name();
        let result = self.execute(ctx, method, Args::new(method, args));
        match &result {
            Ok(_) => debug!(
                contract,
                method,
                sender = %ctx.sender,
                height = ctx.block_height,
                "call applied"
            ),
            // Malformed calls point at the host, not the caller.
            Err(err) if err.is_dispatch_error() => warn!(
                contract,
                method,
                sender = %ctx.sender,
                height = ctx.block_height,
                error = err.error_code(),
                "malformed call"
            ),
            Err(err) => debug!(
                contract,
                method,
                sender = %ctx.sender,
                height = ctx.block_height,
                error = err.error_code(),
                "call rejected"
            ),
        }
        result.into()
    }
}

/// Serializes a record lookup: the record itself, or `null` when absent.
pub(crate) fn lookup<T: serde::Serialize>(record: Option<&T>) -> LedgerResult<Option<Value>> {
    encode(&record).map(Some)
}

/// Serializes a payload.
pub(crate) fn encode<T: serde::Serialize>(payload: &T) -> LedgerResult<Value> {
    serde_json::to_value(payload)
        .map_err(|err| LedgerError::Internal(format!("unencodable payload: {err}")))
}
