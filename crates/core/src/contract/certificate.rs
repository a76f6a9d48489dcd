//! Certificate Ledger call contract.

use recledger_shared::types::CertificateId;
use recledger_shared::{LedgerError, LedgerResult};
use serde_json::Value;
use tracing::info;

use super::{Args, CallContext, Contract, encode, lookup};
use crate::certificate::CertificateLedger;

/// Methods exposed by the certificate ledger.
pub const CERTIFICATE_METHODS: &[&str] = &[
    "issue-certificate",
    "transfer",
    "get-balance",
    "get-certificate",
    "get-total-supply",
    "get-certificate-count",
];

impl Contract for CertificateLedger {
    fn name(&self) -> &'static str {
        "certificate"
    }

    fn methods(&self) -> &'static [&'static str] {
        CERTIFICATE_METHODS
    }

    fn execute(
        &mut self,
        ctx: &CallContext,
        method: &str,
        args: Args<'_>,
    ) -> LedgerResult<Option<Value>> {
        match method {
            "issue-certificate" => {
                args.expect_len(2)?;
                let producer = args.account(0)?;
                let amount: u64 = args.get(1)?;
                let id = self.issue_certificate(&ctx.sender, producer.clone(), amount)?;
                info!(certificate_id = %id, producer = %producer, amount, "certificate issued");
                encode(&id).map(Some)
            }
            "transfer" => {
                args.expect_len(2)?;
                let recipient = args.account(0)?;
                let amount: u64 = args.get(1)?;
                self.transfer(&ctx.sender, recipient, amount)?;
                Ok(None)
            }
            "get-balance" => {
                args.expect_len(1)?;
                let account = args.account(0)?;
                encode(&self.balance(&account)).map(Some)
            }
            "get-certificate" => {
                args.expect_len(1)?;
                let id: CertificateId = args.get(0)?;
                lookup(self.certificate(id))
            }
            "get-total-supply" => {
                args.expect_len(0)?;
                encode(&self.total_supply()).map(Some)
            }
            "get-certificate-count" => {
                args.expect_len(0)?;
                encode(&self.certificate_count()).map(Some)
            }
            other => Err(LedgerError::MethodNotFound(format!("certificate.{other}"))),
        }
    }
}
