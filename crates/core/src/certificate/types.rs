//! Certificate domain types.

use recledger_shared::types::{AccountId, CertificateId};
use serde::{Deserialize, Serialize};

/// One issuance event.
///
/// `owner` records who the issuance was credited to. It is informational;
/// balances move independently of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Certificate {
    /// Sequential id assigned at issuance.
    pub id: CertificateId,
    /// Account credited at issuance.
    pub owner: AccountId,
    /// Units issued (always positive).
    pub amount: u64,
    /// Retirement flag. One-way: once true it never goes back.
    pub retired: bool,
}

impl Certificate {
    /// Creates a freshly issued, unretired certificate.
    #[must_use]
    pub fn issued(id: CertificateId, owner: AccountId, amount: u64) -> Self {
        Self {
            id,
            owner,
            amount,
            retired: false,
        }
    }
}
