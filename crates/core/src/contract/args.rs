//! Positional argument decoding.

use recledger_shared::types::AccountId;
use recledger_shared::{LedgerError, LedgerResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Ordered call arguments for one method.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    method: &'a str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    /// Wraps the raw argument list of a call to `method`.
    #[must_use]
    pub fn new(method: &'a str, values: &'a [Value]) -> Self {
        Self { method, values }
    }

    /// Fails unless exactly `count` arguments were supplied.
    ///
    /// # Errors
    ///
    /// `InvalidArguments` on a count mismatch.
    pub fn expect_len(&self, count: usize) -> LedgerResult<()> {
        self.expect_between(count, count)
    }

    /// Fails unless between `min` and `max` arguments were supplied.
    ///
    /// # Errors
    ///
    /// `InvalidArguments` on a count mismatch.
    pub fn expect_between(&self, min: usize, max: usize) -> LedgerResult<()> {
        let len = self.values.len();
        if (min..=max).contains(&len) {
            return Ok(());
        }
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{min} to {max}")
        };
        Err(LedgerError::InvalidArguments(format!(
            "{} expects {expected} argument(s), got {len}",
            self.method
        )))
    }

    /// Decodes argument `index` as `T`.
    ///
    /// # Errors
    ///
    /// `InvalidArguments` if the argument is missing or has the wrong shape.
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> LedgerResult<T> {
        let value = self.values.get(index).ok_or_else(|| {
            LedgerError::InvalidArguments(format!(
                "{} is missing argument {index}",
                self.method
            ))
        })?;
        serde_json::from_value(value.clone()).map_err(|err| {
            LedgerError::InvalidArguments(format!(
                "{} argument {index}: {err}",
                self.method
            ))
        })
    }

    /// Decodes argument `index` as `T`, or `T::default()` when absent.
    ///
    /// # Errors
    ///
    /// `InvalidArguments` if the argument is present but malformed.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, index: usize) -> LedgerResult<T> {
        match self.values.get(index) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(_) => self.get(index),
        }
    }

    /// Decodes argument `index` as a non-empty account id.
    ///
    /// # Errors
    ///
    /// `InvalidArguments` if missing, not a string, or empty.
    pub fn account(&self, index: usize) -> LedgerResult<AccountId> {
        let account: AccountId = self.get(index)?;
        if account.is_empty() {
            return Err(LedgerError::InvalidArguments(format!(
                "{} argument {index}: account id must not be empty",
                self.method
            )));
        }
        Ok(account)
    }
}
