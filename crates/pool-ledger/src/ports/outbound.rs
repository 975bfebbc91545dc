//! Outbound (driven) ports for the pool ledger.
//!
//! These traits define the external systems the ledger depends on:
//! the fund-transfer settlement layer and a time source.

use crate::domain::{Address, Amount, PoolId, Timestamp};
use async_trait::async_trait;

/// Settlement layer that collects a caller's attached payment.
///
/// `collect` is awaited before any bookkeeping is applied and before any
/// notification is emitted; a failure aborts the operation with zero state
/// change. Implementations may call back into the ledger while settling
/// (the classic re-entrancy vector), which the service rejects via its
/// transfer guard.
#[async_trait]
pub trait FundTransfer: Send + Sync {
    /// Collects `amount` from `from` on behalf of pool `pool_id`.
    ///
    /// # Errors
    /// Returns a human-readable reason when the transfer cannot settle;
    /// the service maps it to `LedgerError::TransferFailed`.
    async fn collect(
        &self,
        from: Address,
        pool_id: PoolId,
        amount: Amount,
    ) -> Result<(), TransferError>;
}

/// Error from the fund-transfer port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferError(pub String);

impl std::fmt::Display for TransferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TransferError {}

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing expiry windows with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in seconds since UNIX epoch.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Manually driven time source for tests.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    time: std::sync::atomic::AtomicU64,
}

impl ManualTimeSource {
    /// Creates a source fixed at `initial` seconds.
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: std::sync::atomic::AtomicU64::new(initial),
        }
    }

    /// Advances the clock by `secs`.
    pub fn advance(&self, secs: u64) {
        self.time
            .fetch_add(secs, std::sync::atomic::Ordering::SeqCst);
    }

    /// Sets the clock to an absolute value.
    pub fn set(&self, time: Timestamp) {
        self.time.store(time, std::sync::atomic::Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(std::sync::atomic::Ordering::SeqCst)
    }
}
