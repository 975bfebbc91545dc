//! Ledger error types.
//!
//! Every precondition violation maps to its own variant so callers see the
//! specific rejection, never a generic failure.

use ledger_types::{Amount, PoolId};
use thiserror::Error;

/// Pool ledger error type.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    // --- Validation (pool creation) ---
    /// Premium must be strictly positive.
    #[error("Premium must be greater than zero")]
    InvalidPremium,

    /// Coverage ceiling must be strictly positive.
    #[error("Coverage must be greater than zero")]
    InvalidCoverage,

    /// A pool needs more than one member to be meaningful.
    #[error("Minimum members must be greater than one: got {0}")]
    InvalidMinMembers(usize),

    /// Duration must be strictly positive.
    #[error("Duration must be greater than zero days")]
    InvalidDuration,

    // --- Not-found ---
    /// The referenced pool has no recorded creation.
    #[error("Pool not found: {0}")]
    PoolNotFound(PoolId),

    // --- State conflict ---
    /// The caller already joined this pool.
    #[error("Already a member of pool {0}")]
    AlreadyMember(PoolId),

    /// Attached payment does not exactly equal the premium.
    #[error("Wrong payment: expected {expected}, got {actual}")]
    WrongPayment { expected: Amount, actual: Amount },

    /// The pool's join/claim window has elapsed.
    #[error("Pool {0} has expired")]
    PoolExpired(PoolId),

    /// The pool has not reached its membership threshold.
    #[error("Pool {0} is not active")]
    PoolInactive(PoolId),

    /// The caller is not a member of the pool.
    #[error("Not a member of pool {0}")]
    NotAMember(PoolId),

    /// Requested amount exceeds the pool's coverage ceiling.
    #[error("Claim amount {requested} exceeds coverage {coverage}")]
    ExceedsCoverage { requested: Amount, coverage: Amount },

    /// Pool balance cannot cover the requested amount.
    #[error("Insufficient pool funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Amount,
        available: Amount,
    },

    // --- Concurrency ---
    /// A mutating call re-entered the ledger while the caller's fund
    /// transfer was still settling.
    #[error("Re-entrant call rejected: a transfer is in flight for this caller")]
    ReentrantCall,

    /// The fund transfer port reported a failure; nothing was booked.
    #[error("Fund transfer failed: {0}")]
    TransferFailed(String),
}
