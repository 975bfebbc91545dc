//! Domain layer: entities, errors, and the ledger state machine.

pub mod entities;
pub mod errors;
pub mod ledger;

pub use entities::{
    Address, Amount, Claim, ClaimId, JoinOutcome, Pool, PoolId, PoolInfo, Timestamp,
    SECONDS_PER_DAY,
};
pub use errors::LedgerError;
pub use ledger::PoolLedger;
