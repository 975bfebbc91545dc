//! # Pool Ledger - Mutual Risk-Sharing Engine
//!
//! A deterministic bookkeeping engine for risk-sharing pools: independent
//! parties pool funds against a declared risk, members pay a fixed premium
//! to join, and members file claims against the pooled balance. There is
//! no central administrator; membership, balances, and claim records are
//! derived entirely from the operation sequence.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Pool/claim ids minted 1, 2, 3, ... and never reused | `domain/ledger.rs` - single mutation path per counter |
//! | INVARIANT-2 | Creator is always `members[0]` | `domain/entities.rs` - `Pool::new()` |
//! | INVARIANT-3 | `total_funds` equals the sum of paid premiums | `domain/entities.rs` - `Pool::record_join()` |
//! | INVARIANT-4 | `active` flips once, at the membership threshold | `domain/entities.rs` - `Pool::record_join()` |
//! | INVARIANT-5 | Precondition failure leaves zero state change | `domain/ledger.rs` - validate-before-write |
//! | INVARIANT-6 | No mutating re-entry during a fund transfer | `service.rs` - `TransferGuard` |
//!
//! ## Declared but Unreachable
//!
//! Claim records carry ballot state and vote counters, and the event
//! surface declares `PoolDeactivated`, `ClaimVoted`, and `ClaimResolved`,
//! but no operation casts a vote, resolves a claim, deactivates a pool,
//! or moves funds out of a pool. This dead surface is part of the ledger's
//! declared shape and is reproduced as unreachable, not completed.
//!
//! ## Usage Example
//!
//! ```ignore
//! use pool_ledger::prelude::*;
//! use std::sync::Arc;
//!
//! let service = PoolLedgerService::new(
//!     InMemoryVault::new().with_balance(bob, 100),
//!     NoOpPublisher,
//!     Arc::new(SystemTimeSource),
//! );
//!
//! let pool_id = service
//!     .create_pool(alice, "storm".into(), "weather".into(), 100, 500, 2, 30)
//!     .await?;
//! service.join_pool(bob, pool_id, 100).await?;
//! let claim_id = service.submit_claim(bob, pool_id, 100, "ipfs://abc".into()).await?;
//! ```

// Crate-level lints
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::{
        Address, Amount, Claim, ClaimId, JoinOutcome, Pool, PoolId, PoolInfo, PoolLedger,
        Timestamp, SECONDS_PER_DAY,
    };

    // Errors
    pub use crate::domain::LedgerError;

    // Events
    pub use crate::events::{
        topics, ClaimResolvedPayload, ClaimSubmittedPayload, ClaimVotedPayload, LedgerEvent,
        MemberJoinedPayload, PoolActivatedPayload, PoolCreatedPayload, PoolDeactivatedPayload,
        PremiumPaidPayload,
    };

    // Ports
    pub use crate::ports::inbound::PoolLedgerApi;
    pub use crate::ports::outbound::{
        FundTransfer, ManualTimeSource, SystemTimeSource, TimeSource, TransferError,
    };

    // Adapters
    pub use crate::adapters::{
        InMemoryVault, LedgerEventPublisher, NoOpPublisher, PublishError, RecordingPublisher,
    };

    // Service
    pub use crate::service::{PoolLedgerService, ServiceStats};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
