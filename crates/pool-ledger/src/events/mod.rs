//! Notification payloads and topics for the pool ledger.
//!
//! Payloads are serialized and handed to the configured event publisher
//! strictly after the owning state change has committed.

pub mod payloads;

pub use payloads::*;

/// Topic strings for ledger notifications.
pub mod topics {
    /// A pool was created.
    pub const POOL_CREATED: &str = "ledger.pool_created";
    /// A member joined a pool.
    pub const MEMBER_JOINED: &str = "ledger.member_joined";
    /// A premium payment was booked into a pool.
    pub const PREMIUM_PAID: &str = "ledger.premium_paid";
    /// A pool reached its membership threshold.
    pub const POOL_ACTIVATED: &str = "ledger.pool_activated";
    /// A claim was submitted against a pool.
    pub const CLAIM_SUBMITTED: &str = "ledger.claim_submitted";

    /// Declared but unreachable: no operation deactivates a pool.
    pub const POOL_DEACTIVATED: &str = "ledger.pool_deactivated";
    /// Declared but unreachable: no operation casts a ballot.
    pub const CLAIM_VOTED: &str = "ledger.claim_voted";
    /// Declared but unreachable: no operation resolves a claim.
    pub const CLAIM_RESOLVED: &str = "ledger.claim_resolved";
}
