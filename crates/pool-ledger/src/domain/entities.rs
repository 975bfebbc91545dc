//! Core domain entities for the pool ledger.
//!
//! Defines the pool and claim records together with their state machines.
//!
//! Pool state machine:
//! ```text
//! [CREATED(inactive)] ──membership reaches min_members──→ [ACTIVE]
//! ```
//! The declared `ACTIVE -> DEACTIVATED` transition has no reachable writer.
//!
//! Claim state machine:
//! ```text
//! [SUBMITTED(unresolved)]
//! ```
//! The declared `UNRESOLVED -> RESOLVED{approved|rejected}` transition has
//! no reachable writer; ballot state and vote counters exist but nothing
//! mutates them.

pub use ledger_types::{Address, Amount, ClaimId, PoolId, Timestamp, SECONDS_PER_DAY};

use std::collections::{HashMap, HashSet};

/// A risk-sharing pool.
///
/// INVARIANT-2: `members` contains unique addresses in join order, the
/// creator always at index 0.
/// INVARIANT-3: `total_funds` equals the sum of `premium_paid` values.
/// INVARIANT-4: `active` flips to true exactly once, when membership first
/// reaches `min_members`, and is never reset.
///
/// Existence convention: a pool exists iff `created_at != 0`.
#[derive(Clone, Debug)]
pub struct Pool {
    /// Sequential pool id.
    pub id: PoolId,
    /// Human-readable pool name.
    pub name: String,
    /// Risk category label (opaque to the ledger).
    pub risk_type: String,
    /// Fixed premium each member pays to join.
    pub premium: Amount,
    /// Maximum amount a single claim may request.
    pub coverage: Amount,
    /// Membership count required to activate the pool.
    pub min_members: usize,
    /// Join/claim window length in seconds from `created_at`.
    pub duration_secs: u64,
    /// Creation timestamp (seconds). Non-zero for every stored pool.
    pub created_at: Timestamp,
    /// True once membership has reached `min_members`.
    pub active: bool,
    /// Member addresses in join order, creator first.
    members: Vec<Address>,
    /// Membership presence set.
    member_set: HashSet<Address>,
    /// Premium actually paid per member. The creator is recorded at 0.
    premium_paid: HashMap<Address, Amount>,
    /// Running balance: sum of premiums paid by current members.
    pub total_funds: Amount,
}

impl Pool {
    /// Creates a new inactive pool with the creator as sole member.
    ///
    /// The creator pays no premium by creating; their paid amount is 0.
    pub fn new(
        id: PoolId,
        name: String,
        risk_type: String,
        premium: Amount,
        coverage: Amount,
        min_members: usize,
        duration_secs: u64,
        creator: Address,
        created_at: Timestamp,
    ) -> Self {
        let mut pool = Self {
            id,
            name,
            risk_type,
            premium,
            coverage,
            min_members,
            duration_secs,
            created_at,
            active: false,
            members: Vec::new(),
            member_set: HashSet::new(),
            premium_paid: HashMap::new(),
            total_funds: 0,
        };
        pool.members.push(creator);
        pool.member_set.insert(creator);
        pool.premium_paid.insert(creator, 0);
        pool
    }

    /// Returns true if the pool record exists (non-zero creation timestamp).
    pub fn exists(&self) -> bool {
        self.created_at != 0
    }

    /// Returns true if `now` is at or past the end of the pool window.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.created_at.saturating_add(self.duration_secs)
    }

    /// Returns true if `address` is a current member.
    pub fn is_member(&self, address: &Address) -> bool {
        self.member_set.contains(address)
    }

    /// Members in join order, creator first.
    pub fn members(&self) -> &[Address] {
        &self.members
    }

    /// Current membership count.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Premium paid by a member, if they are one.
    pub fn premium_paid(&self, address: &Address) -> Option<Amount> {
        self.premium_paid.get(address).copied()
    }

    /// Records a join: appends the member, books the premium, and grows
    /// the balance. Returns true if this join activated the pool.
    ///
    /// Caller must have validated membership and payment first; joining an
    /// existing member here would break INVARIANT-2.
    pub(crate) fn record_join(&mut self, member: Address, payment: Amount) -> bool {
        debug_assert!(!self.member_set.contains(&member));
        self.members.push(member);
        self.member_set.insert(member);
        self.premium_paid.insert(member, payment);
        self.total_funds += payment;

        if !self.active && self.members.len() >= self.min_members {
            self.active = true;
            return true;
        }
        false
    }
}

/// A claim against a pool's funds.
///
/// Submission is the only reachable stage: `resolved`, `approved`, the
/// vote counters, and `ballots` are written at creation and never again.
#[derive(Clone, Debug)]
pub struct Claim {
    /// Sequential claim id (own counter, independent of pool ids).
    pub id: ClaimId,
    /// Member who filed the claim.
    pub claimant: Address,
    /// Pool the claim draws against.
    pub pool_id: PoolId,
    /// Requested amount.
    pub amount: Amount,
    /// Opaque evidence reference (e.g. a content hash).
    pub evidence_ref: String,
    /// Approval ballot count.
    pub approvals: u32,
    /// Rejection ballot count.
    pub rejections: u32,
    /// True once the claim is finalized. No reachable writer.
    pub resolved: bool,
    /// Outcome flag, meaningful only once resolved. No reachable writer.
    pub approved: bool,
    /// Per-voter has-voted record. No reachable writer.
    pub ballots: HashMap<Address, bool>,
}

impl Claim {
    /// Creates a freshly submitted, unresolved claim with zero votes.
    pub fn new(
        id: ClaimId,
        claimant: Address,
        pool_id: PoolId,
        amount: Amount,
        evidence_ref: String,
    ) -> Self {
        Self {
            id,
            claimant,
            pool_id,
            amount,
            evidence_ref,
            approvals: 0,
            rejections: 0,
            resolved: false,
            approved: false,
            ballots: HashMap::new(),
        }
    }
}

/// Read-model summary of a pool, returned by the `pool_info` query.
///
/// A query for a pool that does not exist returns `PoolInfo::default()`;
/// callers distinguish via `member_count == 0`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolInfo {
    /// Pool name.
    pub name: String,
    /// Risk category label.
    pub risk_type: String,
    /// Current pooled balance.
    pub total_funds: Amount,
    /// Current membership count.
    pub member_count: usize,
    /// Activation flag.
    pub active: bool,
}

/// Result of a successful join, carried back to the service so it can
/// emit the activation notification exactly when the threshold is crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JoinOutcome {
    /// True iff this join flipped the pool to active.
    pub activated: bool,
    /// Membership count after the join.
    pub member_count: usize,
    /// Pool balance after the join.
    pub total_funds: Amount,
}
