//! # Pool Ledger - Arena Store and Single Mutation Path
//!
//! The authoritative store for pools and claims.
//!
//! ## Data Structures
//!
//! - `pools` / `claims`: arena tables keyed by sequential id
//! - `next_pool_id` / `next_claim_id`: monotonically increasing counters,
//!   kept consistent with the tables by the single mutation path per entity
//! - `user_pools` / `user_claims`: append-only derived lookup indexes,
//!   updated synchronously with the owning mutation, never authoritative
//!
//! ## Invariants Enforced
//!
//! - INVARIANT-1: pool and claim ids are minted 1, 2, 3, ... and never reused
//! - INVARIANT-2: every precondition failure leaves the store untouched
//!   (validation completes before the first write)
//! - INVARIANT-3: `total_funds` only grows, and only through `join_pool`

use super::entities::{Address, Amount, Claim, ClaimId, JoinOutcome, Pool, PoolId, PoolInfo, Timestamp, SECONDS_PER_DAY};
use super::errors::LedgerError;
use std::collections::{BTreeMap, HashMap};

/// The pool ledger state machine.
///
/// Purely synchronous and in-memory; serialization of writers and the
/// re-entrancy guard around fund transfers live in the service layer.
#[derive(Debug, Default)]
pub struct PoolLedger {
    /// Pool table keyed by id.
    pools: BTreeMap<PoolId, Pool>,

    /// Claim table keyed by id.
    claims: BTreeMap<ClaimId, Claim>,

    /// Next pool id to mint.
    next_pool_id: PoolId,

    /// Next claim id to mint (independent counter).
    next_claim_id: ClaimId,

    /// Pool ids per user, in creation/join order.
    user_pools: HashMap<Address, Vec<PoolId>>,

    /// Claim ids per user, in submission order.
    user_claims: HashMap<Address, Vec<ClaimId>>,
}

impl PoolLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Creates a new pool and returns its id.
    ///
    /// The creator becomes the sole initial member with a recorded premium
    /// of 0; creating a pool moves no funds.
    ///
    /// # Errors
    /// - `InvalidPremium` / `InvalidCoverage` / `InvalidDuration` on
    ///   non-positive parameters
    /// - `InvalidMinMembers` if the threshold is not greater than one
    pub fn create_pool(
        &mut self,
        creator: Address,
        name: String,
        risk_type: String,
        premium: Amount,
        coverage: Amount,
        min_members: usize,
        duration_days: u64,
        now: Timestamp,
    ) -> Result<PoolId, LedgerError> {
        if premium == 0 {
            return Err(LedgerError::InvalidPremium);
        }
        if coverage == 0 {
            return Err(LedgerError::InvalidCoverage);
        }
        if min_members <= 1 {
            return Err(LedgerError::InvalidMinMembers(min_members));
        }
        if duration_days == 0 {
            return Err(LedgerError::InvalidDuration);
        }

        self.next_pool_id += 1;
        let id = self.next_pool_id;
        let pool = Pool::new(
            id,
            name,
            risk_type,
            premium,
            coverage,
            min_members,
            duration_days.saturating_mul(SECONDS_PER_DAY),
            creator,
            now,
        );
        self.pools.insert(id, pool);
        self.user_pools.entry(creator).or_default().push(id);
        Ok(id)
    }

    /// Checks every `join_pool` precondition without touching state.
    ///
    /// The service runs this before collecting the attached payment so an
    /// invalid join never triggers a transfer.
    pub fn validate_join(
        &self,
        pool_id: PoolId,
        caller: &Address,
        payment: Amount,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        let pool = self
            .pools
            .get(&pool_id)
            .filter(|p| p.exists())
            .ok_or(LedgerError::PoolNotFound(pool_id))?;

        if pool.is_member(caller) {
            return Err(LedgerError::AlreadyMember(pool_id));
        }
        if payment != pool.premium {
            return Err(LedgerError::WrongPayment {
                expected: pool.premium,
                actual: payment,
            });
        }
        if pool.is_expired(now) {
            return Err(LedgerError::PoolExpired(pool_id));
        }
        Ok(())
    }

    /// Joins a pool with an attached payment equal to the premium.
    ///
    /// Atomically appends the member, books the paid premium, grows the
    /// balance, and updates the caller's pool index. If membership first
    /// reaches `min_members`, the pool activates.
    ///
    /// # Errors
    /// - `PoolNotFound` if the pool has no recorded creation
    /// - `AlreadyMember` on duplicate membership
    /// - `WrongPayment` unless the payment exactly equals the premium
    /// - `PoolExpired` once the pool window has elapsed
    pub fn join_pool(
        &mut self,
        pool_id: PoolId,
        caller: Address,
        payment: Amount,
        now: Timestamp,
    ) -> Result<JoinOutcome, LedgerError> {
        self.validate_join(pool_id, &caller, payment, now)?;

        let pool = self
            .pools
            .get_mut(&pool_id)
            .ok_or(LedgerError::PoolNotFound(pool_id))?;
        let activated = pool.record_join(caller, payment);
        let outcome = JoinOutcome {
            activated,
            member_count: pool.member_count(),
            total_funds: pool.total_funds,
        };
        self.user_pools.entry(caller).or_default().push(pool_id);
        Ok(outcome)
    }

    /// Submits a claim against a pool and returns the claim id.
    ///
    /// No funds move and no vote state changes: the claim is stored
    /// unresolved with zero ballots.
    ///
    /// # Errors
    /// - `PoolNotFound` if the pool has no recorded creation
    /// - `NotAMember` unless the claimant is a current member
    /// - `PoolInactive` before the membership threshold is reached
    /// - `ExceedsCoverage` if the amount is above the coverage ceiling
    /// - `PoolExpired` once the pool window has elapsed
    /// - `InsufficientFunds` if the balance cannot cover the amount
    pub fn submit_claim(
        &mut self,
        pool_id: PoolId,
        claimant: Address,
        amount: Amount,
        evidence_ref: String,
        now: Timestamp,
    ) -> Result<ClaimId, LedgerError> {
        let pool = self
            .pools
            .get(&pool_id)
            .filter(|p| p.exists())
            .ok_or(LedgerError::PoolNotFound(pool_id))?;

        if !pool.is_member(&claimant) {
            return Err(LedgerError::NotAMember(pool_id));
        }
        if !pool.active {
            return Err(LedgerError::PoolInactive(pool_id));
        }
        if amount > pool.coverage {
            return Err(LedgerError::ExceedsCoverage {
                requested: amount,
                coverage: pool.coverage,
            });
        }
        if pool.is_expired(now) {
            return Err(LedgerError::PoolExpired(pool_id));
        }
        if pool.total_funds < amount {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: pool.total_funds,
            });
        }

        self.next_claim_id += 1;
        let id = self.next_claim_id;
        self.claims
            .insert(id, Claim::new(id, claimant, pool_id, amount, evidence_ref));
        self.user_claims.entry(claimant).or_default().push(id);
        Ok(id)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Number of pools ever created.
    pub fn pool_count(&self) -> u64 {
        self.next_pool_id
    }

    /// Pool ids associated with a user, in order of creation/join.
    pub fn user_pools(&self, user: &Address) -> Vec<PoolId> {
        self.user_pools.get(user).cloned().unwrap_or_default()
    }

    /// Claim ids submitted by a user, in submission order.
    pub fn user_claims(&self, user: &Address) -> Vec<ClaimId> {
        self.user_claims.get(user).cloned().unwrap_or_default()
    }

    /// Members of a pool in join order, creator first.
    ///
    /// Returns an empty list for a pool that does not exist.
    pub fn pool_members(&self, pool_id: PoolId) -> Vec<Address> {
        self.pools
            .get(&pool_id)
            .map(|p| p.members().to_vec())
            .unwrap_or_default()
    }

    /// Summary of a pool.
    ///
    /// Returns `PoolInfo::default()` for a pool that does not exist,
    /// matching the non-zero-`created_at` existence convention; callers
    /// needing existence confirmation check `member_count`.
    pub fn pool_info(&self, pool_id: PoolId) -> PoolInfo {
        self.pools
            .get(&pool_id)
            .map(|p| PoolInfo {
                name: p.name.clone(),
                risk_type: p.risk_type.clone(),
                total_funds: p.total_funds,
                member_count: p.member_count(),
                active: p.active,
            })
            .unwrap_or_default()
    }

    /// Gets a pool record by id.
    pub fn pool(&self, pool_id: PoolId) -> Option<&Pool> {
        self.pools.get(&pool_id)
    }

    /// Gets a claim record by id.
    pub fn claim(&self, claim_id: ClaimId) -> Option<&Claim> {
        self.claims.get(&claim_id)
    }
}
