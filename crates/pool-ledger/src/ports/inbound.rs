//! # Inbound Port - PoolLedgerApi
//!
//! Primary driving port exposing the pool ledger operation surface.

use crate::domain::{Address, Amount, ClaimId, LedgerError, PoolId, PoolInfo};
use async_trait::async_trait;

/// Primary API for the pool ledger.
///
/// Mutating operations are all-or-nothing: every precondition violation
/// aborts with zero observable state change and no notifications.
///
/// # Example
///
/// ```rust,ignore
/// use pool_ledger::ports::PoolLedgerApi;
///
/// async fn example(ledger: &impl PoolLedgerApi, alice: [u8; 20], bob: [u8; 20]) {
///     let pool_id = ledger
///         .create_pool(alice, "storm".into(), "weather".into(), 100, 500, 2, 30)
///         .await
///         .unwrap();
///     ledger.join_pool(pool_id, bob, 100).await.unwrap();
///     let claim_id = ledger
///         .submit_claim(pool_id, bob, 100, "ipfs://abc".into())
///         .await
///         .unwrap();
///     assert_eq!(claim_id, 1);
/// }
/// ```
#[async_trait]
pub trait PoolLedgerApi: Send + Sync {
    /// Creates a pool and returns its id. The caller becomes the sole
    /// initial member without paying a premium.
    ///
    /// # Errors
    /// - `InvalidPremium` / `InvalidCoverage` / `InvalidDuration` on
    ///   non-positive parameters
    /// - `InvalidMinMembers` unless the threshold is greater than one
    async fn create_pool(
        &self,
        caller: Address,
        name: String,
        risk_type: String,
        premium: Amount,
        coverage: Amount,
        min_members: usize,
        duration_days: u64,
    ) -> Result<PoolId, LedgerError>;

    /// Joins a pool, attaching a payment that must exactly equal the
    /// pool's premium. The payment is collected through the fund-transfer
    /// port before any bookkeeping is applied.
    ///
    /// # Errors
    /// - `PoolNotFound`, `AlreadyMember`, `WrongPayment`, `PoolExpired`
    /// - `ReentrantCall` if invoked while the caller's transfer is settling
    /// - `TransferFailed` if the payment could not be collected
    async fn join_pool(
        &self,
        caller: Address,
        pool_id: PoolId,
        payment: Amount,
    ) -> Result<(), LedgerError>;

    /// Submits a claim and returns its id. No funds move at submission.
    ///
    /// # Errors
    /// - `PoolNotFound`, `NotAMember`, `PoolInactive`, `ExceedsCoverage`,
    ///   `PoolExpired`, `InsufficientFunds`
    async fn submit_claim(
        &self,
        caller: Address,
        pool_id: PoolId,
        amount: Amount,
        evidence_ref: String,
    ) -> Result<ClaimId, LedgerError>;

    /// Number of pools ever created.
    async fn pool_count(&self) -> u64;

    /// Pool ids associated with a user, in creation/join order.
    async fn user_pools(&self, user: Address) -> Vec<PoolId>;

    /// Claim ids submitted by a user, in submission order.
    async fn user_claims(&self, user: Address) -> Vec<ClaimId>;

    /// Members of a pool in join order, creator first. Empty for a pool
    /// that does not exist.
    async fn pool_members(&self, pool_id: PoolId) -> Vec<Address>;

    /// Pool summary. Defaults for a pool that does not exist; callers
    /// needing existence confirmation check `member_count`.
    async fn pool_info(&self, pool_id: PoolId) -> PoolInfo;
}
