//! # Pool Ledger Service
//!
//! Async facade over the domain ledger. Responsibilities:
//!
//! 1. Serializes writers: one mutating operation commits against the
//!    ledger at a time (a single `RwLock` write guard around validation
//!    and around the commit). The guard is released across the awaited
//!    fund transfer so read-only queries issued by the settlement
//!    callback observe the committed state instead of blocking.
//! 2. Guards against re-entrancy: while a premium transfer is settling,
//!    any nested mutating call is rejected before it can touch state.
//!    The transfer permit is held from validation through commit, which
//!    also keeps any competing join out of that gap.
//! 3. Publishes notifications strictly after the state commit.
//! 4. Maintains operation statistics.
//!
//! ## Atomicity
//!
//! Preconditions are checked before the transfer is attempted and before
//! any write; once validation passes, the in-memory commit cannot fail.
//! A failed transfer therefore aborts with zero observable state change
//! and zero notifications.

use crate::adapters::publisher::LedgerEventPublisher;
use crate::domain::{Address, Amount, ClaimId, LedgerError, PoolId, PoolInfo, PoolLedger};
use crate::events::{
    ClaimSubmittedPayload, LedgerEvent, MemberJoinedPayload, PoolActivatedPayload,
    PoolCreatedPayload, PremiumPaidPayload,
};
use crate::ports::inbound::PoolLedgerApi;
use crate::ports::outbound::{FundTransfer, TimeSource};

use async_trait::async_trait;
use ledger_types::short_addr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

/// Flag held from join validation through the post-transfer commit.
///
/// Mutating entry points check it before acquiring the state lock, so a
/// mutating call nested inside the transfer callback is rejected; queries
/// take only the read lock and run freely against the committed state.
/// Released on every exit path via RAII.
#[derive(Debug, Default)]
struct TransferGuard {
    in_flight: AtomicBool,
}

impl TransferGuard {
    fn is_held(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn acquire(&self) -> Result<TransferPermit<'_>, LedgerError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Ok(TransferPermit { guard: self })
        } else {
            Err(LedgerError::ReentrantCall)
        }
    }
}

struct TransferPermit<'a> {
    guard: &'a TransferGuard,
}

impl Drop for TransferPermit<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}

/// Statistics for the pool ledger service.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// Pools created.
    pub pools_created: u64,
    /// Successful joins.
    pub members_joined: u64,
    /// Sum of premiums collected across all pools.
    pub premiums_collected: Amount,
    /// Claims submitted.
    pub claims_submitted: u64,
    /// Operations rejected by a precondition or transfer failure.
    pub rejected_operations: u64,
    /// Rejections caused specifically by the re-entrancy guard.
    pub reentrancy_rejections: u64,
}

/// The pool ledger service.
pub struct PoolLedgerService<T: FundTransfer, P: LedgerEventPublisher> {
    /// Authoritative ledger state behind a single writer lock.
    state: Arc<RwLock<PoolLedger>>,
    /// Fund transfer port (premium settlement).
    transfer: Arc<T>,
    /// Notification sink.
    publisher: Arc<P>,
    /// Time source; injected so expiry windows are testable.
    clock: Arc<dyn TimeSource>,
    /// Re-entrancy guard around the transfer window.
    transfer_guard: TransferGuard,
    /// Service statistics.
    stats: Arc<RwLock<ServiceStats>>,
}

impl<T: FundTransfer, P: LedgerEventPublisher> PoolLedgerService<T, P> {
    /// Creates a service over an empty ledger.
    pub fn new(transfer: T, publisher: P, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            state: Arc::new(RwLock::new(PoolLedger::new())),
            transfer: Arc::new(transfer),
            publisher: Arc::new(publisher),
            clock,
            transfer_guard: TransferGuard::default(),
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// The fund transfer adapter.
    pub fn transfer(&self) -> &T {
        &self.transfer
    }

    /// The event publisher adapter.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Publishes after commit; a publish failure is logged, never rolled
    /// back into the operation result.
    fn publish(&self, event: LedgerEvent) {
        if let Err(err) = self.publisher.publish(event) {
            warn!(error = %err, "Failed to publish ledger event");
        }
    }

    async fn note_rejection(&self, reentrant: bool) {
        let mut stats = self.stats.write().await;
        stats.rejected_operations += 1;
        if reentrant {
            stats.reentrancy_rejections += 1;
        }
    }

    /// Rejects mutating entry while a transfer is settling.
    async fn check_reentrancy(&self, op: &'static str) -> Result<(), LedgerError> {
        if self.transfer_guard.is_held() {
            warn!(op, "Rejected re-entrant mutating call during fund transfer");
            self.note_rejection(true).await;
            return Err(LedgerError::ReentrantCall);
        }
        Ok(())
    }
}

#[async_trait]
impl<T: FundTransfer, P: LedgerEventPublisher> PoolLedgerApi for PoolLedgerService<T, P> {
    #[instrument(skip(self, name, risk_type), fields(caller = %short_addr(&caller)))]
    async fn create_pool(
        &self,
        caller: Address,
        name: String,
        risk_type: String,
        premium: Amount,
        coverage: Amount,
        min_members: usize,
        duration_days: u64,
    ) -> Result<PoolId, LedgerError> {
        self.check_reentrancy("create_pool").await?;
        let now = self.clock.now();

        let mut state = self.state.write().await;
        let pool_id = match state.create_pool(
            caller,
            name.clone(),
            risk_type.clone(),
            premium,
            coverage,
            min_members,
            duration_days,
            now,
        ) {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "Pool creation rejected");
                drop(state);
                self.note_rejection(false).await;
                return Err(err);
            }
        };
        drop(state);

        self.stats.write().await.pools_created += 1;
        info!(pool_id, name = %name, risk_type = %risk_type, "Pool created");
        self.publish(LedgerEvent::PoolCreated(PoolCreatedPayload {
            pool_id,
            name,
            risk_type,
            creator: caller,
        }));
        Ok(pool_id)
    }

    #[instrument(skip(self), fields(caller = %short_addr(&caller)))]
    async fn join_pool(
        &self,
        caller: Address,
        pool_id: PoolId,
        payment: Amount,
    ) -> Result<(), LedgerError> {
        self.check_reentrancy("join_pool").await?;
        let now = self.clock.now();

        let state = self.state.write().await;
        if let Err(err) = state.validate_join(pool_id, &caller, payment, now) {
            warn!(pool_id, error = %err, "Join rejected");
            drop(state);
            self.note_rejection(false).await;
            return Err(err);
        }

        // Acquire the permit while still holding the write guard, then
        // release the guard for the transfer: the settlement callback can
        // run read-only queries against the committed state, while the
        // permit keeps every other join (and any nested mutating call)
        // out until the commit below. Released on every exit path.
        let permit = match self.transfer_guard.acquire() {
            Ok(permit) => permit,
            Err(err) => {
                drop(state);
                self.note_rejection(true).await;
                return Err(err);
            }
        };
        drop(state);

        if let Err(err) = self.transfer.collect(caller, pool_id, payment).await {
            warn!(pool_id, error = %err, "Premium transfer failed, join aborted");
            drop(permit);
            self.note_rejection(false).await;
            return Err(LedgerError::TransferFailed(err.to_string()));
        }

        // Joins were excluded by the permit while the guard was released,
        // so the validated preconditions still hold at commit time.
        let mut state = self.state.write().await;
        let outcome = state.join_pool(pool_id, caller, payment, now)?;
        drop(state);
        drop(permit);

        {
            let mut stats = self.stats.write().await;
            stats.members_joined += 1;
            stats.premiums_collected += payment;
        }
        info!(
            pool_id,
            member_count = outcome.member_count,
            total_funds = outcome.total_funds,
            activated = outcome.activated,
            "Member joined pool"
        );

        self.publish(LedgerEvent::MemberJoined(MemberJoinedPayload {
            pool_id,
            member: caller,
            member_count: outcome.member_count,
        }));
        self.publish(LedgerEvent::PremiumPaid(PremiumPaidPayload {
            pool_id,
            member: caller,
            amount: payment,
            total_funds: outcome.total_funds,
        }));
        if outcome.activated {
            self.publish(LedgerEvent::PoolActivated(PoolActivatedPayload {
                pool_id,
                member_count: outcome.member_count,
            }));
        }
        Ok(())
    }

    #[instrument(skip(self, evidence_ref), fields(caller = %short_addr(&caller)))]
    async fn submit_claim(
        &self,
        caller: Address,
        pool_id: PoolId,
        amount: Amount,
        evidence_ref: String,
    ) -> Result<ClaimId, LedgerError> {
        self.check_reentrancy("submit_claim").await?;
        let now = self.clock.now();

        let mut state = self.state.write().await;
        let claim_id =
            match state.submit_claim(pool_id, caller, amount, evidence_ref.clone(), now) {
                Ok(id) => id,
                Err(err) => {
                    warn!(pool_id, error = %err, "Claim rejected");
                    drop(state);
                    self.note_rejection(false).await;
                    return Err(err);
                }
            };
        drop(state);

        self.stats.write().await.claims_submitted += 1;
        info!(claim_id, pool_id, amount, "Claim submitted");
        self.publish(LedgerEvent::ClaimSubmitted(ClaimSubmittedPayload {
            claim_id,
            pool_id,
            claimant: caller,
            amount,
            evidence_ref,
        }));
        Ok(claim_id)
    }

    async fn pool_count(&self) -> u64 {
        self.state.read().await.pool_count()
    }

    async fn user_pools(&self, user: Address) -> Vec<PoolId> {
        self.state.read().await.user_pools(&user)
    }

    async fn user_claims(&self, user: Address) -> Vec<ClaimId> {
        self.state.read().await.user_claims(&user)
    }

    async fn pool_members(&self, pool_id: PoolId) -> Vec<Address> {
        self.state.read().await.pool_members(pool_id)
    }

    async fn pool_info(&self, pool_id: PoolId) -> PoolInfo {
        self.state.read().await.pool_info(pool_id)
    }
}
