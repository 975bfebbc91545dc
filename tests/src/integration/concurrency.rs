//! # Concurrency Tests
//!
//! The ledger serves concurrent callers with single-writer semantics:
//! each mutating operation runs to completion (or aborts entirely) before
//! the next begins. While a premium transfer is settling, mutating calls
//! are rejected with `ReentrantCall` rather than queued; callers retry.
//! These tests hammer the service from many tasks and verify that the
//! final state is exactly what a serial execution would produce.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pool_ledger::prelude::*;

    const ALICE: Address = [0xA1; 20];
    const BOB: Address = [0xB2; 20];

    const T0: Timestamp = 1_700_000_000;
    const PREMIUM: Amount = 100;

    /// Joins with the documented retry policy: `ReentrantCall` means "a
    /// transfer was settling, try again"; anything else is final.
    async fn join_with_retry(
        svc: &PoolLedgerService<InMemoryVault, RecordingPublisher>,
        member: Address,
        pool_id: PoolId,
    ) -> Result<(), LedgerError> {
        loop {
            match svc.join_pool(member, pool_id, PREMIUM).await {
                Err(LedgerError::ReentrantCall) => tokio::task::yield_now().await,
                other => return other,
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_joins_produce_serial_state() {
        let members: Vec<Address> = (0..16).map(|_| rand::random()).collect();
        let mut vault = InMemoryVault::new();
        for member in &members {
            vault = vault.with_balance(*member, PREMIUM);
        }
        let svc = Arc::new(PoolLedgerService::new(
            vault,
            RecordingPublisher::new(),
            Arc::new(ManualTimeSource::new(T0)) as Arc<dyn TimeSource>,
        ));

        let pool_id = svc
            .create_pool(ALICE, "swarm".into(), "storm".into(), PREMIUM, 1_000, 5, 30)
            .await
            .unwrap();

        let mut handles = Vec::new();
        for member in members.clone() {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                join_with_retry(&svc, member, pool_id).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let info = svc.pool_info(pool_id).await;
        assert_eq!(info.member_count, 17);
        assert_eq!(info.total_funds, 16 * PREMIUM);
        assert!(info.active);

        // Every member booked exactly once, every premium settled.
        let on_ledger = svc.pool_members(pool_id).await;
        assert_eq!(on_ledger.len(), 17);
        for member in &members {
            assert_eq!(on_ledger.iter().filter(|m| *m == member).count(), 1);
            assert_eq!(svc.transfer().balance(member), 0);
        }
        assert_eq!(svc.transfer().collected(pool_id), 16 * PREMIUM);

        // The threshold crossing emitted exactly one activation.
        let activations = svc
            .publisher()
            .topics()
            .iter()
            .filter(|t| **t == "ledger.pool_activated")
            .count();
        assert_eq!(activations, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_same_identity_racing_joins_admit_exactly_one() {
        let svc = Arc::new(PoolLedgerService::new(
            InMemoryVault::new().with_balance(BOB, 10 * PREMIUM),
            RecordingPublisher::new(),
            Arc::new(ManualTimeSource::new(T0)) as Arc<dyn TimeSource>,
        ));
        let pool_id = svc
            .create_pool(ALICE, "dup".into(), "fire".into(), PREMIUM, 1_000, 2, 30)
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                join_with_retry(&svc, BOB, pool_id).await
            }));
        }
        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => successes += 1,
                Err(LedgerError::AlreadyMember(id)) => assert_eq!(id, pool_id),
                Err(other) => panic!("unexpected rejection: {other}"),
            }
        }
        assert_eq!(successes, 1);

        // Exactly one premium left BOB's account and reached the pool.
        let info = svc.pool_info(pool_id).await;
        assert_eq!(info.member_count, 2);
        assert_eq!(info.total_funds, PREMIUM);
        assert_eq!(svc.transfer().balance(&BOB), 9 * PREMIUM);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_queries_run_alongside_writers() {
        let members: Vec<Address> = (0..8).map(|_| rand::random()).collect();
        let mut vault = InMemoryVault::new();
        for member in &members {
            vault = vault.with_balance(*member, PREMIUM);
        }
        let svc = Arc::new(PoolLedgerService::new(
            vault,
            RecordingPublisher::new(),
            Arc::new(ManualTimeSource::new(T0)) as Arc<dyn TimeSource>,
        ));
        let pool_id = svc
            .create_pool(ALICE, "mix".into(), "flood".into(), PREMIUM, 1_000, 3, 30)
            .await
            .unwrap();

        let mut handles = Vec::new();
        for member in members.clone() {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                join_with_retry(&svc, member, pool_id).await.unwrap();
                // Readers observe only committed states.
                let info = svc.pool_info(pool_id).await;
                assert_eq!(info.total_funds as usize, (info.member_count - 1) * 100);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(svc.pool_info(pool_id).await.member_count, 9);
    }
}
