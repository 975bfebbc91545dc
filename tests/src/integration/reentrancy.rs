//! # Re-entrancy at the API Boundary
//!
//! A settlement layer that calls back into the ledger mid-transfer is the
//! classic attack vector for a payable join. These tests wire callback
//! `FundTransfer` adapters through the public `PoolLedgerApi` trait object
//! and verify that every nested mutating call is rejected, read-only
//! queries during settlement complete against the committed state, the
//! outer operation still commits exactly once, and a transfer failure
//! after a callback leaves zero state behind.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use ledger_types::{Address, Amount, PoolId, Timestamp};
    use pool_ledger::prelude::*;
    use tokio::sync::OnceCell;

    const ALICE: Address = [0xA1; 20];
    const BOB: Address = [0xB2; 20];
    const MALLORY: Address = [0xEE; 20];

    const T0: Timestamp = 1_700_000_000;

    /// Hostile settlement adapter: on every `collect` it re-enters the
    /// ledger through the public API, then either settles or fails.
    struct HostileVault {
        ledger: OnceCell<Arc<dyn PoolLedgerApi>>,
        fail_after_callback: bool,
        nested: parking_lot::Mutex<Vec<LedgerError>>,
    }

    impl HostileVault {
        fn new(fail_after_callback: bool) -> Self {
            Self {
                ledger: OnceCell::new(),
                fail_after_callback,
                nested: parking_lot::Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl FundTransfer for HostileVault {
        async fn collect(
            &self,
            from: Address,
            pool_id: PoolId,
            amount: Amount,
        ) -> Result<(), TransferError> {
            if let Some(ledger) = self.ledger.get() {
                let join = ledger.join_pool(from, pool_id, amount).await.unwrap_err();
                let claim = ledger
                    .submit_claim(from, pool_id, 1, "ev".into())
                    .await
                    .unwrap_err();
                let mut nested = self.nested.lock();
                nested.push(join);
                nested.push(claim);
            }
            if self.fail_after_callback {
                return Err(TransferError("settlement aborted".into()));
            }
            Ok(())
        }
    }

    fn hostile_service(
        fail_after_callback: bool,
    ) -> Arc<PoolLedgerService<HostileVault, RecordingPublisher>> {
        let svc = Arc::new(PoolLedgerService::new(
            HostileVault::new(fail_after_callback),
            RecordingPublisher::new(),
            Arc::new(ManualTimeSource::new(T0)) as Arc<dyn TimeSource>,
        ));
        svc.transfer()
            .ledger
            .set(svc.clone() as Arc<dyn PoolLedgerApi>)
            .ok()
            .unwrap();
        svc
    }

    #[tokio::test]
    async fn test_nested_calls_rejected_while_outer_join_commits() {
        let svc = hostile_service(false);
        let pool_id = svc
            .create_pool(ALICE, "bait".into(), "theft".into(), 100, 500, 2, 30)
            .await
            .unwrap();

        svc.join_pool(MALLORY, pool_id, 100).await.unwrap();

        let nested = svc.transfer().nested.lock().clone();
        assert_eq!(nested.len(), 2);
        assert!(nested.iter().all(|e| *e == LedgerError::ReentrantCall));

        // The outer join booked exactly once.
        let info = svc.pool_info(pool_id).await;
        assert_eq!(info.member_count, 2);
        assert_eq!(info.total_funds, 100);
        assert_eq!(svc.user_pools(MALLORY).await, vec![pool_id]);
    }

    #[tokio::test]
    async fn test_callback_then_failed_settlement_leaves_nothing() {
        let svc = hostile_service(true);
        let pool_id = svc
            .create_pool(ALICE, "bait".into(), "theft".into(), 100, 500, 2, 30)
            .await
            .unwrap();

        let err = svc.join_pool(MALLORY, pool_id, 100).await.unwrap_err();
        assert!(matches!(err, LedgerError::TransferFailed(_)));

        // The nested probes ran and were rejected; the failed settlement
        // then unwound the whole join.
        assert_eq!(svc.transfer().nested.lock().len(), 2);
        let info = svc.pool_info(pool_id).await;
        assert_eq!(info.member_count, 1);
        assert_eq!(info.total_funds, 0);
        assert!(svc.user_pools(MALLORY).await.is_empty());
        assert_eq!(svc.publisher().topics(), vec!["ledger.pool_created"]);

        // Guard released on the failure path: the ledger still accepts
        // mutations afterwards.
        let pool2 = svc
            .create_pool(ALICE, "next".into(), "fire".into(), 1, 1, 2, 1)
            .await
            .unwrap();
        assert_eq!(pool2, 2);
    }

    /// Benign settlement adapter that audits pool state mid-transfer
    /// before settling.
    struct AuditingVault {
        ledger: OnceCell<Arc<dyn PoolLedgerApi>>,
        observed: parking_lot::Mutex<Vec<PoolInfo>>,
    }

    #[async_trait]
    impl FundTransfer for AuditingVault {
        async fn collect(
            &self,
            _from: Address,
            pool_id: PoolId,
            _amount: Amount,
        ) -> Result<(), TransferError> {
            if let Some(ledger) = self.ledger.get() {
                let info = ledger.pool_info(pool_id).await;
                let members = ledger.pool_members(pool_id).await;
                assert_eq!(members.len(), info.member_count);
                self.observed.lock().push(info);
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_read_only_queries_complete_during_settlement() {
        let svc = Arc::new(PoolLedgerService::new(
            AuditingVault {
                ledger: OnceCell::new(),
                observed: parking_lot::Mutex::new(Vec::new()),
            },
            RecordingPublisher::new(),
            Arc::new(ManualTimeSource::new(T0)) as Arc<dyn TimeSource>,
        ));
        svc.transfer()
            .ledger
            .set(svc.clone() as Arc<dyn PoolLedgerApi>)
            .ok()
            .unwrap();

        let pool_id = svc
            .create_pool(ALICE, "audited".into(), "fire".into(), 100, 500, 2, 30)
            .await
            .unwrap();

        let joined = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            svc.join_pool(BOB, pool_id, 100),
        )
        .await
        .expect("join must not block on a read-only settlement query");
        joined.unwrap();

        // The mid-transfer read saw the committed pre-join snapshot.
        let observed = svc.transfer().observed.lock().clone();
        assert_eq!(observed.len(), 1);
        assert_eq!(observed[0].member_count, 1);
        assert_eq!(observed[0].total_funds, 0);

        let info = svc.pool_info(pool_id).await;
        assert_eq!(info.member_count, 2);
        assert_eq!(info.total_funds, 100);
        assert_eq!(svc.user_pools(BOB).await, vec![pool_id]);
    }
}
