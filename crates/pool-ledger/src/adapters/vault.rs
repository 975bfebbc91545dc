//! In-memory settlement vault implementing the `FundTransfer` port.
//!
//! Tracks per-account balances and per-pool collected premiums. Real
//! deployments replace this with the chain's native transfer layer; the
//! ledger itself never inspects vault internals.

use crate::domain::{Address, Amount, PoolId};
use crate::ports::outbound::{FundTransfer, TransferError};
use async_trait::async_trait;
use ledger_types::short_addr;
use std::collections::HashMap;

/// In-memory vault with explicit account balances.
///
/// `collect` debits the payer and credits the pool; an underfunded payer
/// fails the transfer and nothing is debited.
#[derive(Debug, Default)]
pub struct InMemoryVault {
    accounts: parking_lot::Mutex<HashMap<Address, Amount>>,
    collected: parking_lot::Mutex<HashMap<PoolId, Amount>>,
}

impl InMemoryVault {
    /// Creates an empty vault; every account starts unfunded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Funds an account (builder style).
    #[must_use]
    pub fn with_balance(self, account: Address, balance: Amount) -> Self {
        self.accounts.lock().insert(account, balance);
        self
    }

    /// Current balance of an account.
    pub fn balance(&self, account: &Address) -> Amount {
        self.accounts.lock().get(account).copied().unwrap_or(0)
    }

    /// Total premiums collected on behalf of a pool.
    pub fn collected(&self, pool_id: PoolId) -> Amount {
        self.collected.lock().get(&pool_id).copied().unwrap_or(0)
    }
}

#[async_trait]
impl FundTransfer for InMemoryVault {
    async fn collect(
        &self,
        from: Address,
        pool_id: PoolId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        {
            let mut accounts = self.accounts.lock();
            let balance = accounts.entry(from).or_insert(0);
            if *balance < amount {
                return Err(TransferError(format!(
                    "insufficient balance for {}: have {}, need {}",
                    short_addr(&from),
                    balance,
                    amount
                )));
            }
            *balance -= amount;
        }
        *self.collected.lock().entry(pool_id).or_insert(0) += amount;
        Ok(())
    }
}
