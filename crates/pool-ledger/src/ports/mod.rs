//! Inbound (driving) and outbound (driven) ports.

pub mod inbound;
pub mod outbound;

pub use inbound::PoolLedgerApi;
pub use outbound::{FundTransfer, ManualTimeSource, SystemTimeSource, TimeSource, TransferError};
