//! Serde payloads for ledger notifications.

use ledger_types::{Address, Amount, ClaimId, PoolId};
use serde::{Deserialize, Serialize};

/// Published after `create_pool` commits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolCreatedPayload {
    pub pool_id: PoolId,
    pub name: String,
    pub risk_type: String,
    pub creator: Address,
}

/// Published after `join_pool` commits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberJoinedPayload {
    pub pool_id: PoolId,
    pub member: Address,
    pub member_count: usize,
}

/// Published after `join_pool` books the attached premium.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumPaidPayload {
    pub pool_id: PoolId,
    pub member: Address,
    pub amount: Amount,
    pub total_funds: Amount,
}

/// Published by the `join_pool` call whose membership first reaches the
/// pool's threshold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolActivatedPayload {
    pub pool_id: PoolId,
    pub member_count: usize,
}

/// Published after `submit_claim` commits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSubmittedPayload {
    pub claim_id: ClaimId,
    pub pool_id: PoolId,
    pub claimant: Address,
    pub amount: Amount,
    pub evidence_ref: String,
}

/// Declared but unreachable: no operation deactivates a pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDeactivatedPayload {
    pub pool_id: PoolId,
}

/// Declared but unreachable: no operation casts a ballot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimVotedPayload {
    pub claim_id: ClaimId,
    pub voter: Address,
    pub approve: bool,
}

/// Declared but unreachable: no operation resolves a claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimResolvedPayload {
    pub claim_id: ClaimId,
    pub approved: bool,
}

/// Union of all ledger notifications, tagged by kind for wire transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEvent {
    PoolCreated(PoolCreatedPayload),
    MemberJoined(MemberJoinedPayload),
    PremiumPaid(PremiumPaidPayload),
    PoolActivated(PoolActivatedPayload),
    ClaimSubmitted(ClaimSubmittedPayload),
    PoolDeactivated(PoolDeactivatedPayload),
    ClaimVoted(ClaimVotedPayload),
    ClaimResolved(ClaimResolvedPayload),
}

impl LedgerEvent {
    /// Topic string for this event.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        use super::topics;
        match self {
            Self::PoolCreated(_) => topics::POOL_CREATED,
            Self::MemberJoined(_) => topics::MEMBER_JOINED,
            Self::PremiumPaid(_) => topics::PREMIUM_PAID,
            Self::PoolActivated(_) => topics::POOL_ACTIVATED,
            Self::ClaimSubmitted(_) => topics::CLAIM_SUBMITTED,
            Self::PoolDeactivated(_) => topics::POOL_DEACTIVATED,
            Self::ClaimVoted(_) => topics::CLAIM_VOTED,
            Self::ClaimResolved(_) => topics::CLAIM_RESOLVED,
        }
    }
}
