//! # Core Primitive Types
//!
//! Identities, amounts, and ids used across the ledger crates.

// =============================================================================
// IDENTITY
// =============================================================================

/// A 20-byte account address.
///
/// All member, claimant, and creator identities are addresses.
pub type Address = [u8; 20];

/// Renders the first 4 bytes of an address for log output.
#[must_use]
pub fn short_addr(address: &Address) -> String {
    format!("0x{}..", hex::encode(&address[..4]))
}

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Sequential pool identifier, minted from 1. Never reused.
pub type PoolId = u64;

/// Sequential claim identifier, minted from 1 on its own counter,
/// independent of pool ids.
pub type ClaimId = u64;

// =============================================================================
// VALUES
// =============================================================================

/// A fund amount (premiums, coverage ceilings, claim requests).
pub type Amount = u128;

/// Timestamp in seconds since UNIX epoch.
pub type Timestamp = u64;

/// Seconds in one day; pool durations are supplied in days and stored
/// in seconds.
pub const SECONDS_PER_DAY: u64 = 86_400;
