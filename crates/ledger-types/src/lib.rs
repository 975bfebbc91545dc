//! # Ledger Types Crate
//!
//! Shared primitive types for the pool ledger.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses a crate boundary
//!   (identities, amounts, ids, timestamps) is defined here.
//! - **Deterministic Identity**: pool and claim ids are plain integers
//!   minted sequentially from 1; they are never reused.

pub mod entities;

pub use entities::*;
