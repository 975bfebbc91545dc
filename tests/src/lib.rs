//! # Pool-Ledger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs    # End-to-end service flows
//!     └── concurrency.rs  # Serialization and re-entrancy under load
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ledger-tests
//!
//! # By category
//! cargo test -p ledger-tests integration::scenarios::
//! cargo test -p ledger-tests integration::concurrency::
//! ```

#![allow(dead_code)]
