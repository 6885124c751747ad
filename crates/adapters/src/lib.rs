// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the board's external collaborators
//!
//! The engine talks to the ownership store, the participant directory,
//! and the reveal surface only through these traits.

pub mod directory;
pub mod ownership;
pub mod reveal;
pub mod traced;

pub use directory::{DirectoryError, ParticipantDirectory, StaticDirectory};
pub use ownership::{MemoryOwnershipStore, OwnershipStore, StoreError, Transfer};
pub use reveal::{NoOpRevealSink, RevealError, RevealSink};
pub use traced::{TracedDirectory, TracedOwnershipStore};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use ownership::{FakeOwnershipStore, OwnershipCall};
#[cfg(any(test, feature = "test-support"))]
pub use reveal::{FakeRevealSink, RevealCall};
