//! Shardbit chain parameters.
//!
//! This library defines the constants that distinguish the Shardbit main and
//! test networks, rebuilds and verifies their genesis blocks, and selects the
//! profile a node runs against.

#![cfg_attr(test, allow(clippy::arithmetic_side_effects))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::cast_sign_loss))]
#![cfg_attr(test, allow(clippy::indexing_slicing))]
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::cast_possible_truncation))]

/// Types and functions related to the Shardbit networks.
pub mod shardbit;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
