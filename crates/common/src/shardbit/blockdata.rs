/// Blocks and block headers.
pub mod block;

/// Genesis block construction and verification.
pub mod genesis;

/// Time-stamped transactions.
pub mod transaction;
