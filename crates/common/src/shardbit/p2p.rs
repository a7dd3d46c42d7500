/// Conversion of hardcoded seed lists into timestamped peer addresses.
pub mod seeds;

pub use seeds::{SeedAddress, SeedConverter};

/// Network magic bytes to identify the network a message was intended for.
///
/// The values are rarely used upper ASCII, not valid as UTF-8, and produce a
/// large 4-byte integer at any alignment.
#[derive(Debug, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct Magic([u8; 4]);

impl Magic {
    /// Shardbit main network magic bytes.
    pub const MAINNET: Self = Self([0xa3, 0xfb, 0xdb, 0xdb]);
    /// Shardbit test network magic bytes.
    pub const TESTNET: Self = Self([0xc4, 0xd5, 0xa6, 0xb8]);

    /// Returns the magic bytes as a 4-byte array.
    pub fn to_bytes(&self) -> [u8; 4] {
        self.0
    }
}

impl std::fmt::Display for Magic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        hex::encode(self.0).fmt(f)
    }
}
