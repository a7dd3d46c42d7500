//! Block header.
//!
//! The header layout is Bitcoin's 80-byte header, so this module wraps the
//! `bitcoin` crate's header type and adds the accessors the rest of the node
//! uses.

use bitcoin::blockdata::block::Header as InnerHeader;
use bitcoin::{BlockHash, CompactTarget as BitcoinCompactTarget, TxMerkleNode, block::Version};
use serde::{Deserialize, Serialize};

use crate::shardbit::{
    consensus::Encodable,
    hashes::Hash,
    io::{Error as IoError, Write},
    pow::{CompactTarget, Target},
};

/// A wrapper around Bitcoin's standard block header.
///
/// The header contains the version, previous block hash, Merkle root,
/// timestamp, compact difficulty target and nonce.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHeader(InnerHeader);

impl BlockHeader {
    /// The size of a serialized header in bytes.
    pub const SIZE: usize = InnerHeader::SIZE;

    /// Builds a header that starts a chain: the previous block hash is zero.
    pub fn chain_root(
        version: i32,
        merkle_root: TxMerkleNode,
        time: u32,
        bits: CompactTarget,
        nonce: u32,
    ) -> Self {
        Self(InnerHeader {
            version: Version::from_consensus(version),
            prev_blockhash: BlockHash::all_zeros(),
            merkle_root,
            time,
            bits: BitcoinCompactTarget::from(bits),
            nonce,
        })
    }

    /// Computes the block hash, the double SHA-256 of the serialized header.
    pub fn block_hash(&self) -> BlockHash {
        self.0.block_hash()
    }

    /// The Merkle root committed to by this header.
    pub fn merkle_root(&self) -> TxMerkleNode {
        self.0.merkle_root
    }

    /// The block version.
    pub fn version(&self) -> i32 {
        self.0.version.to_consensus()
    }

    /// The block timestamp.
    pub fn timestamp(&self) -> u32 {
        self.0.time
    }

    /// The compact difficulty target.
    pub fn bits(&self) -> CompactTarget {
        CompactTarget::new(self.0.bits.to_consensus())
    }

    /// The nonce.
    pub fn nonce(&self) -> u32 {
        self.0.nonce
    }

    /// Expands the compact target, `None` if it is malformed.
    pub fn target(&self) -> Option<Target> {
        Target::from_compact(self.bits())
    }

    /// Whether this header is a chain root (no predecessor).
    pub fn is_chain_root(&self) -> bool {
        self.0.prev_blockhash == BlockHash::all_zeros()
    }
}

impl Encodable for BlockHeader {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<usize, IoError> {
        self.0.consensus_encode(writer)
    }
}
