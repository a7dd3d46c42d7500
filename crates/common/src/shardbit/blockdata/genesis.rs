//! Genesis block construction for the Shardbit networks.
//!
//! Each network records the inputs of its genesis block (coinbase message,
//! times, nonce, difficulty) together with the hash and Merkle root the block
//! must produce. [`GenesisInfo::build`] rebuilds the block from the inputs
//! and refuses to return it unless both values match. The nonce was found
//! offline; nothing here searches for it.
//!
//! The Shardbit networks identify their genesis blocks by a header hash this
//! crate does not implement. Those identities are kept as
//! [`GenesisInfo::network_hash`]. The block is verified with a
//! [`HeaderHasher`] instead, against the hash that hasher produces, so the
//! check pins every header field and the coinbase without claiming the
//! network's own identity.

use bitcoin::{
    TxMerkleNode,
    script::{Builder, PushBytes, PushBytesError},
};
use thiserror::Error;
use tracing::debug;

use crate::shardbit::{
    blockdata::{
        block::{Block, BlockHash, BlockHeader},
        transaction::Transaction,
    },
    hashes::Hash,
    network::Network,
    pow::{CompactTarget, Target},
};

/// The message embedded in the genesis coinbase input.
pub const GENESIS_MESSAGE: &str = "Shardbit Genesis - (8/17/2018)";

/// Creation time of the genesis coinbase transaction.
pub const GENESIS_TX_TIME: u32 = 1517616496;

/// Errors raised while rebuilding a genesis block.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// The rebuilt header hash differs from the recorded one.
    #[error("{network} genesis hash mismatch: expected {expected}, computed {computed}")]
    HashMismatch {
        /// Network whose genesis failed verification.
        network: Network,
        /// Recorded hash.
        expected: BlockHash,
        /// Hash of the rebuilt header.
        computed: BlockHash,
    },
    /// The rebuilt Merkle root differs from the recorded one.
    #[error("{network} genesis merkle root mismatch: expected {expected}, computed {computed}")]
    MerkleRootMismatch {
        /// Network whose genesis failed verification.
        network: Network,
        /// Recorded Merkle root.
        expected: TxMerkleNode,
        /// Merkle root of the rebuilt transaction set.
        computed: TxMerkleNode,
    },
    /// The coinbase message cannot be pushed onto a script.
    #[error("genesis message cannot be pushed: {0}")]
    ScriptPush(#[from] PushBytesError),
    /// The header's bits do not decode to a target within the limit.
    #[error("genesis bits {0:08x} exceed the proof-of-work limit")]
    TargetAboveLimit(u32),
    /// The proof-of-work limit has no compact encoding.
    #[error("proof-of-work limit {0} has no compact encoding")]
    InvalidPowLimit(Target),
}

/// The function used to hash block headers during genesis verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderHasher {
    /// Double SHA-256 over the 80-byte header.
    ///
    /// Stand-in for the networks' own header hash. Genesis hashes under this
    /// function are not the hashes Shardbit peers know the networks by.
    DoubleSha256,
}

impl HeaderHasher {
    /// Hashes `header`.
    pub fn hash(self, header: &BlockHeader) -> BlockHash {
        match self {
            HeaderHasher::DoubleSha256 => header.block_hash(),
        }
    }

    /// Whether this is the hash the network itself identifies blocks by.
    pub fn is_network_hash(self) -> bool {
        match self {
            HeaderHasher::DoubleSha256 => false,
        }
    }
}

impl std::fmt::Display for HeaderHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderHasher::DoubleSha256 => f.write_str("double-sha256"),
        }
    }
}

/// Genesis block information for different networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisInfo {
    /// The network this genesis belongs to.
    pub network: Network,
    /// The message carried in the coinbase input script.
    pub message: &'static str,
    /// The coinbase transaction time.
    pub tx_time: u32,
    /// The block timestamp.
    pub timestamp: u32,
    /// The nonce found for this header.
    pub nonce: u32,
    /// The target encoded into the header's bits.
    pub pow_limit: Target,
    /// The version of the genesis block.
    pub version: i32,
    /// The genesis hash the network records, under its own header hash.
    pub network_hash: BlockHash,
    /// The hasher the block is verified with.
    pub hasher: HeaderHasher,
    /// The hash the genesis block must have under `hasher`.
    pub hash: BlockHash,
    /// The merkle root the genesis block must have.
    pub merkle_root: TxMerkleNode,
}

impl GenesisInfo {
    /// Returns the genesis block information for the specified network.
    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::mainnet(),
            Network::Testnet => Self::testnet(),
        }
    }

    /// Returns the genesis block information for the mainnet network.
    pub fn mainnet() -> Self {
        Self {
            network: Network::Mainnet,
            message: GENESIS_MESSAGE,
            tx_time: GENESIS_TX_TIME,
            timestamp: 1534494108,
            nonce: 423128,
            pow_limit: Target::POW_LIMIT,
            version: 1,
            network_hash: BlockHash::from_byte_array([
                0xe0, 0x33, 0x92, 0x42, 0x7f, 0xff, 0x9b, 0xb9, 0x5a, 0x54, 0x6f, 0xf7, 0xbc, 0x40,
                0x1a, 0x45, 0xe2, 0xb4, 0x78, 0x90, 0x81, 0x6e, 0x02, 0xaa, 0x21, 0x78, 0x36, 0xfd,
                0xa9, 0x64, 0x1e, 0x48,
            ]),
            hasher: HeaderHasher::DoubleSha256,
            hash: BlockHash::from_byte_array([
                0x9d, 0x19, 0xf5, 0xde, 0x54, 0x8b, 0xfb, 0xe3, 0x1d, 0x78, 0x04, 0x0d, 0xa1, 0xa0,
                0x17, 0x04, 0xa4, 0x80, 0x1e, 0x4b, 0x04, 0x78, 0xe6, 0x18, 0x6d, 0x2e, 0x5e, 0xec,
                0xee, 0x52, 0x32, 0xee,
            ]),
            merkle_root: genesis_merkle_root(),
        }
    }

    /// Returns the genesis block information for the testnet network.
    ///
    /// Testnet reuses the mainnet coinbase, so only the header time and nonce
    /// (and therefore the hash) differ.
    pub fn testnet() -> Self {
        Self {
            network: Network::Testnet,
            message: GENESIS_MESSAGE,
            tx_time: GENESIS_TX_TIME,
            timestamp: 1518016375,
            nonce: 123891,
            pow_limit: Target::POW_LIMIT,
            version: 1,
            network_hash: BlockHash::from_byte_array([
                0xdd, 0xd0, 0x6f, 0x0d, 0xe1, 0x7e, 0xd5, 0x44, 0xf6, 0xb9, 0xdb, 0x99, 0x93, 0x19,
                0xb6, 0x4d, 0xd4, 0x24, 0xb4, 0xc1, 0xe6, 0x88, 0x07, 0xad, 0xc7, 0x14, 0xa6, 0x0e,
                0x20, 0x73, 0x86, 0x94,
            ]),
            hasher: HeaderHasher::DoubleSha256,
            hash: BlockHash::from_byte_array([
                0x7e, 0x83, 0x20, 0x16, 0xcf, 0x92, 0x0c, 0xf1, 0xb6, 0xef, 0x07, 0xe7, 0x70, 0xa9,
                0x8e, 0x88, 0xcb, 0x8d, 0x6b, 0x30, 0xea, 0x3e, 0x0c, 0x74, 0x1b, 0x3b, 0x1d, 0xea,
                0x3a, 0x0f, 0x78, 0xb8,
            ]),
            merkle_root: genesis_merkle_root(),
        }
    }

    /// The compact encoding of the proof-of-work limit, as stored in `nBits`.
    pub fn bits(&self) -> Result<CompactTarget, GenesisError> {
        self.pow_limit
            .to_compact()
            .ok_or(GenesisError::InvalidPowLimit(self.pow_limit))
    }

    /// Builds the coinbase transaction.
    ///
    /// The input script is `OP_0 <42> <message>`; the single output carries
    /// no value and an empty script, so the genesis reward is unspendable.
    pub fn coinbase(&self) -> Result<Transaction, GenesisError> {
        let message = <&PushBytes>::try_from(self.message.as_bytes())?;
        let script_sig = Builder::new()
            .push_int(0)
            .push_int(42)
            .push_slice(message)
            .into_script();
        Ok(Transaction::coinbase(
            self.tx_time,
            script_sig,
            vec![Transaction::empty_output()],
        ))
    }

    /// Rebuilds the genesis block without checking it against the recorded
    /// hash and Merkle root.
    pub fn assemble(&self) -> Result<Block, GenesisError> {
        let transactions = vec![self.coinbase()?];
        let merkle_root =
            Block::merkle_root_of(&transactions).unwrap_or_else(TxMerkleNode::all_zeros);
        let header = BlockHeader::chain_root(
            self.version,
            merkle_root,
            self.timestamp,
            self.bits()?,
            self.nonce,
        );
        Ok(Block::new(header, transactions))
    }

    /// Rebuilds the genesis block and verifies it.
    ///
    /// # Returns
    ///
    /// * `Ok(Block)` - The genesis block, hash and Merkle root verified
    /// * `Err(GenesisError)` - If either value differs from the recorded one
    pub fn build(&self) -> Result<Block, GenesisError> {
        let block = self.assemble()?;

        debug!(
            "{} genesis: {} hash {}, merkle root {}, nonce {}, time {}",
            self.network,
            self.hasher,
            self.hasher.hash(block.header()),
            block.header().merkle_root(),
            self.nonce,
            self.timestamp
        );
        if !self.hasher.is_network_hash() {
            debug!(
                "{} genesis verified with stand-in {} hash; network hash {} is not checked",
                self.network, self.hasher, self.network_hash
            );
        }

        self.verify(&block)?;
        Ok(block)
    }

    /// Checks `block` against the recorded hash and Merkle root.
    ///
    /// The header must also commit to the block's own transactions and
    /// declare a target within the proof-of-work limit.
    pub fn verify(&self, block: &Block) -> Result<BlockHash, GenesisError> {
        let merkle_root = block.header().merkle_root();
        if merkle_root != self.merkle_root || !block.check_merkle_root() {
            return Err(GenesisError::MerkleRootMismatch {
                network: self.network,
                expected: self.merkle_root,
                computed: block
                    .compute_merkle_root()
                    .unwrap_or_else(TxMerkleNode::all_zeros),
            });
        }

        match block.header().target() {
            Some(target) if target <= self.pow_limit => {}
            _ => return Err(GenesisError::TargetAboveLimit(block.header().bits().to_consensus())),
        }

        let hash = self.hasher.hash(block.header());
        if hash != self.hash {
            return Err(GenesisError::HashMismatch {
                network: self.network,
                expected: self.hash,
                computed: hash,
            });
        }

        Ok(hash)
    }
}

fn genesis_merkle_root() -> TxMerkleNode {
    TxMerkleNode::from_byte_array([
        0x41, 0x2d, 0xa5, 0x6a, 0x16, 0x33, 0x59, 0x90, 0x18, 0xba, 0x01, 0xcc, 0x87, 0x93, 0x54,
        0xa2, 0x65, 0x50, 0xbb, 0x30, 0xf4, 0x5a, 0x84, 0x69, 0x27, 0xf5, 0xaa, 0x89, 0x28, 0xec,
        0x0b, 0xf4,
    ])
}
