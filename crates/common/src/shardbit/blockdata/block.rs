mod header;

pub use bitcoin::block::BlockHash;
use bitcoin::{TxMerkleNode, consensus::encode::VarInt, merkle_tree};
pub use header::BlockHeader;

use crate::shardbit::{
    blockdata::transaction::Transaction,
    consensus::Encodable,
    hashes::Hash,
    io::{Error as IoError, Write},
};

/// Represents a block in the blockchain.
///
/// A `Block` contains the header, which commits to the transactions through
/// its Merkle root, and the list of transactions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// The block header
    pub header: BlockHeader,
    /// List of transactions contained in the block
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Creates a new block from a header and its transactions.
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Block {
            header,
            transactions,
        }
    }

    /// Gets a reference to the block header
    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    /// Gets the number of transactions in the block
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Gets a reference to the transactions
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The block hash, taken over the header only.
    pub fn block_hash(&self) -> BlockHash {
        self.header.block_hash()
    }

    /// Computes the Merkle root of the given transactions.
    ///
    /// Returns `None` for an empty transaction list.
    pub fn merkle_root_of(transactions: &[Transaction]) -> Option<TxMerkleNode> {
        let hashes = transactions
            .iter()
            .map(|tx| TxMerkleNode::from_raw_hash(tx.txid().to_raw_hash()));
        merkle_tree::calculate_root(hashes)
    }

    /// Computes the Merkle root of this block's transactions.
    pub fn compute_merkle_root(&self) -> Option<TxMerkleNode> {
        Self::merkle_root_of(&self.transactions)
    }

    /// Whether the header's Merkle root commits to the block's transactions.
    pub fn check_merkle_root(&self) -> bool {
        self.compute_merkle_root() == Some(self.header.merkle_root())
    }
}

impl Encodable for Block {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<usize, IoError> {
        let mut len: usize = 0;

        len = len.saturating_add(self.header.consensus_encode(writer)?);
        len = len.saturating_add(VarInt(self.transactions.len() as u64).consensus_encode(writer)?);
        for tx in &self.transactions {
            len = len.saturating_add(tx.consensus_encode(writer)?);
        }

        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use bitcoin::script::Builder;

    use super::*;
    use crate::shardbit::{consensus::serialize, pow::CompactTarget};

    fn coinbase(time: u32) -> Transaction {
        let script = Builder::new().push_int(0).push_int(42).into_script();
        Transaction::coinbase(time, script, vec![Transaction::empty_output()])
    }

    #[test]
    fn test_single_transaction_root_is_txid() {
        let tx = coinbase(1);
        let root = Block::merkle_root_of(std::slice::from_ref(&tx)).unwrap();
        assert_eq!(root.to_byte_array(), tx.txid().to_byte_array());
    }

    #[test]
    fn test_empty_block_has_no_root() {
        assert_eq!(Block::merkle_root_of(&[]), None);
    }

    #[test]
    fn test_check_merkle_root() {
        let txs = vec![coinbase(1), coinbase(2)];
        let root = Block::merkle_root_of(&txs).unwrap();
        let header = BlockHeader::chain_root(1, root, 0, CompactTarget::new(0x1f00ffff), 0);
        let mut block = Block::new(header, txs);
        assert!(block.check_merkle_root());

        block.transactions.pop();
        assert!(!block.check_merkle_root());
    }

    #[test]
    fn test_block_encoding_prefix_is_header() {
        let tx = coinbase(1);
        let root = Block::merkle_root_of(std::slice::from_ref(&tx)).unwrap();
        let header = BlockHeader::chain_root(1, root, 0, CompactTarget::new(0x1f00ffff), 0);
        let block = Block::new(header, vec![tx.clone()]);

        let bytes = serialize(&block);
        assert_eq!(&bytes[..BlockHeader::SIZE], serialize(&header).as_slice());
        assert_eq!(bytes[BlockHeader::SIZE], 1);
        assert_eq!(bytes.len(), BlockHeader::SIZE + 1 + serialize(&tx).len());
    }
}
