//! Time-stamped transactions.
//!
//! Proof-of-stake chains carry the transaction time in the serialized form,
//! between the version and the inputs. Inputs and outputs are encoded exactly
//! as in Bitcoin.

use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, TxIn, TxOut, Txid, Witness};

use crate::shardbit::{
    consensus::{Encodable, serialize},
    hashes::{Hash, Sha256Hash},
    io::{Error as IoError, Write},
};

/// A transaction with a `time` field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction format version.
    pub version: i32,
    /// Unix time the transaction was created.
    pub time: u32,
    /// Inputs spent by the transaction.
    pub input: Vec<TxIn>,
    /// Outputs created by the transaction.
    pub output: Vec<TxOut>,
    /// Block height or time before which the transaction is not final.
    pub lock_time: u32,
}

impl Transaction {
    /// Builds a coinbase transaction: one input spending the null outpoint
    /// with the given script, followed by `output`.
    pub fn coinbase(time: u32, script_sig: ScriptBuf, output: Vec<TxOut>) -> Self {
        Self {
            version: 1,
            time,
            input: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig,
                sequence: Sequence::MAX,
                witness: Witness::default(),
            }],
            output,
            lock_time: 0,
        }
    }

    /// An output carrying no value and an empty script. Nothing can spend it.
    pub fn empty_output() -> TxOut {
        TxOut {
            value: Amount::ZERO,
            script_pubkey: ScriptBuf::new(),
        }
    }

    /// Whether this is a coinbase transaction.
    pub fn is_coinbase(&self) -> bool {
        matches!(self.input.as_slice(), [input] if input.previous_output.is_null())
    }

    /// Computes the transaction id, the double SHA-256 of the serialization.
    pub fn txid(&self) -> Txid {
        Txid::from_raw_hash(Sha256Hash::hash(&serialize(self)))
    }
}

impl Encodable for Transaction {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<usize, IoError> {
        let mut len: usize = 0;
        len = len.saturating_add(self.version.consensus_encode(writer)?);
        len = len.saturating_add(self.time.consensus_encode(writer)?);
        len = len.saturating_add(self.input.consensus_encode(writer)?);
        len = len.saturating_add(self.output.consensus_encode(writer)?);
        len = len.saturating_add(self.lock_time.consensus_encode(writer)?);
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use bitcoin::script::Builder;

    use super::*;

    fn sample() -> Transaction {
        let script = Builder::new().push_int(0).push_int(42).into_script();
        Transaction::coinbase(1517616496, script, vec![Transaction::empty_output()])
    }

    #[test]
    fn test_coinbase_shape() {
        let tx = sample();
        assert!(tx.is_coinbase());
        assert_eq!(tx.input.len(), 1);
        assert_eq!(tx.input[0].sequence, Sequence::MAX);
        assert_eq!(tx.output[0].value, Amount::ZERO);
    }

    #[test]
    fn test_not_coinbase_with_real_outpoint() {
        let mut tx = sample();
        tx.input[0].previous_output = OutPoint::new(Txid::all_zeros(), 0);
        assert!(!tx.is_coinbase());
    }

    #[test]
    fn test_encoding_layout() {
        let tx = sample();
        let bytes = serialize(&tx);
        // version | time | 1 input | null outpoint | script (3 bytes) | sequence
        // | 1 output | zero value | empty script | lock time
        let expected = "01000000\
                        70fd745a\
                        01\
                        0000000000000000000000000000000000000000000000000000000000000000ffffffff\
                        0300012a\
                        ffffffff\
                        01\
                        0000000000000000\
                        00\
                        00000000";
        assert_eq!(hex::encode(&bytes), expected);
        assert_eq!(tx.consensus_encode(&mut Vec::new()).unwrap(), bytes.len());
    }

    #[test]
    fn test_time_changes_txid() {
        let a = sample();
        let mut b = sample();
        b.time += 1;
        assert_ne!(a.txid(), b.txid());
    }
}
