/// Base58 address prefixes.
pub mod base58;
/// Block data structures.
pub mod blockdata;
/// Per-network chain parameters and the active network selection.
pub mod chainparams;
/// Consensus encoding and consensus constants.
pub mod consensus;
/// Hash functions and types.
pub mod hashes;
/// I/O utilities for consensus encoding.
pub mod io;
/// Network identifiers.
pub mod network;
/// Peer-to-peer identity: message magic and bootstrap peers.
pub mod p2p;
/// Proof of Work targets.
pub mod pow;
