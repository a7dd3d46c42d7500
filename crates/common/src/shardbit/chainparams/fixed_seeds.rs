//! Hardcoded bootstrap peers.

use crate::shardbit::chainparams::DnsSeedData;

/// Mainnet seed nodes as packed big-endian IPv4 words.
///
/// Mirrors [`MAINNET_HOSTS`], so every mainnet fixed seed appears twice.
// TODO: replace with the network's generated seed table once it is published.
pub const MAINNET_PACKED: &[u32] = &[
    0x2d4c02e7, // 45.76.2.231
    0xcf941fdb, // 207.148.31.219
    0x2d3f14ee, // 45.63.20.238
    0xcff657ea, // 207.246.87.234
    0xcf941692, // 207.148.22.146
];

/// Testnet seed nodes as packed big-endian IPv4 words.
pub const TESTNET_PACKED: &[u32] = &[];

/// Curated mainnet seed nodes, appended after the packed table.
pub const MAINNET_HOSTS: &[&str] = &[
    "45.76.2.231",
    "207.148.31.219",
    "45.63.20.238",
    "207.246.87.234",
    "207.148.22.146",
];

/// Port the curated mainnet hosts listen on.
pub const MAINNET_HOSTS_PORT: u16 = 37451;

/// Mainnet DNS seeds. The seed nodes answer on their own IP.
pub const MAINNET_DNS: &[DnsSeedData] = &[
    DnsSeedData::new("45.76.2.231", "45.76.2.231"),
    DnsSeedData::new("207.148.31.219", "207.148.31.219"),
    DnsSeedData::new("45.63.20.238", "45.63.20.238"),
    DnsSeedData::new("207.246.87.234", "207.246.87.234"),
    DnsSeedData::new("207.148.22.146", "207.148.22.146"),
];
