//! Per-network chain parameters.
//!
//! [`ChainParams`] bundles everything that tells one Shardbit network apart
//! from another: message magic, ports, address prefixes, the verified genesis
//! block, bootstrap peers and the proof-of-work to proof-of-stake switch-over.
//! A profile is built once by [`ChainParams::for_network`] and never mutated.

mod fixed_seeds;
/// Selection of the active network.
pub mod registry;

use rand::Rng;
pub use registry::{ParamsRegistry, installed, params};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::shardbit::{
    base58::{AddressError, Base58Prefixes, Base58Type},
    blockdata::{
        block::{Block, BlockHash},
        genesis::{GenesisError, GenesisInfo, HeaderHasher},
    },
    consensus::Params,
    network::{ChainTypeError, Network},
    p2p::{Magic, SeedAddress, SeedConverter},
    pow::Target,
};

/// Errors raised while building or selecting chain parameters.
#[derive(Debug, Error)]
pub enum ChainParamsError {
    /// The genesis block did not verify.
    #[error(transparent)]
    Genesis(#[from] GenesisError),
    /// A network name outside the supported set was requested.
    #[error("unknown network: {0}")]
    UnknownNetwork(#[from] ChainTypeError),
    /// The alert public key literal is not valid hex.
    #[error("invalid alert public key: {0}")]
    AlertKey(#[from] hex::FromHexError),
    /// The process-wide registry was installed twice.
    #[error("parameter registry already installed")]
    AlreadyInstalled,
}

/// A DNS seed: a display name and the host queried for peer addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DnsSeedData {
    /// Display name of the seed.
    pub name: &'static str,
    /// Host name or address to resolve.
    pub host: &'static str,
}

impl DnsSeedData {
    /// Creates a DNS seed entry.
    pub const fn new(name: &'static str, host: &'static str) -> Self {
        Self { name, host }
    }
}

/// The immutable parameter set of one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainParams {
    network: Network,
    magic: Magic,
    alert_pubkey: Vec<u8>,
    default_port: u16,
    rpc_port: u16,
    data_dir: Option<&'static str>,
    consensus: Params,
    genesis: Block,
    genesis_hash: BlockHash,
    network_genesis_hash: BlockHash,
    genesis_hasher: HeaderHasher,
    base58_prefixes: Base58Prefixes,
    dns_seeds: Vec<DnsSeedData>,
    fixed_seeds: Vec<SeedAddress>,
    pool_dummy_address: &'static str,
}

impl ChainParams {
    /// Builds the parameters for `network`, timestamping fixed seeds against
    /// the wall clock.
    pub fn for_network(network: Network) -> Result<Self, ChainParamsError> {
        Self::with_seed_converter(network, &mut SeedConverter::from_clock())
    }

    /// Builds the parameters for `network` using `seeds` to timestamp the
    /// fixed seed list.
    ///
    /// # Errors
    ///
    /// Fails when the rebuilt genesis block does not match the recorded hash
    /// or Merkle root. The node must not start in that case.
    pub fn with_seed_converter<R: Rng>(
        network: Network,
        seeds: &mut SeedConverter<R>,
    ) -> Result<Self, ChainParamsError> {
        let genesis_info = GenesisInfo::for_network(network);
        let genesis = genesis_info.build()?;
        let genesis_hash = genesis_info.hash;
        let network_genesis_hash = genesis_info.network_hash;
        let genesis_hasher = genesis_info.hasher;

        let params = match network {
            Network::Mainnet => {
                let default_port = 37451;
                let mut fixed = seeds.convert_packed(fixed_seeds::MAINNET_PACKED, default_port);
                fixed.extend(seeds.convert_hosts(
                    fixed_seeds::MAINNET_HOSTS,
                    fixed_seeds::MAINNET_HOSTS_PORT,
                ));

                Self {
                    network,
                    magic: Magic::MAINNET,
                    alert_pubkey: hex::decode(
                        "7501131e64cde21b1644efc56ed3594ef64425850aa52617506177cf245575f0aa11e5b\
                         1777cfd8621ea39a7996872a07631ea25b3fdda00df37f5e982fe58850a",
                    )?,
                    default_port,
                    rpc_port: 37452,
                    data_dir: None,
                    consensus: Params::MAINNET,
                    genesis,
                    genesis_hash,
                    network_genesis_hash,
                    genesis_hasher,
                    base58_prefixes: Base58Prefixes::MAINNET,
                    dns_seeds: fixed_seeds::MAINNET_DNS.to_vec(),
                    fixed_seeds: fixed,
                    pool_dummy_address: "hFoQDUrp63QWqFhjEr3Fmc4ubHRhyzjKUC",
                }
            }
            Network::Testnet => {
                let default_port = 47451;

                Self {
                    network,
                    magic: Magic::TESTNET,
                    alert_pubkey: hex::decode(
                        "7501131e15afcdae1d0e4a656ed3594ef64425850aa52617506177cf245575f0aa11e5b\
                         1777cfd8621ea39a7996872a07631ea25b3fdda00df37f5e982fe58850a",
                    )?,
                    default_port,
                    rpc_port: 47452,
                    data_dir: Some("testnet"),
                    consensus: Params::TESTNET,
                    genesis,
                    genesis_hash,
                    network_genesis_hash,
                    genesis_hasher,
                    base58_prefixes: Base58Prefixes::TESTNET,
                    dns_seeds: Vec::new(),
                    fixed_seeds: seeds.convert_packed(fixed_seeds::TESTNET_PACKED, default_port),
                    pool_dummy_address: "hFoQDUrp63QWqFhjEr3Fmc4ubHRhyzjKUC",
                }
            }
        };

        debug!(
            "Built {} parameters: genesis {}, {} DNS seeds, {} fixed seeds",
            network,
            params.genesis_hash,
            params.dns_seeds.len(),
            params.fixed_seeds.len()
        );

        Ok(params)
    }

    /// The network these parameters describe.
    pub fn network_id(&self) -> Network {
        self.network
    }

    /// The message start bytes.
    pub fn magic(&self) -> Magic {
        self.magic
    }

    /// The public key that signs network alerts.
    pub fn alert_pubkey(&self) -> &[u8] {
        &self.alert_pubkey
    }

    /// The default peer-to-peer port.
    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    /// The default RPC port.
    pub fn rpc_port(&self) -> u16 {
        self.rpc_port
    }

    /// Returns `(p2p_port, rpc_port)`.
    pub fn default_ports(&self) -> (u16, u16) {
        (self.default_port, self.rpc_port)
    }

    /// Sub-directory of the data directory used by this network, if any.
    pub fn data_dir(&self) -> Option<&'static str> {
        self.data_dir
    }

    /// The consensus constants of this network.
    pub fn consensus(&self) -> &Params {
        &self.consensus
    }

    /// The loosest target a block header may declare.
    pub fn pow_limit(&self) -> Target {
        self.consensus.pow_limit
    }

    /// Returns `(last_pow_block, pos_start_block)`.
    pub fn pow_to_pos_transition_heights(&self) -> (u32, u32) {
        self.consensus.pow_to_pos_transition_heights()
    }

    /// The verified genesis block.
    pub fn genesis_block(&self) -> &Block {
        &self.genesis
    }

    /// The hash of the genesis block under [`Self::genesis_hasher`].
    pub fn genesis_hash(&self) -> BlockHash {
        self.genesis_hash
    }

    /// The genesis hash Shardbit peers know this network by.
    ///
    /// Differs from [`Self::genesis_hash`] while the genesis is verified with
    /// a stand-in hasher.
    pub fn network_genesis_hash(&self) -> BlockHash {
        self.network_genesis_hash
    }

    /// The header hash the genesis block was verified with.
    pub fn genesis_hasher(&self) -> HeaderHasher {
        self.genesis_hasher
    }

    /// The base58 prefix for `kind`.
    pub fn base58_prefix(&self, kind: Base58Type) -> &'static [u8] {
        self.base58_prefixes.get(kind)
    }

    /// Base58check-encodes `payload` as `kind` for this network.
    pub fn encode_address(&self, kind: Base58Type, payload: &[u8]) -> String {
        self.base58_prefixes.encode(kind, payload)
    }

    /// Decodes a base58check string of `kind`, rejecting other networks.
    pub fn decode_address(&self, kind: Base58Type, encoded: &str) -> Result<Vec<u8>, AddressError> {
        self.base58_prefixes.decode(kind, encoded)
    }

    /// DNS seeds, in query order.
    pub fn dns_seeds(&self) -> &[DnsSeedData] {
        &self.dns_seeds
    }

    /// Fixed seeds, used when DNS discovery yields nothing.
    pub fn fixed_seeds(&self) -> &[SeedAddress] {
        &self.fixed_seeds
    }

    /// Maximum number of transactions merged by one mixing pool session.
    pub fn pool_max_transactions(&self) -> u32 {
        self.consensus.pool_max_transactions
    }

    /// Placeholder address used by the mixing pool.
    pub fn pool_dummy_address(&self) -> &'static str {
        self.pool_dummy_address
    }
}

#[cfg(test)]
mod tests {
    use std::net::IpAddr;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::shardbit::p2p::seeds::ONE_WEEK;

    const NOW: i64 = 1_700_000_000;

    fn build(network: Network) -> ChainParams {
        let mut seeds = SeedConverter::new(NOW, StdRng::seed_from_u64(11));
        ChainParams::with_seed_converter(network, &mut seeds).unwrap()
    }

    #[test]
    fn test_mainnet_constants() {
        let params = build(Network::Mainnet);
        assert_eq!(params.network_id(), Network::Mainnet);
        assert_eq!(params.magic().to_bytes(), [0xa3, 0xfb, 0xdb, 0xdb]);
        assert_eq!(params.default_ports(), (37451, 37452));
        assert_eq!(params.pow_limit(), Target::POW_LIMIT);
        assert_eq!(params.pow_to_pos_transition_heights(), (210_000, 1_500));
        assert_eq!(params.data_dir(), None);
        assert_eq!(params.alert_pubkey().len(), 65);
        assert_eq!(params.pool_max_transactions(), 3);
        assert_eq!(params.pool_dummy_address(), "hFoQDUrp63QWqFhjEr3Fmc4ubHRhyzjKUC");
        assert_eq!(params.base58_prefix(Base58Type::PubkeyAddress), &[63]);
        assert_eq!(
            params.base58_prefix(Base58Type::ExtSecretKey),
            &[0x99, 0x73, 0x43, 0xe3]
        );
    }

    #[test]
    fn test_testnet_constants() {
        let params = build(Network::Testnet);
        assert_eq!(params.network_id(), Network::Testnet);
        assert_eq!(params.magic().to_bytes(), [0xc4, 0xd5, 0xa6, 0xb8]);
        assert_eq!(params.default_ports(), (47451, 47452));
        assert_eq!(params.data_dir(), Some("testnet"));
        assert_eq!(params.base58_prefix(Base58Type::PubkeyAddress), &[85]);
    }

    #[test]
    fn test_networks_never_share_identity() {
        let main = build(Network::Mainnet);
        let test = build(Network::Testnet);

        assert_ne!(main.magic(), test.magic());
        assert_ne!(main.genesis_hash(), test.genesis_hash());
        assert_ne!(main.alert_pubkey(), test.alert_pubkey());
        assert_ne!(main.default_ports(), test.default_ports());
        assert_ne!(
            main.pow_to_pos_transition_heights(),
            test.pow_to_pos_transition_heights()
        );
        for kind in Base58Type::ALL {
            assert_ne!(main.base58_prefix(kind), test.base58_prefix(kind));
        }
    }

    #[test]
    fn test_genesis_hash_is_cached_block_hash() {
        for network in Network::ALL {
            let params = build(network);
            let header = params.genesis_block().header();
            assert_eq!(params.genesis_hash(), params.genesis_hasher().hash(header));
            assert_eq!(params.genesis_hash(), GenesisInfo::for_network(network).hash);
            assert_eq!(
                params.network_genesis_hash(),
                GenesisInfo::for_network(network).network_hash
            );
            assert!(!params.genesis_hasher().is_network_hash());
            assert_eq!(params.consensus().network, network);
        }
    }

    #[test]
    fn test_mainnet_seeds() {
        let params = build(Network::Mainnet);
        let names: Vec<&str> = params.dns_seeds().iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "45.76.2.231",
                "207.148.31.219",
                "45.63.20.238",
                "207.246.87.234",
                "207.148.22.146"
            ]
        );

        let fixed = params.fixed_seeds();
        assert_eq!(fixed.len(), 10);
        assert_eq!(fixed[0].ip(), "45.76.2.231".parse::<IpAddr>().unwrap());
        assert_eq!(fixed[5].ip(), "45.76.2.231".parse::<IpAddr>().unwrap());
        for seed in fixed {
            assert_eq!(seed.addr.port(), 37451);
            assert!(seed.last_seen >= NOW - 2 * ONE_WEEK && seed.last_seen < NOW - ONE_WEEK);
        }
    }

    #[test]
    fn test_testnet_has_no_seeds() {
        let params = build(Network::Testnet);
        assert!(params.dns_seeds().is_empty());
        assert!(params.fixed_seeds().is_empty());
    }

    #[test]
    fn test_address_helpers_use_network_prefix() {
        let main = build(Network::Mainnet);
        let test = build(Network::Testnet);
        let payload = [9u8; 20];

        let encoded = main.encode_address(Base58Type::PubkeyAddress, &payload);
        assert_eq!(
            main.decode_address(Base58Type::PubkeyAddress, &encoded).unwrap(),
            payload
        );
        assert!(test.decode_address(Base58Type::PubkeyAddress, &encoded).is_err());
    }

    #[test]
    fn test_for_network_uses_wall_clock() {
        let params = ChainParams::for_network(Network::Mainnet).unwrap();
        assert!(params.fixed_seeds().iter().all(|s| s.last_seen > NOW));
    }
}
