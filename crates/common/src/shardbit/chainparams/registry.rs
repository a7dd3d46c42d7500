use std::sync::OnceLock;

use rand::Rng;
use tracing::{debug, info};

use crate::shardbit::{
    chainparams::{ChainParams, ChainParamsError},
    network::Network,
    p2p::SeedConverter,
};

static REGISTRY: OnceLock<ParamsRegistry> = OnceLock::new();

/// Holds one profile per network and remembers which one is active.
///
/// Both profiles are built up front, so a successful [`ParamsRegistry::new`]
/// means every genesis block verified. Switching only moves the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamsRegistry {
    mainnet: ChainParams,
    testnet: ChainParams,
    active: Network,
}

impl ParamsRegistry {
    /// Builds every profile. Mainnet is selected.
    pub fn new() -> Result<Self, ChainParamsError> {
        Self::with_seed_converter(&mut SeedConverter::from_clock())
    }

    /// Builds every profile, timestamping fixed seeds through `seeds`.
    pub fn with_seed_converter<R: Rng>(
        seeds: &mut SeedConverter<R>,
    ) -> Result<Self, ChainParamsError> {
        let registry = Self {
            mainnet: ChainParams::with_seed_converter(Network::Mainnet, seeds)?,
            testnet: ChainParams::with_seed_converter(Network::Testnet, seeds)?,
            active: Network::default(),
        };
        debug!("Parameter registry ready, {} active", registry.active);
        Ok(registry)
    }

    /// Makes `network` the active profile.
    pub fn select(&mut self, network: Network) {
        info!("Selecting {} network parameters", network);
        self.active = network;
    }

    /// Selects a network by name (`main`, `mainnet`, `test`, `testnet`).
    ///
    /// An unknown name leaves the current selection in place.
    pub fn select_named(&mut self, name: &str) -> Result<Network, ChainParamsError> {
        let network = Network::try_from(name)?;
        self.select(network);
        Ok(network)
    }

    /// Applies the testnet mode switch: `true` selects testnet, `false`
    /// selects mainnet.
    pub fn select_from_flag(&mut self, testnet: bool) -> Network {
        let network = Network::from_testnet_flag(testnet);
        self.select(network);
        network
    }

    /// The active profile.
    pub fn active(&self) -> &ChainParams {
        self.get(self.active)
    }

    /// The active network.
    pub fn active_network_id(&self) -> Network {
        self.active
    }

    /// The profile of `network`, whether active or not.
    pub fn get(&self, network: Network) -> &ChainParams {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
        }
    }

    /// Publishes this registry as the process-wide one.
    ///
    /// Installation happens once, before any reader calls [`params`]; the
    /// selection is frozen from then on.
    pub fn install(self) -> Result<&'static ParamsRegistry, ChainParamsError> {
        let network = self.active;
        REGISTRY
            .set(self)
            .map_err(|_| ChainParamsError::AlreadyInstalled)?;
        info!("Installed {} network parameters", network);
        installed().ok_or(ChainParamsError::AlreadyInstalled)
    }
}

/// The process-wide registry, if one has been installed.
pub fn installed() -> Option<&'static ParamsRegistry> {
    REGISTRY.get()
}

/// The active profile of the process-wide registry.
///
/// Without a prior [`ParamsRegistry::install`] this installs a mainnet
/// registry on first use.
///
/// # Panics
///
/// Panics when the built-in genesis blocks fail verification. A node cannot
/// run on such a build.
#[allow(clippy::panic, reason = "genesis data is compiled in and must verify")]
pub fn params() -> &'static ChainParams {
    REGISTRY
        .get_or_init(|| match ParamsRegistry::new() {
            Ok(registry) => registry,
            Err(e) => panic!("built-in chain parameters are invalid: {e}"),
        })
        .active()
}
