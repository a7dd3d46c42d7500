use crate::shardbit::{network::Network, pow::Target};

/// Consensus parameters for different networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// Network for which these parameters are defined.
    pub network: Network,
    /// The loosest target a block header may declare.
    pub pow_limit: Target,
    /// The last block height at which proof-of-work blocks are accepted.
    pub last_pow_block: u32,
    /// The block height from which proof-of-stake blocks are accepted.
    pub pos_start_block: u32,
    /// Maximum number of transactions merged by one mixing pool session.
    pub pool_max_transactions: u32,
}

impl Params {
    /// Consensus parameters for the Shardbit mainnet network.
    pub const MAINNET: Self = Self {
        network: Network::Mainnet,
        pow_limit: Target::POW_LIMIT,
        last_pow_block: 210_000,
        pos_start_block: 1_500,
        pool_max_transactions: 3,
    };
    /// Consensus parameters for the Shardbit testnet network.
    pub const TESTNET: Self = Self {
        network: Network::Testnet,
        pow_limit: Target::POW_LIMIT,
        last_pow_block: 1_000, // Early switch to exercise staking
        pos_start_block: 100,
        pool_max_transactions: 3,
    };

    /// Returns `(last_pow_block, pos_start_block)`.
    pub fn pow_to_pos_transition_heights(&self) -> (u32, u32) {
        (self.last_pow_block, self.pos_start_block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_transition_heights() {
        assert_eq!(Params::MAINNET.pow_to_pos_transition_heights(), (210_000, 1_500));
    }

    #[test]
    fn test_testnet_transition_differs() {
        assert_ne!(
            Params::MAINNET.pow_to_pos_transition_heights(),
            Params::TESTNET.pow_to_pos_transition_heights()
        );
    }
}
