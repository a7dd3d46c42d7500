//! Shardbit node entry point.
//!
//! Selects the network from the command line, verifies and installs its
//! parameters, and optionally prints the active profile as JSON.

use clap::Parser;
use serde::Serialize;
use shardbit_common::{
    VERSION,
    shardbit::{
        base58::Base58Type,
        chainparams::{ChainParams, DnsSeedData, ParamsRegistry},
        network::Network,
    },
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt::time::ChronoUtc};

/// Command line arguments for the node.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run against the test network instead of mainnet
    #[arg(long)]
    testnet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the active network parameters as JSON and exit
    #[arg(long)]
    print_params: bool,
}

/// Initializes tracing with the specified log level.
fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoUtc::rfc_3339())
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Logging initialized with level: {}", args.log_level);
}

/// One base58 prefix, hex encoded.
#[derive(Debug, Serialize)]
struct PrefixReport {
    kind: Base58Type,
    prefix: String,
}

/// The externally visible parts of a network profile.
#[derive(Debug, Serialize)]
struct ParamsReport<'a> {
    network: Network,
    magic: String,
    p2p_port: u16,
    rpc_port: u16,
    data_dir: Option<&'static str>,
    genesis_hash: String,
    genesis_hasher: String,
    network_genesis_hash: String,
    genesis_merkle_root: String,
    genesis_time: u32,
    genesis_nonce: u32,
    pow_limit: String,
    pow_limit_bits: String,
    last_pow_block: u32,
    pos_start_block: u32,
    alert_pubkey: String,
    base58_prefixes: Vec<PrefixReport>,
    dns_seeds: &'a [DnsSeedData],
    fixed_seeds: Vec<String>,
    pool_max_transactions: u32,
    pool_dummy_address: &'static str,
}

impl<'a> From<&'a ChainParams> for ParamsReport<'a> {
    fn from(params: &'a ChainParams) -> Self {
        let header = params.genesis_block().header();
        let (last_pow_block, pos_start_block) = params.pow_to_pos_transition_heights();

        ParamsReport {
            network: params.network_id(),
            magic: params.magic().to_string(),
            p2p_port: params.default_port(),
            rpc_port: params.rpc_port(),
            data_dir: params.data_dir(),
            genesis_hash: params.genesis_hash().to_string(),
            genesis_hasher: params.genesis_hasher().to_string(),
            network_genesis_hash: params.network_genesis_hash().to_string(),
            genesis_merkle_root: header.merkle_root().to_string(),
            genesis_time: header.timestamp(),
            genesis_nonce: header.nonce(),
            pow_limit: params.pow_limit().to_string(),
            pow_limit_bits: format!("{:08x}", header.bits().to_consensus()),
            last_pow_block,
            pos_start_block,
            alert_pubkey: hex::encode(params.alert_pubkey()),
            base58_prefixes: Base58Type::ALL
                .into_iter()
                .map(|kind| PrefixReport {
                    kind,
                    prefix: hex::encode(params.base58_prefix(kind)),
                })
                .collect(),
            dns_seeds: params.dns_seeds(),
            fixed_seeds: params
                .fixed_seeds()
                .iter()
                .map(|seed| seed.addr.to_string())
                .collect(),
            pool_max_transactions: params.pool_max_transactions(),
            pool_dummy_address: params.pool_dummy_address(),
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = ParamsRegistry::new()?;
    registry.select_from_flag(args.testnet);
    let registry = registry.install()?;
    let params = registry.active();

    let (p2p_port, rpc_port) = params.default_ports();
    info!(
        "Using {} network: magic {}, p2p port {}, rpc port {}",
        params.network_id(),
        params.magic(),
        p2p_port,
        rpc_port
    );
    info!(
        "Genesis block {} verified with {} hash (network genesis {})",
        params.genesis_hash(),
        params.genesis_hasher(),
        params.network_genesis_hash()
    );
    info!(
        "{} DNS seeds, {} fixed seeds",
        params.dns_seeds().len(),
        params.fixed_seeds().len()
    );

    if args.print_params {
        let report = ParamsReport::from(params);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(&args);
    info!("shardbitd {}", VERSION);

    if let Err(e) = run(&args) {
        error!("Failed to load chain parameters: {}", e);
        std::process::exit(1);
    }
}
