#![allow(clippy::unwrap_used)]

use shardbit_common::shardbit::{
    chainparams::{ChainParamsError, ParamsRegistry, installed, params},
    network::Network,
};

#[test]
fn test_installed_registry_is_served_globally() {
    let mut registry = ParamsRegistry::new().unwrap();
    registry.select_from_flag(true);
    let installed_registry = registry.install().unwrap();

    assert_eq!(installed_registry.active_network_id(), Network::Testnet);
    assert!(std::ptr::eq(installed().unwrap(), installed_registry));
    assert_eq!(params().network_id(), Network::Testnet);
    assert_eq!(params().default_ports(), (47451, 47452));

    let second = ParamsRegistry::new().unwrap();
    assert!(matches!(
        second.install(),
        Err(ChainParamsError::AlreadyInstalled)
    ));
    assert_eq!(params().network_id(), Network::Testnet);
}
