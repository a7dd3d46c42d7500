//! Fixed seed conversion.
//!
//! Hardcoded seeds are handed out with a random "last seen" time between one
//! and two weeks in the past. A node connects to one or two of them, receives
//! a pile of addresses with newer timestamps and prefers those from then on.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use bitcoin::p2p::{Address, ServiceFlags};
use chrono::Utc;
use rand::{Rng, rngs::ThreadRng};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One week, in seconds.
pub const ONE_WEEK: i64 = 7 * 24 * 60 * 60;

/// A bootstrap peer together with the time it was presented as last seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeedAddress {
    /// The peer's socket address.
    pub addr: SocketAddr,
    /// Unix time the peer is reported as last seen.
    pub last_seen: i64,
}

impl SeedAddress {
    /// Returns the wire form of this address, advertising `NODE_NETWORK`.
    pub fn to_p2p_address(&self) -> Address {
        Address::new(&self.addr, ServiceFlags::NETWORK)
    }

    /// Returns the IP part of the address.
    pub fn ip(&self) -> IpAddr {
        self.addr.ip()
    }
}

/// Turns hardcoded seed tables into [`SeedAddress`] records.
///
/// The clock value and random source are injected so that a seeded RNG and a
/// fixed `now` reproduce the same list.
#[derive(Debug)]
pub struct SeedConverter<R> {
    now: i64,
    rng: R,
}

impl SeedConverter<ThreadRng> {
    /// Creates a converter reading the wall clock and the thread-local RNG.
    pub fn from_clock() -> Self {
        Self::new(Utc::now().timestamp(), rand::rng())
    }
}

impl<R: Rng> SeedConverter<R> {
    /// Creates a converter with an explicit clock value and random source.
    pub fn new(now: i64, rng: R) -> Self {
        Self { now, rng }
    }

    /// Converts packed IPv4 literals into peer addresses on `port`.
    ///
    /// Each literal holds the four octets in big-endian order, so
    /// `0x2d4c02e7` is `45.76.2.231`.
    pub fn convert_packed(&mut self, packed: &[u32], port: u16) -> Vec<SeedAddress> {
        packed
            .iter()
            .map(|&word| {
                let ip = Ipv4Addr::from(word.to_be_bytes());
                self.timestamped(SocketAddr::new(IpAddr::V4(ip), port))
            })
            .collect()
    }

    /// Converts dotted-decimal host strings into peer addresses on `port`.
    ///
    /// Entries that are not IP literals are skipped.
    pub fn convert_hosts(&mut self, hosts: &[&str], port: u16) -> Vec<SeedAddress> {
        hosts
            .iter()
            .filter_map(|host| match host.parse::<IpAddr>() {
                Ok(ip) => Some(self.timestamped(SocketAddr::new(ip, port))),
                Err(e) => {
                    warn!("Skipping malformed seed host {}: {}", host, e);
                    None
                }
            })
            .collect()
    }

    /// Draws a last-seen time in `[now - 2 weeks, now - 1 week)`.
    fn last_seen(&mut self) -> i64 {
        let jitter = self.rng.random_range(0..ONE_WEEK);
        self.now
            .saturating_sub(ONE_WEEK.saturating_mul(2))
            .saturating_add(jitter)
    }

    fn timestamped(&mut self, addr: SocketAddr) -> SeedAddress {
        SeedAddress {
            addr,
            last_seen: self.last_seen(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn converter(seed: u64) -> SeedConverter<StdRng> {
        SeedConverter::new(NOW, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_packed_literal_decodes_to_dotted_ip() {
        let seeds = converter(1).convert_packed(&[0x2d4c02e7], 37451);
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].ip(), "45.76.2.231".parse::<IpAddr>().unwrap());
        assert_eq!(seeds[0].addr.port(), 37451);
    }

    #[test]
    fn test_timestamps_within_window() {
        let packed: Vec<u32> = (0..500).map(|i| 0x0a000000 | i).collect();
        let seeds = converter(7).convert_packed(&packed, 37451);
        assert_eq!(seeds.len(), 500);
        for seed in seeds {
            assert!(seed.last_seen >= NOW - 2 * ONE_WEEK);
            assert!(seed.last_seen < NOW - ONE_WEEK);
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let hosts = ["45.76.2.231", "207.148.31.219", "45.63.20.238"];
        let first = converter(42).convert_hosts(&hosts, 37451);
        let second = converter(42).convert_hosts(&hosts, 37451);
        assert_eq!(first, second);
    }

    #[test]
    fn test_hosts_keep_order_and_skip_garbage() {
        let seeds = converter(3).convert_hosts(&["207.148.22.146", "not-an-ip", "45.63.20.238"], 1);
        let ips: Vec<String> = seeds.iter().map(|s| s.ip().to_string()).collect();
        assert_eq!(ips, vec!["207.148.22.146", "45.63.20.238"]);
    }

    #[test]
    fn test_packed_and_hosts_agree() {
        let mut conv = converter(9);
        let packed = conv.convert_packed(&[0xcf941fdb], 37451);
        let hosts = conv.convert_hosts(&["207.148.31.219"], 37451);
        assert_eq!(packed[0].addr, hosts[0].addr);
    }

    #[test]
    fn test_p2p_address_advertises_network_service() {
        let seeds = converter(5).convert_packed(&[0x2d4c02e7], 37451);
        let address = seeds[0].to_p2p_address();
        assert_eq!(address.services, ServiceFlags::NETWORK);
        assert_eq!(address.port, 37451);
    }
}
