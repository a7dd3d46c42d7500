//! Base58 address prefixes.
//!
//! Every encoded key or address starts with a version prefix that names its
//! kind and its network. Decoding checks the prefix before handing back the
//! payload, so a testnet address is never accepted on mainnet.

use bitcoin::base58;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kinds of base58-encoded data a network assigns a prefix to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Base58Type {
    /// Pay-to-public-key-hash address.
    PubkeyAddress,
    /// Pay-to-script-hash address.
    ScriptAddress,
    /// Private key in wallet import format.
    SecretKey,
    /// Stealth address.
    StealthAddress,
    /// BIP32 extended public key.
    ExtPublicKey,
    /// BIP32 extended private key.
    ExtSecretKey,
}

impl Base58Type {
    /// Every prefix kind.
    pub const ALL: [Base58Type; 6] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
        Base58Type::StealthAddress,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
    ];
}

/// Errors from address encoding helpers.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The string is not valid base58check.
    #[error("invalid base58check data: {0}")]
    Base58(#[from] base58::Error),
    /// The decoded data does not start with the expected prefix.
    #[error("prefix does not match {0:?}")]
    WrongPrefix(Base58Type),
}

/// The base58 prefixes of one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Base58Prefixes {
    pubkey_address: &'static [u8],
    script_address: &'static [u8],
    secret_key: &'static [u8],
    stealth_address: &'static [u8],
    ext_public_key: &'static [u8],
    ext_secret_key: &'static [u8],
}

impl Base58Prefixes {
    /// Mainnet prefixes. Public key addresses start with `S`.
    pub const MAINNET: Self = Self {
        pubkey_address: &[63],
        script_address: &[21],
        secret_key: &[23],
        stealth_address: &[41],
        ext_public_key: &[0x99, 0x75, 0x45, 0xe2],
        ext_secret_key: &[0x99, 0x73, 0x43, 0xe3],
    };

    /// Testnet prefixes. Public key addresses start with `b`.
    pub const TESTNET: Self = Self {
        pubkey_address: &[85],
        script_address: &[23],
        secret_key: &[25],
        stealth_address: &[43],
        ext_public_key: &[0x98, 0x74, 0x44, 0xe1],
        ext_secret_key: &[0x98, 0x72, 0x42, 0xe2],
    };

    /// Returns the prefix for `kind`.
    pub fn get(&self, kind: Base58Type) -> &'static [u8] {
        match kind {
            Base58Type::PubkeyAddress => self.pubkey_address,
            Base58Type::ScriptAddress => self.script_address,
            Base58Type::SecretKey => self.secret_key,
            Base58Type::StealthAddress => self.stealth_address,
            Base58Type::ExtPublicKey => self.ext_public_key,
            Base58Type::ExtSecretKey => self.ext_secret_key,
        }
    }

    /// Prepends the prefix for `kind` to `payload` and base58check-encodes it.
    pub fn encode(&self, kind: Base58Type, payload: &[u8]) -> String {
        let mut data = Vec::with_capacity(self.get(kind).len().saturating_add(payload.len()));
        data.extend_from_slice(self.get(kind));
        data.extend_from_slice(payload);
        base58::encode_check(&data)
    }

    /// Decodes base58check data and strips the prefix for `kind`.
    pub fn decode(&self, kind: Base58Type, encoded: &str) -> Result<Vec<u8>, AddressError> {
        let data = base58::decode_check(encoded)?;
        data.strip_prefix(self.get(kind))
            .map(<[u8]>::to_vec)
            .ok_or(AddressError::WrongPrefix(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unambiguous(prefixes: &Base58Prefixes) {
        for a in Base58Type::ALL {
            for b in Base58Type::ALL {
                if a != b {
                    assert!(
                        !prefixes.get(a).starts_with(prefixes.get(b)),
                        "{a:?} collides with {b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_prefixes_unambiguous_within_network() {
        assert_unambiguous(&Base58Prefixes::MAINNET);
        assert_unambiguous(&Base58Prefixes::TESTNET);
    }

    #[test]
    fn test_prefixes_differ_between_networks() {
        for kind in Base58Type::ALL {
            assert_ne!(
                Base58Prefixes::MAINNET.get(kind),
                Base58Prefixes::TESTNET.get(kind),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn test_pubkey_address_leading_character() {
        let payload = [0u8; 20];
        assert!(Base58Prefixes::MAINNET
            .encode(Base58Type::PubkeyAddress, &payload)
            .starts_with('S'));
        assert!(Base58Prefixes::TESTNET
            .encode(Base58Type::PubkeyAddress, &payload)
            .starts_with('b'));
    }

    #[test]
    fn test_decode_strips_prefix() {
        let payload = [7u8; 20];
        let encoded = Base58Prefixes::MAINNET.encode(Base58Type::ScriptAddress, &payload);
        let decoded = Base58Prefixes::MAINNET
            .decode(Base58Type::ScriptAddress, &encoded)
            .unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_cross_network_decode_rejected() {
        let payload = [1u8; 20];
        let encoded = Base58Prefixes::TESTNET.encode(Base58Type::PubkeyAddress, &payload);
        let err = Base58Prefixes::MAINNET
            .decode(Base58Type::PubkeyAddress, &encoded)
            .unwrap_err();
        assert!(matches!(err, AddressError::WrongPrefix(Base58Type::PubkeyAddress)));
    }

    #[test]
    fn test_corrupt_checksum_rejected() {
        let mut encoded = Base58Prefixes::MAINNET.encode(Base58Type::SecretKey, &[3u8; 32]);
        let last = encoded.pop().unwrap();
        encoded.push(if last == '1' { '2' } else { '1' });
        assert!(matches!(
            Base58Prefixes::MAINNET.decode(Base58Type::SecretKey, &encoded),
            Err(AddressError::Base58(_))
        ));
    }
}
