//! Proof of work targets.
//!
//! A [`Target`] is the 256-bit threshold a block hash must not exceed. The
//! lower the target, the higher the difficulty. [`CompactTarget`] is the
//! 32-bit encoding of a target carried in block headers (`nBits`).

use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Represents a target value expressed as an unsigned 256-bit integer.
///
/// # Example
///
/// ```
/// use shardbit_common::shardbit::pow::Target;
///
/// let limit = Target::POW_LIMIT;
/// assert_eq!(limit.to_compact().map(|c| c.to_consensus()), Some(0x1f00ffff));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Target(U256);

impl Target {
    /// The loosest target a Shardbit header may declare, `~0 >> 16`.
    ///
    /// Both networks start from this limit, which makes the initial
    /// difficulty one in 2^16 hashes.
    pub const POW_LIMIT: Self = Self(U256([
        u64::MAX,
        u64::MAX,
        u64::MAX,
        u64::MAX >> 16,
    ]));

    /// Returns the big-endian byte representation of the target.
    pub fn to_bytes(self) -> [u8; 32] {
        self.0.to_big_endian()
    }

    /// Converts a compact target representation into a Target instance.
    ///
    /// The compact format stores a 1-byte exponent and a 3-byte mantissa;
    /// the target is `mantissa * 256^(exponent - 3)`.
    ///
    /// # Returns
    ///
    /// * `Some(Target)` - The parsed target value if valid
    /// * `None` - If the mantissa has its sign bit set, is zero, or the
    ///   exponent does not fit a 256-bit value
    pub fn from_compact(compact: CompactTarget) -> Option<Self> {
        let n = compact.0;
        let exponent = n >> 24;
        let mantissa = n & 0x007fffff;

        if n & 0x00800000 != 0 {
            return None; // Negative targets are not valid
        }

        if mantissa == 0 {
            return None;
        }

        if exponent > 32 {
            return None;
        }

        let base = U256::from(mantissa);

        #[allow(clippy::arithmetic_side_effects, reason = "Checked U256 shift handle overflows")]
        let target = if exponent <= 3 {
            let shift_bits = 3u32.checked_sub(exponent)?.checked_mul(8)?;
            base >> shift_bits
        } else {
            let shift_bits = exponent.checked_sub(3)?.checked_mul(8)?;
            if shift_bits >= 256 {
                return None;
            }
            base << shift_bits
        };

        Some(Target(target))
    }

    /// Converts a target value into its compact representation.
    ///
    /// Mirrors the reference `GetCompact`: the most significant three bytes
    /// become the mantissa, and when the mantissa's high bit would be set it
    /// is shifted down a byte and the exponent grows by one.
    pub fn to_compact(self) -> Option<CompactTarget> {
        if self.0.is_zero() {
            return Some(CompactTarget(0));
        }

        let bit_length = u32::try_from(self.0.bits()).ok()?;
        let size = bit_length.checked_add(7)?.checked_div(8)?;

        let mantissa = if size <= 3 {
            let shift_bits = 3u32.checked_sub(size)?.checked_mul(8)?;
            self.0.low_u32().checked_shl(shift_bits)? & 0x00ffffff
        } else {
            let shift_bits = size.checked_sub(3)?.checked_mul(8)?;

            #[allow(
                clippy::arithmetic_side_effects,
                reason = "Shift is below 256 for any 256-bit value"
            )]
            let shifted = self.0 >> shift_bits;

            shifted.low_u32() & 0x00ffffff
        };

        let (mantissa, size) = if mantissa & 0x00800000 != 0 {
            (mantissa.checked_shr(8)?, size.checked_add(1)?)
        } else {
            (mantissa, size)
        };

        let compact = size.checked_shl(24)?.checked_add(mantissa)?;
        Some(CompactTarget(compact))
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

/// Compact representation of a Target, as used in block headers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompactTarget(u32);

impl CompactTarget {
    /// Wraps a raw `nBits` value.
    pub fn new(target: u32) -> Self {
        CompactTarget(target)
    }

    /// Returns the raw `nBits` value.
    pub fn to_consensus(self) -> u32 {
        self.0
    }
}

impl From<CompactTarget> for bitcoin::CompactTarget {
    fn from(compact: CompactTarget) -> Self {
        bitcoin::CompactTarget::from_consensus(compact.0)
    }
}
