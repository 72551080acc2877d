//! Centralized seed conditioning.
//!
//! **ALL** bit mixing applied to raw entropy or user-provided seed material
//! lives here. Sources produce raw 64-bit readings; the mixer and the seed
//! sequence route every transformation through this module so there is one
//! auditable place where seeds are shaped.
//!
//! # Architecture
//!
//! ```text
//! Sources → XOR fold → avalanche() → nonzero() → seed
//! Text    → djb2_xor() ─────────────────────────→ seed
//! ```

// ---------------------------------------------------------------------------
// Avalanche finalizers
// ---------------------------------------------------------------------------

/// Multiplier of the Murmur3 `fmix64` first round.
pub const FMIX_MULTIPLIER: u64 = 0xFF51_AFD7_ED55_8CCD;

/// Golden-ratio increment used by SplitMix64.
pub const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Multiplier of the SplitMix64 mixing round.
pub const SPLITMIX_MULTIPLIER: u64 = 0xBF58_476D_1CE4_E5B9;

/// Single-round avalanche: xor-shift-33 then multiply by [`FMIX_MULTIPLIER`].
///
/// This is the finalizer applied to the XOR of all entropy readings. It is
/// not a bijection onto nonzero values, so callers that need a usable seed
/// pass the result through [`nonzero`].
#[inline]
pub fn avalanche(x: u64) -> u64 {
    let x = x ^ (x >> 33);
    x.wrapping_mul(FMIX_MULTIPLIER)
}

/// SplitMix64 output function applied to an already-advanced state.
///
/// Shared by [`crate::generators::SplitMix64`] and the seed sequence so both
/// derive identical values from identical inputs.
#[inline]
pub fn splitmix_mix(z: u64) -> u64 {
    let z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX_MULTIPLIER);
    z ^ (z >> 27)
}

/// Map the degenerate all-zero seed to 1.
#[inline]
pub fn nonzero(x: u64) -> u64 {
    if x == 0 { 1 } else { x }
}

// ---------------------------------------------------------------------------
// Byte folding
// ---------------------------------------------------------------------------

/// Fold an arbitrary number of bytes into a `u64`, big-endian.
///
/// The first eight bytes are packed exactly (`[0x01, 0x02]` → `0x0102`);
/// further bytes rotate the accumulator left by one byte and XOR in, so no
/// input byte is discarded.
pub fn fold_bytes(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, &b| acc.rotate_left(8) ^ u64::from(b))
}

// ---------------------------------------------------------------------------
// String hashing
// ---------------------------------------------------------------------------

/// DJB2-xor hash of a string, reduced to 32 bits.
///
/// `h = 5381; h = (h * 33) ^ byte` over the UTF-8 bytes, computed in 64-bit
/// wrapping arithmetic and masked to the low 32 bits at the end.
pub fn djb2_xor(text: &str) -> u64 {
    let hash = text.bytes().fold(5381u64, |h, b| {
        (h << 5).wrapping_add(h) ^ u64::from(b)
    });
    hash & 0xFFFF_FFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avalanche_of_zero_is_zero() {
        // Zero is the only fixed point; nonzero() exists for this case.
        assert_eq!(avalanche(0), 0);
        assert_eq!(nonzero(avalanche(0)), 1);
    }

    #[test]
    fn avalanche_flips_many_bits() {
        let a = avalanche(0x1234_5678);
        let b = avalanche(0x1234_5679);
        let flipped = (a ^ b).count_ones();
        assert!(flipped >= 16, "only {flipped} bits changed");
    }

    #[test]
    fn nonzero_passes_other_values() {
        assert_eq!(nonzero(7), 7);
        assert_eq!(nonzero(u64::MAX), u64::MAX);
    }

    #[test]
    fn fold_bytes_packs_short_input() {
        assert_eq!(fold_bytes(&[]), 0);
        assert_eq!(fold_bytes(&[0x01, 0x02]), 0x0102);
        assert_eq!(
            fold_bytes(&[1, 2, 3, 4, 5, 6, 7, 8]),
            0x0102_0304_0506_0708
        );
    }

    #[test]
    fn fold_bytes_keeps_long_input() {
        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        a[0] = 1;
        b[0] = 2;
        assert_ne!(fold_bytes(&a), fold_bytes(&b));
    }

    #[test]
    fn djb2_known_values() {
        assert_eq!(djb2_xor(""), 5381);
        // 5381 * 33 ^ 'a'(97) = 177573 ^ 97 = 177604
        assert_eq!(djb2_xor("a"), 177_604);
    }

    #[test]
    fn djb2_is_32_bit() {
        let h = djb2_xor("a fairly long string that overflows thirty-two bits");
        assert!(h <= u64::from(u32::MAX));
    }
}
