//! Uniform derivation from raw generator output.
//!
//! Every generator emits raw values of a fixed native width (32, 53 or 64
//! bits). This module turns such a stream into
//!
//! - unbiased integers in `[0, max)` by exact rejection sampling, and
//! - doubles in `[0, 1)` carrying exactly 53 random mantissa bits.
//!
//! The functions take the draw as a closure so the same code serves every
//! generator, including user-supplied ones.

/// Number of mantissa bits in an IEEE-754 double (including the implicit one).
pub const MANTISSA_BITS: u32 = 53;

/// Mask selecting the low 53 bits of a raw draw.
pub const MANTISSA_MASK: u64 = (1 << MANTISSA_BITS) - 1;

/// `2^-53`: scales a 53-bit integer into `[0, 1)`.
pub const FLOAT_SCALE: f64 = 1.0 / (1u64 << MANTISSA_BITS) as f64;

/// Hard cap on rejected draws in [`bounded`].
///
/// A healthy generator rejects with probability below 1/2 per draw, so the
/// cap is only ever reached by a stream stuck on a single value.
pub const MAX_REJECTIONS: u32 = 1024;

/// All-ones mask for a `width`-bit value.
#[inline]
pub fn width_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

fn compose<F: FnMut() -> u64>(width: u32, draws: u32, draw: &mut F) -> u128 {
    let mask = width_mask(width);
    (0..draws).fold(0u128, |acc, _| (acc << width) | u128::from(draw() & mask))
}

/// Unbiased integer in `[0, max)` from a stream of `width`-bit draws.
///
/// When `2^width < max`, the smallest number of consecutive draws whose
/// concatenation covers `max` is combined into one value, so the full native
/// width of every draw is used. With `bits` the total width,
/// `limit = floor(2^bits / max) * max`; candidates `>= limit` are discarded.
///
/// `max` must be nonzero and `width` in `1..=64`; callers validate.
pub fn bounded<F: FnMut() -> u64>(max: u64, width: u32, mut draw: F) -> u64 {
    debug_assert!(max > 0, "bounded() requires max > 0");
    debug_assert!((1..=64).contains(&width), "width out of range: {width}");

    let max = u128::from(max);
    let mut draws = 1u32;
    while (1u128 << (width * draws)) < max {
        draws += 1;
    }
    let space = 1u128 << (width * draws);
    let limit = space / max * max;

    let mut candidate = 0u128;
    for _ in 0..MAX_REJECTIONS {
        candidate = compose(width, draws, &mut draw);
        if candidate < limit {
            return (candidate % max) as u64;
        }
    }
    log::warn!(
        "rejection sampling gave up after {MAX_REJECTIONS} draws (max={max}, width={width}); \
         the generator output looks stuck"
    );
    (candidate % max) as u64
}

/// Double in `[0, 1)` built from exactly 53 random bits.
///
/// - `width >= 53`: the low 53 bits of one draw.
/// - `27 <= width < 53`: two draws, `a` = top 27 bits and `b` = top 26 bits,
///   combined as `(a * 2^26 + b) * 2^-53` (the MT19937 `genrand_res53` rule).
/// - narrower widths: draws are concatenated until 53 bits are available and
///   the top 53 are used.
pub fn unit_float<F: FnMut() -> u64>(width: u32, mut draw: F) -> f64 {
    debug_assert!((1..=64).contains(&width), "width out of range: {width}");

    if width >= MANTISSA_BITS {
        return (draw() & MANTISSA_MASK) as f64 * FLOAT_SCALE;
    }
    if width >= 27 {
        let mask = width_mask(width);
        let a = (draw() & mask) >> (width - 27);
        let b = (draw() & mask) >> (width - 26);
        return (a as f64 * 67_108_864.0 + b as f64) * FLOAT_SCALE;
    }

    let mask = width_mask(width);
    let mut acc = 0u128;
    let mut bits = 0u32;
    while bits < MANTISSA_BITS {
        acc = (acc << width) | u128::from(draw() & mask);
        bits += width;
    }
    ((acc >> (bits - MANTISSA_BITS)) as u64) as f64 * FLOAT_SCALE
}
