//! Folding an exact bignum value back into the nearest binary float.

use super::Status;
use crate::{
    bignum::{BigFloat, BigUInt, MAX_SHIFT},
    float::{BinaryFloat, FloatParts},
    options::ParseOptions,
    wide::ExtUInt,
};
use tracing::debug;

/// Significand buffer: the kept bits plus guard bits, and room to shift in
/// one more chunk.
type Accumulator = ExtUInt<3>;

/// Number of integral chunks kept in the accumulator. The lower ones only
/// matter through the sticky bit.
const KEPT_CHUNKS: usize = 5;

/// Number of fraction bits that can influence the rounding of a `F`: down
/// to two guard bits below its smallest subnormal.
pub(crate) fn fraction_bits<F: BinaryFloat>() -> i64 {
    i64::from(F::PRECISION) - 1 - i64::from(F::MIN_EXPONENT) + 2
}

pub(crate) fn overflow<F: BinaryFloat>(negative: bool) -> (FloatParts<F>, Status) {
    debug!(float = F::NAME, negative, "overflow to infinity");
    (FloatParts::infinity(negative), Status::Overflow)
}

fn underflow<F: BinaryFloat>(negative: bool) -> (FloatParts<F>, Status) {
    debug!(float = F::NAME, negative, "underflow to zero");
    (FloatParts::zero(negative), Status::Underflow)
}

/// Rounds `(int + frac + sticky) * 2^exp2` to a `F`.
///
/// - `sticky` tells that non-zero digits were dropped below `frac`.
/// - `limit` is the number of fraction bits worth extracting from `frac`.
pub(crate) fn fold<F: BinaryFloat>(
    negative: bool,
    mut int: BigUInt,
    mut frac: BigFloat,
    mut sticky: bool,
    exp2: i64,
    limit: i64,
    options: &ParseOptions,
) -> (FloatParts<F>, Status) {
    let precision = i64::from(F::PRECISION);
    let min_exponent = i64::from(F::MIN_EXPONENT);
    let max_exponent = i64::from(F::MAX_EXPONENT);
    let chunk = i64::from(MAX_SHIFT);

    // Integral bits, 28 at a time, lowest first.
    let mut chunks = Vec::new();
    while !int.is_zero() {
        if chunk * chunks.len() as i64 + exp2 > max_exponent + 1 {
            return overflow(negative);
        }
        chunks.push(int.div_pow2(MAX_SHIFT));
    }
    let dropped = chunks.len().saturating_sub(KEPT_CHUNKS);
    sticky |= chunks[..dropped].iter().any(|&c| c != 0);
    let mut acc = Accumulator::zero();
    for &c in chunks[dropped..].iter().rev() {
        acc.shl(MAX_SHIFT);
        acc.or_low(u64::from(c));
    }
    // weight of the lowest accumulated bit, before `exp2`
    let mut scale = chunk * dropped as i64;

    // Fraction bits, until there are enough for the precision and the
    // guard bits.
    let mut taken = 0;
    while i64::from(acc.bit_len()) < precision + 2 && taken < limit && !frac.is_zero() {
        let bits = (limit - taken).min(chunk) as u32;
        let top = frac.mul_pow2(bits);
        acc.shl(bits);
        acc.or_low(u64::from(top));
        scale -= i64::from(bits);
        taken += i64::from(bits);
    }
    sticky |= !frac.is_zero();

    let scale = if acc.is_zero() {
        -fraction_bits::<F>()
    } else {
        scale + exp2
    };
    let lead = i64::from(acc.bit_len()) - 1 + scale;
    let mut lsb = lead - (precision - 1);
    if options.subnormals {
        lsb = lsb.max(min_exponent - (precision - 1));
    }

    let shift = lsb - scale;
    let (first, rest) = if shift <= 0 {
        acc.shl((-shift) as u32);
        (false, sticky)
    } else {
        let shift = shift.min(i64::from(Accumulator::BITS) + 1) as u32;
        let first = acc.test_bit(shift - 1);
        let rest = !acc.is_zero_below(shift - 1) || sticky;
        acc.shr(shift);
        (first, rest)
    };
    let odd = acc.test_bit(0);
    if options.rounding.rounds_up(negative, odd, first as u32, 1, rest) {
        acc.add_u64(1);
        if i64::from(acc.bit_len()) > precision {
            acc.shr(1);
            lsb += 1;
        }
    }
    let mantissa = acc.low_u64();

    if mantissa == 0 {
        return underflow(negative);
    }
    let top = 63 - i64::from(mantissa.leading_zeros()) + lsb;
    if top > max_exponent {
        overflow(negative)
    } else if top < min_exponent && !options.subnormals {
        underflow(negative)
    } else {
        let parts = FloatParts::finite(negative, mantissa, lsb as i32);
        (parts, Status::Ok)
    }
}
