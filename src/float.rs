//! Binary floating-point formats, seen as bit patterns.
//!
//! f32 representation :
//!
//! sign - exponent - fraction
//! 1    - 8        - 23
//!
//! f64 representation :
//!
//! sign - exponent - fraction
//! 1    - 11       - 52
//!
//! x87 extended representation ([`F80`]) :
//!
//! sign - exponent - integer bit - fraction
//! 1    - 15       - 1           - 63

use std::{fmt::Debug, marker::PhantomData};

/// A binary interchange format.
///
/// The layout is described by the widths of its fields; everything else
/// (bias, exponent range, precision) is derived from them.
pub trait BinaryFloat: Copy + Debug + PartialEq {
    /// Width of the exponent field.
    const EXPONENT_BITS: u32;
    /// Number of fraction bits, *excluding* the integer bit.
    const FRACTION_BITS: u32;
    /// Whether the integer bit is stored (x87) or implicit (IEEE).
    const EXPLICIT_INTEGER_BIT: bool;
    /// Name used in diagnostics.
    const NAME: &'static str;

    const BIAS: i32 = (1 << (Self::EXPONENT_BITS - 1)) - 1;
    /// Significant bits of a normal value.
    const PRECISION: u32 = Self::FRACTION_BITS + 1;
    /// Exponent of the largest finite value.
    const MAX_EXPONENT: i32 = Self::BIAS;
    /// Exponent of the smallest normal value.
    const MIN_EXPONENT: i32 = 1 - Self::BIAS;

    /// The bit pattern, in the low bits of a `u128`.
    fn to_raw(self) -> u128;

    /// Performs a raw transmutation from a bit pattern.
    fn from_raw(raw: u128) -> Self;
}

impl BinaryFloat for f32 {
    const EXPONENT_BITS: u32 = 8;
    const FRACTION_BITS: u32 = 23;
    const EXPLICIT_INTEGER_BIT: bool = false;
    const NAME: &'static str = "f32";

    fn to_raw(self) -> u128 {
        u128::from(self.to_bits())
    }

    fn from_raw(raw: u128) -> Self {
        f32::from_bits(raw as u32)
    }
}

impl BinaryFloat for f64 {
    const EXPONENT_BITS: u32 = 11;
    const FRACTION_BITS: u32 = 52;
    const EXPLICIT_INTEGER_BIT: bool = false;
    const NAME: &'static str = "f64";

    fn to_raw(self) -> u128 {
        u128::from(self.to_bits())
    }

    fn from_raw(raw: u128) -> Self {
        f64::from_bits(raw as u64)
    }
}

/// x87 80-bit extended precision value.
///
/// Rust has no native type for it, so this only carries the bit pattern;
/// comparisons are bitwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct F80 {
    bits: u128,
}

impl F80 {
    const MASK: u128 = (1 << 80) - 1;

    pub const fn from_bits(bits: u128) -> Self {
        Self {
            bits: bits & Self::MASK,
        }
    }

    pub const fn to_bits(self) -> u128 {
        self.bits
    }

    /// Widens a `f64`. This is exact, including for subnormals and NaN
    /// payloads.
    pub fn from_f64(value: f64) -> Self {
        let parts = FloatParts::decompose(value);
        let negative = parts.negative;
        let extended = match parts.category() {
            Category::Zero => FloatParts::<F80>::zero(negative),
            Category::Infinite => FloatParts::infinity(negative),
            Category::Nan(_) => FloatParts::new(
                negative,
                FloatParts::<F80>::MAX_BIASED,
                1 << 63 | parts.significand << 11,
            ),
            Category::Subnormal | Category::Normal => {
                let (mantissa, exp2) = parts.exact();
                let shift = mantissa.leading_zeros();
                let exponent = exp2 - shift as i32 + 63 + Self::BIAS;
                FloatParts::new(negative, exponent as u32, mantissa << shift)
            }
        };
        extended.compose()
    }

    pub fn is_nan(self) -> bool {
        matches!(FloatParts::decompose(self).category(), Category::Nan(_))
    }

    pub fn is_sign_negative(self) -> bool {
        FloatParts::decompose(self).negative
    }
}

impl BinaryFloat for F80 {
    const EXPONENT_BITS: u32 = 15;
    const FRACTION_BITS: u32 = 63;
    const EXPLICIT_INTEGER_BIT: bool = true;
    const NAME: &'static str = "f80";

    fn to_raw(self) -> u128 {
        self.bits
    }

    fn from_raw(raw: u128) -> Self {
        Self::from_bits(raw)
    }
}

/// Flavours of NaN, as shown in text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NanKind {
    Quiet,
    /// Negative quiet NaN with an empty payload: the "indefinite" value
    /// produced by invalid x87/SSE operations.
    Indeterminate,
    Signaling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Zero,
    Subnormal,
    Normal,
    Infinite,
    Nan(NanKind),
}

/// Sign, biased exponent and significand field of a `F`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatParts<F> {
    pub negative: bool,
    /// Biased exponent field.
    pub exponent: u32,
    /// Significand field: the fraction bits, plus the integer bit for formats
    /// that store it.
    pub significand: u64,
    marker: PhantomData<F>,
}

impl<F: BinaryFloat> FloatParts<F> {
    /// All ones: infinities and NaNs.
    pub const MAX_BIASED: u32 = (1 << F::EXPONENT_BITS) - 1;
    const FRACTION_MASK: u64 = (1 << F::FRACTION_BITS) - 1;
    const QUIET_BIT: u64 = 1 << (F::FRACTION_BITS - 1);
    const INTEGER_BIT: u64 = 1 << F::FRACTION_BITS;
    /// Width of the significand field.
    const FIELD_BITS: u32 = F::FRACTION_BITS + F::EXPLICIT_INTEGER_BIT as u32;

    pub const fn new(negative: bool, exponent: u32, significand: u64) -> Self {
        Self {
            negative,
            exponent,
            significand,
            marker: PhantomData,
        }
    }

    /// Extracts the fields of `value`.
    pub fn decompose(value: F) -> Self {
        let raw = value.to_raw();
        let field_mask = (1u128 << Self::FIELD_BITS) - 1;
        let exponent_mask = (1u128 << F::EXPONENT_BITS) - 1;
        Self::new(
            raw >> (Self::FIELD_BITS + F::EXPONENT_BITS) & 1 == 1,
            (raw >> Self::FIELD_BITS & exponent_mask) as u32,
            (raw & field_mask) as u64,
        )
    }

    /// Reassembles the bit pattern.
    pub fn compose(self) -> F {
        let raw = u128::from(self.negative) << (Self::FIELD_BITS + F::EXPONENT_BITS)
            | u128::from(self.exponent) << Self::FIELD_BITS
            | u128::from(self.significand);
        F::from_raw(raw)
    }

    /// The integer bit, where the format stores one.
    fn integer_bit(exponent: u32) -> u64 {
        if F::EXPLICIT_INTEGER_BIT && exponent != 0 {
            Self::INTEGER_BIT
        } else {
            0
        }
    }

    pub fn zero(negative: bool) -> Self {
        Self::new(negative, 0, 0)
    }

    pub fn infinity(negative: bool) -> Self {
        Self::new(negative, Self::MAX_BIASED, Self::integer_bit(Self::MAX_BIASED))
    }

    /// A NaN with an empty payload (quiet), or a payload of one (signaling).
    pub fn nan(negative: bool, signaling: bool) -> Self {
        let fraction = if signaling { 1 } else { Self::QUIET_BIT };
        Self::new(
            negative,
            Self::MAX_BIASED,
            Self::integer_bit(Self::MAX_BIASED) | fraction,
        )
    }

    /// Encodes a finite value `mantissa * 2^(lsb)`, where `mantissa` has
    /// exactly `PRECISION` bits for normal values, or fewer with
    /// `lsb == MIN_EXPONENT - FRACTION_BITS` for subnormals.
    pub(crate) fn finite(negative: bool, mantissa: u64, lsb: i32) -> Self {
        let top = 63 - mantissa.leading_zeros() as i32 + lsb;
        if mantissa == 0 {
            Self::zero(negative)
        } else if top < F::MIN_EXPONENT {
            Self::new(negative, 0, mantissa)
        } else {
            let exponent = (top + F::BIAS) as u32;
            let fraction = mantissa & Self::FRACTION_MASK;
            Self::new(negative, exponent, Self::integer_bit(exponent) | fraction)
        }
    }

    fn fraction(&self) -> u64 {
        self.significand & Self::FRACTION_MASK
    }

    pub fn category(&self) -> Category {
        match (self.exponent, self.fraction()) {
            (0, _) if self.significand == 0 => Category::Zero,
            (0, _) => Category::Subnormal,
            (e, 0) if e == Self::MAX_BIASED => Category::Infinite,
            (e, fraction) if e == Self::MAX_BIASED => Category::Nan(
                if fraction & Self::QUIET_BIT == 0 {
                    NanKind::Signaling
                } else if self.negative && fraction == Self::QUIET_BIT {
                    NanKind::Indeterminate
                } else {
                    NanKind::Quiet
                },
            ),
            _ => Category::Normal,
        }
    }

    /// Returns `(mantissa, exp2)` such that the magnitude of a finite value
    /// is exactly `mantissa * 2^exp2`.
    pub fn exact(&self) -> (u64, i32) {
        if self.exponent == 0 {
            (self.significand, F::MIN_EXPONENT - F::FRACTION_BITS as i32)
        } else {
            (
                self.fraction() | Self::INTEGER_BIT,
                self.exponent as i32 - F::BIAS - F::FRACTION_BITS as i32,
            )
        }
    }
}
