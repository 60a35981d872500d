//! Float to text.
//!
//! The float is first expanded into its exact value, an integral
//! [`BigUInt`] and a fractional [`BigFloat`] whose digits are those of the
//! output base. Rounding then happens on the digits themselves, so every
//! printed digit is correct, whatever the precision.

mod format;


use crate::{
    bignum::{digit_char, BigFloat, BigUInt, Radix, MAX_SHIFT},
    error::BufferTooSmall,
    float::{BinaryFloat, Category, FloatParts},
    options::{FormatOptions, Layout, Notation, RoundingMode},
};
use format::{Digits, Formatted};
use std::convert::TryFrom;
use tracing::{debug, trace};

/// Furthest distance between digit positions, far beyond any float's digits.
const SPAN_LIMIT: i64 = i64::MAX / 4;

/// `count` as a distance between digit positions.
fn span(count: usize) -> i64 {
    i64::try_from(count).map_or(SPAN_LIMIT, |count| count.min(SPAN_LIMIT))
}

/// Exact value of a finite float, split at the point.
///
/// Digit positions are global: `0` is the units digit, `-1` the first digit
/// after the point.
#[derive(Clone, Debug)]
pub(crate) struct Expansion {
    negative: bool,
    int: BigUInt,
    frac: BigFloat,
}

impl Expansion {
    /// Expands `mantissa * 2^exp2`.
    pub(crate) fn new(radix: Radix, negative: bool, mantissa: u64, exp2: i32) -> Self {
        let bits = i64::from(64 - mantissa.leading_zeros());
        let int_bits = (bits + i64::from(exp2)).max(0) as u64;
        let frac_bits = (-i64::from(exp2)).max(0) as u64;
        let int_digits = radix.digits_for_bits(int_bits);
        let frac_digits = radix.digits_for_fraction_bits(frac_bits);
        trace!(int_digits, frac_digits, "expansion sized");

        let int = if exp2 >= 0 {
            let mut int = BigUInt::from_u64(radix, mantissa, int_digits);
            int.mul_pow2(exp2 as u64);
            int
        } else {
            let shifted = mantissa.checked_shr((-exp2) as u32).unwrap_or(0);
            BigUInt::from_u64(radix, shifted, int_digits)
        };

        // Horner's scheme on the bits below the point, lowest bits first.
        let mut frac = BigFloat::with_capacity(radix, frac_digits);
        let mut low = match frac_bits {
            0 => 0,
            1..=63 => mantissa & ((1 << frac_bits) - 1),
            _ => mantissa,
        };
        let mut remaining = frac_bits;
        while remaining > 0 {
            let chunk = remaining.min(u64::from(MAX_SHIFT)) as u32;
            let top = (low & ((1 << chunk) - 1)) as u32;
            let exact = frac.div_pow2(chunk, top);
            debug_assert!(exact, "fraction expansion is always exact");
            low >>= chunk;
            remaining -= u64::from(chunk);
        }

        Self {
            negative,
            int,
            frac,
        }
    }

    pub(crate) fn digit(&self, pos: i64) -> u32 {
        if pos >= 0 {
            self.int.digit(pos as usize)
        } else {
            self.frac.digit((-pos - 1) as usize)
        }
    }

    /// Position of the leading digit (`0` for zero).
    pub(crate) fn exponent(&self) -> i64 {
        match (self.int.leading_digit_pos(), self.frac.leading_digit_pos()) {
            (Some(pos), _) => pos as i64,
            (None, Some(pos)) => -(pos as i64) - 1,
            (None, None) => 0,
        }
    }

    /// Position of the last non-zero digit (`0` for zero).
    pub(crate) fn lowest_digit(&self) -> i64 {
        if self.frac.is_zero() {
            self.int.trailing_digit_pos().map_or(0, |pos| pos as i64)
        } else {
            -(self.frac.digit_len() as i64)
        }
    }

    /// Rounds so that `pos` is the last kept digit.
    pub(crate) fn round_at(&mut self, pos: i64, mode: RoundingMode) {
        if pos > 0 {
            let fraction = !self.frac.is_zero();
            self.int.round(pos as usize, self.negative, fraction, mode);
            self.frac.clear();
        } else {
            let units_odd = self.int.digit(0) % 2 == 1;
            if self.frac.round((-pos) as usize, self.negative, units_odd, mode) {
                self.int.add_small(1);
            }
        }
    }

    /// Digits from position `from` down to position `to`, both included.
    fn digits(&self, from: i64, to: i64, uppercase: bool) -> Vec<u8> {
        let mut digits = Vec::with_capacity(usize::try_from(from - to + 1).unwrap_or(0));
        let mut pos = from;
        while pos >= to {
            digits.push(digit_char(self.digit(pos) as u8, uppercase));
            pos -= 1;
        }
        digits
    }

    /// `count` digits from position `from` down: the digits up to the last
    /// non-zero one, and how many zeros complete them.
    fn digit_run(&self, from: i64, count: usize, uppercase: bool) -> (Vec<u8>, usize) {
        let to = (from + 1 - span(count)).max(self.lowest_digit());
        let digits = self.digits(from, to, uppercase);
        let zeros = count - digits.len();
        (digits, zeros)
    }

    /// `ddd.ddd`, with `precision` digits after the point.
    fn fixed(mut self, precision: usize, options: &FormatOptions) -> Digits {
        self.round_at(-span(precision), options.rounding);
        let top = self.int.leading_digit_pos().map_or(0, |pos| pos as i64);
        let (frac, frac_zeros) = self.digit_run(-1, precision, options.uppercase);
        Digits {
            negative: self.negative,
            int: self.digits(top, 0, options.uppercase),
            frac,
            frac_zeros,
            exponent: None,
        }
    }

    /// `d.ddde±x`, with `precision` digits after the point.
    fn scientific(mut self, precision: usize, options: &FormatOptions) -> Digits {
        self.round_at(self.exponent() - span(precision), options.rounding);
        let exponent = self.exponent();
        let (frac, frac_zeros) = self.digit_run(exponent - 1, precision, options.uppercase);
        Digits {
            negative: self.negative,
            int: self.digits(exponent, exponent, options.uppercase),
            frac,
            frac_zeros,
            exponent: Some(exponent),
        }
    }

    /// `printf`'s `%g`: `significant` digits, in whichever layout keeps the
    /// exponent of the rounded value in `[-4, significant)`.
    fn general(self, significant: usize, options: &FormatOptions) -> Digits {
        let significant = significant.max(1);
        let mut rounded = self.clone();
        rounded.round_at(self.exponent() - span(significant - 1), options.rounding);
        let exponent = rounded.exponent();
        if -4 <= exponent && exponent < span(significant) {
            debug!(exponent, significant, "general layout: fixed");
            let precision = if exponent >= 0 {
                significant - 1 - exponent as usize
            } else {
                (significant - 1).saturating_add((-exponent) as usize)
            };
            self.fixed(precision, options)
        } else {
            debug!(exponent, significant, "general layout: scientific");
            rounded.scientific(significant - 1, options)
        }
    }
}

/// Digits of a finite value, in the layout requested by `options`.
fn finite_digits<F: BinaryFloat>(parts: &FloatParts<F>, options: &FormatOptions) -> Digits {
    let (mantissa, exp2) = parts.exact();
    let negative = parts.negative;
    let precision = options.precision;
    if options.notation == Notation::HexBinary && options.layout != Layout::Fixed {
        return hex_binary(negative, mantissa, exp2, precision, options);
    }

    let expansion = Expansion::new(options.notation.radix(), negative, mantissa, exp2);
    let significant = (expansion.exponent() - expansion.lowest_digit() + 1) as usize;
    match (options.layout, options.exact) {
        (Layout::Fixed, false) => expansion.fixed(precision, options),
        (Layout::Fixed, true) => {
            let precision = -expansion.lowest_digit().min(0);
            expansion.fixed(precision as usize, options)
        }
        (Layout::Scientific, false) => expansion.scientific(precision, options),
        (Layout::Scientific, true) => expansion.scientific(significant - 1, options),
        (Layout::General, false) => expansion.general(precision, options),
        (Layout::General, true) => expansion.general(significant, options),
    }
}

/// C99 `%a`: a leading digit of `1` (or `2` after a rounding carry), and a
/// power of two.
fn hex_binary(
    negative: bool,
    mantissa: u64,
    exp2: i32,
    precision: usize,
    options: &FormatOptions,
) -> Digits {
    let exponent = match mantissa {
        0 => 0,
        _ => 63 - mantissa.leading_zeros() as i32 + exp2,
    };
    let mut expansion = Expansion::new(Radix::Hexadecimal, negative, mantissa, exp2 - exponent);
    let precision = if options.exact {
        (-expansion.lowest_digit().min(0)) as usize
    } else {
        precision
    };
    expansion.round_at(-span(precision), options.rounding);
    let (frac, frac_zeros) = expansion.digit_run(-1, precision, options.uppercase);
    Digits {
        negative,
        int: expansion.digits(0, 0, options.uppercase),
        frac,
        frac_zeros,
        exponent: Some(i64::from(exponent)),
    }
}

fn format_with<F: BinaryFloat, R>(
    value: F,
    options: &FormatOptions,
    write: impl FnOnce(&Formatted) -> R,
) -> R {
    let parts = FloatParts::decompose(value);
    match parts.category() {
        Category::Infinite => write(&format::infinity(parts.negative, options.uppercase)),
        Category::Nan(kind) => write(&format::nan(parts.negative, kind, options.uppercase)),
        Category::Zero | Category::Subnormal | Category::Normal => {
            let digits = finite_digits(&parts, options);
            write(&digits.layout(options))
        }
    }
}

/// Converts `value` to text.
///
/// Every digit is exact: the value is expanded into a bignum in the output
/// base and rounded there, with `options.rounding`.
///
/// # Example
///
/// ```
/// use fltext::{ftos, FormatOptions, Layout, Notation};
///
/// let fixed = FormatOptions::new(Layout::Fixed).precision(2);
/// assert_eq!(ftos(8.1f64, &fixed), "8.10");
/// assert_eq!(ftos(18.0f64, &fixed.notation(Notation::Hex)), "12.00");
///
/// let general = FormatOptions::new(Layout::General).precision(3);
/// assert_eq!(ftos(1666.666666f64, &general), "1.67e+03");
/// assert_eq!(ftos(166.6666666f64, &general), "167");
/// ```
pub fn ftos<F: BinaryFloat>(value: F, options: &FormatOptions) -> String {
    format_with(value, options, |formatted| formatted.to_string())
}

/// Converts `value` to text in `out`, returning the number of bytes written.
///
/// # Errors
///
/// If `out` is too short, [`BufferTooSmall`] carries the exact length of the
/// text, so that the caller can retry with a big enough buffer.
///
/// # Example
///
/// ```
/// use fltext::{ftos_into, FormatOptions, Layout};
///
/// let options = FormatOptions::new(Layout::Fixed).precision(3);
/// let mut buf = [0u8; 4];
/// let required = ftos_into(999.999f64, &options, &mut buf).unwrap_err().required;
/// assert_eq!(required, 7);
///
/// let mut buf = vec![0u8; required];
/// assert_eq!(ftos_into(999.999f64, &options, &mut buf), Ok(7));
/// assert_eq!(&buf, b"999.999");
/// ```
pub fn ftos_into<F: BinaryFloat>(
    value: F,
    options: &FormatOptions,
    out: &mut [u8],
) -> Result<usize, BufferTooSmall> {
    format_with(value, options, |formatted| {
        formatted.write(out).ok_or(BufferTooSmall {
            required: formatted.len(),
        })
    })
}
