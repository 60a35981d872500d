//! Text to float.
//!
//! The digits are read into an exact integral [`BigUInt`] and fractional
//! [`BigFloat`] pair, which is then folded into binary with enough guard
//! bits for a correctly rounded result.

mod fold;
mod scan;

#[cfg(test)]
mod tests;

use crate::{
    bignum::{digit_value, BigFloat, BigUInt, Radix},
    error::ParseError,
    float::{BinaryFloat, FloatParts},
    options::{Notation, ParseOptions},
};
use scan::Token;
use std::iter;
use tracing::trace;

/// How faithful a parsed value is to its text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Correctly rounded (possibly subnormal) value.
    Ok,
    /// The magnitude is too large: the value is a signed infinity.
    Overflow,
    /// A non-zero magnitude is too small: the value is a signed zero.
    Underflow,
}

/// Result of [`stof`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parsed<F> {
    pub value: F,
    /// Number of bytes of the text that make up the number.
    pub consumed: usize,
    pub status: Status,
}

/// Number of significant integral digits past which a value is certainly
/// out of range.
fn max_integral_digits<F: BinaryFloat>(radix: Radix) -> i64 {
    radix.digits_for_bits((F::MAX_EXPONENT + 1) as u64) as i64
}

/// Digits of `radix` needed to hold `bits` fraction bits.
fn fraction_digits(radix: Radix, bits: i64) -> i64 {
    match radix {
        Radix::Decimal => bits,
        Radix::Hexadecimal => bits / 4 + 1,
    }
}

fn number<F: BinaryFloat>(
    negative: bool,
    integral: &[u8],
    fractional: &[u8],
    exponent: i64,
    options: &ParseOptions,
) -> (FloatParts<F>, Status) {
    let radix = options.notation.radix();
    let mut digits: Vec<u8> = integral.iter().filter_map(|&c| digit_value(c)).collect();
    let point = digits.len() as i64;
    digits.extend(fractional.iter().filter_map(|&c| digit_value(c)));

    let first = match digits.iter().position(|&d| d != 0) {
        Some(first) => first,
        None => return (FloatParts::zero(negative), Status::Ok),
    };
    let digits = &digits[first..];
    // digits before the point, counted from the first significant one
    let (point, exp2) = match options.notation {
        Notation::HexBinary => (point - first as i64, exponent),
        Notation::Decimal | Notation::Hex => (point - first as i64 + exponent, 0),
    };
    if exp2 >= 0 && point > max_integral_digits::<F>(radix) {
        return fold::overflow(negative);
    }

    let len = digits.len() as i64;
    let int_digits: Vec<u8> = if point > 0 {
        let kept = &digits[..point.min(len) as usize];
        let zeros = (point - len).max(0) as usize;
        kept.iter().copied().chain(iter::repeat(0).take(zeros)).collect()
    } else {
        Vec::new()
    };
    let int = match BigUInt::from_digit_values(radix, &int_digits, int_digits.len()) {
        Ok(int) => int,
        Err(_) => return fold::overflow(negative),
    };

    let limit = (fold::fraction_bits::<F>() + exp2).max(0);
    let max_digits = fraction_digits(radix, limit);
    let (frac, sticky) = if point >= len {
        (BigFloat::with_capacity(radix, 0), false)
    } else if -point >= max_digits {
        (BigFloat::with_capacity(radix, 0), true)
    } else {
        let zeros = (-point).max(0) as usize;
        let significant = &digits[point.max(0) as usize..];
        let frac_digits: Vec<u8> = iter::repeat(0)
            .take(zeros)
            .chain(significant.iter().copied())
            .collect();
        let kept = frac_digits.len().min(max_digits as usize);
        BigFloat::from_digit_values(radix, &frac_digits, kept)
    };
    trace!(
        int_digits = int_digits.len(),
        frac_digits = max_digits,
        sticky,
        "bignums parsed"
    );

    fold::fold(negative, int, frac, sticky, exp2, limit, options)
}

/// Converts text to a float, correctly rounded with `options.rounding`.
///
/// # Errors
///
/// Malformed text gives a [`ParseError`] pointing at the byte that broke
/// parsing, or at `0` if nothing could be parsed at all. Out of range values
/// are not errors: they are reported by [`Parsed::status`].
///
/// # Example
///
/// ```
/// use fltext::{stof, Notation, ParseOptions, Status};
///
/// let parsed = stof::<f64>("-1e400", &ParseOptions::default()).unwrap();
/// assert_eq!(parsed.value, f64::NEG_INFINITY);
/// assert_eq!(parsed.status, Status::Overflow);
///
/// let options = ParseOptions::new(Notation::HexBinary).partial(true);
/// let parsed = stof::<f32>("1.8p1, 2", &options).unwrap();
/// assert_eq!((parsed.value, parsed.consumed), (3.0, 5));
/// ```
pub fn stof<F: BinaryFloat>(text: &str, options: &ParseOptions) -> Result<Parsed<F>, ParseError> {
    let scan = scan::scan(text, options.notation, options.partial)?;
    let negative = scan.negative;
    let (parts, status) = match scan.token {
        Token::Infinity => (FloatParts::infinity(negative), Status::Ok),
        Token::Nan { signaling } => (FloatParts::nan(negative, signaling), Status::Ok),
        Token::Number {
            integral,
            fractional,
            exponent,
        } => number(negative, integral, fractional, exponent, options),
    };
    Ok(Parsed {
        value: parts.compose(),
        consumed: scan.consumed,
        status,
    })
}
