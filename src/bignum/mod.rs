//! Custom arbitrary-precision number (bignum) implementation.
//!
//! Unlike the usual binary bignums, each "cell" here holds several digits of
//! the *output* base (10 or 16), so that the exact value of a float can be
//! built by repeated doubling/halving and then read off digit by digit.
//!
//! - [`BigUInt`] holds the integral part of a value.
//! - [`BigFloat`] holds the fractional part, in `[0, 1)`.
//!
//! Both are backed by a `Vec` whose capacity is decided by the caller from
//! the range of the float type (or the length of the parsed text). All
//! arithmetic panics in debug builds if that capacity is exceeded: the caller
//! is responsible for sizing the bignum, exactly like for the stack bignums
//! of `core::num`.

mod frac;
mod uint;


pub use frac::BigFloat;
pub use uint::BigUInt;

/// The largest power of two a cell can be multiplied or divided by in one
/// step.
///
/// A decimal cell is below `2^30`, so `cell * 2^28 + carry` stays well within
/// a `u64`.
pub(crate) const MAX_SHIFT: u32 = 28;

const DECIMAL_POWERS: [u32; 9] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
];

const HEXADECIMAL_POWERS: [u32; 7] = [1, 0x10, 0x100, 0x1000, 0x1_0000, 0x10_0000, 0x100_0000];

/// Base of the digits stored in a bignum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Radix {
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub const fn base(self) -> u32 {
        match self {
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
        }
    }

    /// Digits held by one cell.
    pub(crate) const fn cell_digits(self) -> usize {
        match self {
            Self::Decimal => 9,
            Self::Hexadecimal => 7,
        }
    }

    /// `base ^ cell_digits`: one more than the largest cell value.
    pub(crate) const fn cell_modulus(self) -> u32 {
        match self {
            Self::Decimal => 1_000_000_000,
            Self::Hexadecimal => 1 << 28,
        }
    }

    /// `base ^ exp`, for `exp < cell_digits`.
    pub(crate) fn pow(self, exp: usize) -> u32 {
        match self {
            Self::Decimal => DECIMAL_POWERS[exp],
            Self::Hexadecimal => HEXADECIMAL_POWERS[exp],
        }
    }

    pub(crate) const fn half(self) -> u32 {
        self.base() / 2
    }

    /// Number of cells needed to hold `digits` digits.
    pub(crate) fn cells_for(self, digits: usize) -> usize {
        (digits + self.cell_digits() - 1) / self.cell_digits()
    }

    /// Upper bound on the digits of a number of `bits` bits.
    pub(crate) fn digits_for_bits(self, bits: u64) -> usize {
        match self {
            // log10(2) < 0.30103
            Self::Decimal => (bits * 30103 / 100_000) as usize + 2,
            Self::Hexadecimal => (bits / 4) as usize + 2,
        }
    }

    /// Number of fraction digits that represent `2^-bits` exactly.
    pub(crate) fn digits_for_fraction_bits(self, bits: u64) -> usize {
        match self {
            // 2^-n = 5^n / 10^n has exactly n decimal digits.
            Self::Decimal => bits as usize + 1,
            Self::Hexadecimal => (bits / 4) as usize + 2,
        }
    }

    /// Number of significant digits in a single cell value.
    pub(crate) fn digits_in(self, mut cell: u32) -> usize {
        let mut digits = 0;
        while cell != 0 {
            cell /= self.base();
            digits += 1;
        }
        digits
    }
}

/// Value of an alphanumeric digit (`0-9`, then `a-z` or `A-Z`), up to base 36.
pub const fn digit_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'z' => Some(c - b'a' + 10),
        b'A'..=b'Z' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Value of `c` if it is a digit of `radix`.
pub(crate) fn digit_in(c: u8, radix: Radix) -> Option<u8> {
    digit_value(c).filter(|&d| u32::from(d) < radix.base())
}

/// Value of `c` if it is a digit of `radix`.
pub(crate) fn char_digit(c: char, radix: Radix) -> Option<u8> {
    if c.is_ascii() {
        digit_in(c as u8, radix)
    } else {
        None
    }
}

pub(crate) const fn digit_char(digit: u8, uppercase: bool) -> u8 {
    match digit {
        0..=9 => b'0' + digit,
        _ if uppercase => b'A' + digit - 10,
        _ => b'a' + digit - 10,
    }
}
