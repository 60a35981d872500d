use super::{char_digit, digit_char, Radix, MAX_SHIFT};
use crate::{error::BigNumError, options::RoundingMode};
use std::fmt;

/// Arbitrary-precision fraction in `[0, 1)`, in base 10 or 16.
///
/// Digit positions count from the point: position `0` is the first digit
/// after the point, with weight `base^-1`.
///
/// Operations that push the value out of `[0, 1)` return the "top" that was
/// carried out, i.e. the integral part that belongs to the paired
/// [`BigUInt`](super::BigUInt).
#[derive(Clone, PartialEq, Eq)]
pub struct BigFloat {
    radix: Radix,
    /// `[a, b, c, ...]` represents `a/M + b/M^2 + c/M^3 + ...`, where `M` is
    /// the cell modulus. The last cell is never zero.
    cells: Vec<u32>,
    /// Maximum number of cells.
    capacity: usize,
}

impl BigFloat {
    /// Makes a zero able to hold `digits` fractional digits.
    pub fn with_capacity(radix: Radix, digits: usize) -> Self {
        let capacity = radix.cells_for(digits) + 1;
        Self {
            radix,
            cells: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Reads fractional digit values (the digits after the point).
    ///
    /// Only the first `max_digits` digits are kept; the returned flag tells
    /// if a non-zero digit was dropped past them.
    pub fn from_digit_values(radix: Radix, digits: &[u8], max_digits: usize) -> (Self, bool) {
        let kept = &digits[..digits.len().min(max_digits)];
        let inexact = digits[kept.len()..].iter().any(|&d| d != 0);
        let mut result = Self::with_capacity(radix, max_digits);
        for chunk in kept.chunks(radix.cell_digits()) {
            let padding = radix.cell_digits() - chunk.len();
            let cell = chunk
                .iter()
                .fold(0, |cell, &d| cell * radix.base() + u32::from(d));
            result.cells.push(cell * radix.pow(padding));
        }
        result.trim();
        (result, inexact)
    }

    /// Parses the digits after the point.
    ///
    /// Like [`BigUInt::from_chars`](super::BigUInt::from_chars), this is not
    /// the path taken by the conversions.
    ///
    /// # Errors
    ///
    /// [`BigNumError::InvalidDigit`] on a character that is not a digit of
    /// `radix`. Digits past `max_digits` are only checked, and their presence
    /// reported by the returned flag.
    pub fn from_chars(
        radix: Radix,
        text: &str,
        max_digits: usize,
    ) -> Result<(Self, bool), BigNumError> {
        let digits = text
            .chars()
            .map(|c| char_digit(c, radix).ok_or(BigNumError::InvalidDigit(c, radix.base())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_digit_values(radix, &digits, max_digits))
    }

    pub fn radix(&self) -> Radix {
        self.radix
    }

    pub fn is_zero(&self) -> bool {
        self.cells.is_empty()
    }

    fn push(&mut self, cell: u32) {
        debug_assert!(self.cells.len() < self.capacity, "BigFloat capacity exceeded");
        self.cells.push(cell)
    }

    fn trim(&mut self) {
        while self.cells.last() == Some(&0) {
            self.cells.pop();
        }
    }

    /// Sets the value to zero.
    pub fn clear(&mut self) {
        self.cells.clear()
    }

    /// Digit at position `pos`.
    pub fn digit(&self, pos: usize) -> u32 {
        let width = self.radix.cell_digits();
        match self.cells.get(pos / width) {
            Some(cell) => cell / self.radix.pow(width - 1 - pos % width) % self.radix.base(),
            None => 0,
        }
    }

    /// Position of the first non-zero digit.
    pub fn leading_digit_pos(&self) -> Option<usize> {
        let width = self.radix.cell_digits();
        let index = self.cells.iter().position(|&c| c != 0)?;
        let cell = self.cells[index];
        Some(index * width + width - self.radix.digits_in(cell))
    }

    /// Number of digits up to the last non-zero one (`0` for zero).
    pub fn digit_len(&self) -> usize {
        let width = self.radix.cell_digits();
        match self.cells.last() {
            Some(&last) => {
                let mut trailing = 0;
                let mut cell = last;
                while cell % self.radix.base() == 0 {
                    cell /= self.radix.base();
                    trailing += 1;
                }
                self.cells.len() * width - trailing
            }
            None => 0,
        }
    }

    /// Returns `true` if every digit at position `pos` or after is zero.
    pub fn is_zero_from(&self, pos: usize) -> bool {
        self.digit_len() <= pos
    }

    /// Clears every digit at position `pos` or after.
    pub fn truncate_from(&mut self, pos: usize) {
        let width = self.radix.cell_digits();
        let index = pos / width;
        if index >= self.cells.len() {
            return;
        }
        let kept = pos % width;
        if kept == 0 {
            self.cells.truncate(index);
        } else {
            self.cells.truncate(index + 1);
            let cell = &mut self.cells[index];
            *cell -= *cell % self.radix.pow(width - kept);
        }
        self.trim();
    }

    /// Adds `base^-(pos + 1)`, returning the carry out of the point.
    pub fn add_unit_at(&mut self, pos: usize) -> u32 {
        let width = self.radix.cell_digits();
        let index = pos / width;
        while self.cells.len() <= index {
            self.push(0);
        }
        let top = self.carry_from(index, self.radix.pow(width - 1 - pos % width));
        self.trim();
        top
    }

    /// Adds `carry` to the cell at `index`, propagating toward the point.
    fn carry_from(&mut self, index: usize, carry: u32) -> u32 {
        let modulus = self.radix.cell_modulus();
        let mut carry = carry;
        for cell in self.cells[..=index].iter_mut().rev() {
            if carry == 0 {
                break;
            }
            let v = *cell + carry;
            *cell = v % modulus;
            carry = v / modulus;
        }
        carry
    }

    /// Adds `other` to itself, returning the carry out of the point.
    pub fn add(&mut self, other: &BigFloat) -> u32 {
        debug_assert_eq!(self.radix, other.radix);
        while self.cells.len() < other.cells.len() {
            self.push(0);
        }
        let modulus = self.radix.cell_modulus();
        let mut carry = 0;
        for i in (0..other.cells.len()).rev() {
            let v = self.cells[i] + other.cells[i] + carry;
            self.cells[i] = v % modulus;
            carry = v / modulus;
        }
        self.trim();
        carry
    }

    /// Multiplies itself by `m` (at most `2^28`), returning the integral part
    /// that was carried out.
    pub fn mul_small(&mut self, m: u32) -> u32 {
        debug_assert!(m <= 1 << MAX_SHIFT);
        let modulus = u64::from(self.radix.cell_modulus());
        let mut carry = 0;
        for cell in self.cells.iter_mut().rev() {
            let v = u64::from(*cell) * u64::from(m) + carry;
            *cell = (v % modulus) as u32;
            carry = v / modulus;
        }
        self.trim();
        carry as u32
    }

    pub fn mul2(&mut self) -> u32 {
        self.mul_small(2)
    }

    /// Multiplies itself by `2^bits` (`bits <= 28`), returning the bits that
    /// crossed the point.
    pub fn mul_pow2(&mut self, bits: u32) -> u32 {
        self.mul_small(1 << bits)
    }

    /// Computes `(top + self) / d`, where `top < d` is an integral part
    /// entering from above the point and `d` is at most `2^28`.
    ///
    /// Returns `false` if the quotient needed more cells than the capacity
    /// and was truncated; a divisor of a power of the base always fits a
    /// correctly sized fraction.
    pub fn div_small(&mut self, d: u32, top: u32) -> bool {
        debug_assert!(d != 0 && d <= 1 << MAX_SHIFT && top < d);
        let modulus = u64::from(self.radix.cell_modulus());
        let d = u64::from(d);
        let mut remainder = u64::from(top);
        for cell in &mut self.cells {
            let v = remainder * modulus + u64::from(*cell);
            *cell = (v / d) as u32;
            remainder = v % d;
        }
        while remainder != 0 && self.cells.len() < self.capacity {
            let v = remainder * modulus;
            self.cells.push((v / d) as u32);
            remainder = v % d;
        }
        self.trim();
        remainder == 0
    }

    /// Halves itself, with `top` (0 or 1) entering from above the point.
    pub fn div2(&mut self, top: u32) -> bool {
        self.div_small(2, top)
    }

    /// Computes `(top + self) / 2^bits`, for `bits <= 28` and `top < 2^bits`.
    pub fn div_pow2(&mut self, bits: u32, top: u32) -> bool {
        self.div_small(1 << bits, top)
    }

    /// Rounds to `keep` fractional digits, returning `true` if the rounding
    /// carried into the integral part.
    ///
    /// `integral_odd` is the parity of the units digit, which is the last kept
    /// digit when `keep == 0`.
    pub fn round(
        &mut self,
        keep: usize,
        negative: bool,
        integral_odd: bool,
        mode: RoundingMode,
    ) -> bool {
        let first = self.digit(keep);
        let rest = !self.is_zero_from(keep + 1);
        let last_odd = match keep {
            0 => integral_odd,
            _ => self.digit(keep - 1) % 2 == 1,
        };
        let up = mode.rounds_up(negative, last_odd, first, self.radix.half(), rest);
        self.truncate_from(keep);
        match (up, keep) {
            (false, _) => false,
            (true, 0) => true,
            (true, _) => self.add_unit_at(keep - 1) != 0,
        }
    }

    /// Renders the first `count` digits, for debugging.
    pub fn to_chars(&self, count: usize, uppercase: bool) -> String {
        (0..count)
            .map(|pos| digit_char(self.digit(pos) as u8, uppercase) as char)
            .collect()
    }
}

impl fmt::Debug for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0.{}_b{}", self.to_chars(self.digit_len().max(1), false), self.radix.base())
    }
}
