use super::{char_digit, digit_char, Radix, MAX_SHIFT};
use crate::{error::BigNumError, options::RoundingMode};
use std::fmt;

/// Arbitrary-precision (up to a capacity fixed at creation) unsigned integer
/// in base 10 or 16.
///
/// Digit positions count from the units digit: position `0` has weight
/// `base^0`, position `1` has weight `base^1`...
#[derive(Clone, PartialEq, Eq)]
pub struct BigUInt {
    radix: Radix,
    /// `[a, b, c, ...]` represents `a + b*M + c*M^2 + ...`, where `M` is the
    /// cell modulus. The last cell is never zero: the value zero has no cells.
    cells: Vec<u32>,
    /// Maximum number of cells.
    capacity: usize,
}

impl BigUInt {
    /// Makes a zero able to grow up to `digits` digits.
    pub fn with_capacity(radix: Radix, digits: usize) -> Self {
        let capacity = radix.cells_for(digits) + 1;
        Self {
            radix,
            cells: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Makes a bignum from `u64` value.
    pub fn from_u64(radix: Radix, mut v: u64, digits: usize) -> Self {
        let mut result = Self::with_capacity(radix, digits.max(20));
        let modulus = u64::from(radix.cell_modulus());
        while v > 0 {
            result.push((v % modulus) as u32);
            v /= modulus;
        }
        result
    }

    /// Reads digit values (most significant first, no separators).
    ///
    /// # Errors
    ///
    /// [`BigNumError::Overflow`] if there are more than `max_digits`
    /// significant digits.
    pub fn from_digit_values(
        radix: Radix,
        digits: &[u8],
        max_digits: usize,
    ) -> Result<Self, BigNumError> {
        let leading_zeros = digits.iter().take_while(|&&d| d == 0).count();
        let digits = &digits[leading_zeros..];
        if digits.len() > max_digits {
            return Err(BigNumError::Overflow(max_digits));
        }
        let mut result = Self::with_capacity(radix, max_digits);
        for chunk in digits.rchunks(radix.cell_digits()) {
            let cell = chunk
                .iter()
                .fold(0, |cell, &d| cell * radix.base() + u32::from(d));
            result.cells.push(cell);
        }
        result.trim();
        Ok(result)
    }

    /// Parses a run of digits, skipping at most one `.`.
    ///
    /// Digits are read with the alphanumeric digit table, case-insensitively.
    /// The conversions do not go through text: they build their bignums from
    /// digit values, see [`from_digit_values`](Self::from_digit_values).
    ///
    /// # Errors
    ///
    /// - [`BigNumError::InvalidDigit`] on a character that is not a digit of
    /// `radix` (or on a second `.`).
    /// - [`BigNumError::Overflow`] if there are more than `max_digits`
    /// significant digits.
    ///
    /// # Example
    ///
    /// ```
    /// use fltext::bignum::{BigUInt, Radix};
    ///
    /// let n = BigUInt::from_chars(Radix::Hexadecimal, "3FD1997CBCAA668D", 32).unwrap();
    /// assert_eq!(n.to_u64(), Some(4598625455542265485));
    /// ```
    pub fn from_chars(radix: Radix, text: &str, max_digits: usize) -> Result<Self, BigNumError> {
        let mut seen_dot = false;
        let mut digits = Vec::with_capacity(text.len());
        for c in text.chars() {
            if c == '.' && !seen_dot {
                seen_dot = true;
                continue;
            }
            let digit = char_digit(c, radix).ok_or(BigNumError::InvalidDigit(c, radix.base()))?;
            digits.push(digit);
        }
        Self::from_digit_values(radix, &digits, max_digits)
    }

    pub fn radix(&self) -> Radix {
        self.radix
    }

    pub fn is_zero(&self) -> bool {
        self.cells.is_empty()
    }

    fn push(&mut self, cell: u32) {
        debug_assert!(self.cells.len() < self.capacity, "BigUInt capacity exceeded");
        self.cells.push(cell)
    }

    /// Restores the "no zero cell at the top" invariant.
    fn trim(&mut self) {
        while self.cells.last() == Some(&0) {
            self.cells.pop();
        }
    }

    /// Digit at position `pos`.
    pub fn digit(&self, pos: usize) -> u32 {
        let width = self.radix.cell_digits();
        match self.cells.get(pos / width) {
            Some(cell) => cell / self.radix.pow(pos % width) % self.radix.base(),
            None => 0,
        }
    }

    /// Position of the most significant non-zero digit.
    pub fn leading_digit_pos(&self) -> Option<usize> {
        let last = *self.cells.last()?;
        Some((self.cells.len() - 1) * self.radix.cell_digits() + self.radix.digits_in(last) - 1)
    }

    /// Position of the least significant non-zero digit.
    pub fn trailing_digit_pos(&self) -> Option<usize> {
        let (index, cell) = self.cells.iter().enumerate().find(|(_, c)| **c != 0)?;
        let mut pos = index * self.radix.cell_digits();
        let mut cell = *cell;
        while cell % self.radix.base() == 0 {
            cell /= self.radix.base();
            pos += 1;
        }
        Some(pos)
    }

    /// Number of significant digits (`0` for zero).
    pub fn digit_len(&self) -> usize {
        self.leading_digit_pos().map_or(0, |pos| pos + 1)
    }

    /// Returns `true` if every digit below position `pos` is zero.
    pub fn is_zero_below(&self, pos: usize) -> bool {
        let width = self.radix.cell_digits();
        let index = pos / width;
        let below = &self.cells[..index.min(self.cells.len())];
        below.iter().all(|&c| c == 0)
            && self
                .cells
                .get(index)
                .map_or(true, |cell| cell % self.radix.pow(pos % width) == 0)
    }

    /// Clears every digit below position `pos`.
    pub fn truncate_below(&mut self, pos: usize) {
        let width = self.radix.cell_digits();
        let index = pos / width;
        let len = self.cells.len();
        for cell in &mut self.cells[..index.min(len)] {
            *cell = 0;
        }
        if let Some(cell) = self.cells.get_mut(index) {
            *cell -= *cell % self.radix.pow(pos % width);
        }
        self.trim();
    }

    /// Adds `carry` to the cell at `index`, propagating to the top.
    fn carry_from(&mut self, mut index: usize, carry: u32) {
        let modulus = self.radix.cell_modulus();
        let mut carry = u64::from(carry);
        while carry > 0 {
            if index == self.cells.len() {
                self.push(0);
            }
            let v = u64::from(self.cells[index]) + carry;
            self.cells[index] = (v % u64::from(modulus)) as u32;
            carry = v / u64::from(modulus);
            index += 1;
        }
    }

    /// Adds a small value (below the cell modulus).
    pub fn add_small(&mut self, v: u32) -> &mut Self {
        self.carry_from(0, v);
        self
    }

    /// Adds `base^pos`.
    pub fn add_unit_at(&mut self, pos: usize) -> &mut Self {
        let width = self.radix.cell_digits();
        let index = pos / width;
        while self.cells.len() < index {
            self.push(0);
        }
        self.carry_from(index, self.radix.pow(pos % width));
        self
    }

    /// Adds `other` to itself.
    pub fn add(&mut self, other: &BigUInt) -> &mut Self {
        debug_assert_eq!(self.radix, other.radix);
        let modulus = u64::from(self.radix.cell_modulus());
        let mut carry = 0;
        for (i, &b) in other.cells.iter().enumerate() {
            if i == self.cells.len() {
                self.push(0);
            }
            let v = u64::from(self.cells[i]) + u64::from(b) + carry;
            self.cells[i] = (v % modulus) as u32;
            carry = v / modulus;
        }
        self.carry_from(other.cells.len(), carry as u32);
        self
    }

    /// Multiplies itself by `m`, which must not exceed `2^28`.
    pub fn mul_small(&mut self, m: u32) -> &mut Self {
        debug_assert!(m <= 1 << MAX_SHIFT);
        let modulus = u64::from(self.radix.cell_modulus());
        let mut carry = 0;
        for cell in &mut self.cells {
            let v = u64::from(*cell) * u64::from(m) + carry;
            *cell = (v % modulus) as u32;
            carry = v / modulus;
        }
        while carry > 0 {
            self.push((carry % modulus) as u32);
            carry /= modulus;
        }
        self.trim();
        self
    }

    pub fn mul2(&mut self) -> &mut Self {
        self.mul_small(2)
    }

    /// Multiplies itself by `2^bits`.
    pub fn mul_pow2(&mut self, mut bits: u64) -> &mut Self {
        while bits > 0 {
            let step = bits.min(u64::from(MAX_SHIFT)) as u32;
            self.mul_small(1 << step);
            bits -= u64::from(step);
        }
        self
    }

    /// Divides itself by `d` (at most `2^28`), returning the remainder.
    pub fn div_small(&mut self, d: u32) -> u32 {
        debug_assert!(d != 0 && d <= 1 << MAX_SHIFT);
        let modulus = u64::from(self.radix.cell_modulus());
        let d = u64::from(d);
        let mut remainder = 0;
        for cell in self.cells.iter_mut().rev() {
            let v = remainder * modulus + u64::from(*cell);
            *cell = (v / d) as u32;
            remainder = v % d;
        }
        self.trim();
        remainder as u32
    }

    /// Halves itself, returning the dropped bit.
    pub fn div2(&mut self) -> u32 {
        self.div_small(2)
    }

    /// Divides itself by `2^bits` (`bits <= 28`), returning the dropped bits.
    pub fn div_pow2(&mut self, bits: u32) -> u32 {
        self.div_small(1 << bits)
    }

    /// Rounds to a multiple of `base^pos` (`pos >= 1`).
    ///
    /// `fraction` tells if a non-zero fractional part sits below the integer,
    /// which breaks exact ties.
    pub fn round(&mut self, pos: usize, negative: bool, fraction: bool, mode: RoundingMode) {
        debug_assert!(pos >= 1);
        let first = self.digit(pos - 1);
        let rest = fraction || !self.is_zero_below(pos - 1);
        let last_odd = self.digit(pos) % 2 == 1;
        let up = mode.rounds_up(negative, last_odd, first, self.radix.half(), rest);
        self.truncate_below(pos);
        if up {
            self.add_unit_at(pos);
        }
    }

    /// Renders the digits, `"0"` for zero.
    ///
    /// Used for debugging: the conversions render through their own digit
    /// runs.
    pub fn to_chars(&self, uppercase: bool) -> String {
        let len = self.digit_len().max(1);
        let digits = (0..len)
            .rev()
            .map(|pos| digit_char(self.digit(pos) as u8, uppercase) as char);
        digits.collect()
    }

    /// The value, if it fits in a `u64`.
    pub fn to_u64(&self) -> Option<u64> {
        let modulus = u64::from(self.radix.cell_modulus());
        self.cells.iter().rev().try_fold(0u64, |acc, &cell| {
            acc.checked_mul(modulus)?.checked_add(u64::from(cell))
        })
    }
}

impl fmt::Debug for BigUInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_b{}", self.to_chars(false), self.radix.base())
    }
}
