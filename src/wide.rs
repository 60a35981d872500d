//! Fixed-width unsigned integers wider than `u64`.
//!
//! Used to accumulate a significand together with its guard bits while text
//! is folded back into a float.
//!
//! The fold only shifts, adds and tests bits; [`sub`](ExtUInt::sub),
//! [`set_bit`](ExtUInt::set_bit) and [`clear_bit`](ExtUInt::clear_bit)
//! complete the integer for other callers.

use std::fmt;

/// Unsigned integer of `64 * N` bits.
///
/// Words are stored most significant first; bit indices count from the
/// least significant bit of the whole number.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ExtUInt<const N: usize> {
    words: [u64; N],
}

impl<const N: usize> ExtUInt<N> {
    pub const BITS: u32 = 64 * N as u32;

    pub const fn zero() -> Self {
        Self { words: [0; N] }
    }

    pub fn from_u64(v: u64) -> Self {
        let mut result = Self::zero();
        result.words[N - 1] = v;
        result
    }

    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Word holding bit `i`, and the bit index within it.
    fn locate(i: u32) -> (usize, u32) {
        (N - 1 - (i / 64) as usize, i % 64)
    }

    pub fn test_bit(&self, i: u32) -> bool {
        if i >= Self::BITS {
            return false;
        }
        let (word, bit) = Self::locate(i);
        self.words[word] >> bit & 1 == 1
    }

    pub fn set_bit(&mut self, i: u32) {
        let (word, bit) = Self::locate(i);
        self.words[word] |= 1 << bit;
    }

    pub fn clear_bit(&mut self, i: u32) {
        let (word, bit) = Self::locate(i);
        self.words[word] &= !(1 << bit);
    }

    /// Number of bits needed to represent the value (`0` for zero).
    pub fn bit_len(&self) -> u32 {
        match self.words.iter().position(|&w| w != 0) {
            Some(index) => (N - index) as u32 * 64 - self.words[index].leading_zeros(),
            None => 0,
        }
    }

    /// Returns `true` if every bit below `i` is zero.
    pub fn is_zero_below(&self, i: u32) -> bool {
        let i = i.min(Self::BITS);
        let full = (i / 64) as usize;
        let low_words = &self.words[N - full..];
        if !low_words.iter().all(|&w| w == 0) {
            return false;
        }
        match i % 64 {
            0 => true,
            bit => self.words[N - 1 - full] & ((1 << bit) - 1) == 0,
        }
    }

    /// Shifts left by `bits`; bits pushed out of the top are lost.
    pub fn shl(&mut self, bits: u32) {
        if bits >= Self::BITS {
            *self = Self::zero();
            return;
        }
        let (words, bits) = ((bits / 64) as usize, bits % 64);
        for i in 0..N {
            let hi = self.words.get(i + words).copied().unwrap_or(0);
            let lo = self.words.get(i + words + 1).copied().unwrap_or(0);
            self.words[i] = match bits {
                0 => hi,
                _ => hi << bits | lo >> (64 - bits),
            };
        }
    }

    /// Shifts right by `bits`, returning `true` if a non-zero bit was
    /// shifted out.
    pub fn shr(&mut self, bits: u32) -> bool {
        let sticky = !self.is_zero_below(bits);
        if bits >= Self::BITS {
            *self = Self::zero();
            return sticky;
        }
        let (words, bits) = ((bits / 64) as usize, bits % 64);
        for i in (0..N).rev() {
            let lo = match i.checked_sub(words) {
                Some(j) => self.words[j],
                None => 0,
            };
            let hi = match i.checked_sub(words + 1) {
                Some(j) => self.words[j],
                None => 0,
            };
            self.words[i] = match bits {
                0 => lo,
                _ => lo >> bits | hi << (64 - bits),
            };
        }
        sticky
    }

    /// ORs `v` into the lowest word.
    pub fn or_low(&mut self, v: u64) {
        self.words[N - 1] |= v;
    }

    /// Adds `v`, returning the carry out of the top.
    pub fn add_u64(&mut self, v: u64) -> bool {
        let mut carry = v;
        for word in self.words.iter_mut().rev() {
            if carry == 0 {
                break;
            }
            let (sum, overflow) = word.overflowing_add(carry);
            *word = sum;
            carry = overflow as u64;
        }
        carry != 0
    }

    /// Subtracts `other`, returning `true` on borrow (wrap-around).
    pub fn sub(&mut self, other: &Self) -> bool {
        let mut borrow = false;
        for (a, &b) in self.words.iter_mut().zip(other.words.iter()).rev() {
            let (v, borrow1) = a.overflowing_sub(b);
            let (v, borrow2) = v.overflowing_sub(borrow as u64);
            *a = v;
            borrow = borrow1 || borrow2;
        }
        borrow
    }

    /// The lowest 64 bits.
    pub fn low_u64(&self) -> u64 {
        self.words[N - 1]
    }
}

impl<const N: usize> fmt::Debug for ExtUInt<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("0x")?;
        for (i, word) in self.words.iter().enumerate() {
            if i != 0 {
                f.write_str("_")?;
            }
            write!(f, "{:016x}", word)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ExtUInt;

    type U192 = ExtUInt<3>;

    #[test]
    fn bits() {
        let mut x = U192::zero();
        assert_eq!(x.bit_len(), 0);
        x.set_bit(130);
        assert!(x.test_bit(130));
        assert_eq!(x.bit_len(), 131);
        assert!(x.is_zero_below(130));
        assert!(!x.is_zero_below(131));
        x.set_bit(3);
        assert!(!x.is_zero_below(4));
        assert!(x.is_zero_below(3));
        x.clear_bit(130);
        assert_eq!(x.bit_len(), 4);
        assert!(!x.test_bit(500));
    }

    #[test]
    fn shifts() {
        let mut x = U192::from_u64(0x8000_0000_0000_0001);
        x.shl(64);
        assert_eq!(x.bit_len(), 128);
        x.shl(3);
        assert!(x.test_bit(130) && x.test_bit(67));
        assert!(!x.shr(67));
        assert_eq!(x.low_u64(), 0x8000_0000_0000_0001);
        assert!(x.shr(1));
        assert_eq!(x.low_u64(), 0x4000_0000_0000_0000);
        assert!(!x.shr(62));
        assert_eq!(x.low_u64(), 1);
        assert!(x.shr(200));
        assert!(x.is_zero());
    }

    #[test]
    fn arithmetic() {
        let mut x = U192::from_u64(u64::MAX);
        assert!(!x.add_u64(1));
        assert_eq!(x.bit_len(), 65);
        assert_eq!(x.low_u64(), 0);
        assert!(!x.sub(&U192::from_u64(1)));
        assert_eq!(x.low_u64(), u64::MAX);
        assert_eq!(x.bit_len(), 64);
        let mut zero = U192::zero();
        assert!(zero.sub(&U192::from_u64(1)));
        assert_eq!(zero.bit_len(), 192);
        assert!(zero.add_u64(1));
        assert!(zero.is_zero());
        let mut x = U192::zero();
        x.or_low(0b101);
        assert_eq!(x.low_u64(), 5);
    }
}
