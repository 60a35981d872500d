//! Configuration of the conversions.

use crate::bignum::Radix;

/// How the value is laid out in text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// `123.45`
    Fixed,
    /// `1.2345e+02`
    Scientific,
    /// Whichever of the two `printf`'s `%g` would pick.
    General,
}

/// Digits and exponent flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notation {
    /// Decimal digits, `e` marker, power of ten.
    Decimal,
    /// Hexadecimal digits, `s` marker, power of sixteen.
    Hex,
    /// Hexadecimal digits, `p` marker, power of two (C99 `%a`).
    HexBinary,
}

impl Notation {
    /// Base of the digits.
    pub const fn radix(self) -> Radix {
        match self {
            Self::Decimal => Radix::Decimal,
            Self::Hex | Self::HexBinary => Radix::Hexadecimal,
        }
    }

    /// Lowercase exponent marker.
    pub const fn marker(self) -> u8 {
        match self {
            Self::Decimal => b'e',
            Self::Hex => b's',
            Self::HexBinary => b'p',
        }
    }
}

/// Rounding applied when digits (or bits) are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round to nearest, ties to even.
    NearestEven,
    /// Toward +∞.
    Ceiling,
    /// Toward −∞.
    Floor,
    /// Toward zero.
    Truncate,
}

impl Default for RoundingMode {
    fn default() -> Self {
        Self::NearestEven
    }
}

impl RoundingMode {
    /// Decides whether the magnitude must be incremented at the last kept
    /// digit.
    ///
    /// - `first` is the first dropped digit, `half` is half the base.
    /// - `rest` tells if anything below `first` is non-zero.
    /// - `last_odd` is the parity of the last kept digit.
    pub(crate) fn rounds_up(
        self,
        negative: bool,
        last_odd: bool,
        first: u32,
        half: u32,
        rest: bool,
    ) -> bool {
        let inexact = first != 0 || rest;
        match self {
            Self::NearestEven => first > half || (first == half && (rest || last_odd)),
            Self::Ceiling => !negative && inexact,
            Self::Floor => negative && inexact,
            Self::Truncate => false,
        }
    }
}

/// Options of [`ftos`](crate::ftos).
///
/// # Example
///
/// ```
/// use fltext::{ftos, FormatOptions, Layout};
///
/// let options = FormatOptions::new(Layout::Scientific).precision(3).uppercase(true);
/// assert_eq!(ftos(1234.5f64, &options), "1.234E+03");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    pub layout: Layout,
    pub notation: Notation,
    /// Digits after the point (fixed), after the leading digit (scientific),
    /// or significant digits (general).
    pub precision: usize,
    pub rounding: RoundingMode,
    /// Uppercase digits, markers and special values.
    pub uppercase: bool,
    /// Emit every digit of the exact value, ignoring `precision`.
    pub exact: bool,
    /// Strip trailing zeros of the fraction.
    pub trim_zeros: bool,
    /// Do not pad the exponent to two digits.
    pub short_exponent: bool,
    /// Always emit the decimal point.
    pub force_point: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::new(Layout::Fixed)
    }
}

impl FormatOptions {
    pub const fn new(layout: Layout) -> Self {
        Self {
            layout,
            notation: Notation::Decimal,
            precision: 6,
            rounding: RoundingMode::NearestEven,
            uppercase: false,
            exact: false,
            trim_zeros: false,
            short_exponent: false,
            force_point: false,
        }
    }

    pub const fn notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }

    pub const fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub const fn rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    pub const fn uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    pub const fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    pub const fn trim_zeros(mut self, trim_zeros: bool) -> Self {
        self.trim_zeros = trim_zeros;
        self
    }

    pub const fn short_exponent(mut self, short_exponent: bool) -> Self {
        self.short_exponent = short_exponent;
        self
    }

    pub const fn force_point(mut self, force_point: bool) -> Self {
        self.force_point = force_point;
        self
    }
}

/// Options of [`stof`](crate::stof).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub notation: Notation,
    pub rounding: RoundingMode,
    /// Stop at the first byte that cannot extend the number instead of
    /// failing on trailing text.
    pub partial: bool,
    /// When `false`, results below the normal range become signed zeros.
    pub subnormals: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new(Notation::Decimal)
    }
}

impl ParseOptions {
    pub const fn new(notation: Notation) -> Self {
        Self {
            notation,
            rounding: RoundingMode::NearestEven,
            partial: false,
            subnormals: true,
        }
    }

    pub const fn rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    pub const fn partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    pub const fn subnormals(mut self, subnormals: bool) -> Self {
        self.subnormals = subnormals;
        self
    }
}
