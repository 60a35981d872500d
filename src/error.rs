use std::fmt;

/// Errors produced while reading digits into a bignum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BigNumError {
    /// The character is not a digit of the requested base.
    #[error("invalid digit for base {1} : '{0}'")]
    InvalidDigit(char, u32),
    /// More significant digits than the container was sized for.
    ///
    /// Containers are sized from the largest value the target type can hold,
    /// so this always means the value is out of range.
    #[error("number exceeds {0} digits")]
    Overflow(usize),
}

/// Kind of errors returned by [`stof`](crate::stof).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No digits were found in the number
    Empty,
    /// A character that cannot start or continue a number.
    Invalid(char, u32),
    /// An exponent marker was not followed by any digit.
    NoExponent,
    /// The number was complete, but more text followed it.
    UnexpectedCharacter(char),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Empty => formatter.write_str("empty number"),
            Self::Invalid(c, base) => {
                write!(formatter, "invalid digit for base {} : '{}'", base, c)
            }
            Self::NoExponent => formatter.write_str("expected number after exponent marker"),
            Self::UnexpectedCharacter(c) => write!(formatter, "unexpected character : '{}'", c),
        }
    }
}

/// Malformed input text.
///
/// `position` is the byte offset at which parsing broke, or `0` if nothing
/// could be parsed at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} (at byte {position})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

/// The output buffer given to [`ftos_into`](crate::ftos_into) was too small.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("buffer too small : {required} bytes needed")]
pub struct BufferTooSmall {
    /// Exact length of the formatted text.
    pub required: usize,
}
