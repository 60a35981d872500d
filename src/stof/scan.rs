//! Splitting text into sign, digits and exponent.
//!
//! number  ::= "-"? ( special | digits ( ("e" | "s" | "p") ~ ("+" | "-")? ~ decimal+ )? )
//!
//! digits  ::= digit+ ~ ( "." ~ digit* )? | "." ~ digit+
//!
//! special ::= "infinity" | "inf" | "nan" ~ ( "()" | "(ind)" | "(snan)" )?
//!
//! Only the exponent marker of the requested notation is recognized, and
//! letters are matched case-insensitively.

use crate::{
    bignum::{digit_in, Radix},
    error::{ParseError, ParseErrorKind},
    options::Notation,
};

/// Exponents are saturated to this magnitude, which is past every format's
/// range whatever the number of digits.
const MAX_EXPONENT: i64 = 1 << 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Infinity,
    Nan {
        signaling: bool,
    },
    Number {
        integral: &'a [u8],
        fractional: &'a [u8],
        /// Power of the base (decimal and hex), or of two (hex-binary).
        exponent: i64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Scan<'a> {
    pub(crate) negative: bool,
    pub(crate) token: Token<'a>,
    /// Length of the recognized text.
    pub(crate) consumed: usize,
}

/// Extract the longest prefix from input where all elements match `predicate`.
fn eat<F>(input: &[u8], mut predicate: F) -> (&[u8], &[u8])
where
    F: FnMut(&u8) -> bool,
{
    let position = input.iter().position(|c| !predicate(c)).unwrap_or(input.len());
    input.split_at(position)
}

fn eat_digits(input: &[u8], radix: Radix) -> (&[u8], &[u8]) {
    eat(input, |&c| digit_in(c, radix).is_some())
}

/// Case-insensitive prefix test.
fn starts_with_ignore_case(input: &[u8], prefix: &[u8]) -> bool {
    input.len() >= prefix.len() && input[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn special(input: &[u8]) -> Option<(Token<'static>, usize)> {
    const SPECIALS: [(&[u8], Token<'static>); 6] = [
        (b"infinity", Token::Infinity),
        (b"inf", Token::Infinity),
        (b"nan(snan)", Token::Nan { signaling: true }),
        (b"nan(ind)", Token::Nan { signaling: false }),
        (b"nan()", Token::Nan { signaling: false }),
        (b"nan", Token::Nan { signaling: false }),
    ];
    SPECIALS
        .iter()
        .find(|(text, _)| starts_with_ignore_case(input, text))
        .map(|&(text, token)| (token, text.len()))
}

/// Parses a decimal exponent, returning it with the number of bytes read,
/// or `None` if no digit follows the optional sign.
fn exponent(input: &[u8]) -> Option<(i64, usize)> {
    let (negative, unsigned) = match input.first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    let (digits, _) = eat_digits(unsigned, Radix::Decimal);
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.iter().fold(0i64, |exp, &c| {
        (exp * 10 + i64::from(c - b'0')).min(MAX_EXPONENT)
    });
    let read = input.len() - unsigned.len() + digits.len();
    Some((if negative { -magnitude } else { magnitude }, read))
}

/// Character starting at byte `position`.
fn char_at(text: &str, position: usize) -> char {
    text.get(position..)
        .and_then(|rest| rest.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Recognizes the number at the start of `source`.
///
/// When `partial` is false, the whole text must be the number.
pub(crate) fn scan(
    source: &str,
    notation: Notation,
    partial: bool,
) -> Result<Scan<'_>, ParseError> {
    let text = source.as_bytes();
    let radix = notation.radix();
    let negative = text.first() == Some(&b'-');
    let start = negative as usize;
    let input = &text[start..];

    let (token, consumed, broken) = if let Some((token, len)) = special(input) {
        (token, start + len, None)
    } else {
        let (integral, rest) = eat_digits(input, radix);
        let fractional: &[u8] = match rest.split_first() {
            Some((&b'.', rest)) => eat_digits(rest, radix).0,
            _ => &[],
        };
        if integral.is_empty() && fractional.is_empty() {
            let kind = match input.first() {
                Some(&c) if c != b'.' => {
                    ParseErrorKind::Invalid(char_at(source, start), radix.base())
                }
                _ => ParseErrorKind::Empty,
            };
            return Err(ParseError { kind, position: 0 });
        }
        let mut consumed = start + integral.len();
        if consumed < text.len() && text[consumed] == b'.' {
            consumed += 1 + fractional.len();
        }

        let rest = &text[consumed..];
        let (exp, broken) = match rest.first() {
            Some(c) if c.to_ascii_lowercase() == notation.marker() => match exponent(&rest[1..]) {
                Some((exp, read)) => {
                    consumed += 1 + read;
                    (exp, None)
                }
                None => (0, Some(ParseErrorKind::NoExponent)),
            },
            _ => (0, None),
        };
        let token = Token::Number {
            integral,
            fractional,
            exponent: exp,
        };
        (token, consumed, broken)
    };

    if !partial && consumed < text.len() {
        let kind = broken
            .unwrap_or_else(|| ParseErrorKind::UnexpectedCharacter(char_at(source, consumed)));
        return Err(ParseError {
            kind,
            position: consumed,
        });
    }
    Ok(Scan {
        negative,
        token,
        consumed,
    })
}
