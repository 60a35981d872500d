//! Assembling the final text out of digit runs.

use crate::{float::NanKind, options::FormatOptions};
use std::fmt::{self, Write};

/// Formatted parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Part<'a> {
    /// Given number of zero digits.
    Zero(usize),
    /// A decimal number.
    Num(u32),
    /// A verbatim copy of given bytes.
    Copy(&'a [u8]),
}

impl<'a> Part<'a> {
    /// Returns the exact byte length of given part.
    pub(crate) fn len(&self) -> usize {
        match *self {
            Part::Zero(count) => count,
            Part::Num(mut v) => {
                let mut len = 1;
                while v >= 10 {
                    v /= 10;
                    len += 1;
                }
                len
            }
            Part::Copy(buf) => buf.len(),
        }
    }

    /// Writes a part into the supplied buffer.
    /// Returns the number of written bytes, or `None` if the buffer is not enough.
    pub(crate) fn write(&self, out: &mut [u8]) -> Option<usize> {
        let len = self.len();
        let out = out.get_mut(..len)?;
        match *self {
            Part::Zero(_) => {
                for c in out {
                    *c = b'0';
                }
            }
            Part::Num(mut v) => {
                for c in out.iter_mut().rev() {
                    *c = b'0' + (v % 10) as u8;
                    v /= 10;
                }
            }
            Part::Copy(buf) => out.copy_from_slice(buf),
        }
        Some(len)
    }
}

/// Formatted result containing one or more parts.
#[derive(Clone, Debug)]
pub(crate) struct Formatted<'a> {
    /// Either `""` or `"-"`.
    pub(crate) sign: &'static str,
    pub(crate) parts: Vec<Part<'a>>,
}

impl<'a> Formatted<'a> {
    /// Returns the exact byte length of combined formatted result.
    pub(crate) fn len(&self) -> usize {
        self.parts
            .iter()
            .fold(self.sign.len(), |len, part| len.saturating_add(part.len()))
    }

    /// Writes all formatted parts into the supplied buffer.
    /// Returns the number of written bytes, or `None` if the buffer is not enough.
    /// (It may still leave partially written bytes in the buffer.)
    pub(crate) fn write(&self, out: &mut [u8]) -> Option<usize> {
        out.get_mut(..self.sign.len())?
            .copy_from_slice(self.sign.as_bytes());
        let mut written = self.sign.len();
        for part in &self.parts {
            written += part.write(&mut out[written..])?;
        }
        Some(written)
    }
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.sign)?;
        for part in &self.parts {
            match *part {
                Part::Zero(count) => {
                    for _ in 0..count {
                        formatter.write_char('0')?;
                    }
                }
                Part::Num(v) => write!(formatter, "{}", v)?,
                Part::Copy(buf) => {
                    for &c in buf {
                        formatter.write_char(c as char)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn sign(negative: bool) -> &'static str {
    if negative {
        "-"
    } else {
        ""
    }
}

pub(crate) fn infinity(negative: bool, uppercase: bool) -> Formatted<'static> {
    let text: &[u8] = if uppercase { b"INF" } else { b"inf" };
    Formatted {
        sign: sign(negative),
        parts: vec![Part::Copy(text)],
    }
}

pub(crate) fn nan(negative: bool, kind: NanKind, uppercase: bool) -> Formatted<'static> {
    let text: &[u8] = match (kind, uppercase) {
        (NanKind::Quiet, false) => b"nan",
        (NanKind::Quiet, true) => b"NAN",
        (NanKind::Indeterminate, false) => b"nan(ind)",
        (NanKind::Indeterminate, true) => b"NAN(IND)",
        (NanKind::Signaling, false) => b"nan(snan)",
        (NanKind::Signaling, true) => b"NAN(SNAN)",
    };
    Formatted {
        sign: sign(negative),
        parts: vec![Part::Copy(text)],
    }
}

/// Digits of a rounded finite value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Digits {
    pub(crate) negative: bool,
    /// Digits before the point; never empty.
    pub(crate) int: Vec<u8>,
    /// Digits after the point, down to the last non-zero one.
    pub(crate) frac: Vec<u8>,
    /// Zeros completing `frac` up to the precision.
    pub(crate) frac_zeros: usize,
    /// Exponent, for the scientific layouts.
    pub(crate) exponent: Option<i64>,
}

impl Digits {
    pub(crate) fn layout(&self, options: &FormatOptions) -> Formatted<'_> {
        let mut frac = &self.frac[..];
        let mut zeros = self.frac_zeros;
        if options.trim_zeros {
            zeros = 0;
            while let Some((&b'0', rest)) = frac.split_last() {
                frac = rest;
            }
        }
        let mut parts = vec![Part::Copy(&self.int)];
        if !frac.is_empty() || zeros > 0 || options.force_point {
            parts.push(Part::Copy(b"."));
        }
        if !frac.is_empty() {
            parts.push(Part::Copy(frac));
        }
        if zeros > 0 {
            parts.push(Part::Zero(zeros));
        }
        if let Some(exponent) = self.exponent {
            let marker: &[u8] = match (options.notation.marker(), options.uppercase) {
                (b'e', false) => b"e",
                (b'e', true) => b"E",
                (b's', false) => b"s",
                (b's', true) => b"S",
                (_, false) => b"p",
                (_, true) => b"P",
            };
            parts.push(Part::Copy(marker));
            parts.push(Part::Copy(if exponent < 0 { b"-" } else { b"+" }));
            let magnitude = exponent.unsigned_abs() as u32;
            if magnitude < 10 && !options.short_exponent {
                parts.push(Part::Zero(1));
            }
            parts.push(Part::Num(magnitude));
        }
        Formatted {
            sign: sign(self.negative),
            parts,
        }
    }
}
