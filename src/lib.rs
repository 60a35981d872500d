//! Exact conversions between binary floating-point numbers and text.
//!
//! Both directions go through an exact bignum rendition of the value, so that
//! every digit printed by [`ftos`] is correct and every float returned by
//! [`stof`] is correctly rounded, for any precision and any rounding mode.
//!
//! # Structure
//!
//! - [`bignum`] : fixed-capacity integers and fractions in base `10^9` or
//! `16^7`.
//! - [`ftos`] / [`ftos_into`] : float to text, in fixed, scientific or general
//! layout, with decimal, hexadecimal or C99 `%a` digits.
//! - [`stof`] : text to float, with a [`Status`] reporting overflows and
//! underflows.
//! - [`command`] : the small command language of the `repl` binary.
//!
//! Supported formats are `f32`, `f64` and the x87 80-bit extended [`F80`].
//!
//! # Features
//!
//! - Benchmarks can be run by activating the `bench` feature :
//! `cargo bench --bench convert --features bench`.
#![cfg_attr(not(test), warn(clippy::panic))]
#![warn(unreachable_pub)]

pub mod bignum;
pub mod command;
mod error;
pub mod float;
mod ftos;
mod options;
mod stof;
pub mod wide;

pub use self::error::{BigNumError, BufferTooSmall, ParseError, ParseErrorKind};
pub use self::float::{BinaryFloat, F80};
pub use self::ftos::{ftos, ftos_into};
pub use self::options::{FormatOptions, Layout, Notation, ParseOptions, RoundingMode};
pub use self::stof::{stof, Parsed, Status};
