//! Command language of the `repl` binary.
//!
//! ```text
//! ftos <number> [f32|f64|f80] [fix|sci|gen] [dec|hex|hex2] [prec=N]
//!      [exact] [upper] [ntz] [enz] [dig] [nearest|ceil|floor|trunc]
//! stof <text> [f32|f64|f80] [dec|hex|hex2] [nearest|ceil|floor|trunc]
//!      [partial] [flush]
//! help
//! ```
//!
//! `ftos` reads its (decimal) number, and prints it back with the given
//! options. `stof` prints the exact value that the text converts to, along
//! with its bit pattern.

use crate::{
    ftos, stof, BinaryFloat, FormatOptions, Layout, Notation, ParseError, ParseOptions,
    RoundingMode, F80,
};
use logos::Logos;
use std::ops::Range;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Logos)]
enum RawToken {
    #[token("=")]
    Equal,
    #[regex(r"[^ \t\r\n=]+")]
    Word,

    #[error]
    #[regex(r"[ \t\r\n]+", logos::skip)]
    Error,
}

pub const HELP: &str = "\
ftos <number> [f32|f64|f80] [fix|sci|gen] [dec|hex|hex2] [prec=N]
     [exact] [upper] [ntz] [enz] [dig] [nearest|ceil|floor|trunc]
    Print a number with the given format.
      ntz : strip trailing zeros
      enz : do not pad the exponent
      dig : always print the point
stof <text> [f32|f64|f80] [dec|hex|hex2] [nearest|ceil|floor|trunc]
     [partial] [flush]
    Print the exact value the text converts to.
      partial : stop at the first character that is not part of the number
      flush   : round values below the normal range to zero
help
    Print this message.";

/// Errors of the command language.
///
/// Most of them point at the part of the line that caused them: see
/// [`span`](CommandError::span).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command : '{name}'")]
    UnknownCommand { name: String, span: Range<usize> },
    #[error("missing number after '{command}'")]
    MissingNumber {
        command: &'static str,
        span: Range<usize>,
    },
    #[error("unknown option : '{name}'")]
    UnknownOption { name: String, span: Range<usize> },
    #[error("missing value for '{name}'")]
    MissingValue { name: String, span: Range<usize> },
    #[error("invalid value for '{name}' : '{value}'")]
    InvalidValue {
        name: String,
        value: String,
        span: Range<usize>,
    },
    #[error("unexpected character")]
    UnexpectedCharacter { span: Range<usize> },
    #[error("{error}")]
    Parse {
        error: ParseError,
        span: Range<usize>,
    },
}

impl CommandError {
    /// Part of the line at fault.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Self::Empty => None,
            Self::UnknownCommand { span, .. }
            | Self::MissingNumber { span, .. }
            | Self::UnknownOption { span, .. }
            | Self::MissingValue { span, .. }
            | Self::InvalidValue { span, .. }
            | Self::UnexpectedCharacter { span }
            | Self::Parse { span, .. } => Some(span.clone()),
        }
    }
}

/// Underline of `span`, to be printed below the line.
///
/// # Example
///
/// ```
/// use fltext::command::underline;
///
/// assert_eq!(underline(&(5..8)), "     ^^^");
/// assert_eq!(underline(&(2..2)), "  ^");
/// ```
pub fn underline(span: &Range<usize>) -> String {
    let width = (span.end.saturating_sub(span.start)).max(1);
    format!("{}{}", " ".repeat(span.start), "^".repeat(width))
}

/// A word of the command line, optionally followed by `=value`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Arg<'a> {
    key: &'a str,
    value: Option<&'a str>,
    span: Range<usize>,
}

fn args(line: &str) -> Result<Vec<Arg<'_>>, CommandError> {
    let mut lexer = RawToken::lexer(line);
    let mut args: Vec<Arg> = Vec::new();
    while let Some(token) = lexer.next() {
        let span = lexer.span();
        match token {
            RawToken::Word => args.push(Arg {
                key: lexer.slice(),
                value: None,
                span,
            }),
            RawToken::Equal => {
                let arg = match args.last_mut() {
                    Some(arg) if arg.value.is_none() && arg.span.end == span.start => arg,
                    _ => return Err(CommandError::UnexpectedCharacter { span }),
                };
                match lexer.next() {
                    Some(RawToken::Word) if lexer.span().start == span.end => {
                        arg.value = Some(lexer.slice());
                        arg.span.end = lexer.span().end;
                    }
                    _ => {
                        return Err(CommandError::MissingValue {
                            name: arg.key.to_owned(),
                            span: arg.span.start..span.end,
                        })
                    }
                }
            }
            RawToken::Error => return Err(CommandError::UnexpectedCharacter { span }),
        }
    }
    Ok(args)
}

/// Floating-point type a command works on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatType {
    F32,
    F64,
    F80,
}

fn float_type(key: &str) -> Option<FloatType> {
    match key {
        "f32" => Some(FloatType::F32),
        "f64" => Some(FloatType::F64),
        "f80" => Some(FloatType::F80),
        _ => None,
    }
}

fn notation(key: &str) -> Option<Notation> {
    match key {
        "dec" => Some(Notation::Decimal),
        "hex" => Some(Notation::Hex),
        "hex2" => Some(Notation::HexBinary),
        _ => None,
    }
}

fn rounding(key: &str) -> Option<RoundingMode> {
    match key {
        "nearest" => Some(RoundingMode::NearestEven),
        "ceil" => Some(RoundingMode::Ceiling),
        "floor" => Some(RoundingMode::Floor),
        "trunc" => Some(RoundingMode::Truncate),
        _ => None,
    }
}

fn unknown_option(line: &str, arg: &Arg) -> CommandError {
    CommandError::UnknownOption {
        name: line[arg.span.clone()].to_owned(),
        span: arg.span.clone(),
    }
}

/// A parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Ftos {
        number: String,
        /// Position of `number` in the line.
        span: Range<usize>,
        float: FloatType,
        options: FormatOptions,
    },
    Stof {
        text: String,
        /// Position of `text` in the line.
        span: Range<usize>,
        float: FloatType,
        options: ParseOptions,
    },
    Help,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let args = args(line)?;
        let (name, rest) = match args.split_first() {
            Some((name, rest)) if name.value.is_none() => (name, rest),
            Some((name, _)) => return Err(unknown_command(line, name)),
            None => return Err(CommandError::Empty),
        };
        match name.key {
            "help" => match rest.first() {
                Some(arg) => Err(unknown_option(line, arg)),
                None => Ok(Self::Help),
            },
            "ftos" => {
                let (number, rest) = number_arg(name, "ftos", rest)?;
                let mut float = FloatType::F64;
                let mut options = FormatOptions::default();
                for arg in rest {
                    match (arg.key, arg.value) {
                        ("prec", Some(value)) => match value.parse() {
                            Ok(precision) => options.precision = precision,
                            Err(_) => {
                                return Err(CommandError::InvalidValue {
                                    name: arg.key.to_owned(),
                                    value: value.to_owned(),
                                    span: arg.span.clone(),
                                })
                            }
                        },
                        ("fix", None) => options.layout = Layout::Fixed,
                        ("sci", None) => options.layout = Layout::Scientific,
                        ("gen", None) => options.layout = Layout::General,
                        ("exact", None) => options.exact = true,
                        ("upper", None) => options.uppercase = true,
                        ("ntz", None) => options.trim_zeros = true,
                        ("enz", None) => options.short_exponent = true,
                        ("dig", None) => options.force_point = true,
                        (key, None) => {
                            if let Some(kind) = float_type(key) {
                                float = kind
                            } else if let Some(kind) = notation(key) {
                                options.notation = kind
                            } else if let Some(mode) = rounding(key) {
                                options.rounding = mode
                            } else {
                                return Err(unknown_option(line, arg));
                            }
                        }
                        _ => return Err(unknown_option(line, arg)),
                    }
                }
                Ok(Self::Ftos {
                    number: line[number.span.clone()].to_owned(),
                    span: number.span.clone(),
                    float,
                    options,
                })
            }
            "stof" => {
                let (text, rest) = number_arg(name, "stof", rest)?;
                let mut float = FloatType::F64;
                let mut options = ParseOptions::default();
                for arg in rest {
                    match (arg.key, arg.value) {
                        ("partial", None) => options.partial = true,
                        ("flush", None) => options.subnormals = false,
                        (key, None) => {
                            if let Some(kind) = float_type(key) {
                                float = kind
                            } else if let Some(kind) = notation(key) {
                                options.notation = kind
                            } else if let Some(mode) = rounding(key) {
                                options.rounding = mode
                            } else {
                                return Err(unknown_option(line, arg));
                            }
                        }
                        _ => return Err(unknown_option(line, arg)),
                    }
                }
                Ok(Self::Stof {
                    text: line[text.span.clone()].to_owned(),
                    span: text.span.clone(),
                    float,
                    options,
                })
            }
            _ => Err(unknown_command(line, name)),
        }
    }

    /// Runs the command, returning the text to print.
    pub fn execute(&self) -> Result<String, CommandError> {
        match self {
            Self::Help => Ok(HELP.to_owned()),
            Self::Ftos {
                number,
                span,
                float,
                options,
            } => match float {
                FloatType::F32 => format_number::<f32>(number, span, options),
                FloatType::F64 => format_number::<f64>(number, span, options),
                FloatType::F80 => format_number::<F80>(number, span, options),
            },
            Self::Stof {
                text,
                span,
                float,
                options,
            } => match float {
                FloatType::F32 => describe::<f32>(text, span, options),
                FloatType::F64 => describe::<f64>(text, span, options),
                FloatType::F80 => describe::<F80>(text, span, options),
            },
        }
    }
}

fn unknown_command(line: &str, name: &Arg) -> CommandError {
    CommandError::UnknownCommand {
        name: line[name.span.clone()].to_owned(),
        span: name.span.clone(),
    }
}

fn number_arg<'a, 'b>(
    name: &Arg,
    command: &'static str,
    rest: &'b [Arg<'a>],
) -> Result<(&'b Arg<'a>, &'b [Arg<'a>]), CommandError> {
    rest.split_first().ok_or_else(|| CommandError::MissingNumber {
        command,
        span: name.span.clone(),
    })
}

fn parse<F: BinaryFloat>(
    text: &str,
    span: &Range<usize>,
    options: &ParseOptions,
) -> Result<crate::Parsed<F>, CommandError> {
    stof(text, options).map_err(|error| {
        let start = span.start + error.position;
        CommandError::Parse {
            error,
            span: start..(start + 1).min(span.end).max(start),
        }
    })
}

fn format_number<F: BinaryFloat>(
    number: &str,
    span: &Range<usize>,
    options: &FormatOptions,
) -> Result<String, CommandError> {
    let parsed = parse::<F>(number, span, &ParseOptions::default())?;
    Ok(ftos(parsed.value, options))
}

fn describe<F: BinaryFloat>(
    text: &str,
    span: &Range<usize>,
    options: &ParseOptions,
) -> Result<String, CommandError> {
    let parsed = parse::<F>(text, span, options)?;
    let exact = ftos(parsed.value, &FormatOptions::new(Layout::General).exact(true));
    let bits = 1 + F::EXPONENT_BITS + F::FRACTION_BITS + u32::from(F::EXPLICIT_INTEGER_BIT);
    Ok(format!(
        "{}\nbits     : 0x{:0width$x}\nconsumed : {}\nstatus   : {:?}",
        exact,
        parsed.value.to_raw(),
        parsed.consumed,
        parsed.status,
        width = ((bits + 3) / 4) as usize,
    ))
}
