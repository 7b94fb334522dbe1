//! Raw diagnostic command: `"<addr> <val>"`.
//!
//! Both numbers use C prefix rules: `0x` hex, leading `0` octal, otherwise
//! decimal. One trailing newline is accepted, as written by `echo`.

use core::str::FromStr;

/// Help text shown when the diagnostic attribute is read.
pub const USAGE: &str = "Usage: echo <addr> <val> > test\n";

/// A parsed `(register, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiagnosticCommand {
    /// Register (bus) address.
    pub addr: u8,
    /// Byte to write.
    pub val: u8,
}

/// Why a diagnostic command was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Empty input.
    MissingAddress,
    /// Second argument missing.
    MissingValue,
    /// Not a number in the detected base.
    InvalidNumber,
    /// Number does not fit a byte.
    OutOfRange,
    /// More than two arguments.
    TrailingInput,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingAddress => write!(f, "Address missing"),
            Self::MissingValue => write!(f, "Second argument missing"),
            Self::InvalidNumber => write!(f, "Invalid number"),
            Self::OutOfRange => write!(f, "Value does not fit in a byte"),
            Self::TrailingInput => write!(f, "Too many arguments"),
        }
    }
}

impl DiagnosticCommand {
    /// Parse `"<addr> <val>"`.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let input = input.strip_suffix('\n').unwrap_or(input);
        let mut args = input.split_whitespace();
        let addr = parse_byte(args.next().ok_or(ParseError::MissingAddress)?)?;
        let val = parse_byte(args.next().ok_or(ParseError::MissingValue)?)?;
        if args.next().is_some() {
            return Err(ParseError::TrailingInput);
        }
        Ok(Self { addr, val })
    }
}

impl FromStr for DiagnosticCommand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_byte(s: &str) -> Result<u8, ParseError> {
    let (digits, radix) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if s.len() > 1 {
        match s.strip_prefix('0') {
            Some(oct) => (oct, 8),
            None => (s, 10),
        }
    } else {
        (s, 10)
    };

    // from_str_radix would accept a sign; the command syntax does not.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ParseError::InvalidNumber);
    }
    let n = u32::from_str_radix(digits, radix).map_err(|_| ParseError::OutOfRange)?;
    u8::try_from(n).map_err(|_| ParseError::OutOfRange)
}
