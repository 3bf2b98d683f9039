//! Exact parsing of raw field text into typed values.
//!
//! The matching pattern is the gatekeeper for well-formedness; this parser
//! assumes its input already looks like a number and focuses on correct
//! interpretation. It is deliberately more lenient about separator placement
//! than the pattern, because it is also reachable from callers that bypass
//! the keystroke gate, and grouping separators carry no value anyway: they
//! are stripped wherever they appear.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::format::spec::{FormatSpec, NON_BREAKING_SPACE};

use super::kind::{NumericKind, NumericValue};

/// Exponents beyond this magnitude cannot produce a representable value of
/// any supported kind.
const MAX_EXPONENT_MAGNITUDE: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Characters outside the digit/separator/sign alphabet.
    Malformed,
    /// Digits exceed the range of the target kind.
    Overflow,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Malformed => f.write_str("text is not a number in this format"),
            ParseError::Overflow => f.write_str("number is out of range for the target kind"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses `text` under `spec` into a value of `kind`.
///
/// Placeholder states (empty text, a bare sign, bare separators) produce the
/// kind's zero sentinel so that the owning field always has a presentable
/// value. Fractional digits are truncated toward zero for the integer kinds.
pub fn parse(text: &str, spec: &FormatSpec, kind: NumericKind) -> Result<NumericValue, ParseError> {
    let text = spec.remap_alternates(text);
    match decompose(&text, spec)? {
        None => Ok(kind.zero()),
        Some(parts) => assemble(&parts, kind),
    }
}

/// Sign plus plain ASCII digit runs, exponent already applied.
struct Parts {
    negative: bool,
    int_digits: String,
    frac_digits: String,
}

fn decompose(text: &str, spec: &FormatSpec) -> Result<Option<Parts>, ParseError> {
    if !text.chars().any(|ch| ch.is_ascii_digit()) {
        return if text.chars().all(|ch| is_placeholder(ch, spec)) {
            Ok(None)
        } else {
            Err(ParseError::Malformed)
        };
    }
    let (negative, rest) = match text.strip_prefix(spec.negative_sign()) {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (mantissa, exponent) = split_exponent(rest, spec)?;
    let exponent = parse_exponent(exponent, spec)?;
    let mantissa = strip_grouping(mantissa, spec);
    let (int_digits, frac_digits) = split_decimal(&mantissa, spec)?;
    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(ParseError::Malformed);
    }
    if !all_digits(&int_digits) || !all_digits(&frac_digits) {
        return Err(ParseError::Malformed);
    }
    let (int_digits, frac_digits) = apply_exponent(int_digits, frac_digits, exponent);
    Ok(Some(Parts {
        negative,
        int_digits,
        frac_digits,
    }))
}

fn is_placeholder(ch: char, spec: &FormatSpec) -> bool {
    ch == spec.negative_sign()
        || ch == spec.decimal_separator()
        || ch == spec.grouping_separator()
        || (spec.grouping_separator() == NON_BREAKING_SPACE && ch == ' ')
}

fn split_exponent<'a>(
    text: &'a str,
    spec: &FormatSpec,
) -> Result<(&'a str, Option<&'a str>), ParseError> {
    match text.find(['e', 'E']) {
        None => Ok((text, None)),
        Some(_) if !spec.scientific_notation_enabled() => Err(ParseError::Malformed),
        Some(idx) => Ok((&text[..idx], Some(&text[idx + 1..]))),
    }
}

/// A marker with no digits yet ("2.3e", "2.3e-") reads as exponent zero.
fn parse_exponent(exponent: Option<&str>, spec: &FormatSpec) -> Result<i64, ParseError> {
    let Some(exponent) = exponent else {
        return Ok(0);
    };
    let (negative, digits) = match exponent.strip_prefix(spec.negative_sign()) {
        Some(rest) => (true, rest),
        None => (false, exponent),
    };
    if digits.is_empty() {
        return Ok(0);
    }
    if !all_digits(digits) {
        return Err(ParseError::Malformed);
    }
    let value: i64 = digits.parse().map_err(|_| ParseError::Overflow)?;
    if value > MAX_EXPONENT_MAGNITUDE {
        return Err(ParseError::Overflow);
    }
    Ok(if negative { -value } else { value })
}

fn strip_grouping(text: &str, spec: &FormatSpec) -> String {
    if !spec.grouping_in_use() {
        return text.to_string();
    }
    let separator = spec.grouping_separator();
    text.chars()
        .filter(|ch| !(*ch == separator || (separator == NON_BREAKING_SPACE && *ch == ' ')))
        .collect()
}

fn split_decimal(mantissa: &str, spec: &FormatSpec) -> Result<(String, String), ParseError> {
    let mut parts = mantissa.splitn(3, spec.decimal_separator());
    let int_digits = parts.next().unwrap_or("").to_string();
    let frac_digits = parts.next().unwrap_or("").to_string();
    if parts.next().is_some() {
        return Err(ParseError::Malformed);
    }
    Ok((int_digits, frac_digits))
}

fn all_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

/// Shifts the decimal point by `exponent` places, padding with zeros.
fn apply_exponent(int_digits: String, frac_digits: String, exponent: i64) -> (String, String) {
    if exponent == 0 {
        return (int_digits, frac_digits);
    }
    if exponent > 0 {
        let take = exponent as usize;
        let mut int_digits = int_digits;
        if frac_digits.len() <= take {
            int_digits.push_str(&frac_digits);
            int_digits.push_str(&"0".repeat(take - frac_digits.len()));
            (int_digits, String::new())
        } else {
            int_digits.push_str(&frac_digits[..take]);
            (int_digits, frac_digits[take..].to_string())
        }
    } else {
        let take = exponent.unsigned_abs() as usize;
        let mut shifted = String::new();
        if int_digits.len() <= take {
            shifted.push_str(&"0".repeat(take - int_digits.len()));
            shifted.push_str(&int_digits);
            shifted.push_str(&frac_digits);
            (String::new(), shifted)
        } else {
            let split = int_digits.len() - take;
            shifted.push_str(&int_digits[split..]);
            shifted.push_str(&frac_digits);
            (int_digits[..split].to_string(), shifted)
        }
    }
}

fn assemble(parts: &Parts, kind: NumericKind) -> Result<NumericValue, ParseError> {
    match kind {
        NumericKind::Int32 => {
            let signed = fold_signed(parts)?;
            i32::try_from(signed)
                .map(NumericValue::Int32)
                .map_err(|_| ParseError::Overflow)
        }
        NumericKind::Int64 => {
            let signed = fold_signed(parts)?;
            i64::try_from(signed)
                .map(NumericValue::Int64)
                .map_err(|_| ParseError::Overflow)
        }
        NumericKind::Float64 => {
            let value: f64 = ascii_number(parts)
                .parse()
                .map_err(|_| ParseError::Malformed)?;
            if !value.is_finite() {
                return Err(ParseError::Overflow);
            }
            Ok(NumericValue::Float64(value))
        }
        NumericKind::Decimal => Decimal::from_str(&ascii_number(parts))
            .map(NumericValue::Decimal)
            .map_err(|_| ParseError::Overflow),
    }
}

/// Integer kinds drop the fractional digits (truncation toward zero).
fn fold_signed(parts: &Parts) -> Result<i128, ParseError> {
    let mut magnitude: i128 = 0;
    for b in parts.int_digits.bytes() {
        magnitude = magnitude
            .checked_mul(10)
            .and_then(|acc| acc.checked_add((b - b'0') as i128))
            .ok_or(ParseError::Overflow)?;
    }
    Ok(if parts.negative { -magnitude } else { magnitude })
}

fn ascii_number(parts: &Parts) -> String {
    let mut out = String::with_capacity(parts.int_digits.len() + parts.frac_digits.len() + 2);
    if parts.negative {
        out.push('-');
    }
    if parts.int_digits.is_empty() {
        out.push('0');
    } else {
        out.push_str(&parts.int_digits);
    }
    if !parts.frac_digits.is_empty() {
        out.push('.');
        out.push_str(&parts.frac_digits);
    }
    out
}
