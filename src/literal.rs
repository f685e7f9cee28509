//! Numeric literal parsing
//!
//! Any token that is not an operator is a literal. Lexical inspection picks
//! the encoding:
//!
//! - a token containing `.` is a decimal double, stored as its IEEE-754
//!   bits. An exponent is part of the number only when it has digits, so
//!   `1.5e` reads as `1.5`. There are no hex floats: `0x1.8` reads as `0`.
//! - otherwise an integer: optional `-`, then `0x`/`0X` (base 16),
//!   `0b`/`0B` (base 2) or nothing (base 10)
//!
//! Permissive mode stops at the first character outside the active base and
//! keeps what it has. Accumulation wraps on overflow. Strict mode rejects
//! any token that is not consumed completely.

use crate::ast::Word;
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while},
    character::complete::{char, digit0, digit1, one_of},
    combinator::{opt, recognize, value},
    sequence::{pair, tuple},
    IResult,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("Invalid numeric literal: {0}")]
    Invalid(String),
}

/// Parse a token into a word
pub fn parse_literal(token: &str, strict: bool) -> Result<Word, LiteralError> {
    if token.contains('.') {
        parse_float(token, strict).map(Word::from_float)
    } else {
        parse_int(token, strict).map(Word::from_int)
    }
}

fn mantissa(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ))(input)
}

fn exponent(input: &str) -> IResult<&str, &str> {
    recognize(tuple((one_of("eE"), opt(one_of("+-")), digit1)))(input)
}

fn special(input: &str) -> IResult<&str, &str> {
    alt((
        tag_no_case("infinity"),
        tag_no_case("inf"),
        tag_no_case("nan"),
    ))(input)
}

/// Recognize the longest decimal floating-point prefix
fn float_prefix(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        opt(one_of("+-")),
        alt((recognize(pair(mantissa, opt(exponent))), special)),
    ))(input)
}

/// Longest valid floating-point prefix; 0.0 when there is none
fn parse_float(token: &str, strict: bool) -> Result<f64, LiteralError> {
    let invalid = || LiteralError::Invalid(token.to_string());

    match float_prefix(token) {
        Ok((rest, text)) if rest.is_empty() || !strict => {
            text.parse::<f64>().map_err(|_| invalid())
        }
        _ if strict => Err(invalid()),
        _ => Ok(0.0),
    }
}

fn sign(input: &str) -> IResult<&str, bool> {
    let (input, minus) = opt(char('-'))(input)?;
    Ok((input, minus.is_some()))
}

fn radix(input: &str) -> IResult<&str, u32> {
    let (input, base) = opt(alt((
        value(16, tag_no_case("0x")),
        value(2, tag_no_case("0b")),
    )))(input)?;
    Ok((input, base.unwrap_or(10)))
}

fn parse_int(token: &str, strict: bool) -> Result<i64, LiteralError> {
    let invalid = || LiteralError::Invalid(token.to_string());

    let (input, negative) = sign(token).map_err(|_| invalid())?;
    let (input, base) = radix(input).map_err(|_| invalid())?;
    let (rest, digits) = take_while::<_, &str, nom::error::Error<&str>>(|c: char| {
        c.is_digit(base)
    })(input)
    .map_err(|_| invalid())?;

    if strict && (digits.is_empty() || !rest.is_empty()) {
        return Err(invalid());
    }

    let magnitude = digits
        .chars()
        .filter_map(|c| c.to_digit(base))
        .fold(0i64, |acc, d| {
            acc.wrapping_mul(i64::from(base)).wrapping_add(i64::from(d))
        });

    Ok(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(token: &str) -> i64 {
        parse_literal(token, false).unwrap().int()
    }

    fn float(token: &str) -> f64 {
        parse_literal(token, false).unwrap().float()
    }

    #[test]
    fn decimal_integers() {
        assert_eq!(int("42"), 42);
        assert_eq!(int("-7"), -7);
        assert_eq!(int("0"), 0);
    }

    #[test]
    fn hex_and_binary() {
        assert_eq!(int("0x1F"), 31);
        assert_eq!(int("0XfF"), 255);
        assert_eq!(int("0b101"), 5);
        assert_eq!(int("0B11"), 3);
        assert_eq!(int("-0xA"), -10);
        assert_eq!(int("0x3FF0000000000000"), 0x3FF0_0000_0000_0000);
    }

    #[test]
    fn trailing_garbage_truncates() {
        assert_eq!(int("12abc"), 12);
        assert_eq!(int("0b1012"), 5);
        assert_eq!(int("0xZZ"), 0);
        assert_eq!(int("abc"), 0);
        assert_eq!(int(">="), 0);
        assert_eq!(int("+5"), 0);
    }

    #[test]
    fn integer_overflow_wraps() {
        assert_eq!(int("9223372036854775808"), i64::MIN);
        assert_eq!(int("0xFFFFFFFFFFFFFFFF"), -1);
        assert_eq!(int("0x1FFFFFFFFFFFFFFFF"), -1);
    }

    #[test]
    fn floats_keep_ieee_bits() {
        assert_eq!(float("2.5"), 2.5);
        assert_eq!(float("-5.0"), -5.0);
        assert_eq!(float(".5"), 0.5);
        assert_eq!(float("3.14159"), 3.14159);
        assert_eq!(
            parse_literal("1.0", false).unwrap().bits(),
            0x3FF0_0000_0000_0000
        );
    }

    #[test]
    fn float_prefix_and_fallback() {
        assert_eq!(float("3.5abc"), 3.5);
        assert_eq!(float("1.5e2"), 150.0);
        assert_eq!(float("1.5e"), 1.5);
        assert_eq!(float("2.5e+"), 2.5);
        assert_eq!(float("."), 0.0);
        assert_eq!(float("x.y"), 0.0);
    }

    #[test]
    fn dangling_exponent_keeps_mantissa() {
        assert_eq!(float("1.5ex"), 1.5);
        assert_eq!(float("1.5E-"), 1.5);
        assert_eq!(float("2.5E-1"), 0.25);
        assert_eq!(float("-1.e3"), -1000.0);
        assert!(parse_literal("1.5e", true).is_err());
        assert_eq!(parse_literal("1.5e1", true).unwrap().float(), 15.0);
    }

    #[test]
    fn hex_floats_are_not_recognized() {
        assert_eq!(float("0x1.8"), 0.0);
        assert!(parse_literal("0x1.8", true).is_err());
    }

    #[test]
    fn float_specials() {
        assert_eq!(float("inf.0"), f64::INFINITY);
        assert_eq!(float("-Infinity."), f64::NEG_INFINITY);
        assert!(float("nan.").is_nan());
    }

    #[test]
    fn strict_mode_rejects_garbage() {
        assert!(parse_literal("12abc", true).is_err());
        assert!(parse_literal("0x", true).is_err());
        assert!(parse_literal("3.5abc", true).is_err());
        assert!(parse_literal("x.y", true).is_err());
        assert_eq!(parse_literal("0xff", true).unwrap().int(), 255);
        assert_eq!(parse_literal("-2.25", true).unwrap().float(), -2.25);
    }
}
