//! Tokenization for the RPN kernel
//!
//! A token is a maximal run of non-delimiter characters. Delimiters are
//! space, tab, newline and carriage return. Tokens borrow from the input.

use nom::{
    bytes::complete::{take_till1, take_while},
    multi::many0,
    sequence::{preceded, terminated},
    IResult,
};
fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn delimiters(input: &str) -> IResult<&str, &str> {
    take_while(is_delimiter)(input)
}

/// Parse one token, skipping any leading delimiters
fn token(input: &str) -> IResult<&str, &str> {
    preceded(delimiters, take_till1(is_delimiter))(input)
}

/// Split a request body into tokens, left to right
///
/// Never fails: every byte sequence is either delimiters or token text.
/// `token` always consumes input, so `many0` stops only when nothing but
/// delimiters is left, and `terminated` then eats those.
pub fn lex(input: &str) -> Vec<&str> {
    terminated(many0(token), delimiters)(input)
        .map(|(_, tokens)| tokens)
        .unwrap_or_default()
}
