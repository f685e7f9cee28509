//! Token resolution
//!
//! Maps each token to a `Command`. Resolution is longest-match-with-fallback:
//! an exact multi-character mnemonic wins, then an exact single-character
//! operator, and anything else is handed to the literal parser. This is what
//! separates `s` (swap) from `sqrt`, and makes `sx` or `>=` literals.

use crate::ast::{Command, Op};
use crate::literal::{parse_literal, LiteralError};

fn mnemonic(token: &str) -> Option<Op> {
    let op = match token {
        "f+" => Op::FAdd,
        "f-" => Op::FSub,
        "f*" => Op::FMul,
        "f/" => Op::FDiv,
        "fp" => Op::PrintFloat,
        "flt" => Op::IntToFloat,
        "int" => Op::FloatToInt,
        "sqrt" => Op::Sqrt,
        "fabs" => Op::FAbs,
        "fneg" => Op::FNeg,
        "fmin" => Op::FMin,
        "fmax" => Op::FMax,
        _ => return None,
    };
    Some(op)
}

fn single_char(c: char) -> Option<Op> {
    let op = match c {
        '+' => Op::Add,
        '-' => Op::Sub,
        '*' => Op::Mul,
        '/' => Op::Div,
        '%' => Op::Mod,
        '^' => Op::Pow,
        '&' => Op::And,
        '|' => Op::Or,
        '~' => Op::Not,
        '<' => Op::Lt,
        '>' => Op::Gt,
        '=' => Op::Eq,
        'l' => Op::Shl,
        'r' => Op::Sar,
        'g' => Op::Gcd,
        '!' => Op::Fact,
        'd' => Op::Dup,
        's' => Op::Swap,
        'x' => Op::Drop,
        'h' => Op::PrintHex,
        'b' => Op::PrintBin,
        _ => return None,
    };
    Some(op)
}

/// Resolve a token to an operator, if it names one
pub fn resolve_op(token: &str) -> Option<Op> {
    if let Some(op) = mnemonic(token) {
        return Some(op);
    }

    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => single_char(c),
        _ => None,
    }
}

/// Resolve a token to a command
pub fn parse_token(token: &str, strict: bool) -> Result<Command, LiteralError> {
    match resolve_op(token) {
        Some(op) => Ok(Command::Op(op)),
        None => parse_literal(token, strict).map(Command::Literal),
    }
}

/// Resolve every token of a request, stopping at the first invalid literal
pub fn parse(tokens: &[&str], strict: bool) -> Result<Vec<Command>, LiteralError> {
    tokens.iter().map(|t| parse_token(t, strict)).collect()
}
