//! Core data types for the RPN kernel
//!
//! A `Word` is an untagged 64-bit pattern. Whether it holds an integer or a
//! double is decided by the operator that consumes it, never by the word.

use std::fmt;

/// An untagged 64-bit stack cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Word(pub u64);

impl Word {
    pub const ZERO: Word = Word(0);

    pub fn from_int(v: i64) -> Self {
        Word(v as u64)
    }

    pub fn from_float(v: f64) -> Self {
        Word(v.to_bits())
    }

    pub fn from_bool(v: bool) -> Self {
        Word(u64::from(v))
    }

    /// Reinterpret the bits as a signed integer
    pub fn int(self) -> i64 {
        self.0 as i64
    }

    /// Reinterpret the bits as an IEEE-754 double
    pub fn float(self) -> f64 {
        f64::from_bits(self.0)
    }

    pub fn bits(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Word {
    /// Default rendering is always signed decimal
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.int())
    }
}

/// Operators recognized by dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    // Integer arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    // Bitwise
    And,
    Or,
    Not,
    Shl,
    Sar,
    // Comparison
    Lt,
    Gt,
    Eq,
    // Integer algorithms
    Gcd,
    Fact,
    // Stack manipulation
    Dup,
    Swap,
    Drop,
    // Print-style (consume, no push back)
    PrintHex,
    PrintBin,
    PrintFloat,
    // Float arithmetic
    FAdd,
    FSub,
    FMul,
    FDiv,
    FMin,
    FMax,
    Sqrt,
    FAbs,
    FNeg,
    // Bridges
    IntToFloat,
    FloatToInt,
}

impl Op {
    /// The token spelling of this operator
    pub fn mnemonic(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Mod => "%",
            Op::Pow => "^",
            Op::And => "&",
            Op::Or => "|",
            Op::Not => "~",
            Op::Shl => "l",
            Op::Sar => "r",
            Op::Lt => "<",
            Op::Gt => ">",
            Op::Eq => "=",
            Op::Gcd => "g",
            Op::Fact => "!",
            Op::Dup => "d",
            Op::Swap => "s",
            Op::Drop => "x",
            Op::PrintHex => "h",
            Op::PrintBin => "b",
            Op::PrintFloat => "fp",
            Op::FAdd => "f+",
            Op::FSub => "f-",
            Op::FMul => "f*",
            Op::FDiv => "f/",
            Op::FMin => "fmin",
            Op::FMax => "fmax",
            Op::Sqrt => "sqrt",
            Op::FAbs => "fabs",
            Op::FNeg => "fneg",
            Op::IntToFloat => "flt",
            Op::FloatToInt => "int",
        }
    }

    /// Number of operands that must be present before the operator runs
    pub fn arity(self) -> usize {
        match self {
            Op::Not
            | Op::Fact
            | Op::Dup
            | Op::Drop
            | Op::PrintHex
            | Op::PrintBin
            | Op::PrintFloat
            | Op::Sqrt
            | Op::FAbs
            | Op::FNeg
            | Op::IntToFloat
            | Op::FloatToInt => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// One resolved token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A numeric literal, already encoded as a word
    Literal(Word),
    /// An operator
    Op(Op),
}
