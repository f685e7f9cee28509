//! Evaluator for the RPN kernel
//!
//! One call to [`Evaluator::eval_line`] is one Evaluation Step:
//!
//! ```text
//! Ready -> Scanning(i) -> Done | Faulted
//! ```
//!
//! - **Ready**: the operand stack is reset to its floor
//! - **Scanning**: each token is resolved and executed in order
//! - **Done**: the top word (if any) is the result, rendered as a signed
//!   decimal no matter which operator produced it
//! - **Faulted**: a guarded failure (underflow, divide by zero, capacity)
//!   aborts the step. The stack is reset and any text the step printed is
//!   thrown away.
//!
//! # Dispatch
//!
//! Tokens resolve through [`crate::parser::parse_token`]. Operators never see
//! a type tag: the word's interpretation is picked by the operator alone.

mod float;
mod math;
mod stack;

pub use float::{float_to_int, int_to_float};
pub use math::{factorial, gcd, int_pow, sar, shl};
pub use stack::{OperandStack, STACK_CAPACITY};

use crate::ast::{Command, Op, Word};
use crate::config::KernelConfig;
use crate::display;
use crate::lexer::lex;
use crate::literal::LiteralError;
use crate::parser::parse_token;
use thiserror::Error;
use tracing::trace;

/// The one diagnostic line every faulted request produces
pub const FAULT_MESSAGE: &str = "Error: Invalid operation or insufficient arguments.";

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Stack underflow: {op} needs {needed} operand(s), {depth} present")]
    StackUnderflow {
        op: &'static str,
        needed: usize,
        depth: usize,
    },
    #[error("Division by zero in '{0}'")]
    DivideByZero(&'static str),
    #[error("Stack capacity of {0} words exceeded")]
    StackCapacityExceeded(usize),
    #[error(transparent)]
    InvalidLiteral(#[from] LiteralError),
    #[error("Unknown frame type 0x{0:02x}")]
    UnknownFrameType(u8),
}

/// Result of a completed Evaluation Step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalResult {
    /// Lines written by print-style operators, each newline-terminated
    pub output: String,
    /// Top of the stack when the step finished
    pub top: Option<Word>,
}

impl EvalResult {
    /// Full response text: printed lines, then the result line if any
    pub fn render(&self) -> String {
        let mut out = self.output.clone();
        if let Some(top) = self.top {
            out.push_str(&display::format_result(top));
            out.push('\n');
        }
        out
    }
}

/// The evaluator owns the operand stack and per-step output buffer
pub struct Evaluator {
    pub(crate) stack: OperandStack,
    /// Text produced by print-style operators in the current step
    pub(crate) output: String,
    /// Reject literals that are not consumed completely
    pub(crate) strict_literals: bool,
    /// Emit a trace event after every token
    pub(crate) trace_mode: bool,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator {
            stack: OperandStack::new(),
            output: String::new(),
            strict_literals: false,
            trace_mode: false,
        }
    }

    pub fn with_config(config: &KernelConfig) -> Self {
        let mut eval = Self::new();
        eval.strict_literals = config.strict_literals;
        eval.trace_mode = config.trace;
        eval
    }

    pub fn set_trace_mode(&mut self, on: bool) {
        self.trace_mode = on;
    }

    pub fn set_strict_literals(&mut self, on: bool) {
        self.strict_literals = on;
    }

    /// Current stack contents, floor first
    pub fn stack(&self) -> &[Word] {
        self.stack.as_slice()
    }

    /// Back to Ready: empty stack, empty output
    pub fn reset(&mut self) {
        self.stack.reset_to_floor();
        self.output.clear();
    }

    /// Run one Evaluation Step over a raw request body
    pub fn eval_line(&mut self, input: &str) -> Result<EvalResult, EvalError> {
        self.reset();
        let tokens = lex(input);
        self.eval_tokens(&tokens)
    }

    /// Run one Evaluation Step over already-split tokens
    pub fn eval_tokens(&mut self, tokens: &[&str]) -> Result<EvalResult, EvalError> {
        self.reset();
        match self.scan(tokens) {
            Ok(()) => Ok(EvalResult {
                output: std::mem::take(&mut self.output),
                top: self.stack.peek(),
            }),
            Err(e) => {
                self.reset();
                Err(e)
            }
        }
    }

    fn scan(&mut self, tokens: &[&str]) -> Result<(), EvalError> {
        for (i, token) in tokens.iter().enumerate() {
            let cmd = parse_token(token, self.strict_literals)?;
            self.exec(cmd)?;
            if self.trace_mode {
                trace!(index = i, token, ?cmd, depth = self.stack.depth(), "token");
            }
        }
        Ok(())
    }

    /// Execute one resolved command against the stack
    pub fn exec(&mut self, cmd: Command) -> Result<(), EvalError> {
        match cmd {
            Command::Literal(w) => self.stack.push(w),
            Command::Op(op) => self.apply(op),
        }
    }

    fn apply(&mut self, op: Op) -> Result<(), EvalError> {
        self.stack.require(op.mnemonic(), op.arity())?;

        match op {
            Op::Add => self.int_binary(|a, b| Ok(a.wrapping_add(b))),
            Op::Sub => self.int_binary(|a, b| Ok(a.wrapping_sub(b))),
            Op::Mul => self.int_binary(|a, b| Ok(a.wrapping_mul(b))),
            Op::Div => self.int_binary(math::div),
            Op::Mod => self.int_binary(math::rem),
            Op::Pow => self.int_binary(|a, b| Ok(int_pow(a, b))),
            Op::And => self.int_binary(|a, b| Ok(a & b)),
            Op::Or => self.int_binary(|a, b| Ok(a | b)),
            Op::Not => self.int_unary(|a| !a),
            Op::Shl => self.int_binary(|a, b| Ok(shl(a, b))),
            Op::Sar => self.int_binary(|a, b| Ok(sar(a, b))),
            Op::Lt => self.int_compare(|a, b| a < b),
            Op::Gt => self.int_compare(|a, b| a > b),
            Op::Eq => self.int_compare(|a, b| a == b),
            Op::Gcd => self.int_binary(|a, b| Ok(gcd(a, b))),
            Op::Fact => self.int_unary(factorial),

            Op::Dup => self.stack_dup(),
            Op::Swap => self.stack_swap(),
            Op::Drop => self.stack_drop(),

            Op::PrintHex => self.print_with(display::format_hex),
            Op::PrintBin => self.print_with(display::format_binary),
            Op::PrintFloat => self.print_with(display::format_float),

            Op::FAdd => self.float_binary(|a, b| a + b),
            Op::FSub => self.float_binary(|a, b| a - b),
            Op::FMul => self.float_binary(|a, b| a * b),
            Op::FDiv => self.float_binary(|a, b| a / b),
            Op::FMin => self.float_binary(f64::min),
            Op::FMax => self.float_binary(f64::max),
            Op::Sqrt => self.float_unary(f64::sqrt),
            Op::FAbs => self.float_unary(f64::abs),
            Op::FNeg => self.float_unary(|a| -a),

            Op::IntToFloat => self.bridge_int_to_float(),
            Op::FloatToInt => self.bridge_float_to_int(),
        }
    }

    /// Pop the top word and append its rendering as one output line
    fn print_with(&mut self, render: fn(Word) -> String) -> Result<(), EvalError> {
        let w = self.stack.pop()?;
        self.output.push_str(&render(w));
        self.output.push('\n');
        Ok(())
    }
}
