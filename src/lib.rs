//! rpn-kernel - a bit-blind RPN evaluator
//!
//! # Overview
//!
//! Tokens are evaluated left to right against a bounded operand stack of
//! untagged 64-bit words. Literals push themselves; operators pop their
//! operands and push a result.
//!
//! ```text
//! 5 3 +              # 8
//! 10 2 s /           # swap, then 2 / 10 = 0
//! 0xFF h             # prints 0xFF, nothing left to render
//! ```
//!
//! ## Bit-blind words
//!
//! A word carries no type. Integer operators read it as `i64`, float
//! operators (`f+`, `sqrt`, `fp`, ...) read the same bits as `f64`. Only
//! `flt` and `int` convert between the two:
//!
//! ```text
//! 5 flt 2.5 f+ fp    # prints 7.500000
//! 5 2.5 f+ fp        # 2.5 plus the denormal with bits 0x5
//! ```
//!
//! ## Fail-closed
//!
//! Underflow, division by zero and stack overflow abort the whole request
//! with a single fixed diagnostic. There is never a partial answer.
//!
//! # Example
//!
//! ```rust
//! use rpn_kernel::Evaluator;
//!
//! let mut eval = Evaluator::new();
//! let result = eval.eval_line("0x1F 0b101 +").unwrap();
//! assert_eq!(result.render(), "36\n");
//! ```

pub mod ast;
pub mod config;
pub mod display;
pub mod eval;
pub mod frame;
pub mod lexer;
pub mod literal;
pub mod logging;
pub mod parser;
pub mod session;

pub use ast::{Command, Op, Word};
pub use config::{KernelConfig, MAX_PAYLOAD};
pub use eval::{EvalError, EvalResult, Evaluator, OperandStack, FAULT_MESSAGE, STACK_CAPACITY};
pub use frame::{encode_request, read_frame, Frame, FrameError, TYPE_EXECUTE};
pub use lexer::lex;
pub use literal::{parse_literal, LiteralError};
pub use parser::{parse, parse_token};
pub use session::{run_oneshot, Session, SessionEnd, SessionStats};

/// Evaluate one expression and return the response text
pub fn eval(input: &str) -> Result<String, String> {
    let mut evaluator = Evaluator::new();
    evaluator
        .eval_line(input)
        .map(|r| r.render())
        .map_err(|e| e.to_string())
}
