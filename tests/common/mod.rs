//! Common test utilities for rpn-kernel integration tests

#![allow(dead_code)]

pub use rpn_kernel::{encode_request, Evaluator, FAULT_MESSAGE, TYPE_EXECUTE};

/// Evaluate one expression and return the response text, trimmed
pub fn eval(input: &str) -> Result<String, String> {
    rpn_kernel::eval(input).map(|s| s.trim().to_string())
}

/// Build a daemon input stream from request bodies
pub fn frames(bodies: &[&str]) -> Vec<u8> {
    bodies
        .iter()
        .flat_map(|b| encode_request(b.as_bytes(), TYPE_EXECUTE).unwrap())
        .collect()
}

/// The diagnostic line as it appears on stdout
pub fn fault_line() -> String {
    format!("{}\n", FAULT_MESSAGE)
}
