//! rpn - bit-blind RPN kernel
//!
//! Usage:
//!   rpn <token>...    Evaluate one expression and exit (0 ok, 1 fault)
//!   rpn               Serve framed requests on stdin until it closes
//!
//! Environment:
//!   RPN_STRICT_LITERALS=1   Fault on malformed numeric literals
//!   RPN_ACCEPT_ANY_TAG=1    Accept any frame type tag as "execute"
//!   RPN_TRACE=1             Trace every token to stderr
//!   RUST_LOG                Log filter (default: warn)

mod cli;

use rpn_kernel::{logging, KernelConfig};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = KernelConfig::from_env();
    logging::init_logging(config.trace);

    let args: Vec<String> = env::args().collect();
    cli::run(cli::select_mode(&args), config)
}
