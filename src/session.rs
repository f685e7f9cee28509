//! Session loop
//!
//! Two modes, chosen once at start-up:
//!
//! - **one-shot**: the process arguments are a single request; exit 0 when it
//!   completes, 1 when it faults
//! - **daemon**: read framed requests until the stream ends or desynchronizes.
//!   A faulted request prints the diagnostic and the loop carries on; only
//!   a framing failure ends the session, and it always ends cleanly.
//!
//! The operand stack is reset before every request, so nothing one request
//! does is visible to the next.

use crate::config::KernelConfig;
use crate::eval::{EvalError, Evaluator, FAULT_MESSAGE};
use crate::frame::{read_frame, Frame, FrameError};
use crate::lexer::lex;
use std::io::{self, Read, Write};
use tracing::{debug, info, warn};

/// Why a daemon session stopped
#[derive(Debug)]
pub enum SessionEnd {
    /// The input stream ended between frames
    InputClosed,
    /// A frame was oversized or cut short
    Desynchronized(FrameError),
    /// The input stream failed outright
    InputFailed(io::Error),
    /// Writing a response failed (peer went away)
    OutputFailed(io::Error),
}

/// Per-session counters, reported when the session ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub requests: u64,
    pub faults: u64,
}

/// A daemon session over a byte stream
pub struct Session<R, W> {
    reader: R,
    writer: W,
    eval: Evaluator,
    config: KernelConfig,
    stats: SessionStats,
}

impl<R: Read, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, config: KernelConfig) -> Self {
        Session {
            reader,
            writer,
            eval: Evaluator::with_config(&config),
            config,
            stats: SessionStats::default(),
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Serve requests until the input ends; never returns an error
    pub fn run(&mut self) -> SessionEnd {
        let end = loop {
            self.eval.reset();

            let frame = match read_frame(&mut self.reader) {
                Ok(frame) => frame,
                Err(FrameError::Closed) => break SessionEnd::InputClosed,
                Err(FrameError::Io(e)) => break SessionEnd::InputFailed(e),
                Err(e) => {
                    warn!(error = %e, "framing failure, ending session");
                    break SessionEnd::Desynchronized(e);
                }
            };

            let response = self.handle(&frame);
            if let Err(e) = self
                .writer
                .write_all(response.as_bytes())
                .and_then(|()| self.writer.flush())
            {
                break SessionEnd::OutputFailed(e);
            }
        };

        info!(
            requests = self.stats.requests,
            faults = self.stats.faults,
            reason = ?end,
            "session ended"
        );
        end
    }

    /// Evaluate one frame and produce its response text
    fn handle(&mut self, frame: &Frame) -> String {
        self.stats.requests += 1;

        let result = if frame.is_execute() || self.config.accept_any_tag {
            let body = String::from_utf8_lossy(&frame.payload);
            self.eval.eval_line(&body)
        } else {
            Err(EvalError::UnknownFrameType(frame.tag))
        };

        match result {
            Ok(res) => {
                debug!(request = self.stats.requests, top = ?res.top, "request done");
                res.render()
            }
            Err(e) => {
                self.stats.faults += 1;
                self.eval.reset();
                warn!(request = self.stats.requests, error = %e, "request faulted");
                format!("{}\n", FAULT_MESSAGE)
            }
        }
    }
}

/// Run a single request from process arguments; returns the exit code
pub fn run_oneshot<W: Write>(
    args: &[String],
    config: &KernelConfig,
    writer: &mut W,
) -> io::Result<u8> {
    let mut eval = Evaluator::with_config(config);

    let tokens: Vec<&str> = args.iter().flat_map(|arg| lex(arg)).collect();

    let code = match eval.eval_tokens(&tokens) {
        Ok(res) => {
            writer.write_all(res.render().as_bytes())?;
            0
        }
        Err(e) => {
            warn!(error = %e, "evaluation faulted");
            writeln!(writer, "{}", FAULT_MESSAGE)?;
            1
        }
    };
    writer.flush()?;
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{encode_request, TYPE_EXECUTE};
    use std::io::Cursor;

    fn frames(bodies: &[&str]) -> Vec<u8> {
        bodies
            .iter()
            .flat_map(|b| encode_request(b.as_bytes(), TYPE_EXECUTE).unwrap())
            .collect()
    }

    fn serve(input: Vec<u8>, config: KernelConfig) -> (String, SessionEnd, SessionStats) {
        let mut out = Vec::new();
        let mut session = Session::new(Cursor::new(input), &mut out, config);
        let end = session.run();
        let stats = session.stats();
        drop(session);
        (String::from_utf8(out).unwrap(), end, stats)
    }

    #[test]
    fn requests_do_not_leak() {
        let (out, end, stats) = serve(frames(&["1 1 +", "2 2 +"]), KernelConfig::default());
        assert_eq!(out, "2\n4\n");
        assert!(matches!(end, SessionEnd::InputClosed));
        assert_eq!(stats, SessionStats { requests: 2, faults: 0 });
    }

    #[test]
    fn fault_does_not_end_session() {
        let (out, _, stats) = serve(frames(&["5 0 /", "+", "7"]), KernelConfig::default());
        assert_eq!(
            out,
            format!("{m}\n{m}\n7\n", m = FAULT_MESSAGE)
        );
        assert_eq!(stats.faults, 2);
    }

    #[test]
    fn leftover_operands_are_discarded() {
        let (out, _, _) = serve(frames(&["1 2 3", "+"]), KernelConfig::default());
        assert_eq!(out, format!("3\n{}\n", FAULT_MESSAGE));
    }

    #[test]
    fn oversized_frame_ends_session() {
        let mut input = frames(&["1"]);
        input.extend_from_slice(&5000u32.to_be_bytes());
        input.push(TYPE_EXECUTE);
        input.extend(frames(&["2"]));
        let (out, end, _) = serve(input, KernelConfig::default());
        assert_eq!(out, "1\n");
        assert!(matches!(
            end,
            SessionEnd::Desynchronized(FrameError::FrameTooLarge { .. })
        ));
    }

    #[test]
    fn unknown_tag_faults_unless_accepted() {
        let mut input = encode_request(b"4 4 *", 0x02).unwrap();
        input.extend(frames(&["1"]));

        let (out, _, _) = serve(input.clone(), KernelConfig::default());
        assert_eq!(out, format!("{}\n1\n", FAULT_MESSAGE));

        let lax = KernelConfig {
            accept_any_tag: true,
            ..KernelConfig::default()
        };
        let (out, _, _) = serve(input, lax);
        assert_eq!(out, "16\n1\n");
    }

    #[test]
    fn empty_result_writes_nothing() {
        let (out, _, _) = serve(frames(&["", "5 x", "255 h"]), KernelConfig::default());
        assert_eq!(out, "0xFF\n");
    }

    #[test]
    fn oneshot_success_and_fault() {
        let args: Vec<String> = ["5", "3", "+"].iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        assert_eq!(run_oneshot(&args, &KernelConfig::default(), &mut out).unwrap(), 0);
        assert_eq!(out, b"8\n");

        let args = vec!["+".to_string()];
        let mut out = Vec::new();
        assert_eq!(run_oneshot(&args, &KernelConfig::default(), &mut out).unwrap(), 1);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", FAULT_MESSAGE));
    }

    #[test]
    fn oneshot_splits_quoted_arguments() {
        let args = vec!["2 3".to_string(), "^".to_string()];
        let mut out = Vec::new();
        run_oneshot(&args, &KernelConfig::default(), &mut out).unwrap();
        assert_eq!(out, b"8\n");
    }

    #[test]
    fn oneshot_whitespace_only_arguments() {
        let args = vec![" ".to_string(), "\t".to_string()];
        let mut out = Vec::new();
        assert_eq!(run_oneshot(&args, &KernelConfig::default(), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }
}
