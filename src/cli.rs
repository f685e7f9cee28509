use rpn_kernel::{run_oneshot, KernelConfig, Session};
use std::io;
use std::process::ExitCode;
use tracing::{error, info};

/// Process mode, picked from the argument count
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Arguments after argv[0] form one request
    OneShot(Vec<String>),
    /// No arguments: serve framed requests on stdin
    Daemon,
}

pub(crate) fn select_mode(args: &[String]) -> Mode {
    if args.len() > 1 {
        Mode::OneShot(args[1..].to_vec())
    } else {
        Mode::Daemon
    }
}

pub(crate) fn run(mode: Mode, config: KernelConfig) -> ExitCode {
    match mode {
        Mode::OneShot(tokens) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            match run_oneshot(&tokens, &config, &mut out) {
                Ok(code) => ExitCode::from(code),
                Err(e) => {
                    error!(error = %e, "failed to write result");
                    ExitCode::FAILURE
                }
            }
        }
        Mode::Daemon => {
            info!(?config, "daemon starting");
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut session = Session::new(stdin.lock(), stdout.lock(), config);
            session.run();
            ExitCode::SUCCESS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_means_daemon() {
        assert_eq!(select_mode(&args(&["rpn"])), Mode::Daemon);
        assert_eq!(select_mode(&[]), Mode::Daemon);
    }

    #[test]
    fn arguments_mean_oneshot() {
        assert_eq!(
            select_mode(&args(&["rpn", "-5", "3", "+"])),
            Mode::OneShot(args(&["-5", "3", "+"]))
        );
    }
}
