//! Start-up configuration
//!
//! Read once from the environment. Command-line flags are not an option:
//! every argument is a token, and `-5` is a literal.

/// Hard limit on a framed request payload, in bytes
pub const MAX_PAYLOAD: usize = 4095;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelConfig {
    /// `RPN_STRICT_LITERALS`: fault on literals with trailing garbage
    pub strict_literals: bool,
    /// `RPN_ACCEPT_ANY_TAG`: treat every frame type tag as "execute"
    pub accept_any_tag: bool,
    /// `RPN_TRACE`: trace every token
    pub trace: bool,
}

impl KernelConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).map(|v| parse_bool(&v)).unwrap_or(false);
        KernelConfig {
            strict_literals: flag("RPN_STRICT_LITERALS"),
            accept_any_tag: flag("RPN_ACCEPT_ANY_TAG"),
            trace: flag("RPN_TRACE"),
        }
    }
}

fn parse_bool(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> KernelConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        KernelConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_are_off() {
        assert_eq!(config(&[]), KernelConfig::default());
    }

    #[test]
    fn flags_parse() {
        let c = config(&[
            ("RPN_STRICT_LITERALS", "1"),
            ("RPN_ACCEPT_ANY_TAG", "TRUE"),
            ("RPN_TRACE", "no"),
        ]);
        assert!(c.strict_literals);
        assert!(c.accept_any_tag);
        assert!(!c.trace);
    }
}
