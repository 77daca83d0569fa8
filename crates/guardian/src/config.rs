//! Process-wide guard configuration.
//!
//! # Environment Variable
//!
//! `GUARDIAN_STRICT` overrides the build default:
//! - `1`, `true`, `yes`, `on` - strict
//! - `0`, `false`, `no`, `off` - loose
//!
//! Anything else (or unset) keeps the default, which is strict only when the
//! `strict` feature is enabled.

use std::sync::OnceLock;

/// How the checks treat expressions they cannot name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GuardConfig {
    /// Fail with [`GuardError::UnsupportedExpression`](crate::GuardError::UnsupportedExpression)
    /// before evaluating an expression the resolver cannot name.
    pub strict: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        GuardConfig {
            strict: cfg!(feature = "strict"),
        }
    }
}

impl GuardConfig {
    pub const ENV_VAR: &'static str = "GUARDIAN_STRICT";

    pub const fn strict() -> Self {
        GuardConfig { strict: true }
    }

    pub const fn loose() -> Self {
        GuardConfig { strict: false }
    }

    /// Read `GUARDIAN_STRICT`.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(Self::ENV_VAR).ok().as_deref())
    }

    /// Interpret a `GUARDIAN_STRICT` value.
    pub fn from_env_value(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Self::strict(),
            "0" | "false" | "no" | "off" => Self::loose(),
            other => {
                tracing::debug!(value = other, "ignoring unrecognised {}", Self::ENV_VAR);
                Self::default()
            }
        }
    }
}

/// Global configuration, initialized on first use.
static CONFIG: OnceLock<GuardConfig> = OnceLock::new();

/// Get the process-wide configuration.
///
/// Reads `GUARDIAN_STRICT` on first call, then returns the cached value.
pub fn config() -> GuardConfig {
    *CONFIG.get_or_init(GuardConfig::from_env)
}

/// Set the process-wide configuration before its first use.
///
/// Returns the rejected value if the configuration is already set.
pub fn install_config(config: GuardConfig) -> Result<(), GuardConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_values() {
        for value in ["1", "true", "YES", " on "] {
            assert_eq!(
                GuardConfig::from_env_value(Some(value)),
                GuardConfig::strict(),
                "{value}"
            );
        }
        for value in ["0", "False", "no", "off"] {
            assert_eq!(
                GuardConfig::from_env_value(Some(value)),
                GuardConfig::loose(),
                "{value}"
            );
        }
    }

    #[test]
    fn test_unrecognised_value_keeps_default() {
        assert_eq!(
            GuardConfig::from_env_value(Some("maybe")),
            GuardConfig::default()
        );
        assert_eq!(GuardConfig::from_env_value(None), GuardConfig::default());
    }

    #[test]
    fn test_install_after_first_use_is_rejected() {
        let current = config();
        let other = GuardConfig {
            strict: !current.strict,
        };
        assert_eq!(install_config(other), Err(other));
        assert_eq!(config(), current);
    }
}
