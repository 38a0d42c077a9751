use crate::EngineError;

/// Engine tuning, read from the environment. Every knob has a default, so a
/// missing variable is fine; a present but unparsable one is a config error.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Aggregation window in days for the `*7d` fields.
    pub window_days: u32,
    /// Fetch limit for the free-form log.
    pub log_limit: u32,
    /// Fetch limit for structured sessions.
    pub session_limit: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_days: 7,
            log_limit: 200,
            session_limit: 50,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, EngineError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            window_days: parse_or(
                get("FITNESS_SUMMARY_WINDOW_DAYS"),
                "FITNESS_SUMMARY_WINDOW_DAYS",
                defaults.window_days,
            )?,
            log_limit: parse_or(
                get("FITNESS_SUMMARY_LOG_LIMIT"),
                "FITNESS_SUMMARY_LOG_LIMIT",
                defaults.log_limit,
            )?,
            session_limit: parse_or(
                get("FITNESS_SUMMARY_SESSION_LIMIT"),
                "FITNESS_SUMMARY_SESSION_LIMIT",
                defaults.session_limit,
            )?,
        })
    }
}

fn parse_or(value: Option<String>, key: &str, default: u32) -> Result<u32, EngineError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| EngineError::Config(format!("{key} must be an integer, got {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_env_is_empty() {
        let cfg = EngineConfig::from_env_with(|_| None).expect("cfg");
        assert_eq!(cfg.window_days, 7);
        assert_eq!(cfg.log_limit, 200);
        assert_eq!(cfg.session_limit, 50);
    }

    #[test]
    fn reads_overrides() {
        let get = |k: &str| match k {
            "FITNESS_SUMMARY_WINDOW_DAYS" => Some("14".into()),
            "FITNESS_SUMMARY_LOG_LIMIT" => Some("500".into()),
            _ => None,
        };
        let cfg = EngineConfig::from_env_with(get).expect("cfg");
        assert_eq!(cfg.window_days, 14);
        assert_eq!(cfg.log_limit, 500);
        assert_eq!(cfg.session_limit, 50);
    }

    #[test]
    fn rejects_unparsable_value() {
        let get = |k: &str| (k == "FITNESS_SUMMARY_WINDOW_DAYS").then(|| "soon".to_string());
        let res = EngineConfig::from_env_with(get);
        assert!(res.is_err());
    }
}
