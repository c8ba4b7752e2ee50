//! Load [`AppConfig`] from the process environment (and `.env`, when present).

use crate::config::{AppConfig, StaffSeed};
use crate::error::ConfigError;
use std::str::FromStr;

impl AppConfig {
    /// Read configuration from the environment, loading `.env` first if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = AppConfig::default();

        let mode = match get("SOMEMART_MODE") {
            Some(v) => v.parse().map_err(|reason| ConfigError::InvalidVar {
                var: "SOMEMART_MODE",
                reason,
            })?,
            None => defaults.mode,
        };
        let max_connections = parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), defaults.max_connections)?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidVar {
                var: "DATABASE_MAX_CONNECTIONS",
                reason: "must be at least 1".into(),
            });
        }
        let body_limit_bytes = parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), defaults.body_limit_bytes)?;

        let staff_seed = match (get("STAFF_USERNAME"), lookup("STAFF_PASSWORD").filter(|p| !p.is_empty())) {
            (Some(username), Some(password)) => Some(StaffSeed { username, password }),
            (Some(_), None) => return Err(ConfigError::Incomplete("STAFF_USERNAME", "STAFF_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Incomplete("STAFF_PASSWORD", "STAFF_USERNAME")),
            (None, None) => None,
        };

        Ok(Self {
            mode,
            database_url: get("DATABASE_URL"),
            max_connections,
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            auth_realm: get("AUTH_REALM").unwrap_or(defaults.auth_realm),
            body_limit_bytes,
            staff_seed,
        })
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(v) => v.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiMode, DEFAULT_AUTH_REALM};
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.mode, ApiMode::Open);
        assert!(config.database_url.is_none());
        assert_eq!(config.auth_realm, DEFAULT_AUTH_REALM);
        assert!(config.staff_seed.is_none());
    }

    #[test]
    fn parses_staff_mode_and_seed() {
        let config = load(&[
            ("SOMEMART_MODE", "Staff"),
            ("DATABASE_URL", "postgres://localhost/somemart"),
            ("STAFF_USERNAME", "admin"),
            ("STAFF_PASSWORD", "s3cret"),
        ])
        .unwrap();
        assert_eq!(config.mode, ApiMode::Staff);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/somemart"));
        let seed = config.staff_seed.unwrap();
        assert_eq!(seed.username, "admin");
        assert!(!format!("{:?}", seed).contains("s3cret"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[("SOMEMART_MODE", "closed")]),
            Err(ConfigError::InvalidVar { var: "SOMEMART_MODE", .. })
        ));
        assert!(matches!(
            load(&[("DATABASE_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::InvalidVar { .. })
        ));
        assert!(matches!(
            load(&[("BODY_LIMIT_BYTES", "lots")]),
            Err(ConfigError::InvalidVar { var: "BODY_LIMIT_BYTES", .. })
        ));
        assert!(matches!(
            load(&[("STAFF_USERNAME", "admin")]),
            Err(ConfigError::Incomplete("STAFF_USERNAME", "STAFF_PASSWORD"))
        ));
    }
}
