//! Service configuration read from the environment (`.env` is honoured by the server binary).

use crate::error::ConfigError;
use regex::Regex;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/tutorials";
pub const DEFAULT_PORT: u16 = 8000;

/// Which [`crate::store::TutorialStore`] backend the server wires in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::InvalidValue {
                key: "TUTORIAL_STORE",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// PostgreSQL schema holding the `tutorials` table.
    pub schema: String,
    pub max_connections: u32,
    pub store: StoreKind,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            schema: "public".into(),
            max_connections: 5,
            store: StoreKind::Postgres,
        }
    }
}

impl ServiceConfig {
    /// Env: DATABASE_URL (or DB_URL), HOST, PORT, TUTORIAL_SCHEMA, DATABASE_MAX_CONNECTIONS, TUTORIAL_STORE.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL")
            .or_else(|| get("DB_URL"))
            .unwrap_or(defaults.database_url);
        let host = get("HOST").unwrap_or(defaults.host);
        let port = match get("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: v.clone(),
            })?,
            None => defaults.port,
        };
        let schema = get("TUTORIAL_SCHEMA").unwrap_or(defaults.schema);
        validate_identifier(&schema)?;
        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => match v.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "DATABASE_MAX_CONNECTIONS",
                        value: v,
                    })
                }
            },
            None => defaults.max_connections,
        };
        let store = match get("TUTORIAL_STORE") {
            Some(v) => v.parse()?,
            None => defaults.store,
        };

        Ok(Self {
            database_url,
            host,
            port,
            schema,
            max_connections,
            store,
        })
    }

    /// Host and port for `TcpListener::bind`; the host may be a name such as `localhost`.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

/// Schema names are interpolated into DDL, so only plain identifiers are allowed.
fn validate_identifier(name: &str) -> Result<(), ConfigError> {
    let re = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").map_err(|_| ConfigError::InvalidSchema(name.into()))?;
    if re.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSchema(name.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServiceConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.schema, "public");
        assert_eq!(cfg.store, StoreKind::Postgres);
        assert_eq!(cfg.bind_addr(), ("0.0.0.0", 8000));
    }

    #[test]
    fn db_url_is_a_fallback_for_database_url() {
        let cfg = config_from(&[("DB_URL", "postgres://db/legacy")]).unwrap();
        assert_eq!(cfg.database_url, "postgres://db/legacy");

        let cfg = config_from(&[("DB_URL", "postgres://db/legacy"), ("DATABASE_URL", "postgres://db/main")]).unwrap();
        assert_eq!(cfg.database_url, "postgres://db/main");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidValue { key: "PORT", .. })
        ));
        assert!(matches!(
            config_from(&[("TUTORIAL_SCHEMA", "public; DROP TABLE x")]),
            Err(ConfigError::InvalidSchema(_))
        ));
        assert!(config_from(&[("DATABASE_MAX_CONNECTIONS", "0")]).is_err());
        assert!(config_from(&[("TUTORIAL_STORE", "redis")]).is_err());
    }

    #[test]
    fn host_may_be_a_hostname() {
        let cfg = config_from(&[("HOST", "localhost"), ("PORT", "3000")]).unwrap();
        assert_eq!(cfg.bind_addr(), ("localhost", 3000));
    }

    #[test]
    fn memory_store_can_be_selected() {
        let cfg = config_from(&[("TUTORIAL_STORE", "Memory"), ("PORT", "9001")]).unwrap();
        assert_eq!(cfg.store, StoreKind::Memory);
        assert_eq!(cfg.port, 9001);
    }
}
