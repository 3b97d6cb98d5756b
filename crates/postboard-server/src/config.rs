//! Configuration for the API server.
//!
//! All configuration is loaded once at startup from environment variables
//! (a `.env` file in the working directory is honoured). The server needs
//! database credentials, the primary and replica hosts, where to listen,
//! and how long to wait for storage before giving up.

use std::time::Duration;

use postboard_api::ServerConfig;
use postboard_db::postgres::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_PORT};
use postboard_db::readiness::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_SECS};
use postboard_db::{PostgresConfig, ReadinessPolicy, SeedPlan};

use crate::error::AppError;

/// Which storage backend the server runs against.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    /// `PostgreSQL` primary plus read replica.
    Postgres {
        /// Write-authoritative server.
        primary: PostgresConfig,
        /// Read-only, possibly lagging server.
        replica: PostgresConfig,
    },
    /// In-process tables; nothing survives a restart.
    Memory,
}

/// Complete server configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Storage backend.
    pub backend: BackendConfig,
    /// Listen address.
    pub server: ServerConfig,
    /// Startup readiness gate bounds.
    pub readiness: ReadinessPolicy,
    /// Random demo data to insert at startup (all zero disables seeding).
    pub seed: SeedPlan,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Required variables (unless `STORAGE_BACKEND=memory`):
    /// - `DB_USER` -- login role
    /// - `DB_PASSWORD` -- login password
    /// - `DB_HOST` -- primary host
    /// - `DB_NAME` -- database name
    ///
    /// Optional variables:
    /// - `STORAGE_BACKEND` -- `postgres` (default) or `memory`
    /// - `DB_PORT` -- server port (default 5432)
    /// - `DB_REPLICA_HOST` -- replica host (default: `DB_HOST`)
    /// - `DB_MAX_CONNECTIONS` -- pool size per target (default 10)
    /// - `DB_CONNECT_TIMEOUT_SECS` -- wait for a pooled connection (default 5)
    /// - `SERVER_HOST` -- bind address (default `0.0.0.0`)
    /// - `SERVER_PORT` -- bind port (default 8000)
    /// - `STARTUP_MAX_ATTEMPTS` -- readiness probes (default 10)
    /// - `STARTUP_RETRY_DELAY_SECS` -- pause between probes (default 5)
    /// - `SEED_USERS` -- random users to insert at startup (default 0)
    /// - `SEED_POSTS` -- random posts by seeded users (default 0)
    /// - `SEED_COMMENTS` -- random comments on seeded posts (default 0)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let backend = match env.get_or("STORAGE_BACKEND", "postgres").to_lowercase().as_str() {
            "postgres" | "postgresql" => load_postgres(&env)?,
            "memory" => BackendConfig::Memory,
            other => {
                return Err(AppError::Config(format!(
                    "unknown STORAGE_BACKEND: {other}"
                )));
            }
        };

        let server = ServerConfig {
            host: env.get_or("SERVER_HOST", "0.0.0.0"),
            port: env.parse_or("SERVER_PORT", 8000)?,
        };

        let readiness = ReadinessPolicy {
            max_attempts: env.parse_or("STARTUP_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
            delay: Duration::from_secs(
                env.parse_or("STARTUP_RETRY_DELAY_SECS", DEFAULT_RETRY_DELAY_SECS)?,
            ),
        };

        Ok(Self {
            backend,
            server,
            readiness,
            seed: SeedPlan {
                users: env.parse_or("SEED_USERS", 0)?,
                posts: env.parse_or("SEED_POSTS", 0)?,
                comments: env.parse_or("SEED_COMMENTS", 0)?,
            },
        })
    }
}

fn load_postgres<F>(env: &Env<F>) -> Result<BackendConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let host = env.required("DB_HOST")?;
    let primary = PostgresConfig::new(
        &host,
        &env.required("DB_USER")?,
        &env.required("DB_PASSWORD")?,
        &env.required("DB_NAME")?,
    )
    .with_port(env.parse_or("DB_PORT", DEFAULT_PORT)?)
    .with_max_connections(env.parse_or("DB_MAX_CONNECTIONS", 10)?)
    .with_connect_timeout(Duration::from_secs(
        env.parse_or("DB_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
    ));

    let replica_host = env.get_or("DB_REPLICA_HOST", &host);
    let replica = primary.with_host(&replica_host);

    Ok(BackendConfig::Postgres { primary, replica })
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn required(&self, name: &str) -> Result<String, AppError> {
        (self.lookup)(name)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Config(format!("missing required env var {name}")))
    }

    fn get_or(&self, name: &str, default: &str) -> String {
        (self.lookup)(name).unwrap_or_else(|| default.to_owned())
    }

    fn parse_or<T>(&self, name: &str, default: T) -> Result<T, AppError>
    where
        T: std::str::FromStr,
        T::Err: core::fmt::Display,
    {
        match (self.lookup)(name) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("invalid {name}: {e}"))),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("DB_USER", "app"),
        ("DB_PASSWORD", "secret"),
        ("DB_HOST", "db-master"),
        ("DB_NAME", "board"),
    ];

    #[test]
    fn defaults_follow_single_node_deployment() {
        let config = AppConfig::from_lookup(lookup(BASE)).ok();

        let targets = config.as_ref().and_then(|c| match &c.backend {
            BackendConfig::Postgres { primary, replica } => {
                Some((primary.host.clone(), replica.host.clone(), primary.port))
            }
            BackendConfig::Memory => None,
        });
        assert_eq!(
            targets,
            Some((String::from("db-master"), String::from("db-master"), 5432))
        );
        assert_eq!(config.as_ref().map(|c| c.server.port), Some(8000));
        assert_eq!(
            config.as_ref().map(|c| c.readiness),
            Some(ReadinessPolicy::default())
        );
        assert!(config.is_some_and(|c| c.seed.is_empty()));
    }

    #[test]
    fn replica_host_is_separate_when_set() {
        let mut pairs = BASE.to_vec();
        pairs.push(("DB_REPLICA_HOST", "db-replica"));
        pairs.push(("STARTUP_MAX_ATTEMPTS", "3"));
        pairs.push(("DB_CONNECT_TIMEOUT_SECS", "2"));
        let config = AppConfig::from_lookup(lookup(&pairs)).ok();

        let replica = config.as_ref().and_then(|c| match &c.backend {
            BackendConfig::Postgres { replica, .. } => {
                Some((replica.host.clone(), replica.connect_timeout))
            }
            BackendConfig::Memory => None,
        });
        assert_eq!(
            replica,
            Some((String::from("db-replica"), Duration::from_secs(2)))
        );
        assert_eq!(config.map(|c| c.readiness.max_attempts), Some(3));
    }

    #[test]
    fn missing_credentials_fail() {
        let err = AppConfig::from_lookup(lookup(&[("DB_HOST", "x")])).err();
        assert!(matches!(err, Some(AppError::Config(msg)) if msg.contains("DB_USER")));
    }

    #[test]
    fn memory_backend_needs_no_credentials() {
        let config = AppConfig::from_lookup(lookup(&[
            ("STORAGE_BACKEND", "memory"),
            ("SEED_USERS", "10"),
            ("SEED_POSTS", "5"),
            ("SEED_COMMENTS", "10"),
        ]))
        .ok();
        assert!(matches!(
            config.as_ref().map(|c| &c.backend),
            Some(BackendConfig::Memory)
        ));
        assert_eq!(
            config.map(|c| c.seed),
            Some(SeedPlan {
                users: 10,
                posts: 5,
                comments: 10,
            })
        );
    }

    #[test]
    fn malformed_number_is_config_error() {
        let mut pairs = BASE.to_vec();
        pairs.push(("SERVER_PORT", "eighty"));
        let err = AppConfig::from_lookup(lookup(&pairs)).err();
        assert!(matches!(err, Some(AppError::Config(msg)) if msg.contains("SERVER_PORT")));
    }
}
