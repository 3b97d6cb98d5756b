//! `PostgreSQL` connection pools for the primary and the read replica.
//!
//! The primary is write-authoritative. The replica is a read-only copy
//! that may lag; list queries go there unless a caller asks for the
//! primary explicitly. When no separate replica host is configured both
//! handles point at the same server.
//!
//! Uses [`sqlx`] with runtime query construction (not compile-time checked)
//! to avoid requiring a live database at build time. All queries are
//! parameterized to prevent SQL injection.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::error::StoreError;

/// Default maximum number of connections in each pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default time to wait for a pooled connection, in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default idle timeout in seconds.
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;

/// Default `PostgreSQL` port.
pub const DEFAULT_PORT: u16 = 5432;

/// Configuration for one `PostgreSQL` connection pool.
#[derive(Clone)]
pub struct PostgresConfig {
    /// Server host name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database name.
    pub database: String,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Idle connection timeout.
    pub idle_timeout: Duration,
}

impl core::fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish_non_exhaustive()
    }
}

impl PostgresConfig {
    /// Create a configuration from its connection parts with default pool settings.
    pub fn new(host: &str, user: &str, password: &str, database: &str) -> Self {
        Self {
            host: host.to_owned(),
            port: DEFAULT_PORT,
            user: user.to_owned(),
            password: password.to_owned(),
            database: database.to_owned(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
        }
    }

    /// Same credentials and pool settings, different host.
    ///
    /// Used to derive the replica configuration from the primary's.
    #[must_use]
    pub fn with_host(&self, host: &str) -> Self {
        Self {
            host: host.to_owned(),
            ..self.clone()
        }
    }

    /// Set the server port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the maximum number of connections.
    #[must_use]
    pub const fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// Connection pool handle to one `PostgreSQL` server.
#[derive(Clone)]
pub struct PostgresPool {
    pool: PgPool,
}

impl PostgresPool {
    /// Build a pool for the given configuration.
    ///
    /// The pool connects lazily, so this succeeds even while the server is
    /// still starting. Reachability is established by [`PostgresPool::ping`]
    /// in the startup readiness gate.
    pub fn connect_lazy(config: &PostgresConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .connect_lazy_with(config.connect_options());

        tracing::debug!(
            host = config.host,
            port = config.port,
            max_connections = config.max_connections,
            "PostgreSQL pool configured"
        );

        Self { pool }
    }

    /// Probe the server with `SELECT 1`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if no connection can be made.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create the `users`, `posts` and `comments` tables if they are missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Migration`] if the schema cannot be applied.
    pub async fn bootstrap_schema(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database schema ready");
        Ok(())
    }

    /// Return a reference to the underlying [`PgPool`].
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close all connections in the pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// The primary/replica pair.
#[derive(Clone)]
pub struct PostgresCluster {
    primary: PostgresPool,
    replica: PostgresPool,
}

impl PostgresCluster {
    /// Build lazy pools for both targets.
    pub fn connect_lazy(primary: &PostgresConfig, replica: &PostgresConfig) -> Self {
        tracing::info!(
            primary_host = primary.host,
            replica_host = replica.host,
            "PostgreSQL primary/replica configured"
        );
        Self {
            primary: PostgresPool::connect_lazy(primary),
            replica: PostgresPool::connect_lazy(replica),
        }
    }

    /// Use one server for both roles.
    pub fn single(pool: PostgresPool) -> Self {
        Self {
            replica: pool.clone(),
            primary: pool,
        }
    }

    /// The write-authoritative pool.
    pub const fn primary(&self) -> &PostgresPool {
        &self.primary
    }

    /// The read-only, possibly lagging pool.
    pub const fn replica(&self) -> &PostgresPool {
        &self.replica
    }

    /// Close both pools.
    pub async fn close(&self) {
        self.primary.close().await;
        self.replica.close().await;
        tracing::info!("PostgreSQL pools closed");
    }
}
