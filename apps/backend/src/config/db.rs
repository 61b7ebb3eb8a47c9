//! Database configuration read from the process environment.
//!
//! Every lookup goes through a `lookup` closure so the parsing rules can be
//! exercised without mutating the real environment.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Runtime environment the store is being opened for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    /// Enforces the `_test` database naming rule
    Test,
}

/// Backing store flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl DbKind {
    pub fn is_sqlite(self) -> bool {
        matches!(self, DbKind::SqliteFile | DbKind::SqliteMemory)
    }
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite_file" | "sqlite" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!("unknown database kind '{other}'"))),
        }
    }
}

impl fmt::Display for DbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DbKind::Postgres => "postgres",
            DbKind::SqliteFile => "sqlite-file",
            DbKind::SqliteMemory => "sqlite-memory",
        };
        f.write_str(s)
    }
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Per-connection session settings applied by the pool's `after_connect` hook.
#[derive(Debug, Clone, PartialEq)]
pub enum DbSettings {
    Postgres {
        app_name: String,
        statement_timeout: String,
        idle_in_transaction_timeout: String,
        lock_timeout: Option<String>,
    },
    Sqlite {
        busy_timeout_ms: u64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSettings {
    pub pool_min: u32,
    pub pool_max: u32,
    pub acquire_timeout_ms: u64,
    pub db_settings: DbSettings,
}

pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn must_var(lookup: Lookup<'_>, name: &str) -> Result<String, AppError> {
    lookup(name)
        .ok_or_else(|| AppError::config(format!("Required environment variable '{name}' is not set")))
}

fn parse_var<T: FromStr>(lookup: Lookup<'_>, name: &str, default: T) -> Result<T, AppError> {
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("'{name}' has an invalid value: '{raw}'"))),
    }
}

/// Read `QUIZ_DB_KIND` (defaults to `postgres`).
pub fn db_kind_from_env() -> Result<DbKind, AppError> {
    db_kind_with(&process_env)
}

pub fn db_kind_with(lookup: Lookup<'_>) -> Result<DbKind, AppError> {
    match lookup("QUIZ_DB_KIND") {
        Some(raw) => raw.parse(),
        None => Ok(DbKind::Postgres),
    }
}

/// Builds the connection string for the given environment, store and owner.
pub fn make_conn_spec(env: RuntimeEnv, db_kind: DbKind, owner: DbOwner) -> Result<String, AppError> {
    make_conn_spec_with(&process_env, env, db_kind, owner)
}

pub fn make_conn_spec_with(
    lookup: Lookup<'_>,
    env: RuntimeEnv,
    db_kind: DbKind,
    owner: DbOwner,
) -> Result<String, AppError> {
    match db_kind {
        DbKind::Postgres => {
            let host = lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string());
            let port = lookup("POSTGRES_PORT").unwrap_or_else(|| "5432".to_string());
            let db_name = db_name(lookup, env)?;
            let (username, password) = credentials(lookup, owner)?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let path = must_var(lookup, "QUIZ_SQLITE_FILE")?;
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

fn db_name(lookup: Lookup<'_>, env: RuntimeEnv) -> Result<String, AppError> {
    match env {
        RuntimeEnv::Prod => must_var(lookup, "PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var(lookup, "TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn credentials(lookup: Lookup<'_>, owner: DbOwner) -> Result<(String, String), AppError> {
    match owner {
        DbOwner::App => Ok((
            must_var(lookup, "APP_DB_USER")?,
            must_var(lookup, "APP_DB_PASSWORD")?,
        )),
        DbOwner::Owner => Ok((
            must_var(lookup, "QUIZ_OWNER_USER")?,
            must_var(lookup, "QUIZ_OWNER_PASSWORD")?,
        )),
    }
}

pub fn build_connection_settings(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<ConnectionSettings, AppError> {
    build_connection_settings_with(&process_env, env, db_kind)
}

/// Pool sizing and session settings.
///
/// SQLite pools always hold exactly one connection: the pool is what
/// serializes writers, and an in-memory database lives only as long as its
/// single connection.
pub fn build_connection_settings_with(
    lookup: Lookup<'_>,
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<ConnectionSettings, AppError> {
    let acquire_default = match env {
        RuntimeEnv::Test => 10_000,
        RuntimeEnv::Prod => 5_000,
    };
    let acquire_timeout_ms = parse_var(lookup, "QUIZ_DB_ACQUIRE_TIMEOUT_MS", acquire_default)?;

    if db_kind.is_sqlite() {
        let busy_timeout_ms = parse_var(lookup, "QUIZ_SQLITE_BUSY_TIMEOUT_MS", 5_000u64)?;
        return Ok(ConnectionSettings {
            pool_min: 1,
            pool_max: 1,
            acquire_timeout_ms,
            db_settings: DbSettings::Sqlite { busy_timeout_ms },
        });
    }

    let pool_min = parse_var(lookup, "QUIZ_DB_POOL_MIN", 1u32)?;
    let pool_max = parse_var(lookup, "QUIZ_DB_POOL_MAX", 10u32)?;
    if pool_max == 0 || pool_min > pool_max {
        return Err(AppError::config(format!(
            "invalid pool bounds: min={pool_min} max={pool_max}"
        )));
    }

    let app_name = match env {
        RuntimeEnv::Prod => "quiz-backend",
        RuntimeEnv::Test => "quiz-backend-test",
    };

    Ok(ConnectionSettings {
        pool_min,
        pool_max,
        acquire_timeout_ms,
        db_settings: DbSettings::Postgres {
            app_name: app_name.to_string(),
            statement_timeout: lookup("QUIZ_PG_STATEMENT_TIMEOUT")
                .unwrap_or_else(|| "15s".to_string()),
            idle_in_transaction_timeout: lookup("QUIZ_PG_IDLE_IN_TXN_TIMEOUT")
                .unwrap_or_else(|| "60s".to_string()),
            lock_timeout: lookup("QUIZ_PG_LOCK_TIMEOUT"),
        },
    })
}

/// Build ordered session-level SQL statements for the given settings.
pub fn build_session_statements(settings: &DbSettings) -> Vec<String> {
    match settings {
        DbSettings::Sqlite { busy_timeout_ms } => vec![
            "PRAGMA foreign_keys = ON;".to_string(),
            format!("PRAGMA busy_timeout = {busy_timeout_ms};"),
        ],
        DbSettings::Postgres {
            app_name,
            statement_timeout,
            idle_in_transaction_timeout,
            lock_timeout,
        } => {
            let mut stmts = vec![
                // application_name is safe to single-quote; minimal escaping
                format!("SET application_name = '{}';", app_name.replace('\'', "''")),
                "SET timezone = 'UTC';".to_string(),
                format!("SET statement_timeout = '{statement_timeout}';"),
                format!("SET idle_in_transaction_session_timeout = '{idle_in_transaction_timeout}';"),
            ];
            if let Some(lock_timeout) = lock_timeout {
                stmts.push(format!("SET lock_timeout = '{lock_timeout}';"));
            }
            stmts
        }
    }
}

pub fn validate_db_config(env: RuntimeEnv, db_kind: DbKind) -> Result<(), AppError> {
    validate_db_config_with(&process_env, env, db_kind)
}

/// Reject combinations that would point a run at the wrong store.
pub fn validate_db_config_with(
    lookup: Lookup<'_>,
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<(), AppError> {
    match (env, db_kind) {
        (RuntimeEnv::Prod, DbKind::SqliteMemory) => Err(AppError::config(
            "an in-memory store cannot back the prod environment",
        )),
        (RuntimeEnv::Test, DbKind::Postgres) => db_name(lookup, env).map(|_| ()),
        (_, DbKind::SqliteFile) => must_var(lookup, "QUIZ_SQLITE_FILE").map(|_| ()),
        _ => Ok(()),
    }
}
