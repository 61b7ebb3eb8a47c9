//! PostgreSQL advisory lock helpers.
//!
//! SQLite has no advisory locks; its pools hold a single connection, which
//! already serializes every transaction.

use sea_orm::{ConnectionTrait, DatabaseBackend, DbErr, Statement};
use tracing::trace;
use xxhash_rust::xxh3::xxh3_64;

/// Key guarding set identifier allocation.
pub const SET_ID_ALLOC_LOCK: &str = "quiz:question_set_id_alloc";
/// Key guarding schema migration.
pub const MIGRATE_LOCK: &str = "quiz:migrate";

pub fn pg_lock_id(key: &str) -> i64 {
    xxh3_64(key.as_bytes()) as i64
}

/// Take a transaction-scoped advisory lock. Released on commit or rollback.
///
/// No-op on SQLite.
pub async fn xact_lock<C: ConnectionTrait>(conn: &C, key: &str) -> Result<(), DbErr> {
    if conn.get_database_backend() != DatabaseBackend::Postgres {
        return Ok(());
    }
    let lock_id = pg_lock_id(key);
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        "SELECT pg_advisory_xact_lock($1)",
        vec![lock_id.into()],
    ))
    .await?;
    trace!(lock = key, lock_id, "advisory xact lock acquired");
    Ok(())
}

/// Take a session-scoped advisory lock on a single-connection pool.
pub async fn session_lock<C: ConnectionTrait>(conn: &C, key: &str) -> Result<(), DbErr> {
    if conn.get_database_backend() != DatabaseBackend::Postgres {
        return Ok(());
    }
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        "SELECT pg_advisory_lock($1)",
        vec![pg_lock_id(key).into()],
    ))
    .await?;
    Ok(())
}

pub async fn session_unlock<C: ConnectionTrait>(conn: &C, key: &str) -> Result<(), DbErr> {
    if conn.get_database_backend() != DatabaseBackend::Postgres {
        return Ok(());
    }
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        "SELECT pg_advisory_unlock($1)",
        vec![pg_lock_id(key).into()],
    ))
    .await?;
    Ok(())
}
