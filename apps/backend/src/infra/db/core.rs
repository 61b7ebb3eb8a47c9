use std::future::Future;
use std::process;
use std::str::FromStr;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, trace, warn};

use super::locking::{session_lock, session_unlock, MIGRATE_LOCK};
use super::{DbKind, DbOwner, RuntimeEnv};
use crate::config::db::{
    build_connection_settings, build_session_statements, make_conn_spec, validate_db_config,
    ConnectionSettings, DbSettings,
};
use crate::error::AppError;

fn get_db_engine(db_kind: DbKind) -> &'static str {
    match db_kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Retry a connection attempt with fixed interval delays
/// Returns the result of the last attempt after all retries are exhausted
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(
                        attempt,
                        max_attempts, interval_ms, "connection_retry=failed"
                    );
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| AppError::config("connection retry exhausted")))
}

async fn apply_sqlite_config(
    conn: &mut sqlx::SqliteConnection,
    settings: &DbSettings,
) -> Result<(), sqlx::Error> {
    for stmt in build_session_statements(settings) {
        sqlx::query(&stmt).execute(&mut *conn).await?;
    }
    Ok(())
}

async fn apply_postgres_config(
    conn: &mut sqlx::PgConnection,
    settings: &DbSettings,
) -> Result<(), sqlx::Error> {
    for stmt in build_session_statements(settings) {
        sqlx::query(&stmt).execute(&mut *conn).await?;
    }
    Ok(())
}

/// Open the application pool and guarantee the schema is current.
///
/// - SqliteMemory: the app pool is the migration pool, since the database
///   only exists inside its one connection.
/// - SqliteFile and Postgres: migrate on a one-connection owner pool, close
///   it, then open the app pool.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, AppError> {
    validate_db_config(env, db_kind)?;
    let settings = build_connection_settings(env, db_kind)?;

    info!(
        env = ?env,
        db_kind = %db_kind,
        engine = get_db_engine(db_kind),
        pid = process::id(),
        "bootstrap=start"
    );

    let pool = match db_kind {
        DbKind::SqliteMemory => {
            let pool = build_pool(env, db_kind, &settings).await?;
            run_migrations(&pool, MigrationCommand::Up).await?;
            pool
        }
        DbKind::SqliteFile | DbKind::Postgres => {
            orchestrate_migration(env, db_kind, MigrationCommand::Up).await?;
            build_pool(env, db_kind, &settings).await?
        }
    };

    info!("bootstrap=ready");
    Ok(pool)
}

/// Run `command` on a one-connection owner pool, holding the migration
/// advisory lock on PostgreSQL so concurrent starters migrate one at a time.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), AppError> {
    validate_db_config(env, db_kind)?;
    if db_kind == DbKind::SqliteMemory {
        return Err(AppError::config(
            "in-memory databases are migrated by bootstrap_db, not standalone",
        ));
    }

    let admin = build_admin_pool(env, db_kind).await?;
    session_lock(&admin, MIGRATE_LOCK).await?;
    let migrated = run_migrations(&admin, command).await;
    session_unlock(&admin, MIGRATE_LOCK).await?;
    migrated?;
    admin.close().await?;
    info!(db_kind = %db_kind, command = ?command, "migration=done");
    Ok(())
}

/// Run a migration command, mapping failures to a configuration error.
pub async fn run_migrations(
    pool: &DatabaseConnection,
    command: MigrationCommand,
) -> Result<(), AppError> {
    migrate(pool, command)
        .await
        .map_err(|e| AppError::config(format!("migration execution failed: {e}")))
}

/// Build admin pool for migrations - single connection only
pub async fn build_admin_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, AppError> {
    let url = make_conn_spec(env, db_kind, DbOwner::Owner)?;

    let mut opt = ConnectOptions::new(&url);
    opt.min_connections(1)
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(2))
        .sqlx_logging(false);

    // Retry only for Postgres; SQLite connections are local
    let pool = if matches!(db_kind, DbKind::Postgres) {
        retry_connection(
            || {
                let opt_clone = opt.clone();
                async move {
                    Database::connect(opt_clone).await.map_err(|e| {
                        AppError::config(format!("failed to connect to Postgres (admin pool): {e}"))
                    })
                }
            },
            5,
            500,
        )
        .await?
    } else {
        Database::connect(opt).await.map_err(|e| {
            AppError::config(format!("failed to connect to database (admin pool): {e}"))
        })?
    };
    Ok(pool)
}

pub async fn build_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
    pool_cfg: &ConnectionSettings,
) -> Result<DatabaseConnection, AppError> {
    let url = make_conn_spec(env, db_kind, DbOwner::App)?;

    match db_kind {
        // ---------- SQLite (file and in-memory) ----------
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            let connect_opts = SqliteConnectOptions::from_str(&url)
                .map_err(|e| AppError::config(format!("invalid SQLite connection options: {e}")))?
                .create_if_missing(true);

            let db_settings = pool_cfg.db_settings.clone();
            // idle reaping would drop an in-memory database with its connection
            let pool: SqlitePool = SqlitePoolOptions::new()
                .min_connections(pool_cfg.pool_min)
                .max_connections(pool_cfg.pool_max)
                .acquire_timeout(Duration::from_millis(pool_cfg.acquire_timeout_ms))
                .idle_timeout(None)
                .max_lifetime(None)
                .after_connect(move |conn, _meta| {
                    let settings = db_settings.clone();
                    Box::pin(async move {
                        apply_sqlite_config(conn, &settings).await?;
                        trace!("db=sqlite hook=after_connect ok");
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect_with(connect_opts)
                .await
                .map_err(|e| {
                    AppError::config(format!("failed to create SQLite connection pool: {e}"))
                })?;

            info!(
                engine = "sqlite",
                db_kind = %db_kind,
                min = pool_cfg.pool_min,
                max = pool_cfg.pool_max,
                acquire_timeout_ms = pool_cfg.acquire_timeout_ms,
                "pool=create"
            );
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }

        // ---------- Postgres (Prod/Test) ----------
        DbKind::Postgres => {
            let db_settings = pool_cfg.db_settings.clone();
            let sqlx_pool = PgPoolOptions::new()
                .min_connections(pool_cfg.pool_min)
                .max_connections(pool_cfg.pool_max)
                .acquire_timeout(Duration::from_millis(pool_cfg.acquire_timeout_ms))
                .idle_timeout(Duration::from_secs(30))
                .after_connect(move |conn, _meta| {
                    let settings = db_settings.clone();
                    Box::pin(async move {
                        apply_postgres_config(conn, &settings).await?;
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect(&url)
                .await
                .map_err(|e| AppError::config(format!("failed to connect to Postgres: {e}")))?;

            info!(
                engine = "postgres",
                min = pool_cfg.pool_min,
                max = pool_cfg.pool_max,
                acquire_timeout_ms = pool_cfg.acquire_timeout_ms,
                "pool=create"
            );
            Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(sqlx_pool))
        }
    }
}
