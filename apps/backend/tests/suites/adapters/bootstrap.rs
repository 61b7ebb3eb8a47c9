use migration::MigrationCommand;
use quiz_backend::config::db::{DbKind, RuntimeEnv};
use quiz_backend::infra::db::orchestrate_migration;
use quiz_backend::repos::question_sets;
use quiz_backend::{build_state, AppError, ErrorCode};
use tempfile::TempDir;

use crate::support::factory::{create_genre, create_set, create_user};

#[tokio::test]
async fn file_database_survives_a_restart() -> Result<(), AppError> {
    let dir = TempDir::new().map_err(|e| AppError::config(e.to_string()))?;
    let path = dir.path().join("quiz.db");
    std::env::set_var("QUIZ_SQLITE_FILE", &path);

    let first = build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteFile)
        .build()
        .await?;
    let user = create_user(first.db(), "author").await?;
    let genre = create_genre(first.db()).await?;
    let set_id = create_set(&first, user, genre, "Persisted", 2).await?;
    drop(first);

    // Migrating an up-to-date file again is a no-op.
    orchestrate_migration(RuntimeEnv::Test, DbKind::SqliteFile, MigrationCommand::Up).await?;

    let second = build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteFile)
        .build()
        .await?;
    let ids = question_sets::member_ids(second.db(), set_id).await?;
    assert_eq!(ids.len(), 2);
    Ok(())
}

#[tokio::test]
async fn in_memory_stores_cannot_be_migrated_standalone() {
    let result =
        orchestrate_migration(RuntimeEnv::Test, DbKind::SqliteMemory, MigrationCommand::Up).await;
    let err = result.expect_err("in-memory migration must be refused");
    assert_eq!(err.code(), ErrorCode::ConfigError);
}
