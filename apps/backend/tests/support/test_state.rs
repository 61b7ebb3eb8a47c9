use std::env;
use std::env::VarError;
use std::str::FromStr;

use quiz_backend::config::db::{DbKind, RuntimeEnv};
use quiz_backend::infra::state::{build_state, StateBuilder};
use quiz_backend::state::app_state::AppState;
use quiz_backend::AppError;
use sea_orm::{ConnectionTrait, DatabaseBackend};

fn read_env_db_kind() -> Result<Option<String>, AppError> {
    match env::var("QUIZ_TEST_DB_KIND") {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(AppError::config(format!(
            "failed to read QUIZ_TEST_DB_KIND: {err}"
        ))),
    }
}

/// `QUIZ_TEST_DB_KIND`, defaulting to a private in-memory SQLite database.
pub fn resolve_test_db_kind() -> Result<DbKind, AppError> {
    let resolved = match read_env_db_kind()? {
        Some(ref raw) => DbKind::from_str(raw.as_str())?,
        None => DbKind::SqliteMemory,
    };
    Ok(resolved)
}

pub fn test_state_builder() -> Result<StateBuilder, AppError> {
    let db_kind = resolve_test_db_kind()?;
    Ok(build_state().with_env(RuntimeEnv::Test).with_db(db_kind))
}

/// A freshly migrated state. With the default store every call gets its own
/// empty database.
pub async fn build_test_state() -> Result<AppState, AppError> {
    test_state_builder()?.build().await
}

pub fn is_sqlite(state: &AppState) -> bool {
    state.db().get_database_backend() == DatabaseBackend::Sqlite
}
