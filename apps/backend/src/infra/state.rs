use tracing::info;

use crate::config::db::{db_kind_from_env, DbKind, RuntimeEnv};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used by tests and binaries)
pub struct StateBuilder {
    env: RuntimeEnv,
    db_kind: Option<DbKind>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Prod,
            db_kind: None,
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_db(mut self, db_kind: DbKind) -> Self {
        self.db_kind = Some(db_kind);
        self
    }

    /// Opens the pool and migrates. Falls back to `QUIZ_DB_KIND` when no
    /// kind was given.
    pub async fn build(self) -> Result<AppState, AppError> {
        let db_kind = match self.db_kind {
            Some(kind) => kind,
            None => db_kind_from_env()?,
        };
        let conn = bootstrap_db(self.env, db_kind).await?;
        info!(env = ?self.env, db_kind = %db_kind, "state=ready");
        Ok(AppState::new(conn))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
