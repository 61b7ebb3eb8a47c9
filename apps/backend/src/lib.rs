#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod logging;
pub mod repos;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;


// Re-exports for public API
pub use config::db::{DbKind, DbOwner, RuntimeEnv};
pub use db::txn::with_txn;
pub use error::AppError;
pub use errors::ErrorCode;
pub use infra::state::build_state;
pub use services::{
    FavoriteService, LearningService, QuestionSetService, RatingService, SearchService,
};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
