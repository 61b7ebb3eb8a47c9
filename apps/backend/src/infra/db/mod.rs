//! Database infrastructure - pool construction, migrations and advisory locks.

pub mod core;
pub mod locking;

pub use core::{bootstrap_db, build_admin_pool, build_pool, orchestrate_migration, run_migrations};

pub use crate::config::db::{DbKind, DbOwner, RuntimeEnv};
