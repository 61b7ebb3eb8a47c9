//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert through `map_db_err` so the
//! layers above only ever see `DomainError`.

use tracing::{error, warn};

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract the column list from "UNIQUE constraint failed: t.a, t.b".
fn extract_sqlite_columns(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    let rest = &error_msg[start..];
    let end = rest
        .find(|c: char| c == '\n' || c == '"' || c == ')')
        .unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// Primary keys on SQLite are reported by column list, not constraint name.
fn map_sqlite_columns_to_conflict(columns: &str) -> Option<(ConflictKind, &'static str)> {
    match columns {
        "my_stars.user_id, my_stars.question_set_id" => {
            Some((ConflictKind::AlreadyRated, "User already rated this set"))
        }
        "my_questions.user_id, my_questions.question_set_id" => Some((
            ConflictKind::AlreadyRegistered,
            "User already registered this set",
        )),
        "stars.question_set_id" => Some((
            ConflictKind::SetIdCollision,
            "Set identifier was allocated twice",
        )),
        _ => None,
    }
}

fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("my_stars_pkey") {
        return Some((ConflictKind::AlreadyRated, "User already rated this set"));
    }
    if error_msg.contains("my_questions_pkey") {
        return Some((
            ConflictKind::AlreadyRegistered,
            "User already registered this set",
        ));
    }
    if error_msg.contains("stars_pkey") {
        return Some((
            ConflictKind::SetIdCollision,
            "Set identifier was allocated twice",
        ));
    }
    None
}

fn is_lock_contention(msg: &str) -> bool {
    mentions_sqlstate(msg, "55P03")
        || msg.contains("lock timeout")
        || msg.contains("database is locked")
        || msg.contains("database table is locked")
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(
                NotFoundKind::Other(what.clone()),
                "Record not found",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");

        if let Some(columns) = extract_sqlite_columns(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_columns_to_conflict(columns) {
                return DomainError::conflict(kind, detail);
            }
        }

        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation(
            ValidationKind::ForeignKey,
            "Foreign key constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Check constraint violation");
        return DomainError::validation(
            ValidationKind::CheckConstraint,
            "Check constraint violation",
        );
    }

    if is_lock_contention(&error_msg) {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Row lock not acquired");
        return DomainError::infra(InfraErrorKind::LockTimeout, "Lock wait timed out");
    }

    if error_msg.contains("timeout")
        || error_msg.contains("timed out")
        || error_msg.contains("pool")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
