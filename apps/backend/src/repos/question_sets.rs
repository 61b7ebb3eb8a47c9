//! Set membership repository functions.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::debug;

use crate::adapters::question_sets_sea as sets_adapter;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db::locking::{xact_lock, SET_ID_ALLOC_LOCK};

/// Question ids bound to a set, ascending.
pub async fn member_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    set_id: i64,
) -> Result<Vec<i64>, DomainError> {
    Ok(sets_adapter::question_ids_for_set(conn, set_id).await?)
}

/// Like [`member_ids`] but an empty set is `NotFound`.
pub async fn require_member_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    set_id: i64,
) -> Result<Vec<i64>, DomainError> {
    let ids = member_ids(conn, set_id).await?;
    if ids.is_empty() {
        return Err(DomainError::not_found(
            NotFoundKind::QuestionSet,
            format!("Question set {set_id} not found"),
        ));
    }
    Ok(ids)
}

pub async fn count_members<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    set_id: i64,
) -> Result<u64, DomainError> {
    Ok(sets_adapter::count_members(conn, set_id).await?)
}

pub async fn bind_questions(
    txn: &DatabaseTransaction,
    set_id: i64,
    genre_id: i32,
    question_ids: &[i64],
) -> Result<u64, DomainError> {
    Ok(sets_adapter::insert_members(txn, set_id, genre_id, question_ids).await?)
}

pub async fn rebind_genre(
    txn: &DatabaseTransaction,
    set_id: i64,
    question_ids: &[i64],
    genre_id: i32,
) -> Result<u64, DomainError> {
    Ok(sets_adapter::update_members_genre(txn, set_id, question_ids, genre_id).await?)
}

pub async fn unbind_questions(
    txn: &DatabaseTransaction,
    set_id: i64,
    question_ids: &[i64],
) -> Result<u64, DomainError> {
    Ok(sets_adapter::delete_members(txn, set_id, question_ids).await?)
}

pub async fn unbind_all(txn: &DatabaseTransaction, set_id: i64) -> Result<u64, DomainError> {
    Ok(sets_adapter::delete_all_for_set(txn, set_id).await?)
}

/// Allocate the next set identifier inside `txn`.
///
/// On PostgreSQL a transaction-scoped advisory lock serializes concurrent
/// allocators until commit. SQLite pools hold one connection, so the
/// transaction itself is already exclusive.
pub async fn allocate_set_id(txn: &DatabaseTransaction) -> Result<i64, DomainError> {
    xact_lock(txn, SET_ID_ALLOC_LOCK).await?;
    let current = sets_adapter::max_set_id(txn).await?;
    let next = current.unwrap_or(0) + 1;
    debug!(current = ?current, next, "Allocated set id");
    Ok(next)
}
