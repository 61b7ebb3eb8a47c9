//! Favorite bookmark repository functions.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::favorites_sea as favorites_adapter;
use crate::errors::domain::DomainError;

/// Returns true when a new bookmark was written.
pub async fn add(txn: &DatabaseTransaction, user_id: i64, set_id: i64) -> Result<bool, DomainError> {
    Ok(favorites_adapter::add(txn, user_id, set_id).await? > 0)
}

/// Returns true when a bookmark was removed.
pub async fn remove(
    txn: &DatabaseTransaction,
    user_id: i64,
    set_id: i64,
) -> Result<bool, DomainError> {
    Ok(favorites_adapter::remove(txn, user_id, set_id).await? > 0)
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    set_id: i64,
) -> Result<bool, DomainError> {
    Ok(favorites_adapter::exists(conn, user_id, set_id).await?)
}

pub async fn delete_for_set(txn: &DatabaseTransaction, set_id: i64) -> Result<u64, DomainError> {
    Ok(favorites_adapter::delete_for_set(txn, set_id).await?)
}
