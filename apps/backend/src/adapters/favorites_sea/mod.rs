//! SeaORM adapter for favorite bookmarks.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::entities::favorite_questions;

/// Bookmark a set. Returns 0 when it was already bookmarked.
pub async fn add(
    txn: &DatabaseTransaction,
    user_id: i64,
    set_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let row = favorite_questions::ActiveModel {
        user_id: Set(user_id),
        question_set_id: Set(set_id),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    favorite_questions::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([
                favorite_questions::Column::UserId,
                favorite_questions::Column::QuestionSetId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(txn)
        .await
}

pub async fn remove(
    txn: &DatabaseTransaction,
    user_id: i64,
    set_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = favorite_questions::Entity::delete_by_id((user_id, set_id))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    set_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let row = favorite_questions::Entity::find_by_id((user_id, set_id))
        .one(conn)
        .await?;
    Ok(row.is_some())
}

pub async fn delete_for_set(
    txn: &DatabaseTransaction,
    set_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = favorite_questions::Entity::delete_many()
        .filter(favorite_questions::Column::QuestionSetId.eq(set_id))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}
