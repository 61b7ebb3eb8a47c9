//! SeaORM adapter for per-user ratings.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QueryFilter,
    Set,
};
use time::OffsetDateTime;

use crate::entities::my_stars;

pub async fn create_rating(
    txn: &DatabaseTransaction,
    user_id: i64,
    set_id: i64,
    evaluate: i16,
) -> Result<my_stars::Model, sea_orm::DbErr> {
    my_stars::ActiveModel {
        user_id: Set(user_id),
        question_set_id: Set(set_id),
        evaluate: Set(evaluate),
        created_at: Set(OffsetDateTime::now_utc()),
    }
    .insert(txn)
    .await
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    set_id: i64,
) -> Result<Option<my_stars::Model>, sea_orm::DbErr> {
    my_stars::Entity::find_by_id((user_id, set_id))
        .one(conn)
        .await
}

/// Drop every user's rating of a set.
pub async fn delete_for_set(
    txn: &DatabaseTransaction,
    set_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = my_stars::Entity::delete_many()
        .filter(my_stars::Column::QuestionSetId.eq(set_id))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}
