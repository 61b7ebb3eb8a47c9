//! SeaORM adapter for correct-answer records.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use time::OffsetDateTime;

use crate::entities::correct_answers;

pub mod dto;

pub use dto::CorrectAnswerCreate;

/// Batch insert; rows for already answered questions are skipped.
pub async fn insert_batch(
    txn: &DatabaseTransaction,
    rows: &[CorrectAnswerCreate],
) -> Result<u64, sea_orm::DbErr> {
    if rows.is_empty() {
        return Ok(0);
    }
    let now = OffsetDateTime::now_utc();
    let models = rows.iter().map(|r| correct_answers::ActiveModel {
        user_id: Set(r.user_id),
        question_id: Set(r.question_id),
        question_set_id: Set(r.question_set_id),
        created_at: Set(now),
    });
    correct_answers::Entity::insert_many(models)
        .on_conflict(
            OnConflict::columns([
                correct_answers::Column::UserId,
                correct_answers::Column::QuestionId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(txn)
        .await
}

/// Number of questions of a set the user has answered correctly.
pub async fn count_for_set<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    set_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    correct_answers::Entity::find()
        .filter(correct_answers::Column::UserId.eq(user_id))
        .filter(correct_answers::Column::QuestionSetId.eq(set_id))
        .count(conn)
        .await
}

pub async fn delete_for_set(
    txn: &DatabaseTransaction,
    set_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = correct_answers::Entity::delete_many()
        .filter(correct_answers::Column::QuestionSetId.eq(set_id))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}
