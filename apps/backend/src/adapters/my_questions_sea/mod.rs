//! SeaORM adapter for learning registrations.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QuerySelect, Set,
};
use time::{Date, OffsetDateTime};

use crate::entities::my_questions::{self, LearningStatus};

pub mod dto;

pub use dto::ProgressUpdate;

pub async fn create_registration(
    txn: &DatabaseTransaction,
    user_id: i64,
    set_id: i64,
    deadline: Option<Date>,
) -> Result<my_questions::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    my_questions::ActiveModel {
        user_id: Set(user_id),
        question_set_id: Set(set_id),
        progress: Set(0.0),
        attempts: Set(0),
        status: Set(LearningStatus::NotStarted),
        deadline: Set(deadline),
        last_updated_at: Set(now),
        created_at: Set(now),
    }
    .insert(txn)
    .await
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    set_id: i64,
) -> Result<Option<my_questions::Model>, sea_orm::DbErr> {
    my_questions::Entity::find_by_id((user_id, set_id))
        .one(conn)
        .await
}

/// Read a registration under an exclusive row lock.
pub async fn find_for_update(
    txn: &DatabaseTransaction,
    user_id: i64,
    set_id: i64,
) -> Result<Option<my_questions::Model>, sea_orm::DbErr> {
    my_questions::Entity::find_by_id((user_id, set_id))
        .lock_exclusive()
        .one(txn)
        .await
}

/// Move a registration from not_started to in_progress. Returns rows changed.
pub async fn mark_started(
    txn: &DatabaseTransaction,
    user_id: i64,
    set_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = my_questions::Entity::update_many()
        .col_expr(
            my_questions::Column::Status,
            Expr::value(LearningStatus::InProgress),
        )
        .col_expr(
            my_questions::Column::LastUpdatedAt,
            Expr::value(OffsetDateTime::now_utc()),
        )
        .filter(my_questions::Column::UserId.eq(user_id))
        .filter(my_questions::Column::QuestionSetId.eq(set_id))
        .filter(my_questions::Column::Status.eq(LearningStatus::NotStarted))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn update_progress(
    txn: &DatabaseTransaction,
    dto: ProgressUpdate,
) -> Result<my_questions::Model, sea_orm::DbErr> {
    my_questions::ActiveModel {
        user_id: Set(dto.user_id),
        question_set_id: Set(dto.question_set_id),
        progress: Set(dto.progress),
        attempts: Set(dto.attempts),
        status: Set(dto.status),
        deadline: NotSet,
        last_updated_at: Set(OffsetDateTime::now_utc()),
        created_at: NotSet,
    }
    .update(txn)
    .await
}

pub async fn delete_for_set(
    txn: &DatabaseTransaction,
    set_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = my_questions::Entity::delete_many()
        .filter(my_questions::Column::QuestionSetId.eq(set_id))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}
