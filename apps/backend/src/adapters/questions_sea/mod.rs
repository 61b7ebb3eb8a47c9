//! SeaORM adapter for the questions table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::questions;

pub mod dto;

pub use dto::{QuestionCreate, QuestionUpdate};

/// Insert questions in one statement and return them ordered by id.
/// Zero rows is a no-op.
pub async fn create_many(
    txn: &DatabaseTransaction,
    dtos: Vec<QuestionCreate>,
) -> Result<Vec<questions::Model>, sea_orm::DbErr> {
    if dtos.is_empty() {
        return Ok(Vec::new());
    }
    let now = OffsetDateTime::now_utc();

    let rows = dtos.into_iter().map(|dto| questions::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        title: Set(dto.title),
        genre_id: Set(dto.genre_id),
        visibility: Set(dto.visibility),
        question: Set(dto.question),
        answer: Set(dto.answer),
        choices1: Set(dto.choices1),
        choices2: Set(dto.choices2),
        created_at: Set(dto.created_at),
        updated_at: Set(now),
    });

    // RETURNING order is unspecified on SQLite.
    let mut models = questions::Entity::insert_many(rows)
        .exec_with_returning_many(txn)
        .await?;
    models.sort_by_key(|m| m.id);
    Ok(models)
}

/// Rewrite content columns of an existing question.
///
/// Owner and creation time are left untouched.
pub async fn update_question(
    txn: &DatabaseTransaction,
    dto: QuestionUpdate,
) -> Result<questions::Model, sea_orm::DbErr> {
    let question = questions::ActiveModel {
        id: Set(dto.id),
        user_id: NotSet,
        title: Set(dto.title),
        genre_id: Set(dto.genre_id),
        visibility: Set(dto.visibility),
        question: Set(dto.question),
        answer: Set(dto.answer),
        choices1: Set(dto.choices1),
        choices2: Set(dto.choices2),
        created_at: NotSet,
        updated_at: Set(OffsetDateTime::now_utc()),
    };

    question.update(txn).await
}

/// Delete questions by id. Zero ids is a no-op.
pub async fn delete_by_ids(txn: &DatabaseTransaction, ids: &[i64]) -> Result<u64, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(0);
    }
    let result = questions::Entity::delete_many()
        .filter(questions::Column::Id.is_in(ids.iter().copied()))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}

/// Fetch questions by id, ordered by id.
pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<questions::Model>, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    questions::Entity::find()
        .filter(questions::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(questions::Column::Id)
        .all(conn)
        .await
}

/// Earliest creation time among the given questions.
pub async fn earliest_created_at<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Option<OffsetDateTime>, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(None);
    }
    let first = questions::Entity::find()
        .filter(questions::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(questions::Column::CreatedAt)
        .one(conn)
        .await?;
    Ok(first.map(|q| q.created_at))
}

/// Count how many of the given questions were not authored by `user_id`.
pub async fn count_not_owned_by<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(0);
    }
    questions::Entity::find()
        .filter(questions::Column::Id.is_in(ids.iter().copied()))
        .filter(questions::Column::UserId.ne(user_id))
        .count(conn)
        .await
}

/// `(id, answer)` pairs for the given questions, ordered by id.
pub async fn answers_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<(i64, String)>, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    questions::Entity::find()
        .select_only()
        .column(questions::Column::Id)
        .column(questions::Column::Answer)
        .filter(questions::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(questions::Column::Id)
        .into_tuple::<(i64, String)>()
        .all(conn)
        .await
}
