//! SeaORM adapter for set membership rows.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::{question_sets, stars};

/// Question ids bound to a set, ordered by question id.
pub async fn question_ids_for_set<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    set_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    question_sets::Entity::find()
        .select_only()
        .column(question_sets::Column::QuestionId)
        .filter(question_sets::Column::SetId.eq(set_id))
        .order_by_asc(question_sets::Column::QuestionId)
        .into_tuple::<i64>()
        .all(conn)
        .await
}

/// Number of membership rows for a set.
pub async fn count_members<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    set_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    question_sets::Entity::find()
        .filter(question_sets::Column::SetId.eq(set_id))
        .count(conn)
        .await
}

/// Bind questions to a set. Zero ids is a no-op.
pub async fn insert_members(
    txn: &DatabaseTransaction,
    set_id: i64,
    genre_id: i32,
    question_ids: &[i64],
) -> Result<u64, sea_orm::DbErr> {
    if question_ids.is_empty() {
        return Ok(0);
    }
    let rows = question_ids.iter().map(|question_id| question_sets::ActiveModel {
        set_id: Set(set_id),
        question_id: Set(*question_id),
        genre_id: Set(genre_id),
    });
    question_sets::Entity::insert_many(rows)
        .exec_without_returning(txn)
        .await
}

/// Rewrite the genre on the given membership rows. Rows already in
/// `genre_id` are left alone.
pub async fn update_members_genre(
    txn: &DatabaseTransaction,
    set_id: i64,
    question_ids: &[i64],
    genre_id: i32,
) -> Result<u64, sea_orm::DbErr> {
    if question_ids.is_empty() {
        return Ok(0);
    }
    let result = question_sets::Entity::update_many()
        .col_expr(question_sets::Column::GenreId, Expr::value(genre_id))
        .filter(question_sets::Column::SetId.eq(set_id))
        .filter(question_sets::Column::QuestionId.is_in(question_ids.iter().copied()))
        .filter(question_sets::Column::GenreId.ne(genre_id))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}

/// Unbind the given questions from a set.
pub async fn delete_members(
    txn: &DatabaseTransaction,
    set_id: i64,
    question_ids: &[i64],
) -> Result<u64, sea_orm::DbErr> {
    if question_ids.is_empty() {
        return Ok(0);
    }
    let result = question_sets::Entity::delete_many()
        .filter(question_sets::Column::SetId.eq(set_id))
        .filter(question_sets::Column::QuestionId.is_in(question_ids.iter().copied()))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}

/// Remove every membership row of a set.
pub async fn delete_all_for_set(
    txn: &DatabaseTransaction,
    set_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = question_sets::Entity::delete_many()
        .filter(question_sets::Column::SetId.eq(set_id))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}

/// Highest set id seen in either membership or aggregate rows.
pub async fn max_set_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<i64>, sea_orm::DbErr> {
    let from_members = question_sets::Entity::find()
        .select_only()
        .column_as(question_sets::Column::SetId.max(), "max_id")
        .into_tuple::<Option<i64>>()
        .one(conn)
        .await?
        .flatten();

    let from_stars = stars::Entity::find()
        .select_only()
        .column_as(stars::Column::QuestionSetId.max(), "max_id")
        .into_tuple::<Option<i64>>()
        .one(conn)
        .await?
        .flatten();

    Ok(from_members.max(from_stars))
}
