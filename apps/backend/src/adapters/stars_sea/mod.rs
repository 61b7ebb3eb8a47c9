//! SeaORM adapter for aggregate rating rows.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QuerySelect, Set,
};

use crate::entities::stars;

pub mod dto;

pub use dto::StarCountsUpdate;

fn zero_row(set_id: i64) -> stars::ActiveModel {
    stars::ActiveModel {
        question_set_id: Set(set_id),
        star1: Set(0),
        star2: Set(0),
        star3: Set(0),
        star4: Set(0),
        star5: Set(0),
        total_stars: Set(0),
        avg_star: Set(0.0),
    }
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    set_id: i64,
) -> Result<Option<stars::Model>, sea_orm::DbErr> {
    stars::Entity::find_by_id(set_id).one(conn).await
}

/// Read the row under an exclusive row lock (`FOR UPDATE` on PostgreSQL).
pub async fn find_for_update(
    txn: &DatabaseTransaction,
    set_id: i64,
) -> Result<Option<stars::Model>, sea_orm::DbErr> {
    stars::Entity::find_by_id(set_id)
        .lock_exclusive()
        .one(txn)
        .await
}

/// Insert a zeroed row. Fails on an existing row.
pub async fn create_zero(
    txn: &DatabaseTransaction,
    set_id: i64,
) -> Result<stars::Model, sea_orm::DbErr> {
    zero_row(set_id).insert(txn).await
}

/// Insert a zeroed row unless one exists. Returns rows inserted.
pub async fn create_zero_if_absent(
    txn: &DatabaseTransaction,
    set_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    stars::Entity::insert(zero_row(set_id))
        .on_conflict(
            OnConflict::column(stars::Column::QuestionSetId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(txn)
        .await
}

/// Persist new bucket counts and derived totals.
pub async fn update_counts(
    txn: &DatabaseTransaction,
    dto: StarCountsUpdate,
) -> Result<stars::Model, sea_orm::DbErr> {
    let row = stars::ActiveModel {
        question_set_id: Set(dto.question_set_id),
        star1: Set(dto.buckets[0]),
        star2: Set(dto.buckets[1]),
        star3: Set(dto.buckets[2]),
        star4: Set(dto.buckets[3]),
        star5: Set(dto.buckets[4]),
        total_stars: Set(dto.total_stars),
        avg_star: Set(dto.avg_star),
    };
    row.update(txn).await
}

pub async fn delete(txn: &DatabaseTransaction, set_id: i64) -> Result<u64, sea_orm::DbErr> {
    let result = stars::Entity::delete_by_id(set_id).exec(txn).await?;
    Ok(result.rows_affected)
}
