//! Per-user rating repository functions.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;

use crate::adapters::my_stars_sea as my_stars_adapter;
use crate::domain::rating::Rating;
use crate::entities::my_stars;
use crate::errors::domain::DomainError;

/// A user's own rating of a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MyRating {
    pub user_id: i64,
    pub set_id: i64,
    pub rating: i16,
    pub created_at: OffsetDateTime,
}

/// Record a user's rating. A second rating of the same set is a conflict.
pub async fn create(
    txn: &DatabaseTransaction,
    user_id: i64,
    set_id: i64,
    rating: Rating,
) -> Result<MyRating, DomainError> {
    let model =
        my_stars_adapter::create_rating(txn, user_id, set_id, i16::from(rating.value())).await?;
    Ok(MyRating::from(model))
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    set_id: i64,
) -> Result<Option<MyRating>, DomainError> {
    let model = my_stars_adapter::find(conn, user_id, set_id).await?;
    Ok(model.map(MyRating::from))
}

pub async fn delete_for_set(txn: &DatabaseTransaction, set_id: i64) -> Result<u64, DomainError> {
    Ok(my_stars_adapter::delete_for_set(txn, set_id).await?)
}

impl From<my_stars::Model> for MyRating {
    fn from(model: my_stars::Model) -> Self {
        Self {
            user_id: model.user_id,
            set_id: model.question_set_id,
            rating: model.evaluate,
            created_at: model.created_at,
        }
    }
}
