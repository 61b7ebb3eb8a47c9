//! Aggregate rating repository functions.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::stars_sea as stars_adapter;
use crate::domain::rating::StarCounts;
use crate::entities::stars;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Aggregate rating for one set.
#[derive(Debug, Clone, PartialEq)]
pub struct StarAggregate {
    pub set_id: i64,
    pub counts: StarCounts,
    pub total_stars: i32,
    pub avg_star: f64,
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    set_id: i64,
) -> Result<Option<StarAggregate>, DomainError> {
    let model = stars_adapter::find(conn, set_id).await?;
    Ok(model.map(StarAggregate::from))
}

pub async fn create_zero(
    txn: &DatabaseTransaction,
    set_id: i64,
) -> Result<StarAggregate, DomainError> {
    let model = stars_adapter::create_zero(txn, set_id).await?;
    Ok(StarAggregate::from(model))
}

/// Lock the aggregate row for `set_id`, creating a zeroed row first when
/// none exists. The lock is held until `txn` ends.
pub async fn lock_or_create(
    txn: &DatabaseTransaction,
    set_id: i64,
) -> Result<StarAggregate, DomainError> {
    if let Some(model) = stars_adapter::find_for_update(txn, set_id).await? {
        return Ok(StarAggregate::from(model));
    }

    // A concurrent first rater may insert between our read and insert.
    stars_adapter::create_zero_if_absent(txn, set_id).await?;

    let model = stars_adapter::find_for_update(txn, set_id)
        .await?
        .ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Star row for set {set_id} missing after insert"),
            )
        })?;
    Ok(StarAggregate::from(model))
}

/// Persist `counts` with recomputed total and average.
pub async fn save_counts(
    txn: &DatabaseTransaction,
    set_id: i64,
    counts: &StarCounts,
) -> Result<StarAggregate, DomainError> {
    let dto = stars_adapter::StarCountsUpdate {
        question_set_id: set_id,
        buckets: counts.buckets,
        total_stars: counts.total(),
        avg_star: counts.average(),
    };
    let model = stars_adapter::update_counts(txn, dto).await?;
    Ok(StarAggregate::from(model))
}

pub async fn delete(txn: &DatabaseTransaction, set_id: i64) -> Result<u64, DomainError> {
    Ok(stars_adapter::delete(txn, set_id).await?)
}

impl From<stars::Model> for StarAggregate {
    fn from(model: stars::Model) -> Self {
        Self {
            set_id: model.question_set_id,
            counts: StarCounts::new(
                model.star1,
                model.star2,
                model.star3,
                model.star4,
                model.star5,
            ),
            total_stars: model.total_stars,
            avg_star: model.avg_star,
        }
    }
}
