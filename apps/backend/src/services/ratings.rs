//! Star ratings: per-set aggregate under a row lock, plus per-user records.

use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use crate::db::txn::with_txn;
use crate::domain::rating::Rating;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::logging::pii::UserRef;
use crate::repos::my_stars::{self, MyRating};
use crate::repos::stars::{self, StarAggregate};
use crate::repos::question_sets;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Copy, Default)]
pub struct RatingService;

impl RatingService {
    pub fn new() -> Self {
        Self
    }

    /// Add one rating to the set's aggregate and return the new average.
    ///
    /// Values outside 1..=5 are rejected before a transaction is opened.
    pub async fn rate(&self, state: &AppState, set_id: i64, rating: i32) -> Result<f64, AppError> {
        let rating = Rating::try_from(rating)?;
        let svc = *self;
        let aggregate = with_txn(state, move |txn| {
            Box::pin(async move { svc.rate_in_txn(txn, set_id, rating).await })
        })
        .await?;
        Ok(aggregate.avg_star)
    }

    /// Locked read-modify-write of the aggregate row. Concurrent raters of
    /// the same set queue on the row lock; other sets are unaffected.
    pub async fn rate_in_txn(
        &self,
        txn: &DatabaseTransaction,
        set_id: i64,
        rating: Rating,
    ) -> Result<StarAggregate, AppError> {
        let current = stars::lock_or_create(txn, set_id).await?;
        let mut counts = current.counts;
        counts.record(rating);
        let saved = stars::save_counts(txn, set_id, &counts).await?;
        debug!(
            set_id,
            rating = rating.value(),
            total = saved.total_stars,
            avg = saved.avg_star,
            "Rating recorded"
        );
        Ok(saved)
    }

    /// Record the user's own rating and fold it into the aggregate, in one
    /// transaction. Rating the same set twice is `ALREADY_RATED`.
    pub async fn rate_as_user(
        &self,
        state: &AppState,
        user_id: i64,
        set_id: i64,
        rating: i32,
    ) -> Result<f64, AppError> {
        let rating = Rating::try_from(rating)?;
        let svc = *self;
        let aggregate = with_txn(state, move |txn| {
            Box::pin(async move {
                if question_sets::count_members(txn, set_id).await? == 0 {
                    return Err(AppError::from(DomainError::not_found(
                        NotFoundKind::QuestionSet,
                        format!("Question set {set_id} not found"),
                    )));
                }
                my_stars::create(txn, user_id, set_id, rating).await?;
                svc.rate_in_txn(txn, set_id, rating).await
            })
        })
        .await?;

        info!(
            user = %UserRef(user_id),
            set_id,
            rating = rating.value(),
            avg = aggregate.avg_star,
            "User rated set"
        );
        Ok(aggregate.avg_star)
    }

    pub async fn my_rating(
        &self,
        state: &AppState,
        user_id: i64,
        set_id: i64,
    ) -> Result<Option<MyRating>, AppError> {
        Ok(my_stars::find(state.db(), user_id, set_id).await?)
    }

    pub async fn aggregate(
        &self,
        state: &AppState,
        set_id: i64,
    ) -> Result<StarAggregate, AppError> {
        stars::find(state.db(), set_id).await?.ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Star,
                format!("No rating aggregate for set {set_id}"),
            )
            .into()
        })
    }
}
