//! Favorite bookmarks.

use tracing::debug;

use crate::db::txn::with_txn;
use crate::domain::pagination::{Page, Paged};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::logging::pii::UserRef;
use crate::repos::search::{self, SetFilter, SetSummary};
use crate::repos::{favorites, question_sets};
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Copy, Default)]
pub struct FavoriteService;

impl FavoriteService {
    pub fn new() -> Self {
        Self
    }

    /// Bookmark a set. Bookmarking twice is not an error; returns whether a
    /// new bookmark was written.
    pub async fn add(&self, state: &AppState, user_id: i64, set_id: i64) -> Result<bool, AppError> {
        let added = with_txn(state, move |txn| {
            Box::pin(async move {
                if question_sets::count_members(txn, set_id).await? == 0 {
                    return Err(AppError::from(DomainError::not_found(
                        NotFoundKind::QuestionSet,
                        format!("Question set {set_id} not found"),
                    )));
                }
                Ok::<_, AppError>(favorites::add(txn, user_id, set_id).await?)
            })
        })
        .await?;
        debug!(user = %UserRef(user_id), set_id, added, "Favorite added");
        Ok(added)
    }

    pub async fn remove(
        &self,
        state: &AppState,
        user_id: i64,
        set_id: i64,
    ) -> Result<bool, AppError> {
        let removed = with_txn(state, move |txn| {
            Box::pin(async move {
                Ok::<_, AppError>(favorites::remove(txn, user_id, set_id).await?)
            })
        })
        .await?;
        debug!(user = %UserRef(user_id), set_id, removed, "Favorite removed");
        Ok(removed)
    }

    pub async fn is_favorite(
        &self,
        state: &AppState,
        user_id: i64,
        set_id: i64,
    ) -> Result<bool, AppError> {
        Ok(favorites::exists(state.db(), user_id, set_id).await?)
    }

    /// The user's bookmarked sets, in search order.
    pub async fn search_favorite_sets(
        &self,
        state: &AppState,
        user_id: i64,
        filter: &SetFilter,
        page: Page,
    ) -> Result<Paged<SetSummary>, AppError> {
        Ok(search::search_favorite_sets(state.db(), filter, user_id, page).await?)
    }
}
