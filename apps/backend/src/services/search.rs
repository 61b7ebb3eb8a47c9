//! Set search and the author's own listing.

use crate::domain::pagination::{Page, Paged};
use crate::entities::questions::Visibility;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::search::{self, CreatedSet, SetFilter, SetSummary};
use crate::state::app_state::AppState;

/// Parse a visibility filter; `"all"` (or empty) disables filtering.
pub fn visibility_filter(raw: &str) -> Result<Option<Visibility>, AppError> {
    match raw {
        "" | "all" => Ok(None),
        "public" => Ok(Some(Visibility::Public)),
        "private" => Ok(Some(Visibility::Private)),
        other => Err(DomainError::validation(
            ValidationKind::Other("INVALID_VISIBILITY".into()),
            format!("Unknown visibility filter '{other}'"),
        )
        .into()),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchService;

impl SearchService {
    pub fn new() -> Self {
        Self
    }

    /// Sets visible to `viewer_id`, most rated first.
    pub async fn search_sets(
        &self,
        state: &AppState,
        viewer_id: i64,
        filter: &SetFilter,
        page: Page,
    ) -> Result<Paged<SetSummary>, AppError> {
        Ok(search::search_sets(state.db(), filter, viewer_id, page).await?)
    }

    pub async fn my_created_sets(
        &self,
        state: &AppState,
        owner_id: i64,
        filter: &SetFilter,
        page: Page,
    ) -> Result<Paged<CreatedSet>, AppError> {
        Ok(search::created_sets(state.db(), filter, owner_id, page).await?)
    }
}
