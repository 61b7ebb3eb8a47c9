//! Learning registrations and progress tracking.

use std::collections::BTreeSet;

use time::Date;
use tracing::{debug, info};

use crate::db::txn::with_txn;
use crate::domain::pagination::{Page, Paged};
use crate::domain::progress::compute_progress;
use crate::entities::my_questions::LearningStatus;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::logging::pii::UserRef;
use crate::repos::learning::{self, Registration};
use crate::repos::search::{self, LearningEntry};
use crate::repos::question_sets;
use crate::state::app_state::AppState;

/// Parse a status filter; `"all"` (or empty) disables filtering.
pub fn status_filter(raw: &str) -> Result<Option<LearningStatus>, AppError> {
    match raw {
        "" | "all" => Ok(None),
        "not_started" => Ok(Some(LearningStatus::NotStarted)),
        "in_progress" => Ok(Some(LearningStatus::InProgress)),
        "completed" => Ok(Some(LearningStatus::Completed)),
        other => Err(DomainError::validation(
            ValidationKind::Other("INVALID_STATUS".into()),
            format!("Unknown learning status filter '{other}'"),
        )
        .into()),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LearningService;

impl LearningService {
    pub fn new() -> Self {
        Self
    }

    /// Register a set for learning.
    pub async fn register(
        &self,
        state: &AppState,
        user_id: i64,
        set_id: i64,
        deadline: Option<Date>,
    ) -> Result<Registration, AppError> {
        let registration = with_txn(state, move |txn| {
            Box::pin(async move {
                if question_sets::count_members(txn, set_id).await? == 0 {
                    return Err(AppError::from(DomainError::not_found(
                        NotFoundKind::QuestionSet,
                        format!("Question set {set_id} not found"),
                    )));
                }
                Ok::<_, AppError>(learning::register(txn, user_id, set_id, deadline).await?)
            })
        })
        .await?;

        info!(user = %UserRef(user_id), set_id, "Registered set for learning");
        Ok(registration)
    }

    pub async fn is_registered(
        &self,
        state: &AppState,
        user_id: i64,
        set_id: i64,
    ) -> Result<bool, AppError> {
        Ok(learning::find(state.db(), user_id, set_id).await?.is_some())
    }

    /// Move a registration to in_progress. Any later status is left alone.
    pub async fn start(
        &self,
        state: &AppState,
        user_id: i64,
        set_id: i64,
    ) -> Result<Registration, AppError> {
        with_txn(state, move |txn| {
            Box::pin(async move {
                let mut registration = learning::require_for_update(txn, user_id, set_id).await?;
                if learning::mark_started(txn, user_id, set_id).await? {
                    registration.status = LearningStatus::InProgress;
                    debug!(user = %UserRef(user_id), set_id, "Learning started");
                }
                Ok::<_, AppError>(registration)
            })
        })
        .await
    }

    /// Record correctly answered questions. Every id must belong to the set.
    /// Returns how many answers were new.
    pub async fn record_correct_answers(
        &self,
        state: &AppState,
        user_id: i64,
        set_id: i64,
        question_ids: Vec<i64>,
    ) -> Result<u64, AppError> {
        with_txn(state, move |txn| {
            Box::pin(async move {
                let members: BTreeSet<i64> = question_sets::require_member_ids(txn, set_id)
                    .await?
                    .into_iter()
                    .collect();
                let answered: BTreeSet<i64> = question_ids.into_iter().collect();
                if let Some(stray) = answered.difference(&members).next() {
                    return Err(AppError::from(DomainError::validation(
                        ValidationKind::QuestionNotInSet,
                        format!("Question {stray} is not part of set {set_id}"),
                    )));
                }
                let ids: Vec<i64> = answered.into_iter().collect();
                let inserted = learning::record_correct(txn, user_id, set_id, &ids).await?;
                debug!(
                    user = %UserRef(user_id),
                    set_id,
                    submitted = ids.len(),
                    inserted,
                    "Correct answers recorded"
                );
                Ok::<_, AppError>(inserted)
            })
        })
        .await
    }

    /// Recompute progress from correct answers, count an attempt, and
    /// advance the status. Completion never reverts.
    pub async fn update_progress(
        &self,
        state: &AppState,
        user_id: i64,
        set_id: i64,
    ) -> Result<Registration, AppError> {
        let registration = with_txn(state, move |txn| {
            Box::pin(async move {
                let mut registration = learning::require_for_update(txn, user_id, set_id).await?;
                let total = question_sets::count_members(txn, set_id).await?;
                let correct = learning::count_correct(txn, user_id, set_id).await?;
                let outcome = compute_progress(correct, total);

                registration.progress = outcome.progress;
                registration.attempts += 1;
                registration.status = match registration.status {
                    LearningStatus::Completed => LearningStatus::Completed,
                    _ if outcome.completed => LearningStatus::Completed,
                    _ => LearningStatus::InProgress,
                };

                Ok::<_, AppError>(learning::save_progress(txn, &registration).await?)
            })
        })
        .await?;

        info!(
            user = %UserRef(user_id),
            set_id,
            progress = registration.progress,
            attempts = registration.attempts,
            status = ?registration.status,
            "Learning progress updated"
        );
        Ok(registration)
    }

    pub async fn my_learning_list(
        &self,
        state: &AppState,
        user_id: i64,
        title: &str,
        status: Option<LearningStatus>,
        genre_id: i32,
        page: Page,
    ) -> Result<Paged<LearningEntry>, AppError> {
        Ok(search::learning_list(state.db(), user_id, title, status, genre_id, page).await?)
    }
}
