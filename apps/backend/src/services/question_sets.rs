//! Question-set authoring: creation, reconciliation and deletion.

use std::collections::{BTreeMap, HashMap};

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::db::txn::with_txn;
use crate::domain::reconcile::partition;
use crate::entities::questions::Visibility;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ForbiddenKind, NotFoundKind, ValidationKind};
use crate::logging::pii::UserRef;
use crate::repos::genres::{self, Genre};
use crate::repos::questions::{
    self, Question, QuestionAnswer, QuestionCreate, QuestionUpdate, QuestionView,
};
use crate::repos::{favorites, learning, my_stars, question_sets, stars};
use crate::state::app_state::AppState;

/// A question authored as part of a brand-new set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub user_id: i64,
    pub title: String,
    pub genre_id: i32,
    pub visibility: Visibility,
    pub question: String,
    pub answer: String,
    pub choices1: String,
    pub choices2: String,
}

/// One entry of a fix request. `id` is `None` for a question to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: Option<i64>,
    pub visibility: Visibility,
    pub question: String,
    pub answer: String,
    pub choices1: String,
    pub choices2: String,
}

/// Desired state of an existing set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixSetRequest {
    pub set_id: i64,
    pub owner_id: i64,
    pub title: String,
    pub genre_id: i32,
    pub questions: Vec<QuestionDraft>,
}

/// Question ids touched by a fix. Kept questions whose content already
/// matched are listed in `unchanged` and were not rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub created: Vec<i64>,
    pub updated: Vec<i64>,
    pub unchanged: Vec<i64>,
    pub deleted: Vec<i64>,
}

/// Question-set authoring service.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionSetService;

impl QuestionSetService {
    pub fn new() -> Self {
        Self
    }

    /// Create a set from `new_questions` and return its allocated id.
    pub async fn create_set(
        &self,
        state: &AppState,
        new_questions: Vec<NewQuestion>,
    ) -> Result<i64, AppError> {
        let svc = *self;
        with_txn(state, move |txn| {
            Box::pin(async move { svc.create_set_in_txn(txn, new_questions).await })
        })
        .await
    }

    /// Questions go in first; the set id is allocated afterwards.
    pub async fn create_set_in_txn(
        &self,
        txn: &DatabaseTransaction,
        new_questions: Vec<NewQuestion>,
    ) -> Result<i64, AppError> {
        if new_questions.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyQuestionList,
                "A question set needs at least one question",
            )
            .into());
        }

        let now = OffsetDateTime::now_utc();
        let author = new_questions[0].user_id;
        let rows = new_questions
            .into_iter()
            .map(|q| QuestionCreate {
                user_id: q.user_id,
                title: q.title,
                genre_id: q.genre_id,
                visibility: q.visibility,
                question: q.question,
                answer: q.answer,
                choices1: q.choices1,
                choices2: q.choices2,
                created_at: now,
            })
            .collect();
        let created = questions::create_questions(txn, rows).await?;

        let mut by_genre: BTreeMap<i32, Vec<i64>> = BTreeMap::new();
        for q in &created {
            by_genre.entry(q.genre_id).or_default().push(q.id);
        }

        let set_id = question_sets::allocate_set_id(txn).await?;

        let mut bound = 0;
        for (genre_id, ids) in &by_genre {
            bound += question_sets::bind_questions(txn, set_id, *genre_id, ids).await?;
        }

        stars::create_zero(txn, set_id).await?;

        info!(
            user = %UserRef(author),
            set_id,
            questions = bound,
            "Question set created"
        );
        Ok(set_id)
    }

    /// Reconcile a set against the desired question list.
    pub async fn fix_set(
        &self,
        state: &AppState,
        request: FixSetRequest,
    ) -> Result<ReconcileSummary, AppError> {
        let svc = *self;
        with_txn(state, move |txn| {
            Box::pin(async move { svc.fix_set_in_txn(txn, request).await })
        })
        .await
    }

    /// Apply order: creates, deletes, then fixes. Deleting a question
    /// cascades to its membership row.
    pub async fn fix_set_in_txn(
        &self,
        txn: &DatabaseTransaction,
        request: FixSetRequest,
    ) -> Result<ReconcileSummary, AppError> {
        let FixSetRequest {
            set_id,
            owner_id,
            title,
            genre_id,
            questions: desired,
        } = request;

        if desired.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyQuestionList,
                "A question set needs at least one question",
            )
            .into());
        }

        let existing = question_sets::member_ids(txn, set_id).await?;
        if !questions::all_owned_by(txn, &existing, owner_id).await? {
            return Err(not_author(set_id));
        }

        // A set composed entirely through fix has no earlier timestamp.
        let created_at = questions::earliest_created_at(txn, &existing)
            .await?
            .unwrap_or_else(OffsetDateTime::now_utc);

        let plan = partition(&existing, desired, |q| q.id);
        debug!(
            set_id,
            create = plan.create.len(),
            fix = plan.fix.len(),
            delete = plan.delete.len(),
            dropped = plan.dropped.len(),
            "Reconciling question set"
        );

        // Nothing would remain of the set.
        if plan.create.is_empty() && plan.fix.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyQuestionList,
                "None of the submitted questions belong to this set",
            )
            .into());
        }

        let mut summary = ReconcileSummary::default();

        let rows = plan
            .create
            .into_iter()
            .map(|draft| QuestionCreate {
                user_id: owner_id,
                title: title.clone(),
                genre_id,
                visibility: draft.visibility,
                question: draft.question,
                answer: draft.answer,
                choices1: draft.choices1,
                choices2: draft.choices2,
                created_at,
            })
            .collect();
        let created = questions::create_questions(txn, rows).await?;
        summary.created = created.iter().map(|q| q.id).collect();
        question_sets::bind_questions(txn, set_id, genre_id, &summary.created).await?;

        questions::delete_by_ids(txn, &plan.delete).await?;
        question_sets::unbind_questions(txn, set_id, &plan.delete).await?;
        summary.deleted = plan.delete;

        let kept: Vec<i64> = plan.fix.iter().filter_map(|d| d.id).collect();
        let current: HashMap<i64, Question> = questions::find_by_ids(txn, &kept)
            .await?
            .into_iter()
            .map(|q| (q.id, q))
            .collect();

        for draft in plan.fix {
            let Some(id) = draft.id else { continue };
            let update = QuestionUpdate {
                id,
                title: title.clone(),
                genre_id,
                visibility: draft.visibility,
                question: draft.question,
                answer: draft.answer,
                choices1: draft.choices1,
                choices2: draft.choices2,
            };
            if current.get(&id).is_some_and(|q| same_content(q, &update)) {
                summary.unchanged.push(id);
                continue;
            }
            questions::update_question(txn, update).await?;
            summary.updated.push(id);
        }
        question_sets::rebind_genre(txn, set_id, &kept, genre_id).await?;

        info!(
            user = %UserRef(owner_id),
            set_id,
            created = summary.created.len(),
            updated = summary.updated.len(),
            unchanged = summary.unchanged.len(),
            deleted = summary.deleted.len(),
            "Question set fixed"
        );
        Ok(summary)
    }

    /// Delete a set and everything hanging off it. Only the author of every
    /// question in the set may do this.
    pub async fn delete_set(
        &self,
        state: &AppState,
        requester_id: i64,
        set_id: i64,
    ) -> Result<(), AppError> {
        let svc = *self;
        with_txn(state, move |txn| {
            Box::pin(async move { svc.delete_set_in_txn(txn, requester_id, set_id).await })
        })
        .await
    }

    pub async fn delete_set_in_txn(
        &self,
        txn: &DatabaseTransaction,
        requester_id: i64,
        set_id: i64,
    ) -> Result<(), AppError> {
        let ids = question_sets::require_member_ids(txn, set_id).await?;
        if !questions::all_owned_by(txn, &ids, requester_id).await? {
            return Err(not_author(set_id));
        }

        let questions_deleted = questions::delete_by_ids(txn, &ids).await?;
        question_sets::unbind_all(txn, set_id).await?;
        stars::delete(txn, set_id).await?;
        let ratings = my_stars::delete_for_set(txn, set_id).await?;
        let registrations = learning::delete_for_set(txn, set_id).await?;
        favorites::delete_for_set(txn, set_id).await?;
        learning::delete_correct_for_set(txn, set_id).await?;

        info!(
            user = %UserRef(requester_id),
            set_id,
            questions = questions_deleted,
            ratings,
            registrations,
            "Question set deleted"
        );
        Ok(())
    }

    /// Questions of a set, ordered by id. An unknown set yields an empty list.
    pub async fn questions_in_set(
        &self,
        state: &AppState,
        set_id: i64,
    ) -> Result<Vec<QuestionView>, AppError> {
        Ok(questions::views_in_set(state.db(), set_id).await?)
    }

    /// Questions of a set for its author to edit.
    pub async fn questions_for_fix(
        &self,
        state: &AppState,
        set_id: i64,
        user_id: i64,
    ) -> Result<Vec<QuestionView>, AppError> {
        let views = questions::views_in_set(state.db(), set_id).await?;
        if views.is_empty() {
            return Err(DomainError::not_found(
                NotFoundKind::QuestionSet,
                format!("Question set {set_id} not found"),
            )
            .into());
        }
        if views.iter().any(|v| v.user_id != user_id) {
            return Err(not_author(set_id));
        }
        Ok(views)
    }

    pub async fn questions_by_ids(
        &self,
        state: &AppState,
        ids: &[i64],
    ) -> Result<Vec<QuestionView>, AppError> {
        Ok(questions::views_by_ids(state.db(), ids).await?)
    }

    pub async fn answers_by_ids(
        &self,
        state: &AppState,
        ids: &[i64],
    ) -> Result<Vec<QuestionAnswer>, AppError> {
        Ok(questions::answers_by_ids(state.db(), ids).await?)
    }

    pub async fn list_genres(&self, state: &AppState) -> Result<Vec<Genre>, AppError> {
        Ok(genres::list_all(state.db()).await?)
    }
}

fn same_content(current: &Question, update: &QuestionUpdate) -> bool {
    current.title == update.title
        && current.genre_id == update.genre_id
        && current.visibility == update.visibility
        && current.question == update.question
        && current.answer == update.answer
        && current.choices1 == update.choices1
        && current.choices2 == update.choices2
}

fn not_author(set_id: i64) -> AppError {
    DomainError::forbidden(
        ForbiddenKind::NotSetAuthor,
        format!("Only the author may modify question set {set_id}"),
    )
    .into()
}
