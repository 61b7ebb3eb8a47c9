//! Questions repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;

use crate::adapters::questions_sea as questions_adapter;
use crate::adapters::search_sea as search_adapter;
use crate::entities::questions::{self, Visibility};
use crate::errors::domain::DomainError;

pub use questions_adapter::{QuestionCreate, QuestionUpdate};

/// Question domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub genre_id: i32,
    pub visibility: Visibility,
    pub question: String,
    pub answer: String,
    pub choices1: String,
    pub choices2: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Question as shown to readers, with its genre name resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub genre_id: i32,
    pub genre_name: String,
    pub visibility: Visibility,
    pub question: String,
    pub answer: String,
    pub choices1: String,
    pub choices2: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionAnswer {
    pub id: i64,
    pub answer: String,
}

pub async fn create_questions(
    txn: &DatabaseTransaction,
    dtos: Vec<QuestionCreate>,
) -> Result<Vec<Question>, DomainError> {
    let models = questions_adapter::create_many(txn, dtos).await?;
    Ok(models.into_iter().map(Question::from).collect())
}

pub async fn update_question(
    txn: &DatabaseTransaction,
    dto: QuestionUpdate,
) -> Result<Question, DomainError> {
    let model = questions_adapter::update_question(txn, dto).await?;
    Ok(Question::from(model))
}

pub async fn delete_by_ids(txn: &DatabaseTransaction, ids: &[i64]) -> Result<u64, DomainError> {
    Ok(questions_adapter::delete_by_ids(txn, ids).await?)
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<Question>, DomainError> {
    let models = questions_adapter::find_by_ids(conn, ids).await?;
    Ok(models.into_iter().map(Question::from).collect())
}

/// Earliest creation time among `ids`; `None` for an empty list.
pub async fn earliest_created_at<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Option<OffsetDateTime>, DomainError> {
    Ok(questions_adapter::earliest_created_at(conn, ids).await?)
}

/// True when every question in `ids` was authored by `user_id`.
pub async fn all_owned_by<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
    user_id: i64,
) -> Result<bool, DomainError> {
    let foreign = questions_adapter::count_not_owned_by(conn, ids, user_id).await?;
    Ok(foreign == 0)
}

pub async fn answers_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<QuestionAnswer>, DomainError> {
    let rows = questions_adapter::answers_by_ids(conn, ids).await?;
    Ok(rows
        .into_iter()
        .map(|(id, answer)| QuestionAnswer { id, answer })
        .collect())
}

pub async fn views_in_set<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    set_id: i64,
) -> Result<Vec<QuestionView>, DomainError> {
    let rows = search_adapter::questions_in_set(conn, set_id).await?;
    Ok(rows.into_iter().map(QuestionView::from).collect())
}

pub async fn views_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<QuestionView>, DomainError> {
    let rows = search_adapter::questions_by_ids(conn, ids).await?;
    Ok(rows.into_iter().map(QuestionView::from).collect())
}

// Conversions between SeaORM models and domain models

impl From<questions::Model> for Question {
    fn from(model: questions::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            genre_id: model.genre_id,
            visibility: model.visibility,
            question: model.question,
            answer: model.answer,
            choices1: model.choices1,
            choices2: model.choices2,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<search_adapter::QuestionRow> for QuestionView {
    fn from(row: search_adapter::QuestionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            genre_id: row.genre_id,
            genre_name: row.genre_name,
            visibility: row.visibility,
            question: row.question,
            answer: row.answer,
            choices1: row.choices1,
            choices2: row.choices2,
        }
    }
}
