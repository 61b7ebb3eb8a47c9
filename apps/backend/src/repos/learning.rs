//! Learning registration and correct-answer repository functions.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::{Date, OffsetDateTime};

use crate::adapters::correct_answers_sea as answers_adapter;
use crate::adapters::my_questions_sea as registrations_adapter;
use crate::entities::my_questions::{self, LearningStatus};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Registration domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub user_id: i64,
    pub set_id: i64,
    pub progress: f64,
    pub attempts: i32,
    pub status: LearningStatus,
    pub deadline: Option<Date>,
    pub last_updated_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

pub async fn register(
    txn: &DatabaseTransaction,
    user_id: i64,
    set_id: i64,
    deadline: Option<Date>,
) -> Result<Registration, DomainError> {
    let model = registrations_adapter::create_registration(txn, user_id, set_id, deadline).await?;
    Ok(Registration::from(model))
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    set_id: i64,
) -> Result<Option<Registration>, DomainError> {
    let model = registrations_adapter::find(conn, user_id, set_id).await?;
    Ok(model.map(Registration::from))
}

/// Lock a registration for a read-modify-write; missing is `NotFound`.
pub async fn require_for_update(
    txn: &DatabaseTransaction,
    user_id: i64,
    set_id: i64,
) -> Result<Registration, DomainError> {
    registrations_adapter::find_for_update(txn, user_id, set_id)
        .await?
        .map(Registration::from)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Registration,
                format!("No learning registration for set {set_id}"),
            )
        })
}

/// not_started -> in_progress. Returns false when the status was anything else.
pub async fn mark_started(
    txn: &DatabaseTransaction,
    user_id: i64,
    set_id: i64,
) -> Result<bool, DomainError> {
    let changed = registrations_adapter::mark_started(txn, user_id, set_id).await?;
    Ok(changed > 0)
}

pub async fn save_progress(
    txn: &DatabaseTransaction,
    registration: &Registration,
) -> Result<Registration, DomainError> {
    let dto = registrations_adapter::ProgressUpdate {
        user_id: registration.user_id,
        question_set_id: registration.set_id,
        progress: registration.progress,
        attempts: registration.attempts,
        status: registration.status,
    };
    let model = registrations_adapter::update_progress(txn, dto).await?;
    Ok(Registration::from(model))
}

pub async fn delete_for_set(txn: &DatabaseTransaction, set_id: i64) -> Result<u64, DomainError> {
    Ok(registrations_adapter::delete_for_set(txn, set_id).await?)
}

/// Record correct answers for questions of one set. Returns rows inserted;
/// questions answered before are skipped.
pub async fn record_correct(
    txn: &DatabaseTransaction,
    user_id: i64,
    set_id: i64,
    question_ids: &[i64],
) -> Result<u64, DomainError> {
    let rows: Vec<answers_adapter::CorrectAnswerCreate> = question_ids
        .iter()
        .map(|question_id| answers_adapter::CorrectAnswerCreate {
            user_id,
            question_id: *question_id,
            question_set_id: set_id,
        })
        .collect();
    Ok(answers_adapter::insert_batch(txn, &rows).await?)
}

pub async fn count_correct<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    set_id: i64,
) -> Result<u64, DomainError> {
    Ok(answers_adapter::count_for_set(conn, user_id, set_id).await?)
}

pub async fn delete_correct_for_set(
    txn: &DatabaseTransaction,
    set_id: i64,
) -> Result<u64, DomainError> {
    Ok(answers_adapter::delete_for_set(txn, set_id).await?)
}

impl From<my_questions::Model> for Registration {
    fn from(model: my_questions::Model) -> Self {
        Self {
            user_id: model.user_id,
            set_id: model.question_set_id,
            progress: model.progress,
            attempts: model.attempts,
            status: model.status,
            deadline: model.deadline,
            last_updated_at: model.last_updated_at,
            created_at: model.created_at,
        }
    }
}
