//! DTOs for questions_sea adapter.

use time::OffsetDateTime;

use crate::entities::questions::Visibility;

/// DTO for inserting a question.
#[derive(Debug, Clone)]
pub struct QuestionCreate {
    pub user_id: i64,
    pub title: String,
    pub genre_id: i32,
    pub visibility: Visibility,
    pub question: String,
    pub answer: String,
    pub choices1: String,
    pub choices2: String,
    /// Backdated for questions added to an existing set.
    pub created_at: OffsetDateTime,
}

/// DTO for rewriting an existing question's content.
#[derive(Debug, Clone)]
pub struct QuestionUpdate {
    pub id: i64,
    pub title: String,
    pub genre_id: i32,
    pub visibility: Visibility,
    pub question: String,
    pub answer: String,
    pub choices1: String,
    pub choices2: String,
}
