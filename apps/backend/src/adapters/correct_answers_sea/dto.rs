//! DTOs for correct_answers_sea adapter.

/// One correctly answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrectAnswerCreate {
    pub user_id: i64,
    pub question_id: i64,
    pub question_set_id: i64,
}
