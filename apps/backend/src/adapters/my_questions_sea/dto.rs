//! DTOs for my_questions_sea adapter.

use crate::entities::my_questions::LearningStatus;

/// Recomputed progress for a registration.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub user_id: i64,
    pub question_set_id: i64,
    pub progress: f64,
    pub attempts: i32,
    pub status: LearningStatus,
}
