//! Service layer: transaction-scoped workflows and simple reads.

pub mod favorites;
pub mod learning;
pub mod question_sets;
pub mod ratings;
pub mod search;

pub use favorites::FavoriteService;
pub use learning::LearningService;
pub use question_sets::{
    FixSetRequest, NewQuestion, QuestionDraft, QuestionSetService, ReconcileSummary,
};
pub use ratings::RatingService;
pub use search::SearchService;
