//! Row shapes and filters for search_sea.

use sea_orm::FromQueryResult;
use time::Date;

use crate::entities::my_questions::LearningStatus;
use crate::entities::questions::Visibility;

/// Filters shared by the set listings.
#[derive(Debug, Clone, Default)]
pub struct SetFilter {
    /// Substring match on question titles; empty matches everything.
    pub title: String,
    /// `None` lists public sets plus the viewer's own.
    pub visibility: Option<Visibility>,
    /// `0` matches every genre.
    pub genre_id: i32,
}

/// One set in a search listing.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct SetSummaryRow {
    pub set_id: i64,
    pub title: String,
    pub genre_id: i32,
    pub genre_name: String,
    pub author_id: i64,
    pub author_name: String,
    pub question_count: i64,
    pub total_stars: i32,
    pub avg_star: f64,
}

/// One set authored by the viewer.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct CreatedSetRow {
    pub set_id: i64,
    pub title: String,
    pub genre_id: i32,
    pub genre_name: String,
    pub visibility: Visibility,
    pub question_count: i64,
}

/// One learning registration with its set's headline data.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct LearningRow {
    pub set_id: i64,
    pub title: String,
    pub genre_name: String,
    pub progress: f64,
    pub attempts: i32,
    pub status: LearningStatus,
    pub deadline: Option<Date>,
    pub question_count: i64,
}

/// A question joined with its genre name.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct QuestionRow {
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
