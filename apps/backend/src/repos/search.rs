//! Listing reads for search, favorites, authored sets and learning.

use sea_orm::ConnectionTrait;
use time::Date;

use crate::adapters::search_sea as search_adapter;
use crate::domain::pagination::{Page, Paged};
use crate::entities::my_questions::LearningStatus;
use crate::entities::questions::Visibility;
use crate::errors::domain::DomainError;

pub use search_adapter::SetFilter;

/// One set in a search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SetSummary {
    pub set_id: i64,
    pub title: String,
    pub genre_id: i32,
    pub genre_name: String,
    pub author_id: i64,
    pub author_name: String,
    pub question_count: u64,
    pub total_stars: i32,
    pub avg_star: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSet {
    pub set_id: i64,
    pub title: String,
    pub genre_id: i32,
    pub genre_name: String,
    pub visibility: Visibility,
    pub question_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LearningEntry {
    pub set_id: i64,
    pub title: String,
    pub genre_name: String,
    pub progress: f64,
    pub attempts: i32,
    pub status: LearningStatus,
    pub deadline: Option<Date>,
    pub question_count: u64,
}

pub async fn search_sets<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: &SetFilter,
    viewer_id: i64,
    page: Page,
) -> Result<Paged<SetSummary>, DomainError> {
    let rows = search_adapter::search_sets(conn, filter, viewer_id, page).await?;
    Ok(rows.map(SetSummary::from))
}

pub async fn search_favorite_sets<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: &SetFilter,
    viewer_id: i64,
    page: Page,
) -> Result<Paged<SetSummary>, DomainError> {
    let rows = search_adapter::search_favorite_sets(conn, filter, viewer_id, page).await?;
    Ok(rows.map(SetSummary::from))
}

pub async fn created_sets<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: &SetFilter,
    owner_id: i64,
    page: Page,
) -> Result<Paged<CreatedSet>, DomainError> {
    let rows = search_adapter::created_sets(conn, filter, owner_id, page).await?;
    Ok(rows.map(CreatedSet::from))
}

pub async fn learning_list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    title: &str,
    status: Option<LearningStatus>,
    genre_id: i32,
    page: Page,
) -> Result<Paged<LearningEntry>, DomainError> {
    let rows =
        search_adapter::learning_list(conn, user_id, title, status, genre_id, page).await?;
    Ok(rows.map(LearningEntry::from))
}

// Negative counts cannot come out of COUNT(*).
fn count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

impl From<search_adapter::SetSummaryRow> for SetSummary {
    fn from(row: search_adapter::SetSummaryRow) -> Self {
        Self {
            set_id: row.set_id,
            title: row.title,
            genre_id: row.genre_id,
            genre_name: row.genre_name,
            author_id: row.author_id,
            author_name: row.author_name,
            question_count: count(row.question_count),
            total_stars: row.total_stars,
            avg_star: row.avg_star,
        }
    }
}

impl From<search_adapter::CreatedSetRow> for CreatedSet {
    fn from(row: search_adapter::CreatedSetRow) -> Self {
        Self {
            set_id: row.set_id,
            title: row.title,
            genre_id: row.genre_id,
            genre_name: row.genre_name,
            visibility: row.visibility,
            question_count: count(row.question_count),
        }
    }
}

impl From<search_adapter::LearningRow> for LearningEntry {
    fn from(row: search_adapter::LearningRow) -> Self {
        Self {
            set_id: row.set_id,
            title: row.title,
            genre_name: row.genre_name,
            progress: row.progress,
            attempts: row.attempts,
            status: row.status,
            deadline: row.deadline,
            question_count: count(row.question_count),
        }
    }
}
