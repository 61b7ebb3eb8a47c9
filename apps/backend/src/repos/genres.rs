//! Genre lookup repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::genres_sea as genres_adapter;
use crate::entities::genres;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Genre>, DomainError> {
    let models = genres_adapter::list_all(conn).await?;
    Ok(models.into_iter().map(Genre::from).collect())
}

impl From<genres::Model> for Genre {
    fn from(model: genres::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
