//! SeaORM adapter for the genre lookup table.

use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use crate::entities::genres;

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<genres::Model>, sea_orm::DbErr> {
    genres::Entity::find()
        .order_by_asc(genres::Column::Id)
        .all(conn)
        .await
}
