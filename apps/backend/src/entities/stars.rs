use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Aggregate rating histogram for one set identifier.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "question_set_id")]
    pub question_set_id: i64,
    pub star1: i32,
    pub star2: i32,
    pub star3: i32,
    pub star4: i32,
    pub star5: i32,
    #[sea_orm(column_name = "total_stars")]
    pub total_stars: i32,
    #[sea_orm(column_name = "avg_star", column_type = "Double")]
    pub avg_star: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
