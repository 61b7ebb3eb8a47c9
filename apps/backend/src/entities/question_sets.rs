use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Membership row binding a question to a set identifier.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "question_sets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "set_id")]
    pub set_id: i64,
    #[sea_orm(primary_key, auto_increment = false, column_name = "question_id")]
    pub question_id: i64,
    #[sea_orm(column_name = "genre_id")]
    pub genre_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
    #[sea_orm(
        belongs_to = "super::genres::Entity",
        from = "Column::GenreId",
        to = "super::genres::Column::Id"
    )]
    Genre,
    // No foreign key in the schema; the set identifier is shared by value.
    #[sea_orm(
        belongs_to = "super::stars::Entity",
        from = "Column::SetId",
        to = "super::stars::Column::QuestionSetId"
    )]
    Star,
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Genre.def()
    }
}

impl Related<super::stars::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Star.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
