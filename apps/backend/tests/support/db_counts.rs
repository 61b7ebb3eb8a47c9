use quiz_backend::entities::{
    correct_answers, favorite_questions, my_questions, my_stars, question_sets, questions, stars,
};
use quiz_backend::AppError;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};

/// Row counts of everything hanging off one set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetFootprint {
    pub questions: u64,
    pub members: u64,
    pub stars: u64,
    pub my_stars: u64,
    pub registrations: u64,
    pub favorites: u64,
    pub correct_answers: u64,
}

impl SetFootprint {
    pub fn is_empty(&self) -> bool {
        *self
            == SetFootprint {
                questions: 0,
                members: 0,
                stars: 0,
                my_stars: 0,
                registrations: 0,
                favorites: 0,
                correct_answers: 0,
            }
    }
}

pub async fn footprint(
    conn: &(impl ConnectionTrait + Send + Sync),
    set_id: i64,
    question_ids: &[i64],
) -> Result<SetFootprint, AppError> {
    Ok(SetFootprint {
        questions: questions::Entity::find()
            .filter(questions::Column::Id.is_in(question_ids.iter().copied()))
            .count(conn)
            .await?,
        members: question_sets::Entity::find()
            .filter(question_sets::Column::SetId.eq(set_id))
            .count(conn)
            .await?,
        stars: stars::Entity::find()
            .filter(stars::Column::QuestionSetId.eq(set_id))
            .count(conn)
            .await?,
        my_stars: my_stars::Entity::find()
            .filter(my_stars::Column::QuestionSetId.eq(set_id))
            .count(conn)
            .await?,
        registrations: my_questions::Entity::find()
            .filter(my_questions::Column::QuestionSetId.eq(set_id))
            .count(conn)
            .await?,
        favorites: favorite_questions::Entity::find()
            .filter(favorite_questions::Column::QuestionSetId.eq(set_id))
            .count(conn)
            .await?,
        correct_answers: correct_answers::Entity::find()
            .filter(correct_answers::Column::QuestionSetId.eq(set_id))
            .count(conn)
            .await?,
    })
}

pub async fn question_count(conn: &(impl ConnectionTrait + Send + Sync)) -> Result<u64, AppError> {
    Ok(questions::Entity::find().count(conn).await?)
}
