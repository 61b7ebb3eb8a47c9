//! SeaORM adapters. Every function returns `sea_orm::DbErr`; writes take a
//! `&DatabaseTransaction`, reads accept any connection.

pub mod correct_answers_sea;
pub mod favorites_sea;
pub mod genres_sea;
pub mod my_questions_sea;
pub mod my_stars_sea;
pub mod question_sets_sea;
pub mod questions_sea;
pub mod search_sea;
pub mod stars_sea;
