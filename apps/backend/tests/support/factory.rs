use backend_test_support::unique_helpers::unique_str;
use quiz_backend::entities::{genres, users, Visibility};
use quiz_backend::repos::questions::QuestionView;
use quiz_backend::services::{NewQuestion, QuestionDraft, QuestionSetService};
use quiz_backend::state::app_state::AppState;
use quiz_backend::AppError;
use sea_orm::{ActiveModelTrait, ConnectionTrait, NotSet, Set};
use time::OffsetDateTime;

/// Insert a user and return its id.
pub async fn create_user(conn: &impl ConnectionTrait, name: &str) -> Result<i64, AppError> {
    let user = users::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        created_at: Set(OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await?;
    Ok(user.id)
}

/// Insert a genre with a unique name and return its id.
pub async fn create_genre(conn: &impl ConnectionTrait) -> Result<i32, AppError> {
    let genre = genres::ActiveModel {
        id: NotSet,
        name: Set(unique_str("genre")),
    }
    .insert(conn)
    .await?;
    Ok(genre.id)
}

pub fn new_question(user_id: i64, genre_id: i32, title: &str, n: usize) -> NewQuestion {
    NewQuestion {
        user_id,
        title: title.to_string(),
        genre_id,
        visibility: Visibility::Public,
        question: format!("question {n}"),
        answer: format!("answer {n}"),
        choices1: format!("wrong {n}a"),
        choices2: format!("wrong {n}b"),
    }
}

pub fn new_questions(user_id: i64, genre_id: i32, title: &str, count: usize) -> Vec<NewQuestion> {
    (0..count)
        .map(|n| new_question(user_id, genre_id, title, n))
        .collect()
}

/// Create a public set of `count` questions; returns the set id.
pub async fn create_set(
    state: &AppState,
    user_id: i64,
    genre_id: i32,
    title: &str,
    count: usize,
) -> Result<i64, AppError> {
    QuestionSetService::new()
        .create_set(state, new_questions(user_id, genre_id, title, count))
        .await
}

/// A draft that keeps a question as it is.
pub fn keep(view: &QuestionView) -> QuestionDraft {
    QuestionDraft {
        id: Some(view.id),
        visibility: view.visibility,
        question: view.question.clone(),
        answer: view.answer.clone(),
        choices1: view.choices1.clone(),
        choices2: view.choices2.clone(),
    }
}

/// A draft for a question to add.
pub fn fresh(text: &str) -> QuestionDraft {
    QuestionDraft {
        id: None,
        visibility: Visibility::Public,
        question: text.to_string(),
        answer: format!("{text} answer"),
        choices1: format!("{text} a"),
        choices2: format!("{text} b"),
    }
}
