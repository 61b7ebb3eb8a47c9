use quiz_backend::repos::question_sets;
use quiz_backend::services::{
    FavoriteService, LearningService, QuestionSetService, RatingService,
};
use quiz_backend::{AppError, ErrorCode};

use crate::support::assertions::expect_code;
use crate::support::db_counts::footprint;
use crate::support::factory::{create_genre, create_set, create_user};
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn delete_removes_everything_hanging_off_the_set() -> Result<(), AppError> {
    let state = build_test_state().await?;
    // Keeps user ids apart from set ids.
    create_user(state.db(), "padding").await?;
    let author = create_user(state.db(), "author").await?;
    let learner = create_user(state.db(), "learner").await?;
    let genre = create_genre(state.db()).await?;
    let set_id = create_set(&state, author, genre, "Volcanoes", 3).await?;
    let keeper = create_set(&state, author, genre, "Glaciers", 1).await?;

    let ids = question_sets::member_ids(state.db(), set_id).await?;
    RatingService::new().rate_as_user(&state, learner, set_id, 5).await?;
    FavoriteService::new().add(&state, learner, set_id).await?;
    let learning = LearningService::new();
    learning.register(&state, learner, set_id, None).await?;
    learning
        .record_correct_answers(&state, learner, set_id, vec![ids[0]])
        .await?;

    assert_ne!(author, set_id);
    let before = footprint(state.db(), set_id, &ids).await?;
    assert_eq!(before.questions, 3);
    assert_eq!(before.correct_answers, 1);

    QuestionSetService::new().delete_set(&state, author, set_id).await?;

    let after = footprint(state.db(), set_id, &ids).await?;
    assert!(after.is_empty(), "leftover rows: {after:?}");

    assert_eq!(question_sets::count_members(state.db(), keeper).await?, 1);
    Ok(())
}

#[tokio::test]
async fn only_the_author_may_delete() -> Result<(), AppError> {
    let state = build_test_state().await?;
    create_user(state.db(), "padding").await?;
    let author = create_user(state.db(), "author").await?;
    let intruder = create_user(state.db(), "intruder").await?;
    let genre = create_genre(state.db()).await?;
    let set_id = create_set(&state, author, genre, "Caves", 2).await?;
    RatingService::new().rate_as_user(&state, intruder, set_id, 1).await?;

    let ids = question_sets::member_ids(state.db(), set_id).await?;
    let before = footprint(state.db(), set_id, &ids).await?;
    let service = QuestionSetService::new();

    let err = expect_code(
        service.delete_set(&state, intruder, set_id).await,
        ErrorCode::NotSetAuthor,
    );
    assert_eq!(err.status().as_u16(), 403);
    assert_eq!(footprint(state.db(), set_id, &ids).await?, before);

    service.delete_set(&state, author, set_id).await?;
    assert!(footprint(state.db(), set_id, &ids).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn deleting_an_unknown_set_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let user = create_user(state.db(), "author").await?;

    let err = expect_code(
        QuestionSetService::new().delete_set(&state, user, 77_777).await,
        ErrorCode::QuestionSetNotFound,
    );
    assert_eq!(err.status().as_u16(), 404);
    Ok(())
}
