use quiz_backend::errors::domain::{DomainError, ValidationKind};
use quiz_backend::repos::question_sets;
use quiz_backend::services::{FixSetRequest, QuestionSetService};
use quiz_backend::{with_txn, AppError, ErrorCode};
use sea_orm::{ConnectionTrait, Statement};

use crate::support::db_counts::question_count;
use crate::support::factory::{create_genre, create_set, create_user, fresh, new_questions};
use crate::support::test_state::{build_test_state, is_sqlite};

#[tokio::test]
async fn ok_commits() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let user = create_user(state.db(), "author").await?;
    let genre = create_genre(state.db()).await?;

    let set_id = with_txn(&state, move |txn| {
        Box::pin(async move {
            QuestionSetService::new()
                .create_set_in_txn(txn, new_questions(user, genre, "Committed", 2))
                .await
        })
    })
    .await?;

    assert_eq!(question_sets::count_members(state.db(), set_id).await?, 2);
    Ok(())
}

#[tokio::test]
async fn err_rolls_back_and_passes_the_error_through() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let user = create_user(state.db(), "author").await?;
    let genre = create_genre(state.db()).await?;
    let before = question_count(state.db()).await?;

    let result: Result<i64, AppError> = with_txn(&state, move |txn| {
        Box::pin(async move {
            QuestionSetService::new()
                .create_set_in_txn(txn, new_questions(user, genre, "Doomed", 3))
                .await?;
            Err(AppError::from(DomainError::validation(
                ValidationKind::Other("LATE_FAILURE".into()),
                "failed after writing",
            )))
        })
    })
    .await;

    let err = result.expect_err("body error is returned");
    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert_eq!(err.detail(), "failed after writing");
    assert_eq!(question_count(state.db()).await?, before);
    Ok(())
}

/// A failure in the delete step of a fix must also undo the creates that
/// ran before it.
#[tokio::test]
async fn failed_fix_leaves_no_partial_writes() -> Result<(), AppError> {
    let state = build_test_state().await?;
    if !is_sqlite(&state) {
        return Ok(());
    }
    let user = create_user(state.db(), "author").await?;
    let genre = create_genre(state.db()).await?;
    let set_id = create_set(&state, user, genre, "Fragile", 2).await?;
    let service = QuestionSetService::new();
    let views = service.questions_in_set(&state, set_id).await?;
    let before = question_count(state.db()).await?;

    state
        .db()
        .execute(Statement::from_string(
            state.db().get_database_backend(),
            "CREATE TRIGGER block_question_delete BEFORE DELETE ON questions \
             BEGIN SELECT RAISE(ABORT, 'deletes blocked'); END;",
        ))
        .await?;

    let result = service
        .fix_set(
            &state,
            FixSetRequest {
                set_id,
                owner_id: user,
                title: "Fragile".into(),
                genre_id: genre,
                questions: vec![fresh("new one"), fresh("new two")],
            },
        )
        .await;
    assert!(result.is_err(), "blocked delete must fail the fix");

    assert_eq!(question_count(state.db()).await?, before);
    assert_eq!(service.questions_in_set(&state, set_id).await?, views);
    Ok(())
}
