use quiz_backend::adapters::correct_answers_sea::CorrectAnswerCreate;
use quiz_backend::adapters::{correct_answers_sea, favorites_sea, question_sets_sea, stars_sea};
use quiz_backend::errors::domain::{DomainError, ValidationKind};
use quiz_backend::infra::db_errors::map_db_err;
use quiz_backend::repos::question_sets;
use quiz_backend::{with_txn, AppError};

use crate::support::factory::{create_genre, create_set, create_user};
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn max_set_id_looks_at_members_and_aggregates() -> Result<(), AppError> {
    let state = build_test_state().await?;
    assert_eq!(question_sets_sea::max_set_id(state.db()).await?, None);

    let user = create_user(state.db(), "author").await?;
    let genre = create_genre(state.db()).await?;
    let set_id = create_set(&state, user, genre, "Maps", 1).await?;
    assert_eq!(question_sets_sea::max_set_id(state.db()).await?, Some(set_id));

    // An aggregate row without members still reserves its id.
    with_txn(&state, move |txn| {
        Box::pin(async move {
            stars_sea::create_zero(txn, set_id + 10).await?;
            Ok::<_, AppError>(())
        })
    })
    .await?;
    assert_eq!(
        question_sets_sea::max_set_id(state.db()).await?,
        Some(set_id + 10)
    );

    let next = create_set(&state, user, genre, "Atlases", 1).await?;
    assert_eq!(next, set_id + 11);
    Ok(())
}

#[tokio::test]
async fn empty_batches_are_no_ops() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let counts = with_txn(&state, |txn| {
        Box::pin(async move {
            Ok::<_, AppError>((
                question_sets_sea::insert_members(txn, 1, 1, &[]).await?,
                question_sets_sea::delete_members(txn, 1, &[]).await?,
                correct_answers_sea::insert_batch(txn, &[]).await?,
            ))
        })
    })
    .await?;

    assert_eq!(counts, (0, 0, 0));
    Ok(())
}

#[tokio::test]
async fn duplicate_rows_are_skipped() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let user = create_user(state.db(), "learner").await?;
    let genre = create_genre(state.db()).await?;
    let set_id = create_set(&state, user, genre, "Flags", 2).await?;
    let ids = question_sets::member_ids(state.db(), set_id).await?;

    let (fav, fav_again, answers, answers_again) = with_txn(&state, move |txn| {
        Box::pin(async move {
            let rows = |ids: &[i64]| -> Vec<CorrectAnswerCreate> {
                ids.iter()
                    .map(|&question_id| CorrectAnswerCreate {
                        user_id: user,
                        question_id,
                        question_set_id: set_id,
                    })
                    .collect()
            };
            Ok::<_, AppError>((
                favorites_sea::add(txn, user, set_id).await?,
                favorites_sea::add(txn, user, set_id).await?,
                correct_answers_sea::insert_batch(txn, &rows(&ids)).await?,
                correct_answers_sea::insert_batch(txn, &rows(&ids)).await?,
            ))
        })
    })
    .await?;

    assert_eq!((fav, fav_again), (1, 0));
    assert_eq!((answers, answers_again), (2, 0));
    assert_eq!(
        correct_answers_sea::count_for_set(state.db(), user, set_id).await?,
        2
    );
    Ok(())
}

#[tokio::test]
async fn binding_an_unknown_question_is_a_foreign_key_violation() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let genre = create_genre(state.db()).await?;

    let mapped = with_txn(&state, move |txn| {
        Box::pin(async move {
            let result = question_sets_sea::insert_members(txn, 1, genre, &[404_404]).await;
            Ok::<_, AppError>(result.err().map(map_db_err))
        })
    })
    .await?;

    match mapped {
        Some(DomainError::Validation(ValidationKind::ForeignKey, _)) => {}
        other => panic!("expected a foreign key violation, got {other:?}"),
    }
    Ok(())
}
