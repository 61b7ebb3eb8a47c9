use actix_web::http::StatusCode;
use actix_web::ResponseError;
use backend_test_support::problem_details::assert_problem_details_from_http_response;
use quiz_backend::services::{FixSetRequest, QuestionSetService, RatingService};
use quiz_backend::trace_ctx;
use quiz_backend::AppError;

use crate::support::factory::{create_genre, create_set, create_user, fresh};
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn forbidden_fix_renders_problem_details() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let author = create_user(state.db(), "author").await?;
    let intruder = create_user(state.db(), "intruder").await?;
    let genre = create_genre(state.db()).await?;
    let set_id = create_set(&state, author, genre, "Bridges", 1).await?;

    let err = QuestionSetService::new()
        .fix_set(
            &state,
            FixSetRequest {
                set_id,
                owner_id: intruder,
                title: "Bridges".into(),
                genre_id: genre,
                questions: vec![fresh("mine?")],
            },
        )
        .await
        .expect_err("non-author fix must fail");

    let resp = trace_ctx::with_trace_id("trace-fix-1".into(), async { err.error_response() }).await;
    assert_eq!(resp.headers().get("x-trace-id").map(|v| v.as_bytes()), Some(&b"trace-fix-1"[..]));
    assert_problem_details_from_http_response(
        resp,
        "NOT_SET_AUTHOR",
        StatusCode::FORBIDDEN,
        Some("Only the author"),
    )
    .await;
    Ok(())
}

#[tokio::test]
async fn store_conflicts_render_as_409() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let author = create_user(state.db(), "author").await?;
    let genre = create_genre(state.db()).await?;
    let set_id = create_set(&state, author, genre, "Tunnels", 1).await?;
    let ratings = RatingService::new();
    ratings.rate_as_user(&state, author, set_id, 2).await?;

    let err = ratings
        .rate_as_user(&state, author, set_id, 2)
        .await
        .expect_err("second rating must conflict");
    let resp = trace_ctx::with_trace_id(trace_ctx::generate(), async { err.error_response() }).await;
    assert_problem_details_from_http_response(resp, "ALREADY_RATED", StatusCode::CONFLICT, None)
        .await;
    Ok(())
}

#[tokio::test]
async fn validation_errors_render_as_422() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let err = RatingService::new()
        .rate(&state, 1, 7)
        .await
        .expect_err("rating 7 is out of range");
    let resp = trace_ctx::with_trace_id(trace_ctx::generate(), async { err.error_response() }).await;
    assert_problem_details_from_http_response(
        resp,
        "INVALID_RATING",
        StatusCode::UNPROCESSABLE_ENTITY,
        None,
    )
    .await;
    Ok(())
}
