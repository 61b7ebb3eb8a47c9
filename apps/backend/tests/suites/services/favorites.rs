use quiz_backend::domain::Page;
use quiz_backend::repos::search::SetFilter;
use quiz_backend::services::FavoriteService;
use quiz_backend::{AppError, ErrorCode};

use crate::support::assertions::expect_code;
use crate::support::factory::{create_genre, create_set, create_user};
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn favorites_are_idempotent() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let author = create_user(state.db(), "author").await?;
    let reader = create_user(state.db(), "reader").await?;
    let genre = create_genre(state.db()).await?;
    let set_id = create_set(&state, author, genre, "Knots", 1).await?;
    let service = FavoriteService::new();

    assert!(service.add(&state, reader, set_id).await?);
    assert!(!service.add(&state, reader, set_id).await?);
    assert!(service.is_favorite(&state, reader, set_id).await?);
    assert!(!service.is_favorite(&state, author, set_id).await?);

    assert!(service.remove(&state, reader, set_id).await?);
    assert!(!service.remove(&state, reader, set_id).await?);
    assert!(!service.is_favorite(&state, reader, set_id).await?);

    expect_code(
        service.add(&state, reader, 60_606).await,
        ErrorCode::QuestionSetNotFound,
    );
    Ok(())
}

#[tokio::test]
async fn favorite_listing_shows_the_sets_author() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let author = create_user(state.db(), "Ada").await?;
    let reader = create_user(state.db(), "Bea").await?;
    let genre = create_genre(state.db()).await?;
    let liked = create_set(&state, author, genre, "Looms", 2).await?;
    create_set(&state, author, genre, "Engines", 1).await?;
    let service = FavoriteService::new();

    service.add(&state, reader, liked).await?;

    let page = service
        .search_favorite_sets(&state, reader, &SetFilter::default(), Page::default())
        .await?;
    assert_eq!(page.total, 1);
    let summary = &page.items[0];
    assert_eq!(summary.set_id, liked);
    assert_eq!(summary.author_id, author);
    assert_eq!(summary.author_name, "Ada");
    assert_eq!(summary.question_count, 2);

    let none = service
        .search_favorite_sets(&state, author, &SetFilter::default(), Page::default())
        .await?;
    assert_eq!(none.total, 0);
    assert!(none.items.is_empty());
    Ok(())
}
