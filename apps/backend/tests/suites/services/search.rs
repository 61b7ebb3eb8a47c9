use backend_test_support::unique_helpers::unique_title;
use quiz_backend::domain::Page;
use quiz_backend::entities::Visibility;
use quiz_backend::repos::search::SetFilter;
use quiz_backend::services::search::visibility_filter;
use quiz_backend::services::{QuestionSetService, RatingService, SearchService};
use quiz_backend::state::app_state::AppState;
use quiz_backend::{AppError, ErrorCode};

use crate::support::assertions::expect_code;
use crate::support::factory::{create_genre, create_set, create_user, new_questions};
use crate::support::test_state::build_test_state;

struct Catalog {
    marker: String,
    alice: i64,
    bob: i64,
    genre: i32,
    alice_public: i64,
    alice_private: i64,
    bob_public: i64,
}

async fn seed(state: &AppState) -> Result<Catalog, AppError> {
    let (title, marker) = unique_title("Quiz");
    let alice = create_user(state.db(), "alice").await?;
    let bob = create_user(state.db(), "bob").await?;
    let genre = create_genre(state.db()).await?;

    let alice_public = create_set(state, alice, genre, &format!("{title} one"), 2).await?;
    let mut hidden = new_questions(alice, genre, &format!("{title} two"), 1);
    for q in &mut hidden {
        q.visibility = Visibility::Private;
    }
    let alice_private = QuestionSetService::new().create_set(state, hidden).await?;
    let bob_public = create_set(state, bob, genre, &format!("{title} three"), 3).await?;

    let ratings = RatingService::new();
    ratings.rate(state, bob_public, 5).await?;
    ratings.rate(state, alice_public, 3).await?;

    Ok(Catalog {
        marker,
        alice,
        bob,
        genre,
        alice_public,
        alice_private,
        bob_public,
    })
}

fn by_marker(catalog: &Catalog) -> SetFilter {
    SetFilter {
        title: catalog.marker.clone(),
        ..SetFilter::default()
    }
}

#[tokio::test]
async fn others_see_only_public_sets_best_rated_first() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let c = seed(&state).await?;

    let page = SearchService::new()
        .search_sets(&state, c.bob, &by_marker(&c), Page::default())
        .await?;
    assert_eq!(page.total, 2);
    let ids: Vec<i64> = page.items.iter().map(|s| s.set_id).collect();
    assert_eq!(ids, vec![c.bob_public, c.alice_public]);

    let top = &page.items[0];
    assert_eq!(top.total_stars, 1);
    assert_eq!(top.avg_star, 5.0);
    assert_eq!(top.question_count, 3);
    assert_eq!(top.author_name, "bob");
    Ok(())
}

#[tokio::test]
async fn private_sets_are_listed_to_their_author_only() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let c = seed(&state).await?;
    let service = SearchService::new();
    let private = SetFilter {
        visibility: visibility_filter("private")?,
        ..by_marker(&c)
    };

    let mine = service
        .search_sets(&state, c.alice, &private, Page::default())
        .await?;
    assert_eq!(mine.total, 1);
    assert_eq!(mine.items[0].set_id, c.alice_private);

    let theirs = service
        .search_sets(&state, c.bob, &private, Page::default())
        .await?;
    assert_eq!(theirs.total, 0);

    let everything = service
        .search_sets(&state, c.alice, &by_marker(&c), Page::default())
        .await?;
    assert_eq!(everything.total, 3);
    Ok(())
}

#[tokio::test]
async fn one_private_question_makes_the_whole_set_private() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let c = seed(&state).await?;
    let service = SearchService::new();

    let mut mixed = new_questions(c.alice, c.genre, &format!("{} mixed", c.marker), 3);
    mixed[2].visibility = Visibility::Private;
    let mixed_set = QuestionSetService::new().create_set(&state, mixed).await?;

    let seen_by_bob = service
        .search_sets(&state, c.bob, &by_marker(&c), Page::default())
        .await?;
    assert!(seen_by_bob.items.iter().all(|s| s.set_id != mixed_set));

    let private = SetFilter {
        visibility: visibility_filter("private")?,
        ..by_marker(&c)
    };
    let mine = service
        .search_sets(&state, c.alice, &private, Page::default())
        .await?;
    let listed = mine
        .items
        .iter()
        .find(|s| s.set_id == mixed_set)
        .expect("mixed set listed to its author");
    assert_eq!(listed.question_count, 3);

    let public = SetFilter {
        visibility: Some(Visibility::Public),
        ..SetFilter::default()
    };
    let created = service
        .my_created_sets(&state, c.alice, &public, Page::default())
        .await?;
    assert_eq!(created.total, 1);
    assert_eq!(created.items[0].set_id, c.alice_public);
    Ok(())
}

#[tokio::test]
async fn pages_split_the_listing() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let c = seed(&state).await?;
    let service = SearchService::new();

    let second = service
        .search_sets(&state, c.bob, &by_marker(&c), Page::new(2, 1))
        .await?;
    assert_eq!(second.total, 2);
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].set_id, c.alice_public);

    let past_end = service
        .search_sets(&state, c.bob, &by_marker(&c), Page::new(5, 1))
        .await?;
    assert_eq!(past_end.total, 2);
    assert!(past_end.items.is_empty());
    Ok(())
}

#[tokio::test]
async fn genre_filter_narrows_the_listing() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let c = seed(&state).await?;
    let other_genre = create_genre(state.db()).await?;
    let service = SearchService::new();

    let matching = SetFilter {
        genre_id: c.genre,
        ..by_marker(&c)
    };
    assert_eq!(
        service
            .search_sets(&state, c.bob, &matching, Page::default())
            .await?
            .total,
        2
    );

    let elsewhere = SetFilter {
        genre_id: other_genre,
        ..by_marker(&c)
    };
    assert_eq!(
        service
            .search_sets(&state, c.bob, &elsewhere, Page::default())
            .await?
            .total,
        0
    );
    Ok(())
}

#[tokio::test]
async fn created_sets_list_every_set_of_the_author() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let c = seed(&state).await?;
    let service = SearchService::new();

    let all = service
        .my_created_sets(&state, c.alice, &SetFilter::default(), Page::default())
        .await?;
    assert_eq!(all.total, 2);
    assert_eq!(all.items[0].set_id, c.alice_public);
    assert_eq!(all.items[0].question_count, 2);
    assert_eq!(all.items[1].set_id, c.alice_private);
    assert_eq!(all.items[1].visibility, Visibility::Private);

    let public = SetFilter {
        visibility: Some(Visibility::Public),
        ..SetFilter::default()
    };
    let only_public = service
        .my_created_sets(&state, c.alice, &public, Page::default())
        .await?;
    assert_eq!(only_public.total, 1);
    assert_eq!(only_public.items[0].set_id, c.alice_public);
    Ok(())
}

#[tokio::test]
async fn empty_store_lists_nothing() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let viewer = create_user(state.db(), "viewer").await?;

    let page = SearchService::new()
        .search_sets(&state, viewer, &SetFilter::default(), Page::default())
        .await?;
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
    Ok(())
}

#[test]
fn visibility_filter_parsing() {
    assert_eq!(visibility_filter("all").ok(), Some(None));
    assert_eq!(
        visibility_filter("public").ok(),
        Some(Some(Visibility::Public))
    );
    expect_code(visibility_filter("secret"), ErrorCode::ValidationError);
}
