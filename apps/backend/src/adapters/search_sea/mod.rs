//! Read-only listing queries joining sets, questions, authors and ratings.
//!
//! Sets are grouped by set id; per-set columns such as title and genre are
//! taken as the minimum over the set's questions.

use sea_orm::sea_query::{Expr, Func, Query, SelectStatement, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationDef, RelationTrait, Select,
};

use crate::domain::pagination::{Page, Paged};
use crate::entities::my_questions::LearningStatus;
use crate::entities::questions::Visibility;
use crate::entities::{
    favorite_questions, genres, my_questions, question_sets, questions, stars, users,
};

pub mod dto;

pub use dto::{CreatedSetRow, LearningRow, QuestionRow, SetFilter, SetSummaryRow};

fn total_stars_expr() -> SimpleExpr {
    Func::coalesce([stars::Column::TotalStars.max(), Expr::val(0).into()]).into()
}

fn avg_star_expr() -> SimpleExpr {
    Func::coalesce([stars::Column::AvgStar.max(), Expr::val(0.0).into()]).into()
}

/// Sets holding at least one private question. A set's visibility is the
/// minimum over its questions, so any private question makes it private.
fn private_set_ids() -> SelectStatement {
    Query::select()
        .column((question_sets::Entity, question_sets::Column::SetId))
        .from(question_sets::Entity)
        .inner_join(
            questions::Entity,
            Expr::col((questions::Entity, questions::Column::Id))
                .equals((question_sets::Entity, question_sets::Column::QuestionId)),
        )
        .and_where(questions::Column::Visibility.eq(Visibility::Private))
        .to_owned()
}

fn set_visibility_condition(visibility: Visibility) -> Condition {
    match visibility {
        Visibility::Public => {
            Condition::all().add(question_sets::Column::SetId.not_in_subquery(private_set_ids()))
        }
        Visibility::Private => {
            Condition::all().add(question_sets::Column::SetId.in_subquery(private_set_ids()))
        }
    }
}

fn visibility_condition(visibility: Option<Visibility>, viewer_id: i64) -> Condition {
    match visibility {
        Some(Visibility::Public) => set_visibility_condition(Visibility::Public),
        // Private sets are only ever listed to their author.
        Some(Visibility::Private) => set_visibility_condition(Visibility::Private)
            .add(questions::Column::UserId.eq(viewer_id)),
        None => Condition::any()
            .add(set_visibility_condition(Visibility::Public))
            .add(questions::Column::UserId.eq(viewer_id)),
    }
}

fn apply_title_and_genre<E: EntityTrait>(
    mut query: Select<E>,
    filter: &SetFilter,
) -> Select<E> {
    if !filter.title.is_empty() {
        query = query.filter(questions::Column::Title.contains(&filter.title));
    }
    if filter.genre_id != 0 {
        query = query.filter(question_sets::Column::GenreId.eq(filter.genre_id));
    }
    query
}

fn set_summary_query(filter: &SetFilter, viewer_id: i64) -> Select<question_sets::Entity> {
    let query = question_sets::Entity::find()
        .select_only()
        .column(question_sets::Column::SetId)
        .column_as(questions::Column::Title.min(), "title")
        .column_as(question_sets::Column::GenreId.min(), "genre_id")
        .column_as(genres::Column::Name.min(), "genre_name")
        .column_as(questions::Column::UserId.min(), "author_id")
        .column_as(users::Column::Name.min(), "author_name")
        .column_as(question_sets::Column::QuestionId.count(), "question_count")
        .column_as(total_stars_expr(), "total_stars")
        .column_as(avg_star_expr(), "avg_star")
        .join(JoinType::InnerJoin, question_sets::Relation::Question.def())
        .join(JoinType::InnerJoin, questions::Relation::User.def())
        .join(JoinType::InnerJoin, question_sets::Relation::Genre.def())
        .join(JoinType::LeftJoin, question_sets::Relation::Star.def())
        .filter(visibility_condition(filter.visibility, viewer_id));

    apply_title_and_genre(query, filter)
        .group_by(question_sets::Column::SetId)
        .order_by(total_stars_expr(), Order::Desc)
        .order_by(avg_star_expr(), Order::Desc)
        .order_by(questions::Column::Title.min(), Order::Asc)
        .order_by(question_sets::Column::SetId, Order::Asc)
}

async fn fetch_page<C, E, M>(conn: &C, query: Select<E>, page: Page) -> Result<Paged<M>, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    E: EntityTrait,
    E::Model: Sync,
    M: sea_orm::FromQueryResult + Send + Sync,
{
    let total = query.clone().count(conn).await?;
    let items = query
        .limit(page.limit)
        .offset(page.offset())
        .into_model::<M>()
        .all(conn)
        .await?;
    Ok(Paged { items, total })
}

/// Public search, ordered by rating count, average, title and set id.
pub async fn search_sets<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: &SetFilter,
    viewer_id: i64,
    page: Page,
) -> Result<Paged<SetSummaryRow>, sea_orm::DbErr> {
    fetch_page(conn, set_summary_query(filter, viewer_id), page).await
}

/// Same listing restricted to sets the viewer bookmarked.
pub async fn search_favorite_sets<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: &SetFilter,
    viewer_id: i64,
    page: Page,
) -> Result<Paged<SetSummaryRow>, sea_orm::DbErr> {
    let favorites = Query::select()
        .column(favorite_questions::Column::QuestionSetId)
        .from(favorite_questions::Entity)
        .and_where(favorite_questions::Column::UserId.eq(viewer_id))
        .to_owned();
    let query = set_summary_query(filter, viewer_id)
        .filter(question_sets::Column::SetId.in_subquery(favorites));
    fetch_page(conn, query, page).await
}

/// Sets authored by `owner_id`, ordered by set id.
pub async fn created_sets<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: &SetFilter,
    owner_id: i64,
    page: Page,
) -> Result<Paged<CreatedSetRow>, sea_orm::DbErr> {
    let mut query = question_sets::Entity::find()
        .select_only()
        .column(question_sets::Column::SetId)
        .column_as(questions::Column::Title.min(), "title")
        .column_as(question_sets::Column::GenreId.min(), "genre_id")
        .column_as(genres::Column::Name.min(), "genre_name")
        .column_as(questions::Column::Visibility.min(), "visibility")
        .column_as(question_sets::Column::QuestionId.count(), "question_count")
        .join(JoinType::InnerJoin, question_sets::Relation::Question.def())
        .join(JoinType::InnerJoin, question_sets::Relation::Genre.def())
        .filter(questions::Column::UserId.eq(owner_id));
    if let Some(visibility) = filter.visibility {
        query = query.filter(set_visibility_condition(visibility));
    }
    let query = apply_title_and_genre(query, filter)
        .group_by(question_sets::Column::SetId)
        .order_by(question_sets::Column::SetId, Order::Asc);
    fetch_page(conn, query, page).await
}

/// The user's learning registrations, ordered by status (descending),
/// deadline, progress and set id.
pub async fn learning_list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    title: &str,
    status: Option<LearningStatus>,
    genre_id: i32,
    page: Page,
) -> Result<Paged<LearningRow>, sea_orm::DbErr> {
    let registration: RelationDef = question_sets::Entity::belongs_to(my_questions::Entity)
        .from(question_sets::Column::SetId)
        .to(my_questions::Column::QuestionSetId)
        .into();

    let mut query = question_sets::Entity::find()
        .select_only()
        .column(question_sets::Column::SetId)
        .column_as(questions::Column::Title.min(), "title")
        .column_as(genres::Column::Name.min(), "genre_name")
        .column(my_questions::Column::Progress)
        .column(my_questions::Column::Attempts)
        .column(my_questions::Column::Status)
        .column(my_questions::Column::Deadline)
        .column_as(question_sets::Column::QuestionId.count(), "question_count")
        .join(JoinType::InnerJoin, question_sets::Relation::Question.def())
        .join(JoinType::InnerJoin, question_sets::Relation::Genre.def())
        .join(JoinType::InnerJoin, registration)
        .filter(my_questions::Column::UserId.eq(user_id));
    if let Some(status) = status {
        query = query.filter(my_questions::Column::Status.eq(status));
    }
    let filter = SetFilter {
        title: title.to_owned(),
        visibility: None,
        genre_id,
    };
    let query = apply_title_and_genre(query, &filter)
        .group_by(question_sets::Column::SetId)
        .group_by(my_questions::Column::Progress)
        .group_by(my_questions::Column::Attempts)
        .group_by(my_questions::Column::Status)
        .group_by(my_questions::Column::Deadline)
        .order_by(my_questions::Column::Status, Order::Desc)
        .order_by(my_questions::Column::Deadline, Order::Asc)
        .order_by(my_questions::Column::Progress, Order::Asc)
        .order_by(question_sets::Column::SetId, Order::Asc);
    fetch_page(conn, query, page).await
}

fn question_row_query() -> Select<questions::Entity> {
    questions::Entity::find()
        .select_only()
        .column(questions::Column::Id)
        .column(questions::Column::UserId)
        .column(questions::Column::Title)
        .column(questions::Column::GenreId)
        .column_as(genres::Column::Name, "genre_name")
        .column(questions::Column::Visibility)
        .column(questions::Column::Question)
        .column(questions::Column::Answer)
        .column(questions::Column::Choices1)
        .column(questions::Column::Choices2)
        .join(JoinType::InnerJoin, questions::Relation::Genre.def())
}

/// Questions bound to a set, ordered by id.
pub async fn questions_in_set<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    set_id: i64,
) -> Result<Vec<QuestionRow>, sea_orm::DbErr> {
    question_row_query()
        .join(JoinType::InnerJoin, questions::Relation::QuestionSets.def())
        .filter(question_sets::Column::SetId.eq(set_id))
        .order_by_asc(questions::Column::Id)
        .into_model::<QuestionRow>()
        .all(conn)
        .await
}

/// Questions by id, ordered by id.
pub async fn questions_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<QuestionRow>, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    question_row_query()
        .filter(questions::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(questions::Column::Id)
        .into_model::<QuestionRow>()
        .all(conn)
        .await
}
