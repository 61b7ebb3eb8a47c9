use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Genres {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Questions {
    Table,
    Id,
    UserId,
    Title,
    GenreId,
    Visibility,
    Question,
    Answer,
    Choices1,
    Choices2,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum QuestionSets {
    Table,
    SetId,
    QuestionId,
    GenreId,
}

#[derive(Iden)]
enum Stars {
    Table,
    QuestionSetId,
    Star1,
    Star2,
    Star3,
    Star4,
    Star5,
    TotalStars,
    AvgStar,
}

#[derive(Iden)]
enum MyStars {
    Table,
    UserId,
    QuestionSetId,
    Evaluate,
    CreatedAt,
}

#[derive(Iden)]
enum MyQuestions {
    Table,
    UserId,
    QuestionSetId,
    Progress,
    Attempts,
    Status,
    Deadline,
    LastUpdatedAt,
    CreatedAt,
}

#[derive(Iden)]
enum FavoriteQuestions {
    Table,
    UserId,
    QuestionSetId,
    CreatedAt,
}

#[derive(Iden)]
enum CorrectAnswers {
    Table,
    UserId,
    QuestionId,
    QuestionSetId,
    CreatedAt,
}

fn star_bucket<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).integer().not_null().default(0).to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // genres
        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Genres::Id)
                            .integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Genres::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        // users (owned by the auth layer; read for author names)
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // questions
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Questions::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Questions::Title).string().not_null())
                    .col(ColumnDef::new(Questions::GenreId).integer().not_null())
                    .col(
                        ColumnDef::new(Questions::Visibility)
                            .string_len(16)
                            .not_null()
                            .default("public"),
                    )
                    .col(ColumnDef::new(Questions::Question).text().not_null())
                    .col(ColumnDef::new(Questions::Answer).text().not_null())
                    .col(ColumnDef::new(Questions::Choices1).text().not_null())
                    .col(ColumnDef::new(Questions::Choices2).text().not_null())
                    .col(
                        ColumnDef::new(Questions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Questions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_questions_user_id")
                            .from(Questions::Table, Questions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_questions_genre_id")
                            .from(Questions::Table, Questions::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_questions_user_id")
                    .table(Questions::Table)
                    .col(Questions::UserId)
                    .to_owned(),
            )
            .await?;

        // question_sets: membership rows. Deleting a question drops its rows.
        manager
            .create_table(
                Table::create()
                    .table(QuestionSets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(QuestionSets::SetId).big_integer().not_null())
                    .col(
                        ColumnDef::new(QuestionSets::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QuestionSets::GenreId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(QuestionSets::SetId)
                            .col(QuestionSets::QuestionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_sets_question_id")
                            .from(QuestionSets::Table, QuestionSets::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_sets_genre_id")
                            .from(QuestionSets::Table, QuestionSets::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_question_sets_question_id")
                    .table(QuestionSets::Table)
                    .col(QuestionSets::QuestionId)
                    .to_owned(),
            )
            .await?;

        // stars: one aggregate row per set identifier
        manager
            .create_table(
                Table::create()
                    .table(Stars::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stars::QuestionSetId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(star_bucket(Stars::Star1))
                    .col(star_bucket(Stars::Star2))
                    .col(star_bucket(Stars::Star3))
                    .col(star_bucket(Stars::Star4))
                    .col(star_bucket(Stars::Star5))
                    .col(star_bucket(Stars::TotalStars))
                    .col(
                        ColumnDef::new(Stars::AvgStar)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_stars_ranking")
                    .table(Stars::Table)
                    .col(Stars::TotalStars)
                    .col(Stars::AvgStar)
                    .to_owned(),
            )
            .await?;

        // my_stars
        manager
            .create_table(
                Table::create()
                    .table(MyStars::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MyStars::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(MyStars::QuestionSetId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MyStars::Evaluate)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(MyStars::Evaluate).between(1, 5)),
                    )
                    .col(
                        ColumnDef::new(MyStars::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(MyStars::UserId)
                            .col(MyStars::QuestionSetId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_my_stars_question_set_id")
                    .table(MyStars::Table)
                    .col(MyStars::QuestionSetId)
                    .to_owned(),
            )
            .await?;

        // my_questions: learning registrations
        manager
            .create_table(
                Table::create()
                    .table(MyQuestions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MyQuestions::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(MyQuestions::QuestionSetId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MyQuestions::Progress)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(MyQuestions::Attempts)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MyQuestions::Status)
                            .string_len(16)
                            .not_null()
                            .default("not_started"),
                    )
                    .col(ColumnDef::new(MyQuestions::Deadline).date().null())
                    .col(
                        ColumnDef::new(MyQuestions::LastUpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MyQuestions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(MyQuestions::UserId)
                            .col(MyQuestions::QuestionSetId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_my_questions_question_set_id")
                    .table(MyQuestions::Table)
                    .col(MyQuestions::QuestionSetId)
                    .to_owned(),
            )
            .await?;

        // favorite_questions
        manager
            .create_table(
                Table::create()
                    .table(FavoriteQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FavoriteQuestions::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteQuestions::QuestionSetId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteQuestions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(FavoriteQuestions::UserId)
                            .col(FavoriteQuestions::QuestionSetId),
                    )
                    .to_owned(),
            )
            .await?;

        // correct_answers
        manager
            .create_table(
                Table::create()
                    .table(CorrectAnswers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CorrectAnswers::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CorrectAnswers::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CorrectAnswers::QuestionSetId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CorrectAnswers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CorrectAnswers::UserId)
                            .col(CorrectAnswers::QuestionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_correct_answers_question_id")
                            .from(CorrectAnswers::Table, CorrectAnswers::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_correct_answers_user_set")
                    .table(CorrectAnswers::Table)
                    .col(CorrectAnswers::UserId)
                    .col(CorrectAnswers::QuestionSetId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CorrectAnswers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FavoriteQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MyQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MyStars::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stars::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuestionSets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres::Table).to_owned())
            .await?;
        Ok(())
    }
}
