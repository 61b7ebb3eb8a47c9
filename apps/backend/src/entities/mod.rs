pub mod correct_answers;
pub mod favorite_questions;
pub mod genres;
pub mod my_questions;
pub mod my_stars;
pub mod question_sets;
pub mod questions;
pub mod stars;
pub mod users;

pub use genres::Entity as Genres;
pub use genres::Model as Genre;
pub use my_questions::LearningStatus;
pub use questions::Entity as Questions;
pub use questions::Model as Question;
pub use questions::Visibility;
pub use stars::Entity as Stars;
pub use stars::Model as Star;
