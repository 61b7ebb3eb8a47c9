//! Error codes surfaced by the question-set core.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that the
//! calling layer puts in its responses.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authorization
    /// Access denied
    Forbidden,
    /// Requester did not author every question in the set
    NotSetAuthor,

    // Validation
    /// Fix or create called with no questions
    EmptyQuestionList,
    /// Rating outside 1..=5
    InvalidRating,
    /// Answered question does not belong to the set
    QuestionNotInSet,
    /// General validation error
    ValidationError,

    // Not found
    /// No membership rows for the set identifier
    QuestionSetNotFound,
    /// Question row missing
    QuestionNotFound,
    /// Aggregate rating row missing
    StarNotFound,
    /// User has not registered the set for learning
    RegistrationNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// User already rated this set
    AlreadyRated,
    /// User already registered this set
    AlreadyRegistered,
    /// Two creators were handed the same set identifier
    SetIdCollision,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Storage
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Statement or pool timeout
    DbTimeout,
    /// Row lock could not be acquired in time
    DbLockTimeout,
    /// Foreign key constraint violation
    FkViolation,
    /// Check constraint violation
    CheckViolation,
    /// Data corruption detected
    DataCorruption,

    /// Internal error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Forbidden => "FORBIDDEN",
            Self::NotSetAuthor => "NOT_SET_AUTHOR",

            Self::EmptyQuestionList => "EMPTY_QUESTION_LIST",
            Self::InvalidRating => "INVALID_RATING",
            Self::QuestionNotInSet => "QUESTION_NOT_IN_SET",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::QuestionSetNotFound => "QUESTION_SET_NOT_FOUND",
            Self::QuestionNotFound => "QUESTION_NOT_FOUND",
            Self::StarNotFound => "STAR_NOT_FOUND",
            Self::RegistrationNotFound => "REGISTRATION_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::AlreadyRated => "ALREADY_RATED",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::SetIdCollision => "SET_ID_COLLISION",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DbLockTimeout => "DB_LOCK_TIMEOUT",
            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",
            Self::DataCorruption => "DATA_CORRUPTION",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
