// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_422() {
    let de = DomainError::validation(ValidationKind::EmptyQuestionList, "no questions");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::EmptyQuestionList);
    assert_eq!(app.status().as_u16(), 422);

    let rating = DomainError::validation(ValidationKind::InvalidRating, "rating 9");
    let app: AppError = rating.into();
    assert_eq!(app.code().as_str(), "INVALID_RATING");

    let other = DomainError::validation_other("bad field");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
}

#[test]
fn maps_forbidden_to_403() {
    let de = DomainError::forbidden(ForbiddenKind::NotSetAuthor, "not yours");
    let app: AppError = de.into();
    assert_eq!(app.code().as_str(), "NOT_SET_AUTHOR");
    assert_eq!(app.status().as_u16(), 403);
    assert_eq!(app.detail(), "not yours");
}

#[test]
fn maps_conflicts() {
    let rated = DomainError::conflict(ConflictKind::AlreadyRated, "rated");
    let app: AppError = rated.into();
    assert_eq!(app.code().as_str(), "ALREADY_RATED");
    assert_eq!(app.status().as_u16(), 409);

    let collision = DomainError::conflict(ConflictKind::SetIdCollision, "dup id");
    let app: AppError = collision.into();
    assert_eq!(app.code().as_str(), "SET_ID_COLLISION");

    let other = DomainError::conflict(ConflictKind::Other("Unique".into()), "generic");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::QuestionSet, "set 4");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "QUESTION_SET_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let reg = DomainError::not_found(NotFoundKind::Registration, "not registered");
    let app: AppError = reg.into();
    assert_eq!(app.code(), ErrorCode::RegistrationNotFound);
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let lock = DomainError::infra(InfraErrorKind::LockTimeout, "lock");
    let app: AppError = lock.into();
    assert_eq!(app.code().as_str(), "DB_LOCK_TIMEOUT");

    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let other = DomainError::infra(InfraErrorKind::Other("DbErr".to_string()), "other");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "DB_ERROR");
    assert_eq!(app.status().as_u16(), 500);
}
