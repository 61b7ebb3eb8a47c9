//! Repository functions for the domain layer.
//!
//! Thin wrappers over `adapters` that speak domain types and `DomainError`.

pub mod favorites;
pub mod genres;
pub mod learning;
pub mod my_stars;
pub mod question_sets;
pub mod questions;
pub mod search;
pub mod stars;
