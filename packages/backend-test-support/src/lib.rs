//! Shared helpers for the quiz backend test suites: logging, unique names
//! and problem-details assertions.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
