//! Domain layer: pure question-set logic with no store access.

pub mod pagination;
pub mod progress;
pub mod rating;
pub mod reconcile;

#[cfg(test)]
mod tests_props_reconcile;

pub use pagination::{Page, Paged};
pub use progress::{compute_progress, ProgressOutcome};
pub use rating::{Rating, StarCounts};
pub use reconcile::{partition, Partition};
