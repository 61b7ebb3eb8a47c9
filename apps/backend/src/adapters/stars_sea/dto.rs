//! DTOs for stars_sea adapter.

/// New histogram state for one set.
#[derive(Debug, Clone)]
pub struct StarCountsUpdate {
    pub question_set_id: i64,
    /// Counts for one through five stars.
    pub buckets: [i32; 5],
    pub total_stars: i32,
    pub avg_star: f64,
}
