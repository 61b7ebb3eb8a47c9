/// Result of recomputing a learning registration's progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressOutcome {
    /// Percentage in `0.0..=100.0`.
    pub progress: f64,
    pub completed: bool,
}

/// Progress from integer counts. Completion compares the counts directly
/// instead of testing the derived percentage against 100.
pub fn compute_progress(correct: u64, total: u64) -> ProgressOutcome {
    if total == 0 {
        return ProgressOutcome {
            progress: 0.0,
            completed: false,
        };
    }
    let correct = correct.min(total);
    ProgressOutcome {
        progress: correct as f64 / total as f64 * 100.0,
        completed: correct == total,
    }
}
