//! Star rating arithmetic. Pure; the locked read-modify-write lives in the
//! ratings service.

use crate::errors::domain::{DomainError, ValidationKind};

/// A validated star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if (i32::from(Self::MIN)..=i32::from(Self::MAX)).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(DomainError::validation(
                ValidationKind::InvalidRating,
                format!("rating must be between 1 and 5, got {value}"),
            ))
        }
    }
}

/// Per-bucket rating counts for one set. `buckets[0]` counts one-star ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarCounts {
    pub buckets: [i32; 5],
}

impl StarCounts {
    pub fn new(star1: i32, star2: i32, star3: i32, star4: i32, star5: i32) -> Self {
        Self {
            buckets: [star1, star2, star3, star4, star5],
        }
    }

    pub fn total(&self) -> i32 {
        self.buckets.iter().sum()
    }

    /// Weighted mean of the buckets; 0.0 when nothing has been rated.
    pub fn average(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let weighted: i64 = self
            .buckets
            .iter()
            .zip(1i64..)
            .map(|(count, weight)| i64::from(*count) * weight)
            .sum();
        weighted as f64 / f64::from(total)
    }

    pub fn record(&mut self, rating: Rating) {
        self.buckets[usize::from(rating.value() - 1)] += 1;
    }

    pub fn count(&self, rating: Rating) -> i32 {
        self.buckets[usize::from(rating.value() - 1)]
    }
}
