//! Bucket assignments produced by a cross-sectional sort.

use serde::{Deserialize, Serialize};

use crate::{EntityId, Period};

/// Mapping from entity to bucket index for one period and characteristic.
///
/// Bucket `0` holds the lowest characteristic values. Entities are listed in
/// ascending rank order within each bucket. A period whose sort was
/// degenerate has every bucket empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketAssignment {
    period: Period,
    buckets: Vec<Vec<EntityId>>,
}

impl BucketAssignment {
    /// Create an assignment from per-bucket member lists.
    #[must_use]
    pub const fn new(period: Period, buckets: Vec<Vec<EntityId>>) -> Self {
        Self { period, buckets }
    }

    /// Assignment with `num_buckets` empty buckets.
    #[must_use]
    pub fn empty(period: Period, num_buckets: usize) -> Self {
        Self { period, buckets: vec![Vec::new(); num_buckets] }
    }

    /// Formation period.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Number of buckets.
    #[must_use]
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Members of bucket `index` (empty if out of range).
    #[must_use]
    pub fn bucket(&self, index: usize) -> &[EntityId] {
        self.buckets.get(index).map_or(&[][..], Vec::as_slice)
    }

    /// All buckets, lowest first.
    #[must_use]
    pub fn buckets(&self) -> &[Vec<EntityId>] {
        &self.buckets
    }

    /// Bucket index of `entity`, if assigned.
    #[must_use]
    pub fn bucket_of(&self, entity: EntityId) -> Option<usize> {
        self.buckets.iter().position(|members| members.contains(&entity))
    }

    /// `(entity, bucket)` pairs, lowest bucket first.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, usize)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .flat_map(|(bucket, members)| members.iter().map(move |&e| (e, bucket)))
    }

    /// Total number of assigned entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Whether no entity is assigned (degenerate period).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}
