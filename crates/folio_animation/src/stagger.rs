//! Stagger sequencing
//!
//! Computes the start offset of every member of a visually grouped set of
//! siblings so they read as one continuous motion instead of a simultaneous
//! pop. Offsets are plain milliseconds relative to the moment the group (or
//! the individual item) is triggered.

use serde::{Deserialize, Serialize};

/// Compute forward stagger offsets for `item_count` items
///
/// The i-th offset is `i * step_ms`. A missing step means "no stagger":
/// every item starts at the same time.
///
/// ```
/// use folio_animation::compute_offsets;
///
/// assert_eq!(compute_offsets(3, Some(50)), vec![0, 50, 100]);
/// assert_eq!(compute_offsets(3, None), vec![0, 0, 0]);
/// ```
pub fn compute_offsets(item_count: usize, step_ms: Option<u32>) -> Vec<u32> {
    StaggerConfig::new(step_ms.unwrap_or(0)).offsets(item_count)
}

/// Direction for stagger sequencing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaggerDirection {
    /// First to last
    #[default]
    Forward,
    /// Last to first
    Reverse,
    /// Center outward
    FromCenter,
}

/// Configuration for a staggered group
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaggerConfig {
    /// Delay between consecutive items (ms)
    pub step_ms: u32,
    /// Direction of the sequence
    pub direction: StaggerDirection,
    /// Optional cap on the number of steps; items past it share the last offset
    pub limit: Option<usize>,
}

impl StaggerConfig {
    /// Forward stagger with the given step
    pub fn new(step_ms: u32) -> Self {
        Self {
            step_ms,
            direction: StaggerDirection::Forward,
            limit: None,
        }
    }

    /// Sequence from last to first
    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    /// Sequence from the center outward
    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    pub fn with_direction(mut self, direction: StaggerDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Limit the stagger to the first N steps
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Position of `index` in the sequence order
    pub fn rank(&self, index: usize, total: usize) -> usize {
        let rank = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerDirection::FromCenter => {
                let center = total / 2;
                index.abs_diff(center)
            }
        };

        match self.limit {
            Some(limit) => rank.min(limit),
            None => rank,
        }
    }

    /// Offset (ms) for a specific item index
    pub fn delay_for_index(&self, index: usize, total: usize) -> u32 {
        let rank = u32::try_from(self.rank(index, total)).unwrap_or(u32::MAX);
        self.step_ms.saturating_mul(rank)
    }

    /// Offsets (ms) for a whole group, indexed by item index
    pub fn offsets(&self, total: usize) -> Vec<u32> {
        (0..total)
            .map(|index| self.delay_for_index(index, total))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_offsets() {
        assert_eq!(compute_offsets(3, Some(50)), vec![0, 50, 100]);
        assert_eq!(compute_offsets(4, Some(50)), vec![0, 50, 100, 150]);
    }

    #[test]
    fn test_compute_offsets_empty_group() {
        assert!(compute_offsets(0, Some(50)).is_empty());
        assert!(compute_offsets(0, None).is_empty());
    }

    #[test]
    fn test_missing_step_is_simultaneous() {
        assert_eq!(compute_offsets(4, None), vec![0; 4]);
        assert_eq!(compute_offsets(4, Some(0)), vec![0; 4]);
    }

    #[test]
    fn test_offsets_are_index_times_step() {
        for count in 0..20 {
            for step in [0, 1, 16, 50, 333] {
                let offsets = compute_offsets(count, Some(step));
                assert_eq!(offsets.len(), count);
                for (i, offset) in offsets.iter().enumerate() {
                    assert_eq!(*offset, i as u32 * step);
                }
                assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }

    #[test]
    fn test_huge_step_saturates() {
        let offsets = compute_offsets(3, Some(u32::MAX));
        assert_eq!(offsets, vec![0, u32::MAX, u32::MAX]);
    }

    #[test]
    fn test_stagger_delay_reverse() {
        let config = StaggerConfig::new(50).reverse();

        assert_eq!(config.delay_for_index(0, 5), 200);
        assert_eq!(config.delay_for_index(1, 5), 150);
        assert_eq!(config.delay_for_index(4, 5), 0);
    }

    #[test]
    fn test_stagger_delay_from_center() {
        let config = StaggerConfig::new(50).from_center();

        // Distances from index 2: [2, 1, 0, 1, 2]
        assert_eq!(config.offsets(5), vec![100, 50, 0, 50, 100]);
    }

    #[test]
    fn test_stagger_delay_with_limit() {
        let config = StaggerConfig::new(50).limit(3);

        assert_eq!(config.delay_for_index(0, 10), 0);
        assert_eq!(config.delay_for_index(3, 10), 150);
        assert_eq!(config.delay_for_index(9, 10), 150);
    }
}
