//! Primitive modes and index sequence generation
//!
//! The index sequence tells the rasterizer how to walk the point set. It is
//! always rebuilt from scratch for a given point count and mode, never
//! patched, and remembers what it was built for so a stale sequence can be
//! detected before it reaches the GPU.

/// Topology used to interpret the point sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveMode {
    /// Discrete points
    #[default]
    Points,
    /// Line segments between consecutive points
    Lines,
}

/// Ordered indices into a point set, built for one mode and point count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSequence {
    indices: Vec<u32>,
    mode: PrimitiveMode,
    point_count: usize,
}

impl IndexSequence {
    /// Generate the index sequence for `point_count` points in `mode`
    ///
    /// The final point is never referenced: points mode yields
    /// `0..=L-2` and lines mode yields the edges `(p, p+1)` for
    /// `p in 0..=L-3`. Counts too small for either range produce an
    /// empty sequence.
    pub fn generate(point_count: usize, mode: PrimitiveMode) -> Self {
        let indices = match mode {
            PrimitiveMode::Points => {
                let end = point_count.saturating_sub(1);
                (0..end).map(|p| p as u32).collect()
            }
            PrimitiveMode::Lines => {
                let end = point_count.saturating_sub(2);
                let mut indices = Vec::with_capacity(end * 2);
                for p in 0..end {
                    indices.push(p as u32);
                    indices.push(p as u32 + 1);
                }
                indices
            }
        };

        log::debug!(
            "Generated {} indices for {} points in {:?} mode",
            indices.len(),
            point_count,
            mode
        );

        Self {
            indices,
            mode,
            point_count,
        }
    }

    /// Mode this sequence was built for
    pub fn mode(&self) -> PrimitiveMode {
        self.mode
    }

    /// Point count this sequence was built for
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Whether this sequence matches the given point count and mode
    pub fn is_valid_for(&self, point_count: usize, mode: PrimitiveMode) -> bool {
        self.point_count == point_count && self.mode == mode
    }

    /// Number of indices
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Borrow the indices as a slice
    pub fn as_slice(&self) -> &[u32] {
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_mode_excludes_last_point() {
        let seq = IndexSequence::generate(5, PrimitiveMode::Points);
        assert_eq!(seq.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_lines_mode_excludes_last_edge() {
        let seq = IndexSequence::generate(5, PrimitiveMode::Lines);
        assert_eq!(seq.as_slice(), &[0, 1, 1, 2, 2, 3]);
    }

    #[test]
    fn test_three_point_scenario() {
        assert_eq!(IndexSequence::generate(3, PrimitiveMode::Points).as_slice(), &[0, 1]);
        assert_eq!(IndexSequence::generate(3, PrimitiveMode::Lines).as_slice(), &[0, 1]);
    }

    #[test]
    fn test_degenerate_counts_produce_empty_sequences() {
        for count in 0..=1 {
            assert!(IndexSequence::generate(count, PrimitiveMode::Points).is_empty());
            assert!(IndexSequence::generate(count, PrimitiveMode::Lines).is_empty());
        }
        assert!(IndexSequence::generate(2, PrimitiveMode::Lines).is_empty());
        assert_eq!(IndexSequence::generate(2, PrimitiveMode::Points).as_slice(), &[0]);
    }

    #[test]
    fn test_lengths_follow_point_count() {
        for count in 0..64usize {
            let points = IndexSequence::generate(count, PrimitiveMode::Points);
            let lines = IndexSequence::generate(count, PrimitiveMode::Lines);
            assert_eq!(points.len(), count.saturating_sub(1));
            assert_eq!(lines.len(), 2 * count.saturating_sub(2));
            assert!(points.as_slice().iter().all(|&i| (i as usize) < count));
            assert!(lines.as_slice().iter().all(|&i| (i as usize) < count));
        }
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let first = IndexSequence::generate(7, PrimitiveMode::Points);
        let lines = IndexSequence::generate(7, PrimitiveMode::Lines);
        let again = IndexSequence::generate(7, PrimitiveMode::Points);
        assert_ne!(first, lines);
        assert_eq!(first, again);
    }

    #[test]
    fn test_staleness_detection() {
        let seq = IndexSequence::generate(4, PrimitiveMode::Points);
        assert!(seq.is_valid_for(4, PrimitiveMode::Points));
        assert!(!seq.is_valid_for(4, PrimitiveMode::Lines));
        assert!(!seq.is_valid_for(5, PrimitiveMode::Points));
    }
}
