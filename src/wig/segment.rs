use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SegmentError {
    #[error("position {pos} is outside the segment [{start}, {stop}]")]
    OutOfRange { pos: u32, start: u32, stop: u32 },
    #[error("expected {expected} values for the range, got {got}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("cannot join zero segments")]
    EmptyJoin,
}

/// Dense coverage values for one strand of one chromosome over a
/// contiguous, 1-based, inclusive position range.
///
/// A segment covers exactly `[start, stop]` with `stop - start + 1` values.
/// Indexing outside that range is an error, not a clip: the store layer is
/// responsible for absorbing undeclared positions into zero-fill before a
/// position ever reaches a segment.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageSegment {
    start: u32,
    values: Vec<f32>,
}

impl CoverageSegment {
    /// Zero-filled segment covering `[start, stop]` inclusive, where both
    /// bounds are already span-adjusted. `stop < start` yields the empty
    /// segment.
    pub fn with_bounds(start: u32, stop: u32) -> CoverageSegment {
        let len = (stop + 1).saturating_sub(start) as usize;
        CoverageSegment {
            start,
            values: vec![0.0; len],
        }
    }

    /// Zero-filled segment from a chunk's raw bounds: `last` is the last
    /// declared position and the span extends past it, so the segment
    /// covers `[start, last + span - 1]`.
    pub fn from_declared(start: u32, last: u32, span: u32) -> CoverageSegment {
        let len = (last + span).saturating_sub(start) as usize;
        CoverageSegment {
            start,
            values: vec![0.0; len],
        }
    }

    /// The segment covering no positions at all.
    pub fn empty() -> CoverageSegment {
        CoverageSegment {
            start: 0,
            values: Vec::new(),
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last covered position. Zero for an empty segment.
    pub fn stop(&self) -> u32 {
        (self.start + self.values.len() as u32).saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    fn index_of(&self, pos: u32) -> Result<usize, SegmentError> {
        if self.is_empty() || pos < self.start || pos > self.stop() {
            return Err(SegmentError::OutOfRange {
                pos,
                start: self.start,
                stop: self.stop(),
            });
        }
        Ok((pos - self.start) as usize)
    }

    pub fn get(&self, pos: u32) -> Result<f32, SegmentError> {
        Ok(self.values[self.index_of(pos)?])
    }

    pub fn set(&mut self, pos: u32, value: f32) -> Result<(), SegmentError> {
        let at = self.index_of(pos)?;
        self.values[at] = value;
        Ok(())
    }

    /// Writes `values` over the inclusive range `[pos_start, pos_stop]`.
    /// The slice length must equal the range length.
    pub fn set_range(
        &mut self,
        pos_start: u32,
        pos_stop: u32,
        values: &[f32],
    ) -> Result<(), SegmentError> {
        let expected = (pos_stop as i64 - pos_start as i64 + 1).max(0) as usize;
        if values.len() != expected {
            return Err(SegmentError::LengthMismatch {
                expected,
                got: values.len(),
            });
        }
        let lo = self.index_of(pos_start)?;
        let hi = self.index_of(pos_stop)?;
        self.values[lo..=hi].copy_from_slice(values);
        Ok(())
    }

    /// Joins segments (same strand, same chromosome, not required to be
    /// contiguous or ordered) into one spanning `[min start, max stop]`.
    /// Every covered position is copied; where inputs overlap the first
    /// segment in the list wins; positions covered by no input get `glue`.
    ///
    /// Fails with [`SegmentError::EmptyJoin`] for an empty input slice.
    /// Empty input segments are skipped; all-empty input yields the empty
    /// segment.
    pub fn join(segments: &[CoverageSegment], glue: f32) -> Result<CoverageSegment, SegmentError> {
        if segments.is_empty() {
            return Err(SegmentError::EmptyJoin);
        }
        let occupied: Vec<&CoverageSegment> =
            segments.iter().filter(|s| !s.is_empty()).collect();
        if occupied.is_empty() {
            return Ok(CoverageSegment::empty());
        }
        let (start, stop) = occupied.iter().fold((u32::MAX, 0), |(lo, hi), s| {
            (lo.min(s.start), hi.max(s.stop()))
        });
        let len = (stop - start + 1) as usize;
        let mut values = vec![glue; len];
        let mut claimed = vec![false; len];
        for seg in occupied {
            let offset = (seg.start - start) as usize;
            for (i, &v) in seg.values.iter().enumerate() {
                if !claimed[offset + i] {
                    claimed[offset + i] = true;
                    values[offset + i] = v;
                }
            }
        }
        Ok(CoverageSegment { start, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let seg = CoverageSegment::with_bounds(10, 21);
        assert_eq!(seg.start(), 10);
        assert_eq!(seg.stop(), 21);
        assert_eq!(seg.len(), 12);
        assert_eq!(seg.values(), &[0.0; 12]);

        // raw chunk bounds: last declared position 5, span 3 -> [1, 7]
        let seg = CoverageSegment::from_declared(1, 5, 3);
        assert_eq!(seg.stop(), 7);
        assert_eq!(seg.len(), 7);

        let seg = CoverageSegment::from_declared(1, 5, 1);
        assert_eq!(seg.len(), 5);
    }

    #[test]
    fn test_empty() {
        let seg = CoverageSegment::empty();
        assert!(seg.is_empty());
        assert_eq!(seg.len(), 0);
        assert!(matches!(seg.get(0), Err(SegmentError::OutOfRange { .. })));
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut seg = CoverageSegment::with_bounds(5, 15);
        for pos in 5..=15 {
            seg.set(pos, pos as f32).unwrap();
            assert_eq!(seg.get(pos).unwrap(), pos as f32);
        }
    }

    #[test]
    fn test_out_of_range() {
        let mut seg = CoverageSegment::with_bounds(5, 15);
        assert_eq!(
            seg.get(4),
            Err(SegmentError::OutOfRange {
                pos: 4,
                start: 5,
                stop: 15
            })
        );
        assert_eq!(
            seg.set(16, 1.0),
            Err(SegmentError::OutOfRange {
                pos: 16,
                start: 5,
                stop: 15
            })
        );
    }

    #[test]
    fn test_set_range() {
        let mut seg = CoverageSegment::with_bounds(1, 10);
        seg.set_range(3, 5, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(seg.get(2).unwrap(), 0.0);
        assert_eq!(seg.get(3).unwrap(), 1.0);
        assert_eq!(seg.get(4).unwrap(), 2.0);
        assert_eq!(seg.get(5).unwrap(), 3.0);
        assert_eq!(seg.get(6).unwrap(), 0.0);

        assert_eq!(
            seg.set_range(3, 5, &[1.0]),
            Err(SegmentError::LengthMismatch {
                expected: 3,
                got: 1
            })
        );
    }

    #[test]
    fn test_join_gap_fill() {
        let mut a = CoverageSegment::with_bounds(1, 3);
        a.set_range(1, 3, &[1.0, 2.0, 3.0]).unwrap();
        let mut b = CoverageSegment::with_bounds(8, 9);
        b.set_range(8, 9, &[8.0, 9.0]).unwrap();

        let joined = CoverageSegment::join(&[a, b], 0.5).unwrap();
        assert_eq!(joined.start(), 1);
        assert_eq!(joined.stop(), 9);
        assert_eq!(
            joined.values(),
            &[1.0, 2.0, 3.0, 0.5, 0.5, 0.5, 0.5, 8.0, 9.0]
        );
    }

    #[test]
    fn test_join_first_wins_on_overlap() {
        let mut a = CoverageSegment::with_bounds(1, 4);
        a.set_range(1, 4, &[1.0, 1.0, 1.0, 1.0]).unwrap();
        let mut b = CoverageSegment::with_bounds(3, 6);
        b.set_range(3, 6, &[2.0, 2.0, 2.0, 2.0]).unwrap();

        let joined = CoverageSegment::join(&[a, b], 0.0).unwrap();
        assert_eq!(joined.values(), &[1.0, 1.0, 1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_join_unordered_input() {
        let mut a = CoverageSegment::with_bounds(8, 9);
        a.set_range(8, 9, &[8.0, 9.0]).unwrap();
        let mut b = CoverageSegment::with_bounds(1, 2);
        b.set_range(1, 2, &[1.0, 2.0]).unwrap();

        let joined = CoverageSegment::join(&[a, b], 0.0).unwrap();
        assert_eq!(joined.start(), 1);
        assert_eq!(joined.values(), &[1.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 8.0, 9.0]);
    }

    #[test]
    fn test_join_empty_input() {
        assert_eq!(CoverageSegment::join(&[], 0.0), Err(SegmentError::EmptyJoin));
        let joined =
            CoverageSegment::join(&[CoverageSegment::empty(), CoverageSegment::empty()], 0.0)
                .unwrap();
        assert!(joined.is_empty());
    }
}
