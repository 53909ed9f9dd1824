use crate::wig::chunk::WigChunk;
use crate::wig::segment::{CoverageSegment, SegmentError};
use crate::wig::Strand;

/// Committed, strand-separated coverage for one chromosome.
///
/// Chunks are materialized and appended in parse order. The store is only
/// mutated while a track is being parsed; once the [`Genome`] is handed
/// out, queries treat it as read-only and any number of readers may call
/// [`get_coverage`] concurrently.
///
/// [`Genome`]: crate::Genome
/// [`get_coverage`]: Chromosome::get_coverage
#[derive(Debug, Clone)]
pub struct Chromosome {
    name: String,
    forward: Vec<CoverageSegment>,
    reverse: Vec<CoverageSegment>,
}

impl Chromosome {
    pub fn new(name: impl Into<String>) -> Chromosome {
        Chromosome {
            name: name.into(),
            forward: Vec::new(),
            reverse: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Materializes `chunk` and appends its non-empty segments in commit
    /// order.
    pub fn add_chunk(&mut self, chunk: &WigChunk) -> Result<(), SegmentError> {
        let (forward, reverse) = chunk.to_coverage_segments()?;
        if !forward.is_empty() {
            self.forward.push(forward);
        }
        if !reverse.is_empty() {
            self.reverse.push(reverse);
        }
        Ok(())
    }

    /// The committed segments for one strand, in commit order.
    pub fn segments(&self, strand: Strand) -> &[CoverageSegment] {
        match strand {
            Strand::Forward => &self.forward,
            Strand::Reverse => &self.reverse,
        }
    }

    /// Strand-split coverage over the 1-based inclusive range
    /// `[start, stop]`, as `(forward, reverse)` of length
    /// `stop - start + 1`.
    ///
    /// Positions covered by no committed chunk are zero; where committed
    /// chunks overlap, the earliest-committed chunk is authoritative. This
    /// never fails: a range before, between or past all declared data is
    /// simply all zeros. `start > stop` yields empty vectors.
    pub fn get_coverage(&self, start: u32, stop: u32) -> (Vec<f32>, Vec<f32>) {
        (
            strand_coverage(&self.forward, start, stop),
            strand_coverage(&self.reverse, start, stop),
        )
    }
}

fn strand_coverage(segments: &[CoverageSegment], start: u32, stop: u32) -> Vec<f32> {
    if stop < start {
        return Vec::new();
    }
    let len = (stop - start + 1) as usize;
    let mut window = vec![0.0f32; len];
    let mut claimed = vec![false; len];
    // commit order, first claim wins; no sort across chunks is assumed
    for seg in segments {
        if seg.is_empty() || seg.stop() < start || seg.start() > stop {
            continue;
        }
        let lo = seg.start().max(start);
        let hi = seg.stop().min(stop);
        for pos in lo..=hi {
            let at = (pos - start) as usize;
            if !claimed[at] {
                claimed[at] = true;
                window[at] = seg.values()[(pos - seg.start()) as usize];
            }
        }
    }
    window
}
