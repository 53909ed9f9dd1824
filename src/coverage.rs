//! The coverage-provider boundary.
//!
//! Downstream tooling asks for coverage windows around annotated positions
//! without caring whether the values come from a parsed track or from an
//! alignment file. [`CoverageSource`] is that seam: a region descriptor
//! from the annotation layer plus a window shape in, two strand rows out.
//! Rows are `Option<f32>` so that positions a source cannot supply are an
//! explicit unknown (`None`), distinct from a covered position with zero
//! depth.
//!
//! All 0-based/1-based translation belongs to implementations of this
//! boundary; the store underneath is 1-based inclusive throughout.

use itertools::repeat_n;
use thiserror::Error;

use crate::wig::Genome;

#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("the requested chromosome ({0}) is not covered by this source")]
    UnknownChromosome(String),
}

/// The fields of an annotation record that drive a coverage query. The
/// annotation file itself is parsed elsewhere; this is only the slice of a
/// record a provider needs.
///
/// All coordinates are 1-based inclusive, with
/// `start <= ref_pos <= stop`.
#[derive(Debug, Clone)]
pub struct AnnotationRegion {
    pub chromosome: String,
    /// Reference position the window is anchored on.
    pub ref_pos: u32,
    /// Feature bounds, used by [`Window::Bounds`] queries.
    pub start: u32,
    pub stop: u32,
}

/// Window shape for a coverage query.
#[derive(Debug, Clone, Copy)]
pub enum Window {
    /// `before` positions upstream of the reference position through
    /// `after` positions downstream; the row length is
    /// `before + after + 1`.
    Around { before: u32, after: u32 },
    /// The region's own `[start, stop]` bounds, padded with unknowns so
    /// that rows of differently-sized regions align on the reference
    /// position: `max_left`/`max_right` are the widest left/right extent
    /// over the whole annotation set.
    Bounds { max_left: u32, max_right: u32 },
}

/// One strand's worth of window coverage; `None` marks positions beyond
/// what the source can supply.
pub type CoverageRow = Vec<Option<f32>>;

/// Common contract between coverage providers.
///
/// The quality threshold only applies to alignment-backed sources, which
/// drop reads mapped below it; a track-backed source ignores it.
pub trait CoverageSource {
    fn coverage(
        &self,
        region: &AnnotationRegion,
        window: Window,
        quality_threshold: u8,
    ) -> Result<(CoverageRow, CoverageRow), CoverageError>;
}

/// Coverage provider backed by a parsed wiggle [`Genome`].
pub struct WigCoverageSource {
    genome: Genome,
}

impl WigCoverageSource {
    pub fn new(genome: Genome) -> WigCoverageSource {
        WigCoverageSource { genome }
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }
}

impl CoverageSource for WigCoverageSource {
    fn coverage(
        &self,
        region: &AnnotationRegion,
        window: Window,
        _quality_threshold: u8,
    ) -> Result<(CoverageRow, CoverageRow), CoverageError> {
        let chrom = self
            .genome
            .get(&region.chromosome)
            .ok_or_else(|| CoverageError::UnknownChromosome(region.chromosome.clone()))?;
        let (start, stop, pad_left, pad_right) = match window {
            Window::Around { before, after } => {
                // the window may reach past the start of the chromosome;
                // those positions are unknown, not zero
                let wanted = i64::from(region.ref_pos) - i64::from(before);
                let start = wanted.max(1) as u32;
                let pad_left = (1 - wanted).max(0) as usize;
                (start, region.ref_pos + after, pad_left, 0)
            }
            Window::Bounds {
                max_left,
                max_right,
            } => {
                let left = region.ref_pos.saturating_sub(region.start);
                let right = region.stop.saturating_sub(region.ref_pos);
                (
                    region.start,
                    region.stop,
                    max_left.saturating_sub(left) as usize,
                    max_right.saturating_sub(right) as usize,
                )
            }
        };
        let (forward, reverse) = chrom.get_coverage(start, stop);
        Ok((
            pad(forward, pad_left, pad_right),
            pad(reverse, pad_left, pad_right),
        ))
    }
}

fn pad(values: Vec<f32>, left: usize, right: usize) -> CoverageRow {
    let mut row = Vec::with_capacity(left + values.len() + right);
    row.extend(repeat_n(None, left));
    row.extend(values.into_iter().map(Some));
    row.extend(repeat_n(None, right));
    row
}
