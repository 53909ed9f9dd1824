//! The track-coverage store: parsing of WIG-like coverage tracks into a
//! random-access, strand-separated, gap-filled representation.
//!
//! There are three layers here. [`CoverageSegment`] is a dense,
//! bounds-checked array of values over one contiguous range of one strand.
//! [`WigChunk`] owns one declaration plus its data lines as sparse
//! `(position, value)` pairs split by sign, and materializes them into
//! segments. [`Chromosome`] holds the committed segments in parse order and
//! answers arbitrary-range, zero-filled, strand-split queries;
//! [`Genome`] collects the chromosomes by name. [`WigParser`] drives the
//! whole pipeline from a line stream.

pub(crate) mod chrom;
pub(crate) mod chunk;
pub(crate) mod genome;
pub(crate) mod parser;
pub(crate) mod segment;

use std::io;

use thiserror::Error;

use chunk::{DataLineError, DeclarationError};
use segment::SegmentError;

/// Orientation of a coverage value. The track format encodes it as the
/// sign of the value; stored coverage is always the magnitude.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

/// Errors raised while reading a wiggle track. All structural violations
/// are fatal: the parse aborts at the offending line.
#[derive(Error, Debug)]
pub enum WigError {
    #[error("line {line}: {source}")]
    Declaration { line: u64, source: DeclarationError },
    #[error("line {line}: {source}")]
    Data { line: u64, source: DataLineError },
    #[error("line {line}: data line '{data}' is not preceded by a declaration")]
    DataOutsideChunk { line: u64, data: String },
    #[error("line {line}: track line is missing the 'type' attribute")]
    MissingTrackType { line: u64 },
    #[error("line {line}: cannot parse attribute '{field}' as key=value")]
    InvalidField { line: u64, field: String },
    #[error("no chromosome named '{0}'")]
    ChromosomeNotFound(String),
    #[error("{0}")]
    Segment(#[from] SegmentError),
    #[error("error reading track: {0}")]
    Io(#[from] io::Error),
}

pub use chrom::*;
pub use chunk::*;
pub use genome::*;
pub use parser::*;
pub use segment::*;
