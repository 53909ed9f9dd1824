/*!
Wigcov builds strand-split, per-base coverage stores from WIG-like coverage
tracks, where the sign of a value encodes the strand it belongs to:
positive values are forward-strand coverage, negative values are
reverse-strand coverage of the same magnitude.

## Reading

The entrypoint for reading a track is [`WigParser::new`], which takes any
type implementing [`Read`][std::io::Read], or [`parse_file`], which opens a
path and transparently decompresses gzip input. Parsing yields a
[`Genome`]: one [`Chromosome`] coverage store per declared chromosome plus
the track line's metadata.

## Querying

The main query is [`Chromosome::get_coverage`], which returns a pair of
equal-length forward/reverse vectors for any 1-based inclusive range. The
result is gap-filled: positions no declaration covered are zero, and the
query never fails, however far outside the declared data the range reaches.

## Behind a provider

[`coverage::CoverageSource`] adapts the store to the call contract shared
with alignment-backed coverage providers: annotation-driven windows,
explicit unknown markers, a quality threshold that track-backed sources
ignore. See [`coverage::WigCoverageSource`].
*/

pub mod coverage;
pub mod utils;
mod wig;

pub use wig::*;
