use thiserror::Error;

use crate::wig::segment::{CoverageSegment, SegmentError};
use crate::wig::Strand;

/// Structural problems in a `fixedStep`/`variableStep` declaration line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("'chrom' field is not present")]
    MissingChrom,
    #[error("'start' must be defined for 'fixedStep'")]
    MissingStart,
    #[error("'{value}' is not allowed as {attr} value")]
    BadAttribute { attr: &'static str, value: String },
    #[error("unrecognized attribute '{0}'")]
    UnknownAttribute(String),
    #[error("'span' cannot be greater than 'step'")]
    SpanOverStep,
}

/// Problems in a single data line.
#[derive(Error, Debug, PartialEq)]
pub enum DataLineError {
    #[error("cannot parse '{0}' as a coverage value")]
    BadValue(String),
    #[error("cannot parse '{0}' as '<position> <value>'")]
    BadPair(String),
    #[error("position 0 is not a valid 1-based coordinate")]
    ZeroPosition,
    #[error("position {pos} does not ascend past {prev}")]
    Unsorted { pos: u32, prev: u32 },
}

/// Attributes parsed from a declaration line's `key=value` fields.
///
/// Recognized keys are `chrom` (required), `start` (required for
/// `fixedStep`), `step` (default 1) and `span` (default 1); anything else
/// is rejected. Relations between the fields are validated when a chunk is
/// built from the params.
#[derive(Debug, Clone, Default)]
pub struct DeclarationParams {
    pub chrom: Option<String>,
    pub start: Option<u32>,
    pub step: Option<u32>,
    pub span: Option<u32>,
}

impl DeclarationParams {
    /// Records one `key=value` attribute.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), DeclarationError> {
        match key {
            "chrom" => self.chrom = Some(value.to_owned()),
            "start" => self.start = Some(parse_attr("start", value)?),
            "step" => self.step = Some(parse_attr("step", value)?),
            "span" => self.span = Some(parse_attr("span", value)?),
            _ => return Err(DeclarationError::UnknownAttribute(key.to_owned())),
        }
        Ok(())
    }
}

fn parse_attr(attr: &'static str, value: &str) -> Result<u32, DeclarationError> {
    value.parse().map_err(|_| DeclarationError::BadAttribute {
        attr,
        value: value.to_owned(),
    })
}

fn require_span(params: &DeclarationParams) -> Result<u32, DeclarationError> {
    let span = params.span.unwrap_or(1);
    if span == 0 {
        return Err(DeclarationError::BadAttribute {
            attr: "span",
            value: span.to_string(),
        });
    }
    Ok(span)
}

/// One `fixedStep` declaration plus its data lines. Positions are implied
/// by a cursor starting at the declared start and advancing by the step.
#[derive(Debug, Clone)]
pub struct FixedStepChunk {
    chrom: String,
    start: u32,
    step: u32,
    span: u32,
    cursor: u32,
    forward: Vec<(u32, f32)>,
    reverse: Vec<(u32, f32)>,
}

impl FixedStepChunk {
    pub fn new(params: DeclarationParams) -> Result<FixedStepChunk, DeclarationError> {
        let span = require_span(&params)?;
        let chrom = params.chrom.ok_or(DeclarationError::MissingChrom)?;
        let start = params.start.ok_or(DeclarationError::MissingStart)?;
        let step = params.step.unwrap_or(1);
        if start == 0 {
            return Err(DeclarationError::BadAttribute {
                attr: "start",
                value: start.to_string(),
            });
        }
        if step == 0 {
            return Err(DeclarationError::BadAttribute {
                attr: "step",
                value: step.to_string(),
            });
        }
        if span > step {
            return Err(DeclarationError::SpanOverStep);
        }
        Ok(FixedStepChunk {
            chrom,
            start,
            step,
            span,
            cursor: start,
            forward: Vec::new(),
            reverse: Vec::new(),
        })
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    fn parse_data_line(&mut self, line: &str) -> Result<(), DataLineError> {
        let value: f32 = line
            .parse()
            .map_err(|_| DataLineError::BadValue(line.to_owned()))?;
        if !value.is_finite() {
            return Err(DataLineError::BadValue(line.to_owned()));
        }
        if value >= 0.0 {
            self.forward.push((self.cursor, value));
        } else {
            self.reverse.push((self.cursor, -value));
        }
        self.cursor += self.step;
        Ok(())
    }

    fn last_pos(&self) -> Option<u32> {
        if self.cursor == self.start {
            None
        } else {
            Some(self.cursor - self.step)
        }
    }
}

/// One `variableStep` declaration plus its data lines. Every data line
/// carries its own position; positions must be strictly ascending.
#[derive(Debug, Clone)]
pub struct VariableStepChunk {
    chrom: String,
    span: u32,
    first: Option<u32>,
    last: Option<u32>,
    forward: Vec<(u32, f32)>,
    reverse: Vec<(u32, f32)>,
}

impl VariableStepChunk {
    pub fn new(params: DeclarationParams) -> Result<VariableStepChunk, DeclarationError> {
        let span = require_span(&params)?;
        let chrom = params.chrom.ok_or(DeclarationError::MissingChrom)?;
        // `start`/`step` carry no meaning for variableStep; they are
        // accepted and ignored when present.
        Ok(VariableStepChunk {
            chrom,
            span,
            first: None,
            last: None,
            forward: Vec::new(),
            reverse: Vec::new(),
        })
    }

    fn parse_data_line(&mut self, line: &str) -> Result<(), DataLineError> {
        let mut fields = line.split_whitespace();
        let (pos, value) = match (fields.next(), fields.next(), fields.next()) {
            (Some(pos), Some(value), None) => (pos, value),
            _ => return Err(DataLineError::BadPair(line.to_owned())),
        };
        let pos: u32 = pos
            .parse()
            .map_err(|_| DataLineError::BadPair(line.to_owned()))?;
        let value: f32 = value
            .parse()
            .map_err(|_| DataLineError::BadPair(line.to_owned()))?;
        if !value.is_finite() {
            return Err(DataLineError::BadPair(line.to_owned()));
        }
        if pos == 0 {
            return Err(DataLineError::ZeroPosition);
        }
        if let Some(prev) = self.last {
            if pos <= prev {
                return Err(DataLineError::Unsorted { pos, prev });
            }
        }
        if value >= 0.0 {
            self.forward.push((pos, value));
        } else {
            self.reverse.push((pos, -value));
        }
        if self.first.is_none() {
            self.first = Some(pos);
        }
        self.last = Some(pos);
        Ok(())
    }
}

/// A declaration line plus the data lines that follow it, before the next
/// declaration. Values are split by sign into per-strand `(position,
/// magnitude)` lists in increasing position order.
#[derive(Debug, Clone)]
pub enum WigChunk {
    FixedStep(FixedStepChunk),
    VariableStep(VariableStepChunk),
}

impl WigChunk {
    pub fn fixed_step(params: DeclarationParams) -> Result<WigChunk, DeclarationError> {
        Ok(WigChunk::FixedStep(FixedStepChunk::new(params)?))
    }

    pub fn variable_step(params: DeclarationParams) -> Result<WigChunk, DeclarationError> {
        Ok(WigChunk::VariableStep(VariableStepChunk::new(params)?))
    }

    pub fn is_fixed_step(&self) -> bool {
        matches!(self, WigChunk::FixedStep(_))
    }

    pub fn chrom(&self) -> &str {
        match self {
            WigChunk::FixedStep(c) => &c.chrom,
            WigChunk::VariableStep(c) => &c.chrom,
        }
    }

    /// Number of consecutive positions each data value covers.
    pub fn span(&self) -> u32 {
        match self {
            WigChunk::FixedStep(c) => c.span,
            WigChunk::VariableStep(c) => c.span,
        }
    }

    /// First covered position: the declared start for `fixedStep`, the
    /// first data line's position for `variableStep` (`None` before any
    /// data line).
    pub fn start(&self) -> Option<u32> {
        match self {
            WigChunk::FixedStep(c) => Some(c.start),
            WigChunk::VariableStep(c) => c.first,
        }
    }

    /// Last covered position: last declared position plus span minus one.
    /// `None` for a chunk with no data lines.
    pub fn stop(&self) -> Option<u32> {
        let last = match self {
            WigChunk::FixedStep(c) => c.last_pos(),
            WigChunk::VariableStep(c) => c.last,
        };
        last.map(|p| p + self.span() - 1)
    }

    /// Parses one data line: a bare signed value for `fixedStep`, a
    /// `<position> <value>` pair for `variableStep`. The sign selects the
    /// strand; the stored value is the magnitude.
    pub fn parse_data_line(&mut self, line: &str) -> Result<(), DataLineError> {
        match self {
            WigChunk::FixedStep(c) => c.parse_data_line(line),
            WigChunk::VariableStep(c) => c.parse_data_line(line),
        }
    }

    /// The sparse `(position, value)` pairs declared for one strand.
    pub fn data(&self, strand: Strand) -> &[(u32, f32)] {
        let (forward, reverse) = match self {
            WigChunk::FixedStep(c) => (&c.forward, &c.reverse),
            WigChunk::VariableStep(c) => (&c.forward, &c.reverse),
        };
        match strand {
            Strand::Forward => forward,
            Strand::Reverse => reverse,
        }
    }

    /// Materializes the sparse per-strand lists into dense segments, both
    /// spanning `[start, stop]` of the whole chunk; a strand with no data
    /// yields the empty segment. Each `(position, value)` pair is written
    /// over its `span`-wide window; within one chunk a later data line wins
    /// where span windows overlap.
    pub fn to_coverage_segments(
        &self,
    ) -> Result<(CoverageSegment, CoverageSegment), SegmentError> {
        Ok((
            self.strand_segment(Strand::Forward)?,
            self.strand_segment(Strand::Reverse)?,
        ))
    }

    fn strand_segment(&self, strand: Strand) -> Result<CoverageSegment, SegmentError> {
        let pairs = self.data(strand);
        if pairs.is_empty() {
            return Ok(CoverageSegment::empty());
        }
        let (start, stop) = match (self.start(), self.stop()) {
            (Some(start), Some(stop)) => (start, stop),
            // unreachable once a strand holds data, but an empty segment
            // is the honest answer either way
            _ => return Ok(CoverageSegment::empty()),
        };
        let mut segment = CoverageSegment::with_bounds(start, stop);
        let span = self.span();
        for &(pos, value) in pairs {
            for p in pos..pos + span {
                segment.set(p, value)?;
            }
        }
        Ok(segment)
    }
}
