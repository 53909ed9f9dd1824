use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use log::debug;

use crate::utils::streaming_linereader::StreamingLineReader;
use crate::wig::chrom::Chromosome;
use crate::wig::chunk::{DeclarationParams, WigChunk};
use crate::wig::genome::Genome;
use crate::wig::{Strand, WigError};

/// Line-classification state machine over a wiggle track.
///
/// Each line is classified as blank/comment, track (metadata), declaration
/// or data. A declaration opens a new [`WigChunk`]; the following data
/// lines mutate it; the next declaration (or end of input) commits it into
/// its chromosome's store. [`parse`] consumes the parser and returns the
/// populated [`Genome`]. Any structural violation aborts the parse; there
/// is no partial-result recovery.
///
/// [`parse`]: WigParser::parse
pub struct WigParser<B> {
    lines: StreamingLineReader<B>,
}

impl<R: Read> WigParser<BufReader<R>> {
    pub fn new(read: R) -> WigParser<BufReader<R>> {
        WigParser {
            lines: StreamingLineReader::new(BufReader::new(read)),
        }
    }
}

/// Opens `path` and parses it, transparently decompressing gzip input.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Genome, WigError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if is_gzipped(path)? {
        WigParser::new(MultiGzDecoder::new(file)).parse()
    } else {
        WigParser::new(file).parse()
    }
}

/// Checks for the gzip magic at the start of the file.
fn is_gzipped(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 2];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(magic == [0x1f, 0x8b]),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

impl<B: BufRead> WigParser<B> {
    pub fn parse(mut self) -> Result<Genome, WigError> {
        let mut genome = Genome::new();
        let mut current: Option<WigChunk> = None;
        while let Some(next) = self.lines.read() {
            let (num, raw) = next?;
            let line = raw.trim();
            if line.is_empty() || is_comment_line(line) {
                continue;
            } else if is_track_line(line) {
                genome.set_metadata(parse_track_line(line, num)?);
            } else if is_declaration_line(line) {
                if let Some(done) = current.take() {
                    commit(&mut genome, done)?;
                }
                let chunk = parse_declaration_line(line, num)?;
                if !genome.contains(chunk.chrom()) {
                    genome.add(Chromosome::new(chunk.chrom()));
                }
                current = Some(chunk);
            } else {
                match current.as_mut() {
                    Some(chunk) => chunk
                        .parse_data_line(line)
                        .map_err(|source| WigError::Data { line: num, source })?,
                    None => {
                        return Err(WigError::DataOutsideChunk {
                            line: num,
                            data: line.to_owned(),
                        })
                    }
                }
            }
        }
        if let Some(done) = current.take() {
            commit(&mut genome, done)?;
        }
        Ok(genome)
    }
}

fn commit(genome: &mut Genome, chunk: WigChunk) -> Result<(), WigError> {
    debug!(
        "committing {} chunk for {}: {} forward / {} reverse values",
        if chunk.is_fixed_step() {
            "fixedStep"
        } else {
            "variableStep"
        },
        chunk.chrom(),
        chunk.data(Strand::Forward).len(),
        chunk.data(Strand::Reverse).len(),
    );
    let chrom = genome
        .get_mut(chunk.chrom())
        .ok_or_else(|| WigError::ChromosomeNotFound(chunk.chrom().to_owned()))?;
    chrom.add_chunk(&chunk)?;
    Ok(())
}

fn first_word(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}

fn is_comment_line(line: &str) -> bool {
    line.starts_with('#')
}

fn is_track_line(line: &str) -> bool {
    first_word(line) == Some("track")
}

fn is_declaration_line(line: &str) -> bool {
    matches!(first_word(line), Some("fixedStep") | Some("variableStep"))
}

/// Parses `track key=value key="quoted value" ...` into a metadata map.
/// The `type` key is required.
fn parse_track_line(line: &str, num: u64) -> Result<HashMap<String, String>, WigError> {
    let rest = &line["track".len()..];
    let mut metadata = HashMap::new();
    for field in split_quoted_fields(rest) {
        let (key, value) = field.split_once('=').ok_or_else(|| WigError::InvalidField {
            line: num,
            field: field.clone(),
        })?;
        metadata.insert(key.to_owned(), unquote(value).to_owned());
    }
    if !metadata.contains_key("type") {
        return Err(WigError::MissingTrackType { line: num });
    }
    Ok(metadata)
}

/// Parses a `fixedStep`/`variableStep` line into the matching chunk
/// variant.
fn parse_declaration_line(line: &str, num: u64) -> Result<WigChunk, WigError> {
    let mut fields = line.split_whitespace();
    // the caller classified the line, so the keyword is present
    let kind = fields.next().unwrap_or_default();
    let mut params = DeclarationParams::default();
    for field in fields {
        let (key, value) = field.split_once('=').ok_or_else(|| WigError::InvalidField {
            line: num,
            field: field.to_owned(),
        })?;
        params
            .set(key, unquote(value))
            .map_err(|source| WigError::Declaration { line: num, source })?;
    }
    let chunk = if kind == "fixedStep" {
        WigChunk::fixed_step(params)
    } else {
        WigChunk::variable_step(params)
    };
    chunk.map_err(|source| WigError::Declaration { line: num, source })
}

/// Splits on whitespace, except inside single or double quotes.
fn split_quoted_fields(s: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quote: Option<char> = None;
    for c in s.chars() {
        match quote {
            Some(q) => {
                field.push(c);
                if c == q {
                    quote = None;
                }
            }
            None if c == '"' || c == '\'' => {
                field.push(c);
                quote = Some(c);
            }
            None if c.is_whitespace() => {
                if !field.is_empty() {
                    fields.push(std::mem::take(&mut field));
                }
            }
            None => field.push(c),
        }
    }
    if !field.is_empty() {
        fields.push(field);
    }
    fields
}

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
